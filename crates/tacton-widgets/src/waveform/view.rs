//! Canvas program for the waveform editor

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Canvas, Event, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Element, Length, Point, Rectangle, Size, Theme};

use tacton_core::pattern::{EventKind, HapticPattern};

use super::geometry::{nearest_handle, Mapping};
use super::state::WaveformState;
use super::{HANDLE_RADIUS, TRANSIENT_PULSE_WIDTH, WAVEFORM_HEIGHT};
use crate::theme;

/// Events published by the waveform editor.
///
/// The widget never mutates the document; the session controller applies
/// these and passes the updated pattern back down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveformEvent {
    /// A handle drag moved: set this event's intensity (clamped, 3 decimals)
    IntensityEdited { index: usize, value: f64 },
    /// Background click: seek playback to this time in seconds
    Scrubbed(f64),
}

/// Create the waveform editor element
pub fn haptic_waveform<'a>(
    state: &'a WaveformState,
    pattern: &'a HapticPattern,
) -> Element<'a, WaveformEvent> {
    Canvas::new(WaveformCanvas { state, pattern })
        .width(Length::Fill)
        .height(Length::Fixed(WAVEFORM_HEIGHT))
        .into()
}

/// Pointer gesture state machine: idle, or dragging exactly one handle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Gesture {
    #[default]
    Idle,
    Dragging(usize),
}

/// Canvas-local interaction state
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    gesture: Gesture,
    hovered: Option<usize>,
}

struct WaveformCanvas<'a> {
    state: &'a WaveformState,
    pattern: &'a HapticPattern,
}

impl<'a> Program<WaveformEvent> for WaveformCanvas<'a> {
    type State = Interaction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<WaveformEvent>> {
        let mapping = Mapping::new(bounds.width, bounds.height, self.state.duration());

        if let Some(position) = cursor.position_in(bounds) {
            match event {
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    // A press while a drag is in flight is ignored: one
                    // handle at a time.
                    if interaction.gesture != Gesture::Idle {
                        return None;
                    }
                    let handles = mapping.handle_positions(self.pattern);
                    if let Some(index) = nearest_handle(&handles, position.x, position.y) {
                        interaction.gesture = Gesture::Dragging(index);
                    } else {
                        return Some(canvas::Action::publish(WaveformEvent::Scrubbed(
                            mapping.x_to_time(position.x),
                        )));
                    }
                }
                Event::Mouse(mouse::Event::CursorMoved { .. }) => match interaction.gesture {
                    Gesture::Dragging(index) => {
                        return Some(canvas::Action::publish(WaveformEvent::IntensityEdited {
                            index,
                            value: mapping.drag_value(position.y),
                        }));
                    }
                    Gesture::Idle => {
                        let handles = mapping.handle_positions(self.pattern);
                        interaction.hovered = nearest_handle(&handles, position.x, position.y);
                    }
                },
                Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                    interaction.gesture = Gesture::Idle;
                }
                _ => {}
            }
        } else if matches!(event, Event::Mouse(mouse::Event::ButtonReleased(_))) {
            // Release outside the canvas still ends the drag
            interaction.gesture = Gesture::Idle;
            interaction.hovered = None;
        }

        None
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match interaction.gesture {
            Gesture::Dragging(_) => mouse::Interaction::Grabbing,
            Gesture::Idle if interaction.hovered.is_some() => mouse::Interaction::Grab,
            Gesture::Idle if cursor.is_over(bounds) => mouse::Interaction::Pointer,
            Gesture::Idle => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let mapping = Mapping::new(bounds.width, bounds.height, self.state.duration());
        let baseline = mapping.baseline_y();

        // Background
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::WAVEFORM_BG);

        // Baseline across the full graph width
        frame.stroke(
            &Path::line(
                Point::new(mapping.time_to_x(0.0), baseline),
                Point::new(mapping.time_to_x(mapping.duration()), baseline),
            ),
            Stroke::default().with_color(theme::BASELINE_COLOR).with_width(1.0),
        );

        let order = self.pattern.display_order();

        // Filled envelope: walk events in time order, a narrow pulse per
        // transient and a flat-topped plateau per continuous event, closed
        // back along the baseline.
        if !order.is_empty() && mapping.duration() > 0.0 {
            let envelope = Path::new(|builder| {
                builder.move_to(Point::new(mapping.time_to_x(0.0), baseline));
                for &index in &order {
                    let event = &self.pattern.pattern[index].event;
                    let peak_y = mapping.value_to_y(event.intensity());
                    match event.kind {
                        EventKind::Transient => {
                            let x = mapping.time_to_x(event.time);
                            let half = TRANSIENT_PULSE_WIDTH / 2.0;
                            builder.line_to(Point::new(x - half, baseline));
                            builder.line_to(Point::new(x, peak_y));
                            builder.line_to(Point::new(x + half, baseline));
                        }
                        EventKind::Continuous => {
                            let x0 = mapping.time_to_x(event.time);
                            let x1 =
                                mapping.time_to_x(event.time + event.effective_duration());
                            builder.line_to(Point::new(x0, baseline));
                            builder.line_to(Point::new(x0, peak_y));
                            builder.line_to(Point::new(x1, peak_y));
                            builder.line_to(Point::new(x1, baseline));
                        }
                    }
                }
                builder.line_to(Point::new(mapping.time_to_x(mapping.duration()), baseline));
                builder.close();
            });
            frame.fill(&envelope, theme::ENVELOPE_FILL);
            frame.stroke(
                &envelope,
                Stroke::default().with_color(theme::ENVELOPE_LINE).with_width(1.5),
            );
        }

        // Per-event stems and drag handles (document index order so handle
        // indices match the document)
        let handles = mapping.handle_positions(self.pattern);
        for (index, &(x, y)) in handles.iter().enumerate() {
            frame.stroke(
                &Path::line(Point::new(x, baseline), Point::new(x, y)),
                Stroke::default().with_color(theme::STEM_COLOR).with_width(1.0),
            );

            let active = interaction.hovered == Some(index)
                || interaction.gesture == Gesture::Dragging(index);
            let color = if active {
                theme::HANDLE_ACTIVE_COLOR
            } else {
                theme::HANDLE_COLOR
            };
            frame.fill(&Path::circle(Point::new(x, y), HANDLE_RADIUS), color);

            if active {
                if let Some(event) = self.pattern.event(index) {
                    frame.fill_text(Text {
                        content: format_intensity(event.intensity()),
                        position: Point::new(x + 8.0, y - 10.0),
                        size: 12.0.into(),
                        color: theme::TOOLTIP_COLOR,
                        align_x: Horizontal::Left.into(),
                        align_y: Vertical::Center.into(),
                        ..Text::default()
                    });
                }
            }
        }

        // Playhead
        let playhead_x = mapping.time_to_x(self.state.position());
        frame.stroke(
            &Path::line(
                Point::new(playhead_x, 0.0),
                Point::new(playhead_x, bounds.height),
            ),
            Stroke::default().with_color(theme::PLAYHEAD_COLOR).with_width(2.0),
        );

        // Outline
        frame.stroke(
            &Path::rectangle(Point::ORIGIN, Size::new(bounds.width, bounds.height)),
            Stroke::default().with_color(theme::BASELINE_COLOR).with_width(1.0),
        );

        vec![frame.into_geometry()]
    }
}

/// Hover tooltip text: intensity to two decimals
fn format_intensity(value: f64) -> String {
    format!("{:.2}", value)
}
