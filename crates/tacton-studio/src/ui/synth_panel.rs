//! Synthesis controls: directive input, trigger, and error banner

use iced::widget::{button, column, text, text_input};
use iced::{Color, Element, Length};

use super::message::Message;

/// Render the synthesis panel.
///
/// The trigger stays disabled while a request is outstanding so only one
/// synthesis runs at a time.
pub fn view<'a>(
    directive: &'a str,
    processing: bool,
    has_video: bool,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let directive_input = text_input("Describe the motion to emphasize...", directive)
        .on_input(Message::SetDirective)
        .padding(8)
        .size(14);

    let label = if processing {
        "Synthesizing..."
    } else {
        "Synthesize Pattern"
    };
    let synthesize_btn = button(text(label).size(14))
        .on_press_maybe((has_video && !processing).then_some(Message::Synthesize))
        .width(Length::Fill)
        .padding(12);

    let mut panel = column![
        text("Directive").size(12),
        directive_input,
        synthesize_btn,
    ]
    .spacing(8);

    if let Some(message) = error {
        panel = panel.push(
            text(message)
                .size(12)
                .color(Color::from_rgb(0.95, 0.35, 0.35)),
        );
    }

    panel.into()
}
