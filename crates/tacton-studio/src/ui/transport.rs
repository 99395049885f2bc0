//! Playback transport controls
//!
//! Play/pause toggle, stop, and a time readout. Controls are disabled until
//! a video is loaded.

use iced::widget::{button, row, text};
use iced::{Alignment, Element, Length};

use super::message::Message;
use super::session::SessionState;

/// Render the transport row
pub fn view(session: &SessionState) -> Element<'_, Message> {
    let enabled = session.video.is_some();
    let is_playing = session.playback.is_playing();

    let play_pause = if is_playing {
        button(text("▮▮").size(16))
            .on_press(Message::Pause)
            .width(Length::Fixed(52.0))
    } else {
        button(text("▶").size(16))
            .on_press_maybe(enabled.then_some(Message::Play))
            .width(Length::Fixed(52.0))
    };

    let stop = button(text("■").size(16))
        .on_press_maybe(enabled.then_some(Message::Stop))
        .width(Length::Fixed(52.0));

    let readout = text(format!(
        "{:.3}s / {:.1}s",
        session.playback.position(),
        session.duration()
    ))
    .size(13);

    row![play_pause, stop, readout]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
