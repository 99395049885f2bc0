//! Tacton Studio - video-to-haptics GUI application

use tacton_studio::ui::TactonApp;

fn title(_app: &TactonApp) -> String {
    String::from("tacton-studio - Haptic Synthesis")
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application(TactonApp::new, TactonApp::update, TactonApp::view)
        .title(title)
        .window_size(iced::Size::new(1100.0, 780.0))
        .theme(TactonApp::theme)
        .subscription(TactonApp::subscription)
        .run()
}
