//! User interface modules for tacton-studio

pub mod app;
pub mod message;
pub mod session;
pub mod synth_panel;
pub mod transport;

pub use app::TactonApp;
pub use message::Message;
