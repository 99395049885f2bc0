//! Main application state and iced implementation

use std::time::Duration;

use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Element, Length, Task, Theme};

use tacton_core::synth::SynthesisClient;
use tacton_core::video::FrameSampler;
use tacton_widgets::{haptic_waveform, WaveformEvent, WaveformState};

use super::message::Message;
use super::session::{self, SessionState};
use super::{synth_panel, transport};
use crate::config::{self, Config};
use crate::export;

/// Main application
pub struct TactonApp {
    /// Current session (video, document, playback)
    session: SessionState,
    /// Waveform view state (duration + playhead)
    waveform: WaveformState,
    /// Free-text synthesis directive
    directive: String,
    /// A synthesis request is outstanding (the trigger stays disabled)
    processing: bool,
    /// A video probe is outstanding
    loading_video: bool,
    /// Last synthesis failure, shown until retry or reset
    error: Option<String>,
    /// Status line at the bottom of the window
    status: String,
    /// Position of the in-flight scrub preview request
    preview_inflight: Option<f64>,
    /// Latest scrub position requested while one was in flight (latest wins)
    preview_queued: Option<f64>,
    /// Global configuration
    config: Config,
}

impl TactonApp {
    /// Create a new application instance
    pub fn new() -> (Self, Task<Message>) {
        let config_path = config::default_config_path();
        let config = config::load_config(&config_path);
        log::info!(
            "Loaded config: model {}, {} frames per request",
            config.synthesis.model,
            config.sampling.frame_count
        );

        let app = Self {
            session: SessionState::default(),
            waveform: WaveformState::new(),
            directive: String::new(),
            processing: false,
            loading_video: false,
            error: None,
            status: String::from("Load a video to begin"),
            preview_inflight: None,
            preview_queued: None,
            config,
        };

        (app, Task::none())
    }

    /// Update state based on message
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Video
            Message::PickVideo => {
                return Task::perform(
                    async {
                        let file = rfd::AsyncFileDialog::new()
                            .add_filter(
                                "Video files",
                                &["mp4", "mov", "m4v", "webm", "mkv", "avi"],
                            )
                            .pick_file()
                            .await;
                        file.map(|f| f.path().to_path_buf())
                    },
                    Message::VideoSelected,
                );
            }
            Message::VideoSelected(Some(path)) => {
                self.loading_video = true;
                self.status = format!("Loading {}...", path.display());
                let max_width = self.config.sampling.max_width;
                return Task::perform(
                    async move {
                        session::load_video(path, max_width).map_err(|e| e.to_string())
                    },
                    Message::VideoLoaded,
                );
            }
            Message::VideoSelected(None) => {}
            Message::VideoLoaded(Ok(video)) => {
                self.loading_video = false;
                self.status = format!(
                    "Loaded {} ({:.1}s, {}x{})",
                    video.display_name(),
                    video.metadata.duration,
                    video.metadata.width,
                    video.metadata.height
                );

                // Fresh document state for the new video
                self.session.document = None;
                self.session.playback.stop();
                self.session.preview = video
                    .poster
                    .as_ref()
                    .map(|jpeg| image::Handle::from_bytes(jpeg.clone()));
                self.error = None;

                self.waveform = WaveformState::new();
                self.waveform.set_duration(video.metadata.duration);
                self.session.video = Some(video);
            }
            Message::VideoLoaded(Err(e)) => {
                self.loading_video = false;
                log::error!("Failed to load video: {}", e);
                self.status = format!("Failed to load video: {}", e);
            }
            Message::ResetSession => {
                self.session.reset();
                self.waveform = WaveformState::new();
                self.directive.clear();
                self.error = None;
                self.preview_inflight = None;
                self.preview_queued = None;
                self.status = String::from("Load a video to begin");
            }

            // Synthesis
            Message::SetDirective(directive) => {
                self.directive = directive;
            }
            Message::Synthesize => {
                let Some(video) = self.session.video.clone() else {
                    return Task::none();
                };
                if self.processing {
                    return Task::none();
                }

                self.processing = true;
                self.error = None;
                self.status = String::from("Sampling frames and synthesizing...");

                let directive = self.directive.clone();
                let sampling = self.config.sampling.clone();
                let synthesis = self.config.synthesis.clone();
                let api_key = synthesis.resolved_api_key();

                return Task::perform(
                    async move {
                        let sampler = FrameSampler::new(
                            sampling.frame_count,
                            sampling.max_width,
                            sampling.jpeg_quality,
                        );
                        let frames = sampler.sample(&video.path, video.metadata.duration);

                        let client =
                            SynthesisClient::new(synthesis.endpoint, synthesis.model, api_key)
                                .with_timeout(Duration::from_secs(synthesis.timeout_secs));
                        client
                            .synthesize(&frames, &directive)
                            .map_err(|e| e.to_string())
                    },
                    Message::SynthesisComplete,
                );
            }
            Message::SynthesisComplete(Ok(pattern)) => {
                self.processing = false;
                self.status = format!("Synthesis complete: {} events", pattern.len());
                self.session.document = Some(pattern);
            }
            Message::SynthesisComplete(Err(e)) => {
                // The previously displayed document, if any, stays as-is
                self.processing = false;
                log::error!("Synthesis failed: {}", e);
                self.error = Some(e);
                self.status = String::from("Synthesis failed");
            }

            // Waveform editor
            Message::Waveform(WaveformEvent::IntensityEdited { index, value }) => {
                if let Some(document) = &mut self.session.document {
                    if !document.set_intensity(index, value) {
                        log::warn!("intensity edit for missing event {}", index);
                    }
                }
            }
            Message::Waveform(WaveformEvent::Scrubbed(time)) => {
                return self.seek_to(time);
            }

            // Transport
            Message::Play => {
                if self.session.video.is_some() {
                    self.session.playback.play();
                }
            }
            Message::Pause => {
                self.session.playback.pause();
            }
            Message::Stop => {
                self.session.playback.stop();
                self.waveform.set_position(0.0);
                return self.request_preview(0.0);
            }
            Message::Tick => {
                self.session.playback.clamp_to_end(self.session.duration());
                self.waveform.set_position(self.session.playback.position());
            }
            Message::PreviewFrameLoaded { position, result } => {
                self.preview_inflight = None;
                match result {
                    Ok(jpeg) => {
                        self.session.preview = Some(image::Handle::from_bytes(jpeg));
                    }
                    Err(e) => {
                        log::debug!("preview frame at {:.3}s unavailable: {}", position, e);
                    }
                }
                if let Some(queued) = self.preview_queued.take() {
                    return self.request_preview(queued);
                }
            }

            // Export
            Message::ExportPattern => {
                if self.session.document.is_none() {
                    return Task::none();
                }
                let file_name =
                    export::export_file_name(self.session.video.as_ref().map(|v| v.path.as_path()));
                return Task::perform(
                    async move {
                        let file = rfd::AsyncFileDialog::new()
                            .set_file_name(file_name)
                            .add_filter("AHAP pattern", &["ahap"])
                            .save_file()
                            .await;
                        file.map(|f| f.path().to_path_buf())
                    },
                    Message::ExportDestinationSelected,
                );
            }
            Message::ExportDestinationSelected(Some(path)) => {
                let Some(document) = self.session.document.clone() else {
                    return Task::none();
                };
                return Task::perform(
                    async move {
                        export::export_pattern(&path, &document)
                            .map(|_| path)
                            .map_err(|e| e.to_string())
                    },
                    Message::ExportComplete,
                );
            }
            Message::ExportDestinationSelected(None) => {}
            Message::ExportComplete(Ok(path)) => {
                self.status = format!("Exported: {}", path.display());
            }
            Message::ExportComplete(Err(e)) => {
                log::error!("Export failed: {}", e);
                self.status = format!("Export failed: {}", e);
            }
        }

        Task::none()
    }

    /// Render the UI
    pub fn view(&self) -> Element<'_, Message> {
        let header = self.view_header();

        let body = row![self.view_source_panel(), self.view_output_panel()]
            .spacing(16)
            .height(Length::Fill);

        let footer = text(self.status.as_str()).size(12);

        container(column![header, body, footer].spacing(12))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(16)
            .into()
    }

    /// Application theme
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Subscription for periodic playhead updates during playback
    pub fn subscription(&self) -> iced::Subscription<Message> {
        use iced::time;

        if self.session.playback.is_playing() {
            time::every(Duration::from_millis(33)).map(|_| Message::Tick)
        } else {
            iced::Subscription::none()
        }
    }

    /// Seek playback and the waveform playhead; refresh the preview frame
    /// when paused (while playing, the next play frame would overwrite it).
    fn seek_to(&mut self, time: f64) -> Task<Message> {
        let duration = self.session.duration();
        let time = time.clamp(0.0, duration.max(0.0));
        self.session.playback.seek(time);
        self.waveform.set_position(time);

        if self.session.playback.is_playing() {
            Task::none()
        } else {
            self.request_preview(time)
        }
    }

    /// Request the preview frame at `position`, keeping a single request in
    /// flight; positions arriving meanwhile collapse to the latest one.
    fn request_preview(&mut self, position: f64) -> Task<Message> {
        let Some(video) = &self.session.video else {
            return Task::none();
        };
        if self.preview_inflight.is_some() {
            self.preview_queued = Some(position);
            return Task::none();
        }

        self.preview_inflight = Some(position);
        let path = video.path.clone();
        let max_width = self.config.sampling.max_width;
        Task::perform(
            async move {
                tacton_core::video::extract_preview_frame(&path, position, max_width)
                    .map_err(|e| e.to_string())
            },
            move |result| Message::PreviewFrameLoaded { position, result },
        )
    }

    /// Header with the app title and session reset
    fn view_header(&self) -> Element<'_, Message> {
        let reset_btn = button(text("Reset").size(14))
            .on_press_maybe(self.session.video.is_some().then_some(Message::ResetSession))
            .style(button::secondary);

        row![
            text("tacton-studio").size(24),
            Space::new().width(Length::Fill),
            reset_btn,
        ]
        .spacing(10)
        .into()
    }

    /// Left panel: video source and synthesis controls
    fn view_source_panel(&self) -> Element<'_, Message> {
        let video_view: Element<'_, Message> = match (&self.session.video, &self.session.preview) {
            (Some(video), Some(handle)) => column![
                image(handle.clone()).width(Length::Fill),
                text(video.display_name()).size(13),
            ]
            .spacing(6)
            .into(),
            (Some(video), None) => text(video.display_name()).size(13).into(),
            (None, _) => {
                let label = if self.loading_video {
                    "Loading..."
                } else {
                    "Load Video"
                };
                button(text(label).size(16))
                    .on_press_maybe((!self.loading_video).then_some(Message::PickVideo))
                    .padding(24)
                    .width(Length::Fill)
                    .into()
            }
        };

        let replace_btn: Element<'_, Message> = if self.session.video.is_some() {
            button(text("Replace video").size(12))
                .on_press_maybe((!self.loading_video).then_some(Message::PickVideo))
                .style(button::secondary)
                .into()
        } else {
            Space::new().into()
        };

        let panel = synth_panel::view(
            &self.directive,
            self.processing,
            self.session.video.is_some(),
            self.error.as_deref(),
        );

        container(column![video_view, replace_btn, panel].spacing(12))
            .width(Length::FillPortion(2))
            .into()
    }

    /// Right panel: waveform editor, transport, export, manifest
    fn view_output_panel(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.session.document {
            Some(document) => {
                let waveform =
                    haptic_waveform(&self.waveform, document).map(Message::Waveform);

                let export_btn = button(text("Download AHAP").size(14))
                    .on_press(Message::ExportPattern);

                let manifest = serde_json::to_string_pretty(document).unwrap_or_default();
                let manifest_view = scrollable(
                    text(manifest).size(11).font(iced::Font::MONOSPACE),
                )
                .height(Length::Fill);

                column![
                    waveform,
                    row![
                        transport::view(&self.session),
                        Space::new().width(Length::Fill),
                        export_btn,
                    ]
                    .spacing(10),
                    text("JSON manifest").size(12),
                    manifest_view,
                ]
                .spacing(10)
                .into()
            }
            None => {
                let hint = if self.processing {
                    "Synthesizing..."
                } else {
                    "Synthesis required - load a video and describe the motion"
                };
                container(text(hint).size(14))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .center_x(Length::Fill)
                    .center_y(Length::Fill)
                    .into()
            }
        };

        container(content)
            .width(Length::FillPortion(3))
            .height(Length::Fill)
            .into()
    }
}
