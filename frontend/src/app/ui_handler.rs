//! UI Command Handler
//!
//! Applies the commands issued by the control bar to the capture session.
//! A failed command leaves the selection and recording state as they were
//! and surfaces the error as a toast.

use super::state::App;
use crate::components::Toast;
use crate::config::{FrameRate, Resolution};
use crate::events::UiCommand;
use crate::logic::RecordingToggle;

impl App {
    /// Dispatches UI commands to appropriate handlers
    pub(super) fn handle_ui_command(&mut self, command: UiCommand) {
        self.logger
            .debug(&format!("[UI] Handling command: {:?}", command));
        match command {
            UiCommand::ToggleRecording => self.handle_toggle_recording(),
            UiCommand::TakeSnapshot => self.handle_take_snapshot(),
            UiCommand::ChangeResolution(resolution) => self.handle_change_resolution(resolution),
            UiCommand::ChangeFrameRate(frame_rate) => self.handle_change_frame_rate(frame_rate),
        }
    }

    fn handle_toggle_recording(&mut self) {
        match self.session.toggle_recording() {
            Ok(RecordingToggle::Started(path)) => {
                self.logger
                    .info(&format!("[UI] Recording to {}", path.display()));
            }
            Ok(RecordingToggle::Stopped(Some(summary))) => {
                self.current_toast = Some(Toast::success(format!(
                    "Recording saved to {}",
                    summary.path.display()
                )));
            }
            Ok(RecordingToggle::Stopped(None)) => {}
            Err(e) => self.show_error(format!("Recording failed: {}", e)),
        }
    }

    fn handle_take_snapshot(&mut self) {
        match self.session.take_snapshot() {
            Ok(path) => {
                self.current_toast =
                    Some(Toast::success(format!("Snapshot saved to {}", path.display())));
            }
            Err(e) => self.show_error(format!("Snapshot failed: {}", e)),
        }
    }

    fn handle_change_resolution(&mut self, resolution: Resolution) {
        match self.session.change_resolution(resolution.name()) {
            Ok((width, height)) => {
                self.selected_resolution = resolution;
                if (width, height) != resolution.dimensions() {
                    self.current_toast = Some(Toast::warning(format!(
                        "Camera does not support {}, using {}x{}",
                        resolution, width, height
                    )));
                }
            }
            Err(e) => self.show_error(format!("Cannot change resolution: {}", e)),
        }
    }

    fn handle_change_frame_rate(&mut self, frame_rate: FrameRate) {
        match self.session.change_fps(frame_rate.name()) {
            Ok(_) => self.selected_frame_rate = frame_rate,
            Err(e) => self.show_error(format!("Cannot change frame rate: {}", e)),
        }
    }
}
