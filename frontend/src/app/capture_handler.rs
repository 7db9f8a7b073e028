//! Handles events from the capture thread.

use super::state::App;
use crate::components::Toast;
use crate::events::CaptureEvent;

impl App {
    /// Processes events from the capture thread
    pub(super) fn handle_capture_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::DeviceLost(reason) => {
                self.camera_lost = true;
                self.logger
                    .error(&format!("[CAPTURE] Camera lost: {}", reason));
                self.current_toast =
                    Some(Toast::error(format!("Camera disconnected: {}", reason)).sticky());
            }

            CaptureEvent::Stopped { frames, recording } => {
                self.logger.info(&format!(
                    "[CAPTURE] Capture stopped after {} frames",
                    frames
                ));
                if let Some(summary) = recording {
                    self.logger.info(&format!(
                        "[CAPTURE] Recording {} closed on stop",
                        summary.path.display()
                    ));
                    // a lost camera toast outranks this one
                    if !self.camera_lost {
                        self.current_toast = Some(Toast::info(format!(
                            "Recording saved to {}",
                            summary.path.display()
                        )));
                    }
                }
            }
        }
    }
}
