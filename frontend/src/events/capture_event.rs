use crate::logic::RecordingSummary;

/// Notifications from the capture thread (Capture -> Controller)
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// The camera went away; capture has ended
    DeviceLost(String),
    /// The capture loop exited and released the camera
    Stopped {
        frames: u64,
        /// Recording that was still running and got closed on the way out
        recording: Option<RecordingSummary>,
    },
}
