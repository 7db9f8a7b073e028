use crate::config::{FrameRate, Resolution};

/// Commands initiated by the UI (View -> Controller)
/// These are "requests" to perform actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    /// REC / STOP button
    ToggleRecording,
    /// PIC button
    TakeSnapshot,
    ChangeResolution(Resolution),
    ChangeFrameRate(FrameRate),
}
