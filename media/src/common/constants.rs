//! Common constants shared across media modules

/// Logging intervals for frame processing
pub mod logging {
    /// Log progress every N frames (camera capture)
    pub const CAMERA_LOG_INTERVAL: u64 = 1000;
    /// Log progress every N frames (video recorder)
    pub const RECORDER_LOG_INTERVAL: u64 = 300;
}
