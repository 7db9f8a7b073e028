//! Error types for media operations.
//!
//! Covers camera access, frame processing, video encoding and the
//! filesystem work that precedes writing recordings and snapshots.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, MediaError>;

/// Error type for media operations
#[derive(Debug)]
pub enum MediaError {
    /// Invalid configuration value or unknown catalog entry
    Config(String),
    /// I/O error
    Io(io::Error),
    /// Recoverable camera error (failed read, rejected property)
    Camera(String),
    /// Camera is no longer available; capture cannot continue
    DeviceLost(String),
    /// Video or image encoder could not be opened, written or closed
    Encoder(String),
    /// Output folder could not be created
    Filesystem(String),
    /// Frame size differs from the size the recording was opened with
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Processing error
    Processing(String),
    /// OpenCV error
    OpenCv(opencv::Error),
}

impl MediaError {
    /// Whether the capture loop may keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MediaError::DeviceLost(_))
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Config(msg) => write!(f, "Config error: {}", msg),
            MediaError::Io(err) => write!(f, "I/O error: {}", err),
            MediaError::Camera(msg) => write!(f, "Camera error: {}", msg),
            MediaError::DeviceLost(msg) => write!(f, "Camera lost: {}", msg),
            MediaError::Encoder(msg) => write!(f, "Encoder error: {}", msg),
            MediaError::Filesystem(msg) => write!(f, "Filesystem error: {}", msg),
            MediaError::FrameSizeMismatch { expected, actual } => write!(
                f,
                "Frame size mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            MediaError::Processing(msg) => write!(f, "Processing error: {}", msg),
            MediaError::OpenCv(err) => write!(f, "OpenCV error: {}", err),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<io::Error> for MediaError {
    fn from(err: io::Error) -> Self {
        MediaError::Io(err)
    }
}

impl From<opencv::Error> for MediaError {
    fn from(err: opencv::Error) -> Self {
        MediaError::OpenCv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = MediaError::Config("Unknown resolution '4K'".to_string());
        assert_eq!(err.to_string(), "Config error: Unknown resolution '4K'");
    }

    #[test]
    fn test_error_display_encoder() {
        let err = MediaError::Encoder("XVID not available".to_string());
        assert_eq!(err.to_string(), "Encoder error: XVID not available");
    }

    #[test]
    fn test_error_display_size_mismatch() {
        let err = MediaError::FrameSizeMismatch {
            expected: (640, 480),
            actual: (1280, 720),
        };
        assert_eq!(
            err.to_string(),
            "Frame size mismatch: expected 640x480, got 1280x720"
        );
    }

    #[test]
    fn test_only_device_lost_is_fatal() {
        assert!(!MediaError::DeviceLost("unplugged".to_string()).is_recoverable());
        assert!(MediaError::Camera("empty frame".to_string()).is_recoverable());
        assert!(MediaError::Encoder("write failed".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let media_err: MediaError = io_err.into();

        assert!(matches!(media_err, MediaError::Io(_)));
    }
}
