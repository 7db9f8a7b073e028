use crate::config::ConfigError;
use media::MediaError;
use std::fmt;

/// Failures of session commands
#[derive(Debug)]
pub enum SessionError {
    /// Unknown catalog entry
    Config(ConfigError),
    /// Device, encoder or filesystem failure
    Media(MediaError),
    /// Resolution cannot change while a recording is running
    RecordingActive,
    /// Nothing has been captured yet
    NoFrame,
    /// The capture thread is not running
    CaptureNotRunning,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Config(err) => write!(f, "{}", err),
            SessionError::Media(err) => write!(f, "{}", err),
            SessionError::RecordingActive => {
                write!(f, "Stop the recording before changing resolution")
            }
            SessionError::NoFrame => write!(f, "No frame captured yet"),
            SessionError::CaptureNotRunning => write!(f, "Capture is not running"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        SessionError::Config(err)
    }
}

impl From<MediaError> for SessionError {
    fn from(err: MediaError) -> Self {
        SessionError::Media(err)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Media(MediaError::Io(err))
    }
}
