//! Capture configuration.
//!
//! The resolution and frame rate the capture pipeline aims for. The
//! resolution stored here is always the one the device actually negotiated.

use crate::error::{MediaError, Result};
use std::time::Duration;

/// Capture resolution and target frame rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Target frames per second
    pub target_fps: f64,
}

impl CaptureConfig {
    /// Minimum valid FPS value
    const MIN_FPS: f64 = 1.0;
    /// Maximum valid FPS value
    const MAX_FPS: f64 = 240.0;
    /// Minimum valid resolution dimension
    const MIN_DIMENSION: u32 = 1;
    /// Maximum valid resolution dimension (8K)
    const MAX_DIMENSION: u32 = 7680;

    /// Creates a validated configuration
    ///
    /// # Returns
    /// * `Err(MediaError::Config)` - if a dimension is outside 1..=7680 or
    ///   `target_fps` is not a finite value in 1.0..=240.0
    pub fn new(width: u32, height: u32, target_fps: f64) -> Result<Self> {
        Self::validate_dimension("Width", width)?;
        Self::validate_dimension("Height", height)?;
        Self::validate_fps(target_fps)?;

        Ok(Self {
            width,
            height,
            target_fps,
        })
    }

    /// Returns a copy with a different resolution
    pub fn with_resolution(self, width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, self.target_fps)
    }

    /// Returns a copy with a different target frame rate
    pub fn with_fps(self, target_fps: f64) -> Result<Self> {
        Self::new(self.width, self.height, target_fps)
    }

    /// Returns the resolution as `(width, height)`
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Target interval between frames in milliseconds
    pub fn target_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    /// Target interval between frames
    pub fn target_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }

    fn validate_dimension(name: &str, value: u32) -> Result<()> {
        if (Self::MIN_DIMENSION..=Self::MAX_DIMENSION).contains(&value) {
            return Ok(());
        }
        Err(MediaError::Config(format!(
            "{} must be between {} and {}, got {}",
            name,
            Self::MIN_DIMENSION,
            Self::MAX_DIMENSION,
            value
        )))
    }

    fn validate_fps(fps: f64) -> Result<()> {
        if !fps.is_finite() {
            return Err(MediaError::Config(
                "FPS must be a finite number (not NaN or infinite)".to_string(),
            ));
        }
        if !(Self::MIN_FPS..=Self::MAX_FPS).contains(&fps) {
            return Err(MediaError::Config(format!(
                "FPS must be between {} and {}, got {}",
                Self::MIN_FPS,
                Self::MAX_FPS,
                fps
            )));
        }
        Ok(())
    }
}
