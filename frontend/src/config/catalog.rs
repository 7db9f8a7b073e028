//! Resolution and frame-rate catalogs
//!
//! The selectors in the control bar and the `initial_*` config keys both
//! refer to entries by their display name, e.g. `480p (16:9)` or `29.97`.

use super::error::ConfigError;
use std::fmt;

/// Capture resolutions offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Wide1440,
    Wide1080,
    Wide720,
    Wide480,
    Standard480,
    Wide360,
    Standard360,
    Wide240,
    Standard240,
}

impl Resolution {
    /// Every resolution, largest first
    pub const ALL: [Resolution; 9] = [
        Resolution::Wide1440,
        Resolution::Wide1080,
        Resolution::Wide720,
        Resolution::Wide480,
        Resolution::Standard480,
        Resolution::Wide360,
        Resolution::Standard360,
        Resolution::Wide240,
        Resolution::Standard240,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resolution::Wide1440 => "1440p (16:9)",
            Resolution::Wide1080 => "1080p (16:9)",
            Resolution::Wide720 => "720p (16:9)",
            Resolution::Wide480 => "480p (16:9)",
            Resolution::Standard480 => "480p (4:3)",
            Resolution::Wide360 => "360p (16:9)",
            Resolution::Standard360 => "360p (4:3)",
            Resolution::Wide240 => "240p (16:9)",
            Resolution::Standard240 => "240p (4:3)",
        }
    }

    /// Requested `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::Wide1440 => (2560, 1440),
            Resolution::Wide1080 => (1920, 1080),
            Resolution::Wide720 => (1280, 720),
            Resolution::Wide480 => (853, 480),
            Resolution::Standard480 => (640, 480),
            Resolution::Wide360 => (640, 360),
            Resolution::Standard360 => (480, 360),
            Resolution::Wide240 => (426, 240),
            Resolution::Standard240 => (320, 240),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == name.trim())
            .ok_or_else(|| ConfigError::UnknownResolution(name.to_string()))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target frame rates offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRate {
    Fps120,
    Fps60,
    Fps59_94,
    Fps50,
    Fps30,
    Fps29_97,
    Fps25,
    Fps24,
    Fps23_98,
    Fps20,
    Fps12,
    Fps10,
}

impl FrameRate {
    /// Every frame rate, fastest first
    pub const ALL: [FrameRate; 12] = [
        FrameRate::Fps120,
        FrameRate::Fps60,
        FrameRate::Fps59_94,
        FrameRate::Fps50,
        FrameRate::Fps30,
        FrameRate::Fps29_97,
        FrameRate::Fps25,
        FrameRate::Fps24,
        FrameRate::Fps23_98,
        FrameRate::Fps20,
        FrameRate::Fps12,
        FrameRate::Fps10,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FrameRate::Fps120 => "120",
            FrameRate::Fps60 => "60",
            FrameRate::Fps59_94 => "59.94",
            FrameRate::Fps50 => "50",
            FrameRate::Fps30 => "30",
            FrameRate::Fps29_97 => "29.97",
            FrameRate::Fps25 => "25",
            FrameRate::Fps24 => "24",
            FrameRate::Fps23_98 => "23.98",
            FrameRate::Fps20 => "20",
            FrameRate::Fps12 => "12",
            FrameRate::Fps10 => "10",
        }
    }

    /// Frames per second
    pub fn fps(&self) -> f64 {
        match self {
            FrameRate::Fps120 => 120.0,
            FrameRate::Fps60 => 60.0,
            FrameRate::Fps59_94 => 59.94,
            FrameRate::Fps50 => 50.0,
            FrameRate::Fps30 => 30.0,
            FrameRate::Fps29_97 => 29.97,
            FrameRate::Fps25 => 25.0,
            FrameRate::Fps24 => 24.0,
            FrameRate::Fps23_98 => 23.98,
            FrameRate::Fps20 => 20.0,
            FrameRate::Fps12 => 12.0,
            FrameRate::Fps10 => 10.0,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == name.trim())
            .ok_or_else(|| ConfigError::UnknownFrameRate(name.to_string()))
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The entries a session may choose from
///
/// Immutable once built; the session controller and the control bar share
/// one through the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    resolutions: Vec<Resolution>,
    frame_rates: Vec<FrameRate>,
}

impl Catalog {
    pub fn new(resolutions: Vec<Resolution>, frame_rates: Vec<FrameRate>) -> Self {
        Self {
            resolutions,
            frame_rates,
        }
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn frame_rates(&self) -> &[FrameRate] {
        &self.frame_rates
    }

    /// Looks up a resolution offered by this catalog
    pub fn resolution(&self, name: &str) -> Result<Resolution, ConfigError> {
        Resolution::from_name(name)
            .ok()
            .filter(|r| self.resolutions.contains(r))
            .ok_or_else(|| ConfigError::UnknownResolution(name.to_string()))
    }

    /// Looks up a frame rate offered by this catalog
    pub fn frame_rate(&self, name: &str) -> Result<FrameRate, ConfigError> {
        FrameRate::from_name(name)
            .ok()
            .filter(|r| self.frame_rates.contains(r))
            .ok_or_else(|| ConfigError::UnknownFrameRate(name.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Resolution::ALL.to_vec(), FrameRate::ALL.to_vec())
    }
}
