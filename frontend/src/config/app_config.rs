//! Application Configuration
//!
//! Camera device, output folders, logging and initial capture settings.

use super::catalog::{FrameRate, Resolution};
use super::error::ConfigError;
use logging::LogLevel;
use std::path::{Path, PathBuf};

/// Environment variable holding an explicit config file path
pub const CONFIG_ENV_VAR: &str = "CAMDECK_CONFIG";
/// File name searched for in `./config/` and `./`
pub const CONFIG_FILE_NAME: &str = "camdeck.conf";

/// Application configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Camera index passed to the capture backend
    pub camera_device: i32,
    /// Where recordings are written
    pub video_folder: PathBuf,
    /// Where snapshots are written
    pub photo_folder: PathBuf,
    /// Path to the log file
    pub log_path: PathBuf,
    /// Logging level
    pub log_level: LogLevel,
    pub initial_resolution: Resolution,
    pub initial_fps: FrameRate,
    /// Window size with `--windowed`
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera_device: 0,
            video_folder: PathBuf::from("videos"),
            photo_folder: PathBuf::from("photos"),
            log_path: PathBuf::from("camdeck.log"),
            log_level: LogLevel::Info,
            initial_resolution: Resolution::Wide480,
            initial_fps: FrameRate::Fps30,
            window_width: 600.0,
            window_height: 500.0,
        }
    }
}

impl AppConfig {
    /// Parses `key=value` configuration content
    ///
    /// Format:
    /// ```text
    /// camera_device=0
    /// video_folder=videos
    /// initial_resolution=720p (16:9)
    /// initial_fps=29.97
    /// ```
    ///
    /// Lines starting with `#` are comments. Keys that are not recognised
    /// are reported on stderr and skipped.
    ///
    /// # Returns
    /// * `Err(ConfigError)` - a value could not be parsed or names an entry
    ///   missing from the catalogs
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                eprintln!("Warning: Ignoring malformed configuration line '{}'", line);
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "camera_device" => config.camera_device = parse_value(key, value)?,
                "video_folder" => config.video_folder = PathBuf::from(value),
                "photo_folder" => config.photo_folder = PathBuf::from(value),
                "log_path" => config.log_path = PathBuf::from(value),
                "log_level" => config.log_level = parse_value(key, value)?,
                "initial_resolution" => config.initial_resolution = Resolution::from_name(value)?,
                "initial_fps" => config.initial_fps = FrameRate::from_name(value)?,
                "window_width" => config.window_width = parse_dimension(key, value)?,
                "window_height" => config.window_height = parse_dimension(key, value)?,
                _ => {
                    eprintln!("Warning: Unknown configuration key '{}' ignored", key);
                }
            }
        }

        Ok(config)
    }

    /// Loads and parses a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = config_loader::load_config_file(path)?;
        Self::parse(&content)
    }

    /// Loads configuration from `explicit`, or from the usual locations
    ///
    /// Without an explicit path, `$CAMDECK_CONFIG`, `./config/camdeck.conf`
    /// and `./camdeck.conf` are tried in turn. Defaults apply when none of
    /// them exists. A file that exists but is invalid is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            println!("Loading configuration from: {}", path.display());
            return Self::load_from_file(path);
        }

        match config_loader::find_config_file(CONFIG_ENV_VAR, CONFIG_FILE_NAME) {
            Ok(path) => {
                println!("Loaded configuration from: {}", path.display());
                Self::load_from_file(&path)
            }
            Err(_) => {
                println!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_dimension(key: &str, value: &str) -> Result<f32, ConfigError> {
    let size: f32 = parse_value(key, value)?;
    if !size.is_finite() || size <= 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(size)
}
