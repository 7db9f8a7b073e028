use std::fmt;

/// Problems with settings: the config file or a catalog lookup
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be located or read
    Load(config_loader::ConfigError),
    /// Name not present in the resolution catalog
    UnknownResolution(String),
    /// Name not present in the frame-rate catalog
    UnknownFrameRate(String),
    /// A key holds a value that cannot be parsed
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "{}", err),
            ConfigError::UnknownResolution(name) => write!(f, "Unknown resolution '{}'", name),
            ConfigError::UnknownFrameRate(name) => write!(f, "Unknown frame rate '{}'", name),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for '{}'", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config_loader::ConfigError> for ConfigError {
    fn from(err: config_loader::ConfigError) -> Self {
        ConfigError::Load(err)
    }
}
