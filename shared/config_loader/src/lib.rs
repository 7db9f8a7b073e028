//! # Config Loader
//!
//! Locates and reads configuration files from disk. Parsing is left to the
//! caller; camdeck feeds the content to its own `key=value` reader.
//!
//! ```no_run
//! use config_loader::{find_config_file, load_config_file};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = find_config_file("CAMDECK_CONFIG", "camdeck.conf")?;
//!     let content = load_config_file(&path)?;
//!     println!("{} bytes of configuration", content.len());
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ConfigError, Result};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a configuration file into a `String` without interpreting it.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
}

/// Searches the usual locations for `filename`.
///
/// Order:
/// 1. the path held by environment variable `env_var` (if set and present)
/// 2. `./config/{filename}`
/// 3. `./{filename}`
pub fn find_config_file(env_var: &str, filename: &str) -> Result<PathBuf> {
    let candidates = env::var_os(env_var)
        .map(PathBuf::from)
        .into_iter()
        .chain([
            PathBuf::from("./config").join(filename),
            PathBuf::from("./").join(filename),
        ]);

    first_existing(candidates).ok_or_else(|| {
        ConfigError::FileNotFound(format!(
            "'{}' not found. Searched: ${}, ./config/{}, ./{}",
            filename, env_var, filename, filename
        ))
    })
}

/// Finds and reads `filename` in one step.
pub fn find_and_load(env_var: &str, filename: &str) -> Result<String> {
    let path = find_config_file(env_var, filename)?;
    load_config_file(path)
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config_file("/path/that/does/not/exist.conf");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let result = load_config_file(dir.path());
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("camdeck.conf");
        fs::write(&path, "initial_fps=60\n").unwrap();

        assert_eq!(load_config_file(&path).unwrap(), "initial_fps=60\n");
    }

    #[test]
    fn test_first_existing_skips_missing() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.conf");
        fs::write(&present, "").unwrap();

        let found = first_existing([dir.path().join("missing.conf"), present.clone()]);
        assert_eq!(found, Some(present));
    }

    #[test]
    fn test_find_nonexistent_file() {
        let result = find_config_file(
            "CAMDECK_TEST_UNSET_VARIABLE",
            "file_that_definitely_does_not_exist_12345.conf",
        );
        assert!(result.is_err());
    }
}
