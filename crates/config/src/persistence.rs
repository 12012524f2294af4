//! Configuration file discovery, reading, and writing.
//!
//! Files may be JSON5 (comments, trailing commas, unquoted keys) or plain
//! JSON; both are read through the JSON5 parser. Files are always written as
//! pretty-printed JSON.
//!
//! # Search Order
//!
//! 1. `./sprintboard.json5`, then `./sprintboard.json`
//! 2. `<config_dir>/sprintboard/config.json5`, then `config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Local file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["sprintboard.json5", "sprintboard.json"];

/// Application directory under the platform config and data directories.
const APP_DIR: &str = "sprintboard";

/// File names inside the user config directory, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Default log file name inside the data directory.
const LOG_FILE_NAME: &str = "sprintboard.log";

/// Returns every location a configuration file is looked up at, in priority
/// order. Locations that need a platform directory are omitted when it cannot
/// be determined.
#[must_use]
pub fn candidate_paths() -> Vec<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).collect()
}

/// Finds the first existing configuration file.
///
/// # Examples
///
/// ```no_run
/// use sprintboard_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.exists())
}

/// Returns the user configuration directory, typically
/// `~/.config/sprintboard/`.
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path new user configuration is saved to.
///
/// # Errors
///
/// Returns an error if the platform config directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(USER_FILE_NAMES[0]))
}

/// Returns the default log file, typically
/// `~/.local/share/sprintboard/sprintboard.log`.
///
/// # Errors
///
/// Returns an error if the platform data directory cannot be determined.
pub fn default_log_file() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join(LOG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
///
/// # Examples
///
/// ```no_run
/// use sprintboard_config::persistence::read_config_file;
/// use sprintboard_config::Config;
///
/// # fn main() -> sprintboard_config::Result<()> {
/// let config: Config = read_config_file("sprintboard.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration file as pretty-printed JSON, creating missing
/// parent directories.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the file or its
/// parent directories cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        title: String,
        border: f64,
    }

    #[test]
    fn candidates_start_with_local_files() {
        let candidates = candidate_paths();
        assert_eq!(candidates[0], PathBuf::from("sprintboard.json5"));
        assert_eq!(candidates[1], PathBuf::from("sprintboard.json"));
        if dirs::config_dir().is_some() {
            assert_eq!(candidates.len(), 4);
            assert!(candidates[2].ends_with("sprintboard/config.json5"));
        }
    }

    #[test]
    fn read_json5_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.json5");
        std::fs::write(
            &path,
            r#"
            {
                // caption of the daily-work table
                title: "My work",
                border: 0.4,
            }
            "#,
        )
        .unwrap();

        let sample: Sample = read_config_file(&path).unwrap();
        assert_eq!(sample.title, "My work");
        assert!((sample.border - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn read_missing_file_reports_path() {
        let err = read_config_file::<Sample>("/nonexistent/sprintboard.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sprintboard.json"));
    }

    #[test]
    fn read_invalid_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ title: ").unwrap();

        assert!(read_config_file::<Sample>(&path).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let sample = Sample {
            title: "Queue".to_string(),
            border: 1.0,
        };

        write_config_file(&path, &sample).unwrap();
        let loaded: Sample = read_config_file(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn default_log_file_lives_under_app_dir() {
        if dirs::data_dir().is_some() {
            let path = default_log_file().unwrap();
            assert!(path.ends_with("sprintboard/sprintboard.log"));
        }
    }
}
