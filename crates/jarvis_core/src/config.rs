//! Application configuration.
//!
//! # Responsibility
//! - Load `config.json` (data directory, log directory, log level).
//! - Resolve relative paths against the directory holding the config file.
//!
//! # Invariants
//! - A missing config file yields defaults; a malformed one is an error.
//! - Paths returned by `load` are absolute.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `students.json`, `lessons.json` and `tasks.json`.
    pub data_dir: PathBuf,
    /// Directory for rolling log files.
    pub log_dir: PathBuf,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config at `path`, falling back to defaults when absent.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file exists but cannot be read.
    /// - `ConfigError::Parse` when the file is not a valid config object.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(config.resolved_against(&config_base_dir(path)?))
    }

    /// Writes this config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, content).map_err(io_error)
    }

    /// Joins relative paths onto `base`; absolute paths are kept as-is.
    fn resolved_against(self, base: &Path) -> Self {
        Self {
            data_dir: base.join(self.data_dir),
            log_dir: base.join(self.log_dir),
            log_level: self.log_level,
        }
    }
}

/// Absolute directory of `path`, using the working directory for bare names.
fn config_base_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    if parent.is_absolute() {
        return Ok(parent.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(parent))
}
