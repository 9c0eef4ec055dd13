//! User preferences persisted as JSON.
//!
//! # Invariants
//! - A missing file loads as `CoreConfig::default()`.
//! - `log_level` is always one of trace|debug|info|warn|error after load.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_DATA_DB_PATH: &str = "data/tutorspet.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidLogLevel(#[from] LoggingError),
}

/// Core runtime preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file holding both books.
    pub data_db_path: PathBuf,
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_db_path: PathBuf::from(DEFAULT_DATA_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("event=config_load module=config status=default");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: CoreConfig = serde_json::from_str(&text)?;
        config.validate()?;
        info!("event=config_load module=config status=ok");
        Ok(config)
    }

    /// Writes this config as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(io_error)?;
        info!("event=config_save module=config status=ok");
        Ok(())
    }

    /// Normalizes `log_level` in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.log_level = normalize_level(&self.log_level)?.to_string();
        Ok(())
    }
}
