//! Process configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database path and logging settings from environment variables.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Log level and log directory are validated with the same rules as
//!   `init_logging`.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CELEBRE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CELEBRE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CELEBRE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "celebre_state.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{LOG_LEVEL_ENV}: {message}"),
            Self::InvalidLogDir(message) => write!(f, "{LOG_DIR_ENV}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file backing both stores. `None` uses the temp-dir default.
    pub db_path: Option<PathBuf>,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `CELEBRE_DB_PATH`, `CELEBRE_LOG_LEVEL` and `CELEBRE_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };
        let log_dir = read(LOG_DIR_ENV)
            .map(|raw| normalize_log_dir(&raw).map_err(ConfigError::InvalidLogDir))
            .transpose()?;

        Ok(Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            log_level,
            log_dir,
        })
    }

    /// Effective database path.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }
}
