//! Environment-driven quote store configuration.
//!
//! # Responsibility
//! - Read database location and logging settings from the environment.
//! - Open the configured store and start logging from one place.
//!
//! # Invariants
//! - An unset or blank database path means an in-memory store.
//! - A configured log directory is always absolute.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level, normalize_log_dir};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATABASE_PATH_VAR: &str = "QUOTESTORE_DATABASE_PATH";
pub const LOG_LEVEL_VAR: &str = "QUOTESTORE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "QUOTESTORE_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved quote store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteStoreConfig {
    /// SQLite file; `None` selects an in-memory database.
    pub database_path: Option<PathBuf>,
    /// Normalized log level.
    pub log_level: &'static str,
    /// File logging is only started when this is set.
    pub log_dir: Option<PathBuf>,
}

impl Default for QuoteStoreConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl QuoteStoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_path = read(DATABASE_PATH_VAR).map(PathBuf::from);

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|message| ConfigError::InvalidValue {
                key: LOG_LEVEL_VAR,
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = match read(LOG_DIR_VAR) {
            Some(value) => {
                Some(
                    normalize_log_dir(&value).map_err(|message| ConfigError::InvalidValue {
                        key: LOG_DIR_VAR,
                        message,
                    })?,
                )
            }
            None => None,
        };

        Ok(Self {
            database_path,
            log_level,
            log_dir,
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is left uninitialized.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(self.log_level, log_dir)?;
        Ok(true)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.database_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, QuoteStoreConfig, DATABASE_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use crate::db::migrations::latest_version;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<QuoteStoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        QuoteStoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, QuoteStoreConfig::default());
        assert!(config.database_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_and_normalizes_all_settings() {
        let config = config_from(&[
            (DATABASE_PATH_VAR, "/var/lib/quotes/quotes.sqlite3"),
            (LOG_LEVEL_VAR, " Warning "),
            (LOG_DIR_VAR, "/var/log/quotes"),
        ])
        .unwrap();

        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/var/lib/quotes/quotes.sqlite3"))
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/quotes")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(DATABASE_PATH_VAR, "  "), (LOG_DIR_VAR, "")]).unwrap();
        assert!(config.database_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let level = config_from(&[(LOG_LEVEL_VAR, "loud")]).unwrap_err();
        assert!(matches!(level, ConfigError::InvalidValue { key, .. } if key == LOG_LEVEL_VAR));

        let dir = config_from(&[(LOG_DIR_VAR, "logs")]).unwrap_err();
        assert!(matches!(dir, ConfigError::InvalidValue { key, .. } if key == LOG_DIR_VAR));
    }

    #[test]
    fn init_logging_without_log_dir_is_a_no_op() {
        let config = QuoteStoreConfig::default();
        assert!(!config.init_logging().unwrap());
    }

    #[test]
    fn open_connection_uses_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.sqlite3");
        let config = QuoteStoreConfig {
            database_path: Some(path.clone()),
            ..QuoteStoreConfig::default()
        };

        let conn = config.open_connection().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
        assert!(path.exists());
    }
}
