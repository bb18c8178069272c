//! # Application Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`STOCKLY_*`)
//! 3. Defaults (this file)
//!
//! ## Default Store Location
//! `<home>/.stockly/stockly.db`, with `<home>` resolved through
//! `directories`. The `.stockly` folder is created before the first open.

use directories::BaseDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use stockly_core::LOW_STOCK_THRESHOLD;

/// Explicit store file path.
pub const DB_PATH_VAR: &str = "STOCKLY_DB_PATH";

/// Stock level at or below which products count as running low.
pub const LOW_STOCK_VAR: &str = "STOCKLY_LOW_STOCK_THRESHOLD";

/// Log filter used when `RUST_LOG` is not set.
pub const LOG_VAR: &str = "STOCKLY_LOG";

const DATA_DIR: &str = ".stockly";
const DB_FILE: &str = "stockly.db";

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory to put the default store in.
    #[error("could not determine the home directory; set STOCKLY_DB_PATH")]
    NoHomeDirectory,

    /// The data directory could not be created.
    #[error("could not create data directory {}: {source}", path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite store file.
    pub database_path: PathBuf,

    /// Default: 5
    pub low_stock_threshold: i64,
}

impl AppConfig {
    /// Configuration for an explicit store file, everything else default.
    pub fn with_database_path(path: impl Into<PathBuf>) -> Self {
        AppConfig {
            database_path: path.into(),
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `STOCKLY_DB_PATH`: Override the store file
    /// - `STOCKLY_LOW_STOCK_THRESHOLD`: Override the low-stock line (integer)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = match lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let mut config = AppConfig::with_database_path(database_path);

        if let Some(raw) = lookup(LOW_STOCK_VAR) {
            match raw.trim().parse::<i64>() {
                Ok(threshold) => config.low_stock_threshold = threshold,
                Err(_) => warn!(
                    var = LOW_STOCK_VAR,
                    value = %raw,
                    default = LOW_STOCK_THRESHOLD,
                    "Ignoring non-integer low-stock threshold"
                ),
            }
        }

        Ok(config)
    }

    /// Creates the directory that will hold the store file.
    pub fn provision(&self) -> Result<(), ConfigError> {
        let Some(dir) = self.database_path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };

        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Provision {
            path: dir.to_path_buf(),
            source,
        })?;

        debug!(dir = %dir.display(), "Data directory ready");
        Ok(())
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(dirs.home_dir().join(DATA_DIR).join(DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/data/pos/shop.db"),
            (LOW_STOCK_VAR, "12"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/data/pos/shop.db"));
        assert_eq!(config.low_stock_threshold, 12);
    }

    #[test]
    fn test_bad_threshold_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, "/data/pos/shop.db"),
            (LOW_STOCK_VAR, "lots"),
        ]))
        .unwrap();

        assert_eq!(config.low_stock_threshold, LOW_STOCK_THRESHOLD);
    }

    #[test]
    fn test_default_path_is_under_home() {
        // Only meaningful where a home directory exists.
        if let Ok(config) = AppConfig::from_lookup(lookup(&[])) {
            assert!(config.database_path.ends_with(".stockly/stockly.db"));
        }
    }

    #[test]
    fn test_provision_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_database_path(dir.path().join("a").join("b").join("x.db"));

        config.provision().unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_provision_fails_under_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let config = AppConfig::with_database_path(blocker.join("x.db"));
        assert!(matches!(
            config.provision(),
            Err(ConfigError::Provision { .. })
        ));
    }
}
