//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use etalage_core::DEFAULT_LIST_LIMIT;
use serde::{Deserialize, Serialize};

/// Largest page size the assortment listing accepts.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog database file. `None` serves the built-in demo assortment.
    pub database_path: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,

    /// Load the demo assortment into an empty catalog database
    pub seed_demo: bool,

    /// Products per assortment listing or search
    pub list_limit: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            database_path: default_database_path(),
            log_level: "info".to_string(),
            seed_demo: true,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorefrontConfig::default();

        let database_path = match lookup("ETALAGE_DATABASE_PATH") {
            // "memory" (or an empty value) selects the demo assortment
            Some(path) if path.trim().is_empty() || path.trim() == "memory" => None,
            Some(path) => Some(PathBuf::from(path.trim())),
            None => defaults.database_path,
        };

        let log_level = lookup("ETALAGE_LOG_LEVEL")
            .map(|level| level.trim().to_lowercase())
            .unwrap_or(defaults.log_level);

        let seed_demo = match lookup("ETALAGE_SEED_DEMO") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidValue("ETALAGE_SEED_DEMO".to_string()))?,
            None => defaults.seed_demo,
        };

        let list_limit = match lookup("ETALAGE_LIST_LIMIT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ETALAGE_LIST_LIMIT".to_string()))?,
            None => defaults.list_limit,
        };

        if list_limit == 0 || list_limit > MAX_LIST_LIMIT {
            return Err(ConfigError::OutOfRange {
                key: "ETALAGE_LIST_LIMIT".to_string(),
                min: 1,
                max: MAX_LIST_LIMIT,
            });
        }

        Ok(StorefrontConfig {
            database_path,
            log_level,
            seed_demo,
            list_limit,
        })
    }
}

/// `<platform data dir>/etalage/catalog.db`, if the platform has one.
fn default_database_path() -> Option<PathBuf> {
    ProjectDirs::from("nl", "Etalage", "etalage").map(|dirs| dirs.data_dir().join("catalog.db"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "ja" => Some(true),
        "0" | "false" | "no" | "nee" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{key} must be between {min} and {max}")]
    OutOfRange { key: String, min: u32, max: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.log_level, "info");
        assert!(config.seed_demo);
        assert_eq!(config.list_limit, DEFAULT_LIST_LIMIT);
        assert_eq!(config.database_path, default_database_path());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ETALAGE_DATABASE_PATH", "/tmp/etalage.db"),
            ("ETALAGE_LOG_LEVEL", "DEBUG"),
            ("ETALAGE_SEED_DEMO", "nee"),
            ("ETALAGE_LIST_LIMIT", "10"),
        ])
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/etalage.db")));
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_demo);
        assert_eq!(config.list_limit, 10);
    }

    #[test]
    fn test_memory_selects_demo_catalog() {
        let config = load(&[("ETALAGE_DATABASE_PATH", "memory")]).unwrap();
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("ETALAGE_SEED_DEMO", "misschien")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("ETALAGE_LIST_LIMIT", "veel")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("ETALAGE_LIST_LIMIT", "0")]),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            load(&[("ETALAGE_LIST_LIMIT", "101")]),
            Err(ConfigError::OutOfRange { .. })
        ));
    }
}
