//! Catalog configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```ignore
//! let config = CatalogConfig::from_json_str(r#"{ "id_policy": "next_unused" }"#)?;
//! let books = BookCollection::with_config(config);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How `BookCollection::create` picks the id of a new book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Counter that only moves forward. Ids of removed books are never handed
    /// out again, and explicitly added ids push the counter past themselves.
    #[default]
    Monotonic,
    /// Largest id currently in the collection plus one. Ids freed at the tail
    /// are reused.
    NextUnused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub id_policy: IdPolicy,
    /// Notify subscribers even when `remove` finds nothing to remove.
    pub notify_on_noop_remove: bool,
    /// Upper bound on back-to-back notification passes caused by listeners
    /// that mutate the collection while being notified.
    pub max_notify_passes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            id_policy: IdPolicy::Monotonic,
            notify_on_noop_remove: true,
            max_notify_passes: 8,
        }
    }
}

impl CatalogConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config read error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = CatalogConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert!(config.notify_on_noop_remove);
        assert_eq!(config.max_notify_passes, 8);
    }

    #[test]
    fn partial_override() {
        let config = CatalogConfig::from_json_str(
            r#"{ "id_policy": "next_unused", "notify_on_noop_remove": false }"#,
        )
        .unwrap();
        assert_eq!(config.id_policy, IdPolicy::NextUnused);
        assert!(!config.notify_on_noop_remove);
        assert_eq!(config.max_notify_passes, 8);
    }

    #[test]
    fn bad_json_is_parse_error() {
        let err = CatalogConfig::from_json_str(r#"{ "id_policy": "random" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CatalogConfig::from_path("/definitely/not/here/catalog.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
