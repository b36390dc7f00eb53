//! Connection and index configuration
//!
//! Settings come from a JSON file, optionally nested under a `"store"`
//! section, and explicit overrides (CLI flags, environment) win over file
//! values. Validation happens before any store is touched.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default k-mer length
pub const DEFAULT_K: usize = 3;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not specified")]
    Missing(&'static str),

    #[error("Invalid direction {0} (expected 1 or -1)")]
    InvalidDirection(i64),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Partially specified connection settings, as read from a file or flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ConnectionSettings {
    /// Values set in `overrides` replace ours
    pub fn merge(self, overrides: ConnectionSettings) -> Self {
        ConnectionSettings {
            uri: overrides.uri.or(self.uri),
            db_name: overrides.db_name.or(self.db_name),
            user: overrides.user.or(self.user),
            password: overrides.password.or(self.password),
        }
    }

    /// Check required fields. `db_name` defaults to empty.
    pub fn resolve(self) -> Result<ConnectionConfig, ConfigError> {
        Ok(ConnectionConfig {
            uri: self.uri.ok_or(ConfigError::Missing("Location"))?,
            user: self.user.ok_or(ConfigError::Missing("Username"))?,
            password: self.password.ok_or(ConfigError::Missing("Password"))?,
            db_name: self.db_name.unwrap_or_default(),
        })
    }
}

/// Validated connection parameters
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub uri: String,
    pub db_name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("uri", &self.uri)
            .field("db_name", &self.db_name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            uri: "memory:".to_string(),
            db_name: "afgraph".to_string(),
            user: "afgraph".to_string(),
            password: "afgraph".to_string(),
        }
    }
}

/// How per-window color sets must relate for an index match to succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorConsistency {
    /// Succeed only when the intersection of all window color sets is empty
    #[default]
    Disjoint,
    /// Succeed only when every window shares at least one color
    Shared,
}

/// File layout: connection fields at top level or under `"store"`
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    store: Option<ConnectionSettings>,
    #[serde(flatten)]
    top_level: ConnectionSettings,
    #[serde(default)]
    k: Option<usize>,
    #[serde(default)]
    color_consistency: Option<ColorConsistency>,
}

/// Everything needed to open a graph and build its index
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub connection: ConnectionSettings,
    pub k: usize,
    pub color_consistency: ColorConsistency,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let defaults = ConnectionConfig::default();
        Self {
            connection: ConnectionSettings {
                uri: Some(defaults.uri),
                db_name: Some(defaults.db_name),
                user: Some(defaults.user),
                password: Some(defaults.password),
            },
            k: DEFAULT_K,
            color_consistency: ColorConsistency::default(),
        }
    }
}

impl GraphConfig {
    /// Parse a JSON config document
    pub fn from_json(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        // A "store" section takes precedence over stray top-level keys
        let connection = match file.store {
            Some(section) => file.top_level.merge(section),
            None => file.top_level,
        };
        Ok(GraphConfig {
            connection,
            k: file.k.unwrap_or(DEFAULT_K),
            color_consistency: file.color_consistency.unwrap_or_default(),
        })
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_json(&text, &origin)
    }

    /// Apply explicit connection overrides
    pub fn with_overrides(mut self, overrides: ConnectionSettings) -> Self {
        self.connection = self.connection.merge(overrides);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_requires_credentials() {
        let settings = ConnectionSettings {
            uri: Some("memory:".into()),
            user: Some("u".into()),
            ..Default::default()
        };
        let err = settings.resolve().unwrap_err();
        assert_eq!(err.to_string(), "Password not specified");

        let err = ConnectionSettings::default().resolve().unwrap_err();
        assert_eq!(err.to_string(), "Location not specified");
    }

    #[test]
    fn test_db_name_defaults_to_empty() {
        let config = ConnectionSettings {
            uri: Some("memory:".into()),
            user: Some("u".into()),
            password: Some("p".into()),
            db_name: None,
        }
        .resolve()
        .unwrap();
        assert_eq!(config.db_name, "");
        assert!(!format!("{:?}", config).contains("\"p\""));
    }

    #[test]
    fn test_nested_store_section() {
        let json = r#"{
            "store": {"uri": "memory:", "db_name": "pangenome", "user": "me", "password": "pw"},
            "k": 5,
            "color_consistency": "shared"
        }"#;
        let config = GraphConfig::from_json(json, "inline").unwrap();
        assert_eq!(config.k, 5);
        assert_eq!(config.color_consistency, ColorConsistency::Shared);
        assert_eq!(config.connection.db_name.as_deref(), Some("pangenome"));
    }

    #[test]
    fn test_flat_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"uri": "memory:", "user": "me", "password": "pw"}}"#).unwrap();

        let config = GraphConfig::from_file(file.path())
            .unwrap()
            .with_overrides(ConnectionSettings {
                user: Some("other".into()),
                ..Default::default()
            });
        assert_eq!(config.k, DEFAULT_K);
        assert_eq!(config.color_consistency, ColorConsistency::Disjoint);

        let resolved = config.connection.resolve().unwrap();
        assert_eq!(resolved.user, "other");
        assert_eq!(resolved.password, "pw");
    }

    #[test]
    fn test_bad_files() {
        assert!(matches!(
            GraphConfig::from_file("/nonexistent/afgraph.json"),
            Err(ConfigError::Read { .. })
        ));
        assert!(matches!(
            GraphConfig::from_json("{not json", "inline"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_config_resolves() {
        let resolved = GraphConfig::default().connection.resolve().unwrap();
        assert_eq!(resolved, ConnectionConfig::default());
    }
}
