//! Application configuration model.
//!
//! Contains the TOML-backed settings for storage and paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the preferences store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the exercise list is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Whether a log that was never saved starts with example exercises.
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            seed_examples: default_seed_examples(),
        }
    }
}

fn default_key() -> String {
    "Exercises".to_string()
}

const fn default_seed_examples() -> bool {
    true
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Preferences store configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,

    /// Directory holding `config.toml`. Set when loading, never persisted.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gymlog")
    }

    /// Get the preferences database path.
    #[must_use]
    pub fn preferences_db_path(&self) -> PathBuf {
        self.data_dir().join("preferences.db")
    }

    /// Get the config file path. Independent of `paths.data_dir`.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.key, "Exercises");
        assert!(config.storage.seed_examples);
        assert!(config.paths.data_dir.is_none());
    }

    #[test]
    fn test_paths_follow_their_own_dirs() {
        let config = AppConfig {
            paths: PathConfig {
                data_dir: Some(PathBuf::from("/tmp/gym")),
            },
            config_dir: Some(PathBuf::from("/tmp/home/.gymlog")),
            ..Default::default()
        };

        assert_eq!(
            config.preferences_db_path(),
            PathBuf::from("/tmp/gym/preferences.db")
        );
        assert_eq!(
            config.config_file_path(),
            PathBuf::from("/tmp/home/.gymlog/config.toml")
        );
    }

    #[test]
    fn test_config_dir_is_not_serialized() {
        let config = AppConfig {
            config_dir: Some(PathBuf::from("/tmp/home/.gymlog")),
            ..Default::default()
        };

        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("config_dir"));
    }
}
