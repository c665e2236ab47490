//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKET_API_URL=http://localhost:3333                               │
//! │     ROCKET_DB_PATH=/tmp/cart.db                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/cart.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.rocketshoes.cart/cart.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "rocketshoes.db"
//! key = "@RocketShoes:cart"
//!
//! [manager]
//! channel_capacity = 32
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};
use rocket_core::CART_STORAGE_KEY;

/// Database file name used when no path is configured.
const DEFAULT_DB_FILE: &str = "rocketshoes.db";

// =============================================================================
// API Settings
// =============================================================================

/// Where the stock and catalog endpoints live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `/stock/{id}` and `/products/{id}` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiSettings {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart snapshot is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            key: default_storage_key(),
        }
    }
}

impl StorageSettings {
    /// The configured path, else `<data dir>/rocketshoes.db`, else
    /// `./rocketshoes.db` when no home directory can be determined.
    pub fn resolved_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }
}

// =============================================================================
// Manager Settings
// =============================================================================

/// Cart task tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Commands that may queue before callers wait.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for ManagerSettings {
    fn default() -> Self {
        ManagerSettings {
            channel_capacity: default_channel_capacity(),
        }
    }
}

// =============================================================================
// Cart Config
// =============================================================================

/// Complete cart service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Stock and catalog endpoints.
    #[serde(default)]
    pub api: ApiSettings,

    /// Snapshot persistence.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Cart task tuning.
    #[serde(default)]
    pub manager: ManagerSettings,
}

impl CartConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage key must not be empty".into()));
        }

        if self.manager.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `ROCKET_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source. Unparseable numbers are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("ROCKET_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("ROCKET_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.api.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring invalid ROCKET_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = var("ROCKET_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("ROCKET_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(capacity) = var("ROCKET_CHANNEL_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(c) => self.manager.channel_capacity = c,
                Err(_) => warn!(value = %capacity, "Ignoring invalid ROCKET_CHANNEL_CAPACITY"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.manager.channel_capacity, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.api.base_url = "ws://localhost:3333".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "https://api.rocketshoes.example".into();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.api.timeout_secs = 5;

        config.storage.key = "  ".into();
        assert!(config.validate().is_err());
        config.storage.key = "cart".into();

        config.manager.channel_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ROCKET_API_URL", "http://10.0.0.5:3333"),
            ("ROCKET_API_TIMEOUT_SECS", "3"),
            ("ROCKET_DB_PATH", "/tmp/override.db"),
            ("ROCKET_STORAGE_KEY", "@RocketShoes:cart:test"),
            ("ROCKET_CHANNEL_CAPACITY", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:3333");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(
            config.storage.resolved_database_path(),
            PathBuf::from("/tmp/override.db")
        );
        assert_eq!(config.storage.key, "@RocketShoes:cart:test");
        assert_eq!(config.manager.channel_capacity, 32);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CartConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://catalog.local:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://catalog.local:8080");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage, StorageSettings::default());
    }

    #[test]
    fn test_save_and_reload_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.toml");

        let mut config = CartConfig::default();
        config.api.timeout_secs = 4;
        config.storage.database_path = Some(dir.path().join("cart.db"));
        config.save(Some(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("[storage]"));

        let loaded: CartConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            CartConfig::load(Some(path.clone())),
            Err(ConfigError::Parse(_))
        ));
    }
}
