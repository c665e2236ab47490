//! # Service Error Types
//!
//! Cart rule and collaborator errors live in `rocket-core`
//! ([`CartError`](rocket_core::CartError), [`LookupError`](rocket_core::LookupError));
//! persistence errors in `rocket-store`. This module covers what only the
//! service layer can get wrong: its configuration.

use thiserror::Error;

/// Configuration load/save/validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`CartConfig`](crate::CartConfig).
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The API base URL is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A setting is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No location to save the config to.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    /// The HTTP client could not be built from the settings.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
