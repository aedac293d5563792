//! Configuration Error Types
//!
//! Every failure that can abort startup is a `ConfigError`.

use std::path::PathBuf;

/// Result alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file unavailable: {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing environment variable: {0}")]
    MissingVariable(String),

    #[error("Environment variable {0} must contain at least one value")]
    EmptyList(String),

    #[error("Malformed configuration file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Environment configuration does not match schema: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl ConfigError {
    /// Whether the error came from a missing source rather than bad content
    pub fn is_missing_source(&self) -> bool {
        matches!(
            self,
            ConfigError::SourceUnavailable { .. } | ConfigError::MissingVariable(_)
        )
    }
}
