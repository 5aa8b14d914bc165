//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration field is missing.
    #[error("missing configuration value '{field}' (set {env_hint} or pass the flag)")]
    Missing {
        field: String,
        env_hint: String,
    },
}
