//! Error types for scene configuration

use std::path::PathBuf;

/// Errors raised while loading or validating a [`SceneConfig`](crate::SceneConfig).
///
/// The per-frame core is infallible; only startup configuration can fail.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
