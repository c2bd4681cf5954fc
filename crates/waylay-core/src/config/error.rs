//! Error types for configuration handling.

use thiserror::Error;

/// Configuration serialization or persistence error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Snapshot (de)serialization error
    #[error("config snapshot error: {0}")]
    Json(#[from] serde_json::Error),
    /// Persistence store I/O error
    #[error("persistence store error: {0}")]
    Store(#[from] std::io::Error),
}
