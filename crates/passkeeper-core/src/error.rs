//! Error types for passkeeper-core

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage-level faults.
///
/// A duplicate username or a failed login is a normal outcome and never
/// shows up here; these variants mean the backing storage itself failed.
/// Wrapped errors are reachable through `source()`, not repeated in the message.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}
