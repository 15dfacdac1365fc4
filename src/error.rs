//! Error types for the doctor registry.
//!
//! Duplicate names and unknown ids are not errors; they come back as an
//! [`Outcome`](crate::types::Outcome). This type covers storage failures only.

use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corruption detected: {0}")]
    Corruption(String),

    #[error("Registry file is locked by another process")]
    Locked,

    #[error("Registry not initialized: {0}")]
    NotInitialized(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
