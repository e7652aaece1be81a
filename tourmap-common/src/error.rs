//! Common error types for tourmap

use thiserror::Error;

use crate::validate::ValidationError;

/// Common result type for tourmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the tourmap service
#[derive(Error, Debug)]
pub enum Error {
    /// A candidate record failed schema validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Storage backend unreachable or returned malformed data
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
