//! Server startup and runtime errors
//!
//! Distinct from [`crate::utils::AppError`], which covers request
//! handling: these errors abort the process, not a request.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
