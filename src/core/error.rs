//! Error types and handling for the gateway server.
//!
//! This module defines a unified error type that can represent errors from
//! the dispatch core and from server infrastructure, providing consistent
//! error handling across the application.

use thiserror::Error;

/// A specialized Result type for gateway server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the gateway server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error produced while dispatching a tool call.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] crate::dispatch::DispatchError),

    /// Two tools were registered under the same name at startup.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::dispatch::DuplicateToolError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from transports or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
