//! Error types for the common crate
//!
//! This module defines the error type shared by the library crates of the service.

use thiserror::Error;

/// Result type for rainfall predictor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for rainfall predictor operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model artifact error
    #[error("Model error: {0}")]
    Model(String),

    /// Inference error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Invalid argument error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Returns true if the error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns true if the error was caused by caller-supplied input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::Serialization(_))
    }
}
