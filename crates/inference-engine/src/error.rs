//! Per-request prediction errors

use std::fmt::Display;

use thiserror::Error;

/// Why a prediction request could not be answered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// No model was loaded at startup
    #[error("Model failed to load on server.")]
    ModelUnavailable,

    /// The request body, a feature value or the inference call was rejected
    #[error("{0}")]
    InvalidInput(String),
}

impl PredictError {
    /// Wraps any error as invalid input, keeping its message
    pub fn invalid_input(err: impl Display) -> Self {
        PredictError::InvalidInput(err.to_string())
    }
}

impl From<common::Error> for PredictError {
    fn from(err: common::Error) -> Self {
        PredictError::invalid_input(err)
    }
}
