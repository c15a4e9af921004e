//! Error types for the HTTP layer
//!
//! Prediction failures only become status codes here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use inference_engine::PredictError;

/// Error message returned when no model is loaded
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Model failed to load on server.";

/// Error message returned when a prediction request fails
pub const PREDICTION_FAILED_MESSAGE: &str = "An error occurred during prediction.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Model failed to load on server.")]
    ModelUnavailable,

    #[error("An error occurred during prediction: {0}")]
    Prediction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::ModelUnavailable => ApiError::ModelUnavailable,
            PredictError::InvalidInput(details) => ApiError::Prediction(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::ModelUnavailable => {
                tracing::warn!("Prediction requested but no model is loaded");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": MODEL_UNAVAILABLE_MESSAGE }),
                )
            }
            ApiError::Prediction(details) => {
                tracing::error!(details = %details, "Prediction error");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": PREDICTION_FAILED_MESSAGE, "details": details }),
                )
            }
            ApiError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("Not found: {}. Predictions are served at POST /predict.", path) }),
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed. Use POST /predict." }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::ModelUnavailable.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(PredictError::InvalidInput("bad".into())).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PredictError::ModelUnavailable).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
