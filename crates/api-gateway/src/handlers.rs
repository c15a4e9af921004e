//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::Uri,
    Json,
};
use serde_json::Value;

use common::models::{FeatureMap, PredictionResult};
use inference_engine::PredictError;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// `POST /predict`
///
/// The model check comes first, so a degraded server answers 500 whatever the
/// body. After that, a missing JSON content type, an unparsable body or a
/// failed prediction is answered with 400.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>> {
    let engine = state.engine().ok_or(PredictError::ModelUnavailable)?;

    let Json(value) = body.map_err(PredictError::invalid_input)?;
    let features = FeatureMap::from_value(value).map_err(PredictError::from)?;

    let result = engine.predict(&features)?;
    Ok(Json(result))
}

pub async fn handle_404(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

pub async fn handle_405() -> ApiError {
    ApiError::MethodNotAllowed
}
