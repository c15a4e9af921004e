//! Inference engine
//!
//! Holds one validated model for the life of the process and turns feature
//! maps into prediction results. The engine is immutable after construction
//! and is shared across request handlers without locking.

use tracing::debug;

use common::models::{FeatureMap, PredictionResult};
use model_manager::{ModelArtifact, ModelSpec};

use crate::classifier::{label_for, Classifier};
use crate::error::PredictError;
use crate::features::FeatureSchema;

/// Single-model inference engine
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    /// Feature order of the loaded model
    schema: FeatureSchema,

    /// Learned classifier
    model: ModelSpec,

    /// Whether results list defaulted features
    report_defaulted_features: bool,
}

impl InferenceEngine {
    /// Creates an engine from a validated artifact
    pub fn new(artifact: ModelArtifact) -> Self {
        let schema = FeatureSchema::new(artifact.features().to_vec());
        Self {
            schema,
            model: artifact.model().clone(),
            report_defaulted_features: false,
        }
    }

    /// Enables or disables the `defaulted_features` field in results
    pub fn with_defaulted_feature_report(mut self, enabled: bool) -> Self {
        self.report_defaulted_features = enabled;
        self
    }

    /// Feature order of the loaded model
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predicts rain for one feature map
    pub fn predict(&self, input: &FeatureMap) -> Result<PredictionResult, PredictError> {
        let aligned = self.schema.align(input)?;

        let proba = self.model.classify_proba(&aligned.vector)?;
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(PredictError::InvalidInput(format!(
                "model produced a non-finite probability {:?}",
                proba
            )));
        }

        let label = label_for(proba);
        let [_, rain_probability] = proba;

        debug!(
            prediction = label.class(),
            rain_probability,
            defaulted = aligned.defaulted.len(),
            "Prediction complete"
        );

        let result = PredictionResult::new(label, rain_probability);
        if self.report_defaulted_features {
            Ok(result.with_defaulted_features(self.schema.names_at(&aligned.defaulted)))
        } else {
            Ok(result)
        }
    }
}
