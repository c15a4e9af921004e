//! Model inference for the rainfall predictor
//!
//! This crate aligns caller-supplied feature maps to a model's feature order
//! and runs the loaded classifier on the resulting row.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod features;

// Re-export commonly used types
pub use classifier::Classifier;
pub use engine::InferenceEngine;
pub use error::PredictError;
pub use features::{AlignedFeatures, FeatureSchema, FeatureVector, DEFAULT_FEATURE_VALUE};
