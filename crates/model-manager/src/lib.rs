//! Model artifact management for the rainfall predictor
//!
//! This crate defines the on-disk model artifact format and loads validated
//! artifacts from the filesystem.

pub mod artifact;
pub mod loader;
pub mod metadata;
pub mod validation;

// Re-export commonly used types
pub use artifact::{
    ArtifactFile, LogisticRegressionSpec, ModelArtifact, ModelSpec, RandomForestSpec, TreeNode,
    TreeSpec,
};
pub use loader::{LoadedModel, ModelLoader};
pub use metadata::{ArtifactMetadata, SourceInfo};
