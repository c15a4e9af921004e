//! Model artifact format
//!
//! A model artifact is a JSON document holding the ordered list of feature
//! names a classifier expects and the classifier's learned parameters:
//!
//! ```json
//! {
//!   "features": ["MinTemp", "MaxTemp", "Humidity9am"],
//!   "model": {
//!     "type": "decision_tree",
//!     "nodes": [
//!       {"split": {"feature": 2, "threshold": 60.0, "left": 1, "right": 2}},
//!       {"leaf": {"distribution": [0.9, 0.1]}},
//!       {"leaf": {"distribution": [0.27, 0.73]}}
//!     ]
//!   }
//! }
//! ```
//!
//! [`ArtifactFile`] is the raw serde shape. [`ModelArtifact`] is only obtained
//! through validation, so code holding one may rely on every index in it.

use serde::{Deserialize, Serialize};

use common::error::Result;

use crate::metadata::ArtifactMetadata;
use crate::validation;

/// Serialized layout of a model artifact, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactFile {
    /// Feature names in the order the classifier reads them
    pub features: Vec<String>,

    /// Learned classifier
    pub model: ModelSpec,

    /// Optional descriptive metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ArtifactMetadata>,
}

/// Learned classifier parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    /// Bagged ensemble of decision trees; probabilities are averaged over trees
    RandomForest(RandomForestSpec),

    /// Single decision tree
    DecisionTree(TreeSpec),

    /// Binary logistic regression
    LogisticRegression(LogisticRegressionSpec),
}

impl ModelSpec {
    /// Short name of the classifier family, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ModelSpec::RandomForest(_) => "random_forest",
            ModelSpec::DecisionTree(_) => "decision_tree",
            ModelSpec::LogisticRegression(_) => "logistic_regression",
        }
    }
}

/// Random forest parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestSpec {
    /// Member trees
    pub trees: Vec<TreeSpec>,
}

/// Decision tree stored as a flat node list; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    /// Nodes in pre-order
    pub nodes: Vec<TreeNode>,
}

/// Decision tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node; samples with `value <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node holding class weights `[no_rain, rain]`
    ///
    /// Weights may be raw sample counts or fractions; they are normalized at
    /// prediction time.
    Leaf { distribution: [f64; 2] },
}

/// Logistic regression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    /// One weight per feature, in feature order
    pub coefficients: Vec<f64>,

    /// Bias term
    pub intercept: f64,
}

/// Validated model artifact
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    features: Vec<String>,
    model: ModelSpec,
    metadata: Option<ArtifactMetadata>,
}

impl ModelArtifact {
    /// Validates a raw artifact
    pub fn from_file(file: ArtifactFile) -> Result<Self> {
        validation::validate(&file)?;

        Ok(Self {
            features: file.features,
            model: file.model,
            metadata: file.metadata,
        })
    }

    /// Parses and validates an artifact from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let file: ArtifactFile = serde_json::from_slice(bytes)?;
        Self::from_file(file)
    }

    /// Feature names in classifier order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Learned classifier
    pub fn model(&self) -> &ModelSpec {
        &self.model
    }

    /// Descriptive metadata, if the artifact carries any
    pub fn metadata(&self) -> Option<&ArtifactMetadata> {
        self.metadata.as_ref()
    }
}
