//! Model artifact metadata
//!
//! Descriptive fields an artifact may carry, plus the facts the loader
//! records about the file it read.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive metadata embedded in an artifact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Model description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the model was trained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

/// Facts about the artifact file a model was loaded from
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    /// Path the artifact was read from
    pub path: PathBuf,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,

    /// Load timestamp
    pub loaded_at: DateTime<Utc>,
}
