//! Model loader implementation
//!
//! This module reads a model artifact from disk, validates it and records
//! where it came from.

use std::path::{Path, PathBuf};
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use common::error::{Error, Result};
use common::utils::format_bytes;

use crate::artifact::ModelArtifact;
use crate::metadata::SourceInfo;

/// A validated artifact together with the facts about its file
#[derive(Debug, Clone)]
pub struct LoadedModel {
    /// Validated artifact
    pub artifact: ModelArtifact,

    /// File the artifact was read from
    pub source: SourceInfo,
}

/// Loads model artifacts from the filesystem
#[derive(Debug, Clone)]
pub struct ModelLoader {
    /// Artifact path
    path: PathBuf,
}

impl ModelLoader {
    /// Creates a loader for the artifact at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, parses and validates the artifact
    pub fn load(&self) -> Result<LoadedModel> {
        let start = Instant::now();
        debug!(path = %self.path.display(), "Reading model artifact");

        let bytes = std::fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                Error::NotFound(format!("Model file not found: {}", self.path.display()))
            }
            _ => Error::Io(e),
        })?;

        let sha256 = hex::encode(Sha256::digest(&bytes));
        let artifact = ModelArtifact::from_slice(&bytes)?;

        let source = SourceInfo {
            path: self.path.clone(),
            size_bytes: bytes.len() as u64,
            sha256,
            loaded_at: chrono::Utc::now(),
        };

        info!(
            path = %source.path.display(),
            model = artifact.model().kind(),
            features = artifact.features().len(),
            size = %format_bytes(source.size_bytes),
            sha256 = %source.sha256,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Model loaded successfully"
        );

        if let Some(metadata) = artifact.metadata() {
            debug!(
                name = metadata.name.as_deref().unwrap_or("-"),
                description = metadata.description.as_deref().unwrap_or("-"),
                trained_at = ?metadata.trained_at,
                "Model metadata"
            );
        }

        Ok(LoadedModel { artifact, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STUMP: &str = r#"{
        "features": ["Humidity3pm"],
        "model": {
            "type": "decision_tree",
            "nodes": [
                {"split": {"feature": 0, "threshold": 70.0, "left": 1, "right": 2}},
                {"leaf": {"distribution": [40, 10]}},
                {"leaf": {"distribution": [5, 15]}}
            ]
        }
    }"#;

    #[test]
    fn test_load_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STUMP.as_bytes()).unwrap();

        let loaded = ModelLoader::new(file.path()).load().unwrap();
        assert_eq!(loaded.artifact.features(), ["Humidity3pm"]);
        assert_eq!(loaded.source.size_bytes, STUMP.len() as u64);
        assert_eq!(loaded.source.sha256.len(), 64);
        assert_eq!(loaded.source.path, file.path());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelLoader::new(dir.path().join("model_rainfall.json"))
            .load()
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x80\x04\x95pickle-bytes").unwrap();

        let err = ModelLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STUMP.replace("\"feature\": 0", "\"feature\": 4").as_bytes())
            .unwrap();

        let err = ModelLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, Error::Model(_)));
    }
}
