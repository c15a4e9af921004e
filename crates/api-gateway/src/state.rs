//! Application state management

use tracing::{error, info};

use inference_engine::InferenceEngine;
use model_manager::{ModelLoader, SourceInfo};
use service_config::ModelSettings;

/// Application state shared across handlers
///
/// Built once before the server starts. It either holds a ready engine or
/// records that no model is available; neither changes afterwards.
#[derive(Debug)]
pub struct AppState {
    engine: Option<InferenceEngine>,
    source: Option<SourceInfo>,
}

impl AppState {
    /// State serving the given engine
    pub fn with_engine(engine: InferenceEngine) -> Self {
        Self {
            engine: Some(engine),
            source: None,
        }
    }

    /// State with no model; every prediction is refused
    pub fn unavailable() -> Self {
        Self {
            engine: None,
            source: None,
        }
    }

    /// Loads the configured artifact, falling back to degraded mode on any failure
    pub fn load(settings: &ModelSettings) -> Self {
        match ModelLoader::new(&settings.path).load() {
            Ok(loaded) => {
                let engine = InferenceEngine::new(loaded.artifact)
                    .with_defaulted_feature_report(settings.report_defaulted_features);
                info!(
                    features = ?engine.schema().names(),
                    sha256 = %loaded.source.sha256,
                    loaded_at = %loaded.source.loaded_at.to_rfc3339(),
                    "Inference engine ready"
                );
                Self {
                    engine: Some(engine),
                    source: Some(loaded.source),
                }
            }
            Err(e) => {
                error!(
                    path = %settings.path.display(),
                    error = %e,
                    "Failed to load model; predictions will be refused until restart"
                );
                Self::unavailable()
            }
        }
    }

    /// Loaded engine, if any
    pub fn engine(&self) -> Option<&InferenceEngine> {
        self.engine.as_ref()
    }

    /// File the model was loaded from, if it came from disk
    pub fn source(&self) -> Option<&SourceInfo> {
        self.source.as_ref()
    }

    /// True if predictions can be served
    pub fn model_loaded(&self) -> bool {
        self.engine.is_some()
    }
}
