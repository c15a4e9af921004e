//! Main integration module for the rainfall predictor
//!
//! This module wires configuration, model loading and the HTTP API together
//! and provides the entry point used by the binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use api_gateway::AppState;
use service_config::{ConfigOverrides, LogFormat, ServiceConfig};

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "rainfall-predictor", version, about = "Serve rain / no-rain predictions over HTTP")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Model artifact to load at startup
    #[arg(long, env = "MODEL_PATH", value_name = "FILE")]
    pub model_path: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// Log filter directive, e.g. `info` or `api_gateway=debug`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format (`pretty` or `json`)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Command-line values as the last configuration layer
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            model_path: self.model_path.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }

    /// Loads, overrides and validates the service configuration
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let config = ServiceConfig::load(self.config.as_deref())
            .context("failed to load configuration")?
            .with_overrides(self.overrides());

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Rainfall prediction service
pub struct RainfallPredictor {
    /// Service configuration
    config: ServiceConfig,

    /// Shared, read-only request state
    state: Arc<AppState>,
}

impl RainfallPredictor {
    /// Creates the service, loading the configured model
    ///
    /// A model that fails to load leaves the service in degraded mode rather
    /// than failing startup.
    pub fn new(config: ServiceConfig) -> Self {
        info!(model_path = %config.model.path.display(), "Initializing rainfall predictor");

        let state = Arc::new(AppState::load(&config.model));
        Self { config, state }
    }

    /// Service configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// True if a model is available for predictions
    pub fn model_loaded(&self) -> bool {
        self.state.model_loaded()
    }

    /// Serves requests until ctrl+c
    pub async fn run(self) -> Result<()> {
        info!(address = %self.config.bind_address(), "Starting rainfall predictor");
        api_gateway::run(&self.config, self.state).await
    }
}
