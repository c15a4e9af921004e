//! Configuration sources
//!
//! Builds a [`ServiceConfig`] from an optional TOML file and the process
//! environment using the `config` crate. Fields missing from every source keep
//! their defaults.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use common::error::{Error, Result};

use crate::settings::ServiceConfig;

/// Prefix of environment variables read as configuration, e.g. `RAINFALL__MODEL__PATH`
pub const ENV_PREFIX: &str = "RAINFALL";

impl ServiceConfig {
    /// Loads the configuration from an optional file and the environment
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from_sources(file, Some(environment()))
    }

    fn load_from_sources(file: Option<&Path>, env: Option<Environment>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder
            .build()
            .and_then(|layered| layered.try_deserialize::<ServiceConfig>())
            .map_err(|e| Error::Config(e.to_string()))
    }
}

/// `RAINFALL__SECTION__KEY` variables, with values parsed as numbers or booleans where possible
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
