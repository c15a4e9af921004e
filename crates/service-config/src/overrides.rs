//! Command-line overrides
//!
//! Overrides are the last configuration layer; a `None` field leaves the
//! loaded value untouched.

use std::path::PathBuf;

use crate::settings::{LogFormat, ServiceConfig};

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Bind address
    pub host: Option<String>,

    /// Bind port
    pub port: Option<u16>,

    /// Model artifact path
    pub model_path: Option<PathBuf>,

    /// Log filter directive
    pub log_level: Option<String>,

    /// Log output format
    pub log_format: Option<LogFormat>,
}

impl ServiceConfig {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(path) = overrides.model_path {
            self.model.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        self
    }
}
