//! Configuration management for the rainfall predictor
//!
//! Settings are layered: built-in defaults, an optional TOML file,
//! `RAINFALL__*` environment variables and finally command-line overrides.

pub mod overrides;
pub mod settings;
pub mod sources;

// Re-export commonly used types
pub use overrides::ConfigOverrides;
pub use settings::{LogFormat, LoggingSettings, ModelSettings, ServerSettings, ServiceConfig};
pub use sources::ENV_PREFIX;
