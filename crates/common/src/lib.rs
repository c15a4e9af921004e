//! Common utilities and types for the rainfall predictor
//! 
//! This crate provides shared functionality used across the service,
//! including the error type, the request/response data models and
//! formatting helpers.

pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::*;
