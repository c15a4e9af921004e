//! HTTP API for the rainfall predictor
//!
//! This crate exposes the loaded model through `POST /predict`, maps
//! prediction failures to HTTP status codes and runs the server loop.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use error::ApiError;
pub use routes::create_router;
pub use server::{run, serve};
pub use state::AppState;
