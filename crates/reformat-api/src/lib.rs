//! # reformat-api
//!
//! HTTP API layer for the Reformat conversion service: router, CORS,
//! error-to-status mapping, and the upload/convert/respond pipeline.

pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
