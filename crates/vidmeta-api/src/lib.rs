//! Vidmeta API Library
//!
//! This crate provides the HTTP handlers and application setup for the video
//! metadata extraction service.

mod api_doc;
mod handlers;
mod middleware;
mod utils;

pub mod error;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
