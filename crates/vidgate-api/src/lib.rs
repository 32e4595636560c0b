//! Vidgate API library
//!
//! HTTP handlers, auth middleware, and application setup for the upload
//! pipeline. The binary in `main.rs` wires this together; integration tests
//! build the router directly with fake collaborators.

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
