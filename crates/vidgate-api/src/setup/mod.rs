//! Application setup: collaborators, routes, server.

pub mod routes;
pub mod server;
pub mod services;

use std::sync::Arc;

use axum::Router;
use vidgate_core::Config;

use crate::state::AppState;

/// Build the application state and router from configuration.
pub async fn initialize_app(config: Config) -> anyhow::Result<(Arc<AppState>, Router)> {
    let state = services::build_state(config.clone()).await?;
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
