//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use vidgate_core::Config;

use crate::api_doc::ApiDoc;
use crate::auth::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;

/// Slack on top of the video cap for multipart boundaries and headers.
const BODY_LIMIT_SLACK_BYTES: usize = 1 << 20;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> anyhow::Result<Router> {
    let auth_state = Arc::new(AuthState {
        jwt_secret: config.jwt_secret.clone(),
    });

    let public_routes = Router::new()
        .route("/healthz", get(health))
        .route("/thumbnails/{id}", get(handlers::thumbnail_get::get_thumbnail))
        .route("/api/openapi.json", get(openapi));

    let protected_routes = Router::new()
        .route("/videos", post(handlers::video_create::create_video))
        .route("/videos/{id}", get(handlers::video_get::get_video))
        .route(
            "/videos/{id}/video",
            post(handlers::video_upload::upload_video),
        )
        .route(
            "/videos/{id}/thumbnail",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Handlers enforce the per-artifact caps themselves; this outer limit is
    // the hard ceiling for any request body.
    let body_limit = config.max_video_size_bytes + BODY_LIMIT_SLACK_BYTES;

    let app = public_routes
        .merge(protected_routes)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
