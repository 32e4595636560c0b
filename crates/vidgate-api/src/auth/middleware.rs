use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use vidgate_core::AppError;

use super::jwt::validate_token;
use super::models::AuthContext;
use crate::error::HttpAppError;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Validate the bearer token and insert an [`AuthContext`] into request
/// extensions. Requests without a valid token never reach a handler, so no
/// file writes happen for them.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing bearer token".to_string(),
            ))
            .into_response();
        }
    };

    match validate_token(token, &auth_state.jwt_secret) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthContext {
                    user_id: claims.sub,
                });
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}
