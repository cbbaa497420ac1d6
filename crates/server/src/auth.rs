//! Admin authentication
//!
//! Mutating API calls and the preview page require
//! `Authorization: Bearer <token>` with one of the configured admin tokens.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::error::AppError;
use crate::state::AppState;

/// Middleware rejecting requests without a valid admin token (401)
pub async fn require_admin(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(auth)) = auth else {
        tracing::warn!(path = %request.uri().path(), "admin request without bearer token");
        return Err(AppError::unauthorized("Missing bearer token"));
    };

    if !state.config.accepts_token(auth.token()) {
        tracing::warn!(path = %request.uri().path(), "admin request with invalid token");
        return Err(AppError::unauthorized("Invalid or expired authentication token"));
    }

    Ok(next.run(request).await)
}
