//! Admin Gate: bearer-password authentication middleware
//!
//! Mutation requests reach the sync pipeline only if the caller-supplied
//! secret matches the configured admin password; the pipeline itself performs
//! no authentication. Applied to the admin router only — the public read API
//! and /health stay open.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Authentication middleware
///
/// Expects `Authorization: Bearer <admin password>`. Returns 401 with a JSON
/// error envelope on a missing, malformed, or mismatched credential.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    if token != state.admin_password.as_str() {
        warn!("Rejected admin request with wrong password");
        return Err(AuthError::WrongPassword);
    }

    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingCredentials,
    WrongPassword,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // same body for both cases so the response does not reveal whether
        // the header was absent or the password wrong
        let body = Json(json!({
            "error": "Unauthorized",
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
