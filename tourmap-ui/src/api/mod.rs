//! HTTP API handlers for tourmap-ui

pub mod admin;
pub mod auth;
pub mod cities;
pub mod concerts;
pub mod health;
pub mod venues;

pub use admin::{seed_storage, storage_info};
pub use auth::auth_middleware;
pub use cities::{create_city, list_cities};
pub use concerts::{
    admin_list_concerts, create_concert, delete_concert, public_concerts, update_concert,
};
pub use health::health_routes;
pub use venues::{create_venue, list_venues};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tourmap_common::Error;

/// RFC 3339 timestamp with Z suffix, as emitted in all response envelopes
pub(crate) fn wire_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Maps pipeline errors onto HTTP status codes and JSON error envelopes
///
/// The three error kinds stay distinguishable for callers: validation
/// failures carry the per-field violation list, store failures map to 503,
/// everything else is a 500.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Validation(validation) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "details": validation.violations,
                }),
            ),
            Error::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Storage backend unavailable" }),
                )
            }
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("Not found: {}", what) }),
            ),
            other => {
                tracing::error!("Unhandled error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
