//! Concert read and mutation endpoints
//!
//! The public listing serves complete joins only and degrades to an empty
//! result set when the store is unreachable, so the map frontend still
//! renders. The admin listing tolerates dangling references and surfaces
//! store failures instead of hiding them.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::api::{wire_timestamp, ApiError};
use crate::AppState;

/// GET /api/concerts
///
/// Public joined listing. Concerts whose city or venue reference does not
/// resolve are omitted. On store failure the envelope carries an empty list
/// and `source: "error-fallback"`.
pub async fn public_concerts(State(state): State<AppState>) -> Json<Value> {
    let listing = state.pipeline.list_concerts_with_details().await;
    let source = if listing.degraded {
        "error-fallback"
    } else {
        "blob-storage"
    };
    Json(json!({
        "concerts": listing.items,
        "source": source,
        "count": listing.count,
        "lastUpdated": wire_timestamp(listing.last_updated),
    }))
}

/// GET /api/admin/concerts
///
/// Lenient joined listing for the admin panel: dangling references keep the
/// concert in the list with the joined field absent.
pub async fn admin_list_concerts(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let listing = state.pipeline.admin_concerts_with_details().await?;
    Ok(Json(json!({
        "concerts": listing.items,
        "count": listing.count,
        "lastUpdated": wire_timestamp(listing.last_updated),
    })))
}

/// POST /api/admin/concerts
///
/// Create (or replace) a concert from a full record.
pub async fn create_concert(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let concert = state.pipeline.add_concert(&body).await?;
    Ok(Json(json!({
        "success": true,
        "concert": concert,
        "message": "Concert added successfully",
    })))
}

/// PUT /api/admin/concerts/:id
///
/// Partial update; updating an id with no matching concert is a no-op that
/// still reports success.
pub async fn update_concert(
    State(state): State<AppState>,
    Path(concert_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    state.pipeline.update_concert(&concert_id, &body).await?;
    Ok(Json(json!({
        "success": true,
        "concertId": concert_id,
        "message": "Concert updated successfully",
    })))
}

/// DELETE /api/admin/concerts/:id
///
/// Idempotent delete; a missing id still reports success.
pub async fn delete_concert(
    State(state): State<AppState>,
    Path(concert_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.pipeline.delete_concert(&concert_id).await?;
    Ok(Json(json!({
        "success": true,
        "concertId": concert_id,
        "message": "Concert deleted successfully",
    })))
}
