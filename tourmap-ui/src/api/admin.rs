//! Admin storage endpoints: seeding and collection counts

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tourmap_common::seed;

use crate::api::{wire_timestamp, ApiError};
use crate::AppState;

/// POST /api/admin/seed
///
/// Overwrites all three collections with the built-in seed data.
pub async fn seed_storage(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let info = state
        .pipeline
        .seed(seed::seed_cities(), seed::seed_venues(), seed::seed_concerts())
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Storage seeded successfully",
        "data": info,
    })))
}

/// GET /api/admin/storage
///
/// Per-collection record counts.
pub async fn storage_info(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let info = state.pipeline.storage_info().await?;
    Ok(Json(json!({
        "storage": info,
        "lastUpdated": wire_timestamp(chrono::Utc::now()),
    })))
}
