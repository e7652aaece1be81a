//! City endpoints

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::{wire_timestamp, ApiError};
use crate::AppState;

/// GET /api/data/cities
///
/// Public city listing; degrades to an empty list on store failure.
pub async fn list_cities(State(state): State<AppState>) -> Json<Value> {
    let listing = state.pipeline.list_cities().await;
    Json(json!({
        "cities": listing.items,
        "count": listing.count,
        "lastUpdated": wire_timestamp(listing.last_updated),
    }))
}

/// POST /api/admin/cities
pub async fn create_city(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let city = state.pipeline.add_city(&body).await?;
    Ok(Json(json!({
        "success": true,
        "city": city,
        "message": "City added successfully",
    })))
}
