//! Venue endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{wire_timestamp, ApiError};
use crate::AppState;

/// Query parameters for venue listing
#[derive(Debug, Deserialize)]
pub struct VenueQuery {
    /// Restrict to venues in this city
    #[serde(rename = "cityId")]
    pub city_id: Option<String>,
}

/// GET /api/data/venues?cityId=
///
/// Public venue listing with an optional city filter; degrades to an empty
/// list on store failure.
pub async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<VenueQuery>,
) -> Json<Value> {
    let listing = state.pipeline.list_venues(query.city_id.as_deref()).await;
    Json(json!({
        "venues": listing.items,
        "count": listing.count,
        "lastUpdated": wire_timestamp(listing.last_updated),
    }))
}

/// POST /api/admin/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let venue = state.pipeline.add_venue(&body).await?;
    Ok(Json(json!({
        "success": true,
        "venue": venue,
        "message": "Venue added successfully",
    })))
}
