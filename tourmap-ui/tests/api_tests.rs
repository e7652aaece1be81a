//! Integration tests for tourmap-ui API endpoints
//!
//! Tests cover:
//! - Health endpoint (no auth required)
//! - Admin Gate authentication (bearer password)
//! - Concert create/update/delete write paths and ordering invariant
//! - Public vs admin join completeness policies
//! - Validation error envelopes
//! - Seed and storage endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tourmap_common::store::FsBlobStore;
use tourmap_common::sync::SyncPipeline;
use tourmap_ui::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

const TEST_PASSWORD: &str = "test-password";

/// Test helper: app over a tempdir-backed store; the TempDir must outlive
/// the returned router
fn setup_app(dir: &TempDir) -> axum::Router {
    let store = FsBlobStore::new(dir.path());
    let state = AppState::new(SyncPipeline::new(store), TEST_PASSWORD.to_string());
    build_router(state)
}

/// Test helper: unauthenticated request
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: admin request with JSON body
fn admin_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", TEST_PASSWORD));
    match body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn concert_body(id: &str, date: &str) -> Value {
    json!({
        "id": id,
        "date": date,
        "cityId": "city-1",
        "venueId": "venue-1",
        "status": "upcoming"
    })
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tourmap-ui");
    assert!(body["version"].is_string());
}

// =============================================================================
// Admin Gate Tests
// =============================================================================

#[tokio::test]
async fn test_admin_routes_reject_missing_credentials() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .oneshot(test_request("GET", "/api/admin/concerts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_admin_routes_reject_wrong_password() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/concerts")
        .header("Authorization", "Bearer wrong-password")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_non_bearer_scheme() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/concerts")
        .header("Authorization", format!("Basic {}", TEST_PASSWORD))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_need_no_credentials() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    for uri in ["/api/concerts", "/api/data/cities", "/api/data/venues"] {
        let response = app
            .clone()
            .oneshot(test_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {} should be open", uri);
    }
}

// =============================================================================
// Concert Write Path Tests
// =============================================================================

#[tokio::test]
async fn test_create_concert_returns_normalized_record() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/concerts",
            Some(concert_body("c1", "2025-10-02")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["concert"]["id"], "c1");
    // defaults applied by the validator
    assert_eq!(body["concert"]["soldOut"], false);
}

#[tokio::test]
async fn test_create_concert_rejects_invalid_record_with_field_details() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .oneshot(admin_request(
            "POST",
            "/api/admin/concerts",
            Some(json!({
                "id": "c1",
                "date": "2025-10-02",
                "cityId": "city-1",
                "venueId": "venue-1",
                "status": "postponed"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "status");
}

#[tokio::test]
async fn test_concert_listing_is_chronological_regardless_of_insert_order() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    // seed cities and venues so the public join resolves
    app.clone()
        .oneshot(admin_request("POST", "/api/admin/seed", None))
        .await
        .unwrap();

    for (id, date) in [("late", "2025-10-02"), ("early", "2025-09-30")] {
        let mut body = concert_body(id, date);
        body["cityId"] = json!("city-1");
        body["venueId"] = json!("venue-1");
        let response = app
            .clone()
            .oneshot(admin_request("POST", "/api/admin/concerts", Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(admin_request("GET", "/api/admin/concerts", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let ids: Vec<_> = body["concerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    let early = ids.iter().position(|id| id == "early").unwrap();
    let late = ids.iter().position(|id| id == "late").unwrap();
    assert!(early < late, "early concert must sort before late one");
}

#[tokio::test]
async fn test_update_concert_applies_partial_fields() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    app.clone()
        .oneshot(admin_request(
            "POST",
            "/api/admin/concerts",
            Some(concert_body("c1", "2025-10-02")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(admin_request(
            "PUT",
            "/api/admin/concerts/c1",
            Some(json!({ "soldOut": true })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(admin_request("GET", "/api/admin/concerts", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let concert = &body["concerts"][0];
    assert_eq!(concert["soldOut"], true);
    // untouched fields survive the patch
    assert_eq!(concert["date"], "2025-10-02");
}

#[tokio::test]
async fn test_update_of_unknown_id_reports_success() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .oneshot(admin_request(
            "PUT",
            "/api/admin/concerts/ghost",
            Some(json!({ "soldOut": true })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["concertId"], "ghost");
}

#[tokio::test]
async fn test_delete_concert_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    app.clone()
        .oneshot(admin_request(
            "POST",
            "/api/admin/concerts",
            Some(concert_body("c1", "2025-10-02")),
        ))
        .await
        .unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(admin_request("DELETE", "/api/admin/concerts/c1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["success"], true);
    }

    let response = app
        .oneshot(admin_request("GET", "/api/admin/concerts", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
}

// =============================================================================
// Read Path Tests
// =============================================================================

#[tokio::test]
async fn test_public_concerts_with_empty_store() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .oneshot(test_request("GET", "/api/concerts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["source"], "blob-storage");
    assert!(body["concerts"].as_array().unwrap().is_empty());
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_public_join_omits_dangling_concert_admin_join_keeps_it() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    app.clone()
        .oneshot(admin_request("POST", "/api/admin/seed", None))
        .await
        .unwrap();

    let mut dangling = concert_body("dangling", "2026-01-01");
    dangling["cityId"] = json!("city-404");
    app.clone()
        .oneshot(admin_request("POST", "/api/admin/concerts", Some(dangling)))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/concerts"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let public_ids: Vec<_> = body["concerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    assert!(!public_ids.contains(&"dangling".to_string()));

    let response = app
        .oneshot(admin_request("GET", "/api/admin/concerts", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let admin_entry = body["concerts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "dangling")
        .expect("admin listing keeps dangling concerts");
    assert!(admin_entry.get("city").is_none());
    assert!(admin_entry.get("venue").is_some());
}

#[tokio::test]
async fn test_venue_listing_filters_by_city() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    app.clone()
        .oneshot(admin_request("POST", "/api/admin/seed", None))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/data/venues?cityId=city-2"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["venues"][0]["cityId"], "city-2");

    let response = app
        .oneshot(test_request("GET", "/api/data/venues"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 5);
}

// =============================================================================
// Seed and Storage Tests
// =============================================================================

#[tokio::test]
async fn test_seed_then_storage_info_reports_counts() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(&dir);

    let response = app
        .clone()
        .oneshot(admin_request("POST", "/api/admin/seed", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["cities"], 5);

    let response = app
        .oneshot(admin_request("GET", "/api/admin/storage", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["storage"]["cities"], 5);
    assert_eq!(body["storage"]["venues"], 5);
    assert_eq!(body["storage"]["concerts"], 5);
}
