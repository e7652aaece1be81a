//! tourmap-ui library - HTTP service for the tour schedule
//!
//! Serves the public read API consumed by the map frontend and the
//! password-gated admin API that mutates the schedule through the sync
//! pipeline.

use std::sync::Arc;

use axum::Router;
use tourmap_common::store::FsBlobStore;
use tourmap_common::sync::SyncPipeline;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The only component allowed to touch the record store
    pub pipeline: Arc<SyncPipeline<FsBlobStore>>,
    /// Admin Gate shared secret
    pub admin_password: Arc<String>,
}

impl AppState {
    pub fn new(pipeline: SyncPipeline<FsBlobStore>, admin_password: String) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            admin_password: Arc::new(admin_password),
        }
    }
}

/// Build application router
///
/// Admin routes sit behind the bearer-password gate; the public read API and
/// the health endpoint require no authentication.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post, put};

    // Protected routes (require the admin password)
    let protected = Router::new()
        .route(
            "/api/admin/concerts",
            get(api::admin_list_concerts).post(api::create_concert),
        )
        .route(
            "/api/admin/concerts/:id",
            put(api::update_concert).delete(api::delete_concert),
        )
        .route("/api/admin/cities", post(api::create_city))
        .route("/api/admin/venues", post(api::create_venue))
        .route("/api/admin/seed", post(api::seed_storage))
        .route("/api/admin/storage", get(api::storage_info))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/concerts", get(api::public_concerts))
        .route("/api/data/cities", get(api::list_cities))
        .route("/api/data/venues", get(api::list_venues))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
