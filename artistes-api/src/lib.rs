//! # Artistes API Library
//!
//! CRUD and search over artist records kept in a single JSON file.
//!
//! **Layers:** HTTP handlers (`api`) → business rules (`service`) →
//! whole-collection storage (`storage`).

pub mod api;
pub mod error;
pub mod service;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};
pub use crate::service::ArtistService;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ArtistService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Backing data file, reported by /health
    pub data_file: String,
}

impl AppState {
    pub fn new(service: ArtistService, data_file: impl Into<String>) -> Self {
        Self {
            service,
            startup_time: Utc::now(),
            data_file: data_file.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::artist_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
