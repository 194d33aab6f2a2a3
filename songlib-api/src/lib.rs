//! songlib-api library - song catalogue HTTP service
//!
//! Exposes the router and state for the binary and integration tests.

pub mod api;
pub mod error;
pub mod pagination;
pub mod store;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use songlib_common::config::QueryDefaults;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::store::SongStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song storage backend
    pub store: Arc<dyn SongStore>,
    /// Fallbacks for missing or invalid query parameters
    pub defaults: QueryDefaults,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn SongStore>, defaults: QueryDefaults) -> Self {
        Self {
            store,
            defaults,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Every request is traced and responses are gzip-compressed when the
/// client accepts it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::song_routes())
        .merge(api::info_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
