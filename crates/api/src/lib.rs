//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the report pages
//! - Error-to-response mapping
//! - Router assembly

pub mod error;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trialview_core::reports::TrialBalanceSource;
use trialview_db::TrialBalanceRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Trial balance store the reports read from.
    pub source: Arc<dyn TrialBalanceSource>,
}

impl AppState {
    /// State backed by an arbitrary trial balance store.
    pub fn new(source: Arc<dyn TrialBalanceSource>) -> Self {
        Self { source }
    }

    /// State backed by the database.
    pub fn from_database(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(TrialBalanceRepository::new(db)))
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
