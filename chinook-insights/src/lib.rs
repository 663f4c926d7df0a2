//! chinook-insights library - read-only sales analysis service
//!
//! Serves a fixed catalog of analyses over a Chinook-style music store
//! database: album-vs-track purchase classification, genre sales by
//! country, employee sales performance, and sales by country.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Store connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/tables", get(api::list_store_tables))
        .route(
            "/api/analysis/album-purchases",
            get(api::album_purchase_summary),
        )
        .route(
            "/api/analysis/album-purchases/invoices",
            get(api::album_purchase_invoices),
        )
        .route("/api/analysis/genre-sales", get(api::genre_sales))
        .route("/api/analysis/employee-sales", get(api::employee_sales))
        .route("/api/analysis/country-sales", get(api::country_sales))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
