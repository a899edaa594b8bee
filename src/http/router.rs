//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        .route(routes::dashboard::DASHBOARD_ROUTE, get(handlers::get_dashboard))
        .route(routes::search::SEARCH_ROUTE, get(handlers::search))
        .route(routes::shipments::SHIPMENTS_ROUTE, get(handlers::list_shipments))
        .route(routes::shipments::SHIPMENT_DETAIL_ROUTE, get(handlers::get_shipment))
        .route(routes::orders::ORDERS_ROUTE, get(handlers::list_orders))
        .route(routes::inventory::INVENTORY_ROUTE, get(handlers::list_inventory));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Every endpoint is a query-only GET; keep request bodies small.
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
