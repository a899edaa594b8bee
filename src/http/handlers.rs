//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for aggregation and formatting logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use super::dto::{
    DashboardData, DashboardParams, HealthResponse, InventoryListData, InventoryParams,
    OrderDeskParams, OrderListData, SearchParams, SearchResults, ShipmentBoardParams,
    ShipmentDetailData, ShipmentListData,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::ShipmentId;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the record
/// store is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Get the full dashboard dataset: KPI cards, volume chart, inventory
/// breakdown, alerts, status overview, and recent orders.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> HandlerResult<DashboardData> {
    let query = services::DashboardQuery::from_params(
        params.range.as_deref(),
        params.sort.as_deref(),
        params.dir.as_deref(),
    );

    let data = services::get_dashboard_data(state.repository.as_ref(), query, Utc::now()).await?;

    Ok(Json(data))
}

// =============================================================================
// Global Search
// =============================================================================

/// GET /v1/search
///
/// Search shipments, orders, and inventory in one request.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> HandlerResult<SearchResults> {
    let query = params.q.unwrap_or_default();

    let results = services::global_search(state.repository.as_ref(), &query).await?;

    Ok(Json(results))
}

// =============================================================================
// Shipments
// =============================================================================

/// GET /v1/shipments
///
/// Get the shipment board for one tab with filters, sorting, and the
/// selected shipment resolved.
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(params): Query<ShipmentBoardParams>,
) -> HandlerResult<ShipmentListData> {
    let query = services::ShipmentBoardQuery::from_params(
        params.tab.as_deref(),
        params.status.as_deref(),
        params.priority.as_deref(),
        params.q.as_deref(),
        params.sort.as_deref(),
        params.id,
    );

    let board = services::get_shipment_board(state.repository.as_ref(), query).await?;

    Ok(Json(board))
}

/// GET /v1/shipments/{id}
///
/// Get one shipment with its transit timeline.
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ShipmentDetailData> {
    let detail =
        services::get_shipment_detail(state.repository.as_ref(), ShipmentId::new(id)).await?;

    Ok(Json(detail))
}

// =============================================================================
// Orders
// =============================================================================

/// GET /v1/orders
///
/// Get the order desk listing with the selected order and its synthesized
/// history.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrderDeskParams>,
) -> HandlerResult<OrderListData> {
    let query = services::OrderDeskQuery::from_params(
        params.q.as_deref(),
        params.status.as_deref(),
        params.id,
    );

    let desk = services::get_order_desk(state.repository.as_ref(), query).await?;

    Ok(Json(desk))
}

// =============================================================================
// Inventory
// =============================================================================

/// GET /v1/inventory
///
/// Get the inventory browser listing with warehouse-wide stat cards.
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryParams>,
) -> HandlerResult<InventoryListData> {
    let data =
        services::get_inventory_browser(state.repository.as_ref(), params.q.as_deref()).await?;

    Ok(Json(data))
}
