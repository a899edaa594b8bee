//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The response DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize; this file adds the query-string
//! parameter structs and the health response.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Dashboard
    Alert,
    AlertLevel,
    DashboardData,
    InventorySlice,
    StatCard,
    StatusCount,
    TimeframeOption,
    Tone,
    VolumePoint,
    // Inventory
    InventoryListData,
    InventoryTotals,
    // Orders
    OrderHistoryEntry,
    OrderListData,
    // Search
    SearchResults,
    // Shipments
    ChoiceOption,
    QuickFilter,
    ShipmentDetailData,
    ShipmentListData,
};

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardParams {
    /// Reporting window: "today", "7d", or "month"
    #[serde(default)]
    pub range: Option<String>,
    /// Recent orders sort field
    #[serde(default)]
    pub sort: Option<String>,
    /// Recent orders sort direction: "asc" or "desc"
    #[serde(default)]
    pub dir: Option<String>,
}

/// Query parameters for the global search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchParams {
    /// Search text; blank returns empty sections
    #[serde(default)]
    pub q: Option<String>,
}

/// Query parameters for the shipment board endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShipmentBoardParams {
    /// Board tab: "active" or "completed"
    #[serde(default)]
    pub tab: Option<String>,
    /// Status filter, or "all"
    #[serde(default)]
    pub status: Option<String>,
    /// Priority filter, or "all"
    #[serde(default)]
    pub priority: Option<String>,
    /// Search text over tracking id, route, carrier, and contents
    #[serde(default)]
    pub q: Option<String>,
    /// Sort option: "eta", "eta_desc", "updated", or "priority"
    #[serde(default)]
    pub sort: Option<String>,
    /// Shipment to preselect in the detail pane
    #[serde(default)]
    pub id: Option<i64>,
}

/// Query parameters for the order desk endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderDeskParams {
    /// Search text over customer name or order number
    #[serde(default)]
    pub q: Option<String>,
    /// Status filter, or "all"
    #[serde(default)]
    pub status: Option<String>,
    /// Order to preselect in the detail pane
    #[serde(default)]
    pub id: Option<i64>,
}

/// Query parameters for the inventory browser endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryParams {
    /// Search text over product name and SKU
    #[serde(default)]
    pub q: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
