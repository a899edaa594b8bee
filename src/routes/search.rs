use serde::{Deserialize, Serialize};

use crate::models::{Order, Shipment, StockRecord};

// =========================================================
// Global search types + route
// =========================================================

/// Cross-entity search result set.
///
/// Each section is independently capped; `total_results` counts what was
/// returned, not every match in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub shipments: Vec<Shipment>,
    pub orders: Vec<Order>,
    pub inventory_items: Vec<StockRecord>,
    pub total_results: usize,
    pub has_query: bool,
}

/// Route path constant for the global search endpoint (under /v1).
pub const SEARCH_ROUTE: &str = "/search";
