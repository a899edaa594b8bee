use serde::{Deserialize, Serialize};

use super::dashboard::StatCard;
use crate::models::StockRecord;

// =========================================================
// Inventory browser types + route
// =========================================================

/// Raw warehouse-wide aggregates behind the inventory stat cards.
///
/// `low_stock_items` counts every record at or below its reorder point,
/// including records that are fully out of stock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InventoryTotals {
    pub total_items: i64,
    pub low_stock_items: i64,
    pub total_units: i64,
}

/// Complete inventory browser dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryListData {
    pub items: Vec<StockRecord>,
    pub search_query: String,
    pub totals: InventoryTotals,
    pub stats: Vec<StatCard>,
}

/// Route path constant for the inventory browser endpoint (under /v1).
pub const INVENTORY_ROUTE: &str = "/inventory";
