use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shipments::{ChoiceOption, QuickFilter};
use crate::models::Order;

// =========================================================
// Order desk types + route
// =========================================================

/// Synthesized milestone in an order's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    pub label: String,
    pub timestamp: NaiveDate,
    pub description: String,
}

/// Complete order desk dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListData {
    pub orders: Vec<Order>,
    pub selected: Option<Order>,
    pub selected_history: Vec<OrderHistoryEntry>,
    pub search_query: String,
    pub status_filter: String,
    pub status_options: Vec<ChoiceOption>,
    pub quick_filters: Vec<QuickFilter>,
}

/// Route path constant for the order desk endpoint (under /v1).
pub const ORDERS_ROUTE: &str = "/orders";
