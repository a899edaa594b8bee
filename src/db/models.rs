//! Shared data models re-exported for database layer consumers.

pub use crate::models::{
    Order, OrderStatus, Priority, Product, Shipment, ShipmentEvent, ShipmentStatus, StockItem,
    StockRecord, Warehouse,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shipments-per-day aggregation row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyVolumeRow {
    pub day: NaiveDate,
    pub count: i64,
}

impl DailyVolumeRow {
    pub fn new(day: NaiveDate, count: i64) -> Self {
        Self { day, count }
    }
}

/// Shipment count for one status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusCountRow {
    pub status: ShipmentStatus,
    pub count: i64,
}

/// Stock rows per dashboard bucket, computed in one pass over the join.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StockStatusCounts {
    /// `quantity > reorder_point`
    pub in_stock: i64,
    /// `0 < quantity <= reorder_point`
    pub low_stock: i64,
    /// `quantity <= 0`
    pub out_of_stock: i64,
}

impl StockStatusCounts {
    pub fn total(&self) -> i64 {
        self.in_stock + self.low_stock + self.out_of_stock
    }
}
