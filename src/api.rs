//! Public API surface for the backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::Alert;
pub use crate::routes::dashboard::AlertLevel;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::InventorySlice;
pub use crate::routes::dashboard::StatCard;
pub use crate::routes::dashboard::StatusCount;
pub use crate::routes::dashboard::TimeframeOption;
pub use crate::routes::dashboard::Tone;
pub use crate::routes::dashboard::VolumePoint;
pub use crate::routes::inventory::InventoryListData;
pub use crate::routes::inventory::InventoryTotals;
pub use crate::routes::orders::OrderHistoryEntry;
pub use crate::routes::orders::OrderListData;
pub use crate::routes::search::SearchResults;
pub use crate::routes::shipments::ChoiceOption;
pub use crate::routes::shipments::QuickFilter;
pub use crate::routes::shipments::ShipmentDetailData;
pub use crate::routes::shipments::ShipmentListData;

pub use crate::models::Order;
pub use crate::models::OrderStatus;
pub use crate::models::Priority;
pub use crate::models::Product;
pub use crate::models::Shipment;
pub use crate::models::ShipmentEvent;
pub use crate::models::ShipmentStatus;
pub use crate::models::StockItem;
pub use crate::models::StockRecord;
pub use crate::models::Warehouse;

use serde::{Deserialize, Serialize};

/// Shipment identifier (database primary key).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShipmentId(pub i64);

/// Shipment timeline event identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentEventId(pub i64);

/// Order identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrderId(pub i64);

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

/// Warehouse identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseId(pub i64);

/// Stock item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockItemId(pub i64);

impl ShipmentId {
    pub fn new(value: i64) -> Self {
        ShipmentId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ShipmentEventId {
    pub fn new(value: i64) -> Self {
        ShipmentEventId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl OrderId {
    pub fn new(value: i64) -> Self {
        OrderId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ProductId {
    pub fn new(value: i64) -> Self {
        ProductId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl WarehouseId {
    pub fn new(value: i64) -> Self {
        WarehouseId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl StockItemId {
    pub fn new(value: i64) -> Self {
        StockItemId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ShipmentEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for StockItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ShipmentId> for i64 {
    fn from(id: ShipmentId) -> Self {
        id.0
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}
