//! Inventory entities: products, warehouses, and per-warehouse stock levels.

use crate::api::{ProductId, StockItemId, WarehouseId};
use serde::{Deserialize, Serialize};

/// A storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

/// A stocked product. `reorder_point` is the threshold at or below which
/// stock counts as low.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unique stock-keeping unit code
    pub sku: String,
    pub reorder_point: i32,
}

/// Stock of one product at one warehouse. May go to or below zero when
/// outbound bookings outrun receipts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i32,
}

/// Denormalized stock row as the read side consumes it: the stock item
/// joined with its product and warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockItemId,
    pub product_name: String,
    pub sku: String,
    pub reorder_point: i32,
    pub warehouse_name: String,
    pub quantity: i32,
}

impl StockRecord {
    /// Dashboard bucket predicate: low means positive but at or below the
    /// reorder point. Zero and negative quantities are out of stock.
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.reorder_point
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }
}
