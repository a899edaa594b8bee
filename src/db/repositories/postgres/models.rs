use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date};

use super::schema::{orders, shipment_events, shipments};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shipments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShipmentRow {
    pub id: i64,
    pub tracking_id: String,
    pub origin: String,
    pub destination: String,
    pub eta: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
    pub carrier: String,
    pub contents: String,
    pub driver_contact: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shipment_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShipmentEventRow {
    pub id: i64,
    pub shipment_id: i64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub location: String,
    pub icon: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub total_amount: f64,
    pub status: String,
}

/// Denormalized stock row from the stock_items/products/warehouses join.
/// Field order matches the explicit select tuple in the queries.
#[derive(Debug, Clone, Queryable)]
pub struct StockRecordRow {
    pub id: i64,
    pub product_name: String,
    pub sku: String,
    pub reorder_point: i32,
    pub warehouse_name: String,
    pub quantity: i32,
}

#[derive(Debug, QueryableByName)]
pub struct DailyVolumeSqlRow {
    #[diesel(sql_type = Date)]
    pub day: NaiveDate,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

#[derive(Debug, QueryableByName)]
pub struct StockStatusCountsSqlRow {
    #[diesel(sql_type = BigInt)]
    pub in_stock: i64,
    #[diesel(sql_type = BigInt)]
    pub low_stock: i64,
    #[diesel(sql_type = BigInt)]
    pub out_of_stock: i64,
}
