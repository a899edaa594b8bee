//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer that sits between the record
//! store and the HTTP handlers. Services orchestrate store reads and
//! implement the aggregation, ranking, and formatting logic.

pub mod alerts;

pub mod dashboard;

pub mod inventory;

pub mod metrics;

pub mod orders;

pub mod search;

pub mod shipments;

pub use alerts::collect_alerts;
pub use dashboard::{get_dashboard_data, DashboardQuery};
pub use inventory::get_inventory_browser;
pub use metrics::{build_stat_cards, Timeframe};
pub use orders::{get_order_desk, OrderDeskQuery};
pub use search::global_search;
pub use shipments::{
    get_shipment_board, get_shipment_detail, BoardTab, ShipmentBoardQuery,
};
