//! In-memory repository implementation.
//!
//! Backs tests and local development. Holds all entities behind a single
//! `parking_lot::RwLock` and answers every read trait by filtering clones of
//! the seeded data, mirroring the SQL semantics of the Postgres backend
//! (case-insensitive matching, nulls-last ETA ordering, stable tie-breaks).

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::ShipmentId;
use crate::db::models::{DailyVolumeRow, StatusCountRow, StockStatusCounts};
use crate::db::repository::{
    ErrorContext, InventoryRepository, OrderFilter, OrderRepository, OrderSortField, RecordStore,
    RepositoryError, RepositoryResult, ShipmentFilter, ShipmentRepository, ShipmentSort,
    SortDirection,
};
use crate::models::{
    Order, Product, Shipment, ShipmentEvent, ShipmentStatus, StockItem, StockRecord, Warehouse,
};

#[derive(Default)]
struct LocalState {
    shipments: Vec<Shipment>,
    events: Vec<ShipmentEvent>,
    orders: Vec<Order>,
    warehouses: Vec<Warehouse>,
    products: Vec<Product>,
    stock_items: Vec<StockItem>,
}

/// In-memory record store.
///
/// Seeding goes through the inherent `insert_*` methods; the read traits
/// never mutate. Entities are stored as given, IDs included.
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LocalState::default()),
        }
    }

    pub fn insert_shipment(&self, shipment: Shipment) {
        self.state.write().shipments.push(shipment);
    }

    pub fn insert_event(&self, event: ShipmentEvent) {
        self.state.write().events.push(event);
    }

    pub fn insert_order(&self, order: Order) {
        self.state.write().orders.push(order);
    }

    pub fn insert_warehouse(&self, warehouse: Warehouse) {
        self.state.write().warehouses.push(warehouse);
    }

    pub fn insert_product(&self, product: Product) {
        self.state.write().products.push(product);
    }

    pub fn insert_stock_item(&self, item: StockItem) {
        self.state.write().stock_items.push(item);
    }

    fn stock_records(state: &LocalState) -> Vec<StockRecord> {
        state
            .stock_items
            .iter()
            .filter_map(|item| {
                let product = state.products.iter().find(|p| p.id == item.product_id)?;
                let warehouse = state
                    .warehouses
                    .iter()
                    .find(|w| w.id == item.warehouse_id)?;
                Some(StockRecord {
                    id: item.id,
                    product_name: product.name.clone(),
                    sku: product.sku.clone(),
                    reorder_point: product.reorder_point,
                    warehouse_name: warehouse.name.clone(),
                    quantity: item.quantity,
                })
            })
            .collect()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match. `needle` must already be lowercased.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn shipment_text_match(shipment: &Shipment, needle_lower: &str) -> bool {
    contains_ci(&shipment.tracking_id, needle_lower)
        || contains_ci(&shipment.origin, needle_lower)
        || contains_ci(&shipment.destination, needle_lower)
        || contains_ci(&shipment.carrier, needle_lower)
        || contains_ci(&shipment.contents, needle_lower)
}

fn shipment_matches(shipment: &Shipment, filter: &ShipmentFilter) -> bool {
    if let Some(statuses) = &filter.statuses {
        if !statuses.contains(&shipment.status) {
            return false;
        }
    }
    if let Some(excluded) = filter.exclude_status {
        if shipment.status == excluded {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if shipment.priority != priority {
            return false;
        }
    }
    if let Some(text) = &filter.text {
        if !shipment_text_match(shipment, &text.to_lowercase()) {
            return false;
        }
    }
    if let Some(from) = filter.updated_from {
        if shipment.last_updated < from {
            return false;
        }
    }
    if let Some(before) = filter.updated_before {
        if shipment.last_updated >= before {
            return false;
        }
    }
    true
}

/// ETA comparison with missing ETAs sorted last in either direction.
fn cmp_eta_nulls_last(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    descending: bool,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.cmp(&x)
            } else {
                x.cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_shipments(rows: &mut [Shipment], sort: ShipmentSort) {
    match sort {
        ShipmentSort::EtaAsc => rows.sort_by(|a, b| {
            cmp_eta_nulls_last(a.eta, b.eta, false)
                .then_with(|| a.tracking_id.cmp(&b.tracking_id))
        }),
        ShipmentSort::EtaDesc => rows.sort_by(|a, b| {
            cmp_eta_nulls_last(a.eta, b.eta, true)
                .then_with(|| a.tracking_id.cmp(&b.tracking_id))
        }),
        ShipmentSort::RecentlyUpdated => rows.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| a.tracking_id.cmp(&b.tracking_id))
        }),
        ShipmentSort::PriorityRank => rows.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then_with(|| cmp_eta_nulls_last(a.eta, b.eta, false))
                .then_with(|| a.tracking_id.cmp(&b.tracking_id))
        }),
    }
}

fn order_matches(order: &Order, filter: &OrderFilter) -> bool {
    if let Some(status) = filter.status {
        if order.status != status {
            return false;
        }
    }
    if let Some(text) = &filter.text {
        let needle = text.to_lowercase();
        let id_digits = order.id.value().to_string();
        if !contains_ci(&order.customer_name, &needle) && !id_digits.contains(needle.as_str()) {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if order.order_date < from {
            return false;
        }
    }
    if let Some(before) = filter.date_before {
        if order.order_date >= before {
            return false;
        }
    }
    true
}

fn sort_orders(rows: &mut [Order], sort: OrderSortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let key = match sort {
            OrderSortField::Id => a.id.value().cmp(&b.id.value()),
            OrderSortField::CustomerName => a.customer_name.cmp(&b.customer_name),
            OrderSortField::OrderDate => a.order_date.cmp(&b.order_date),
            OrderSortField::TotalAmount => a
                .total_amount
                .partial_cmp(&b.total_amount)
                .unwrap_or(Ordering::Equal),
            OrderSortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        let key = key.then_with(|| a.id.value().cmp(&b.id.value()));
        match direction {
            SortDirection::Asc => key,
            SortDirection::Desc => key.reverse(),
        }
    });
}

#[async_trait]
impl ShipmentRepository for LocalRepository {
    async fn count_shipments(&self, filter: &ShipmentFilter) -> RepositoryResult<i64> {
        let state = self.state.read();
        let count = state
            .shipments
            .iter()
            .filter(|s| shipment_matches(s, filter))
            .count();
        Ok(count as i64)
    }

    async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        sort: ShipmentSort,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Shipment>> {
        let state = self.state.read();
        let mut rows: Vec<Shipment> = state
            .shipments
            .iter()
            .filter(|s| shipment_matches(s, filter))
            .cloned()
            .collect();
        sort_shipments(&mut rows, sort);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn get_shipment(&self, id: ShipmentId) -> RepositoryResult<Shipment> {
        let state = self.state.read();
        state
            .shipments
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Shipment not found",
                    ErrorContext::new("get_shipment")
                        .with_entity("shipment")
                        .with_entity_id(id),
                )
            })
    }

    async fn events_for_shipment(
        &self,
        id: ShipmentId,
    ) -> RepositoryResult<Vec<ShipmentEvent>> {
        let state = self.state.read();
        let mut events: Vec<ShipmentEvent> = state
            .events
            .iter()
            .filter(|e| e.shipment_id == id)
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.id.value().cmp(&b.id.value()))
        });
        Ok(events)
    }

    async fn shipment_volume_by_day(
        &self,
        from: DateTime<Utc>,
    ) -> RepositoryResult<Vec<DailyVolumeRow>> {
        let state = self.state.read();
        let mut buckets: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();
        for shipment in state.shipments.iter().filter(|s| s.last_updated >= from) {
            *buckets.entry(shipment.last_updated.date_naive()).or_insert(0) += 1;
        }
        Ok(buckets
            .into_iter()
            .map(|(day, count)| DailyVolumeRow::new(day, count))
            .collect())
    }

    async fn status_breakdown(&self) -> RepositoryResult<Vec<StatusCountRow>> {
        let state = self.state.read();
        let mut rows: Vec<StatusCountRow> = ShipmentStatus::ALL
            .iter()
            .map(|&status| StatusCountRow {
                status,
                count: state
                    .shipments
                    .iter()
                    .filter(|s| s.status == status)
                    .count() as i64,
            })
            .filter(|row| row.count > 0)
            .collect();
        rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.status.as_str().cmp(b.status.as_str()))
        });
        Ok(rows)
    }

    async fn search_shipments(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<Shipment>> {
        let needle = query.to_lowercase();
        let state = self.state.read();
        let mut rows: Vec<Shipment> = state
            .shipments
            .iter()
            .filter(|s| shipment_text_match(s, &needle))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| a.tracking_id.cmp(&b.tracking_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl OrderRepository for LocalRepository {
    async fn count_orders(&self, filter: &OrderFilter) -> RepositoryResult<i64> {
        let state = self.state.read();
        let count = state
            .orders
            .iter()
            .filter(|o| order_matches(o, filter))
            .count();
        Ok(count as i64)
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSortField,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Order>> {
        let state = self.state.read();
        let mut rows: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| order_matches(o, filter))
            .cloned()
            .collect();
        sort_orders(&mut rows, sort, direction);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn search_orders(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Order>> {
        let needle = query.to_lowercase();
        let exact_id: Option<i64> = if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
        {
            query.parse().ok()
        } else {
            None
        };
        let state = self.state.read();
        let mut rows: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| {
                contains_ci(&o.customer_name, &needle)
                    || contains_ci(o.status.as_str(), &needle)
                    || exact_id == Some(o.id.value())
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.order_date
                .cmp(&a.order_date)
                .then_with(|| b.id.value().cmp(&a.id.value()))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl InventoryRepository for LocalRepository {
    async fn sum_stock_units(&self) -> RepositoryResult<i64> {
        let state = self.state.read();
        Ok(state.stock_items.iter().map(|i| i.quantity as i64).sum())
    }

    async fn stock_status_counts(&self) -> RepositoryResult<StockStatusCounts> {
        let state = self.state.read();
        let mut counts = StockStatusCounts::default();
        for record in Self::stock_records(&state) {
            if record.is_out_of_stock() {
                counts.out_of_stock += 1;
            } else if record.is_low_stock() {
                counts.low_stock += 1;
            } else {
                counts.in_stock += 1;
            }
        }
        Ok(counts)
    }

    async fn low_stock_records(&self, limit: usize) -> RepositoryResult<Vec<StockRecord>> {
        let state = self.state.read();
        let mut rows: Vec<StockRecord> = Self::stock_records(&state)
            .into_iter()
            .filter(|r| r.is_low_stock())
            .collect();
        rows.sort_by(|a, b| {
            a.quantity
                .cmp(&b.quantity)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn count_stock_items(&self) -> RepositoryResult<i64> {
        Ok(self.state.read().stock_items.len() as i64)
    }

    async fn count_below_reorder(&self) -> RepositoryResult<i64> {
        let state = self.state.read();
        let count = Self::stock_records(&state)
            .into_iter()
            .filter(|r| r.quantity <= r.reorder_point)
            .count();
        Ok(count as i64)
    }

    async fn list_stock_records(
        &self,
        text: Option<&str>,
    ) -> RepositoryResult<Vec<StockRecord>> {
        let state = self.state.read();
        let needle = text.map(|t| t.to_lowercase());
        let mut rows: Vec<StockRecord> = Self::stock_records(&state)
            .into_iter()
            .filter(|r| match &needle {
                Some(needle) => {
                    contains_ci(&r.product_name, needle) || contains_ci(&r.sku, needle)
                }
                None => true,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.product_name
                .cmp(&b.product_name)
                .then_with(|| a.warehouse_name.cmp(&b.warehouse_name))
        });
        Ok(rows)
    }

    async fn search_stock_records(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<StockRecord>> {
        let needle = query.to_lowercase();
        let state = self.state.read();
        let mut rows: Vec<StockRecord> = Self::stock_records(&state)
            .into_iter()
            .filter(|r| {
                contains_ci(&r.product_name, &needle)
                    || contains_ci(&r.sku, &needle)
                    || contains_ci(&r.warehouse_name, &needle)
            })
            .collect();
        rows.sort_by(|a, b| {
            a.product_name
                .cmp(&b.product_name)
                .then_with(|| a.warehouse_name.cmp(&b.warehouse_name))
        });
        rows.truncate(limit);
        Ok(rows)
    }
}

#[async_trait]
impl RecordStore for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
