//! Alert aggregator: ranked, capped exception feed for the dashboard.
//!
//! Alerts come in three fixed-precedence groups, each capped on its own:
//! troubled shipments, then low stock, then overdue pending orders. The
//! feed never re-sorts across groups.

use chrono::{DateTime, Duration, Utc};

use crate::api::{Alert, AlertLevel};
use crate::db::repository::{
    OrderFilter, OrderSortField, RepositoryResult, ShipmentFilter, ShipmentSort, SortDirection,
};
use crate::db::RecordStore;
use crate::models::{Order, Shipment, StockRecord};

/// Cap on delayed/issue shipment alerts.
const MAX_SHIPMENT_ALERTS: usize = 3;
/// Cap on low-stock alerts.
const MAX_STOCK_ALERTS: usize = 3;
/// Cap on overdue-order alerts.
const MAX_ORDER_ALERTS: usize = 2;
/// Pending orders older than this many days count as overdue.
const OVERDUE_AFTER_DAYS: i64 = 3;

/// Alert for a shipment that is delayed or flagged with an issue.
pub(crate) fn shipment_alert(shipment: &Shipment) -> Alert {
    Alert {
        level: AlertLevel::Danger,
        icon: "warning".to_string(),
        message: format!(
            "Shipment {} is {}",
            shipment.tracking_id,
            shipment.status.label().to_lowercase()
        ),
        detail: format!("{} → {}", shipment.origin, shipment.destination),
        timestamp: shipment.last_updated,
    }
}

/// Alert for a stock record sitting at or below its reorder point.
pub(crate) fn stock_alert(record: &StockRecord, now: DateTime<Utc>) -> Alert {
    Alert {
        level: AlertLevel::Warning,
        icon: "inventory_2".to_string(),
        message: format!("Low stock: {}", record.product_name),
        detail: format!("{} units at {}", record.quantity, record.warehouse_name),
        timestamp: now,
    }
}

/// Alert for a pending order that has sat unprocessed too long.
pub(crate) fn order_alert(order: &Order, now: DateTime<Utc>) -> Alert {
    Alert {
        level: AlertLevel::Info,
        icon: "shopping_cart".to_string(),
        message: format!(
            "Order #{} pending since {}",
            order.id,
            order.order_date.format("%b %d")
        ),
        detail: order.customer_name.clone(),
        timestamp: now,
    }
}

/// Scan current state for exception conditions and build the alert feed.
///
/// The result holds at most eight entries: up to three shipment alerts,
/// then up to three stock alerts, then up to two order alerts.
pub async fn collect_alerts(
    repo: &dyn RecordStore,
    now: DateTime<Utc>,
) -> RepositoryResult<Vec<Alert>> {
    let mut alerts = Vec::with_capacity(MAX_SHIPMENT_ALERTS + MAX_STOCK_ALERTS + MAX_ORDER_ALERTS);

    let troubled = repo
        .list_shipments(
            &ShipmentFilter::troubled(),
            ShipmentSort::RecentlyUpdated,
            Some(MAX_SHIPMENT_ALERTS),
        )
        .await?;
    alerts.extend(troubled.iter().map(shipment_alert));

    let scarce = repo.low_stock_records(MAX_STOCK_ALERTS).await?;
    alerts.extend(scarce.iter().map(|record| stock_alert(record, now)));

    let overdue_before = now.date_naive() - Duration::days(OVERDUE_AFTER_DAYS);
    let overdue = repo
        .list_orders(
            &OrderFilter::pending().dated_before(overdue_before),
            OrderSortField::OrderDate,
            SortDirection::Asc,
            Some(MAX_ORDER_ALERTS),
        )
        .await?;
    alerts.extend(overdue.iter().map(|order| order_alert(order, now)));

    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OrderId, ProductId, ShipmentId, StockItemId, WarehouseId};
    use crate::db::LocalRepository;
    use crate::models::{
        Order, OrderStatus, Priority, Product, Shipment, ShipmentStatus, StockItem, Warehouse,
    };
    use chrono::TimeZone;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn seed_shipment(repo: &LocalRepository, id: i64, status: ShipmentStatus, updated: DateTime<Utc>) {
        repo.insert_shipment(Shipment {
            id: ShipmentId::new(id),
            tracking_id: format!("TRK-{:04}", id),
            origin: "Rotterdam".to_string(),
            destination: "Oslo".to_string(),
            eta: None,
            status,
            priority: Priority::Medium,
            carrier: "Nordic Freight".to_string(),
            contents: "Electronics".to_string(),
            driver_contact: String::new(),
            departure_time: None,
            last_updated: updated,
        });
    }

    fn seed_order(repo: &LocalRepository, id: i64, status: OrderStatus, date: chrono::NaiveDate) {
        repo.insert_order(Order {
            id: OrderId::new(id),
            customer_name: format!("Customer {}", id),
            order_date: date,
            total_amount: 250.0,
            status,
        });
    }

    fn seed_stock(repo: &LocalRepository, item_id: i64, quantity: i32, reorder_point: i32) {
        repo.insert_product(Product {
            id: ProductId::new(item_id),
            name: format!("Product {}", item_id),
            sku: format!("SKU-{:03}", item_id),
            reorder_point,
        });
        repo.insert_warehouse(Warehouse {
            id: WarehouseId::new(item_id),
            name: format!("Warehouse {}", item_id),
            location: String::new(),
        });
        repo.insert_stock_item(StockItem {
            id: StockItemId::new(item_id),
            product_id: ProductId::new(item_id),
            warehouse_id: WarehouseId::new(item_id),
            quantity,
        });
    }

    #[tokio::test]
    async fn test_empty_store_produces_no_alerts() {
        let repo = LocalRepository::new();
        let alerts = collect_alerts(&repo, ts(15, 12)).await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_group_order_and_caps() {
        let repo = LocalRepository::new();
        let now = ts(15, 12);

        for id in 1..=4 {
            seed_shipment(&repo, id, ShipmentStatus::Delayed, ts(10 + id as u32, 8));
        }
        for id in 1..=4 {
            seed_stock(&repo, id, id as i32, 10);
        }
        for id in 1..=3 {
            seed_order(
                &repo,
                id,
                OrderStatus::Pending,
                chrono::NaiveDate::from_ymd_opt(2024, 6, id as u32).unwrap(),
            );
        }

        let alerts = collect_alerts(&repo, now).await.unwrap();

        assert_eq!(alerts.len(), 8);
        let levels: Vec<AlertLevel> = alerts.iter().map(|a| a.level).collect();
        assert_eq!(
            levels,
            vec![
                AlertLevel::Danger,
                AlertLevel::Danger,
                AlertLevel::Danger,
                AlertLevel::Warning,
                AlertLevel::Warning,
                AlertLevel::Warning,
                AlertLevel::Info,
                AlertLevel::Info,
            ]
        );
    }

    #[tokio::test]
    async fn test_shipment_alerts_newest_first_with_route_detail() {
        let repo = LocalRepository::new();
        seed_shipment(&repo, 1, ShipmentStatus::Delayed, ts(10, 8));
        seed_shipment(&repo, 2, ShipmentStatus::Issue, ts(12, 8));
        seed_shipment(&repo, 3, ShipmentStatus::InTransit, ts(14, 8));

        let alerts = collect_alerts(&repo, ts(15, 12)).await.unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "Shipment TRK-0002 is issue");
        assert_eq!(alerts[0].detail, "Rotterdam → Oslo");
        assert_eq!(alerts[0].timestamp, ts(12, 8));
        assert_eq!(alerts[1].message, "Shipment TRK-0001 is delayed");
    }

    #[tokio::test]
    async fn test_stock_alerts_scarcest_first_and_skip_out_of_stock() {
        let repo = LocalRepository::new();
        let now = ts(15, 12);
        seed_stock(&repo, 1, 8, 10);
        seed_stock(&repo, 2, 2, 10);
        seed_stock(&repo, 3, 0, 10); // out of stock, not "low"

        let alerts = collect_alerts(&repo, now).await.unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "Low stock: Product 2");
        assert_eq!(alerts[0].detail, "2 units at Warehouse 2");
        assert_eq!(alerts[0].timestamp, now);
        assert_eq!(alerts[1].message, "Low stock: Product 1");
    }

    #[tokio::test]
    async fn test_order_alerts_only_overdue_pending() {
        let repo = LocalRepository::new();
        let now = ts(15, 12);
        seed_order(
            &repo,
            1,
            OrderStatus::Pending,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        );
        // Recent pending order stays quiet.
        seed_order(
            &repo,
            2,
            OrderStatus::Pending,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
        );
        // Old but already processing.
        seed_order(
            &repo,
            3,
            OrderStatus::Processing,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        let alerts = collect_alerts(&repo, now).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].level, AlertLevel::Info);
        assert_eq!(alerts[0].message, "Order #1 pending since Jun 05");
        assert_eq!(alerts[0].detail, "Customer 1");
    }

    #[tokio::test]
    async fn test_overdue_boundary_is_strict() {
        let repo = LocalRepository::new();
        let now = ts(15, 12);
        // Exactly three days old: order_date == today - 3, not < today - 3.
        seed_order(
            &repo,
            1,
            OrderStatus::Pending,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
        );

        let alerts = collect_alerts(&repo, now).await.unwrap();
        assert!(alerts.is_empty());
    }
}
