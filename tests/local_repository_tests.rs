//! Trait-surface tests for the in-memory record store.
//!
//! These pin down the filter, sort, and search semantics every backend must
//! share; the SQL implementation is expected to return row-for-row identical
//! results.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use freightboard::api::{
    OrderId, ProductId, ShipmentEventId, ShipmentId, StockItemId, WarehouseId,
};
use freightboard::db::{
    InventoryRepository, LocalRepository, OrderFilter, OrderRepository, OrderSortField,
    ShipmentFilter, ShipmentRepository, ShipmentSort, SortDirection,
};
use freightboard::models::{
    Order, OrderStatus, Priority, Product, Shipment, ShipmentEvent, ShipmentStatus, StockItem,
    Warehouse,
};

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn shipment(id: i64, tracking: &str) -> Shipment {
    Shipment {
        id: ShipmentId::new(id),
        tracking_id: tracking.to_string(),
        origin: "Rotterdam".to_string(),
        destination: "Oslo".to_string(),
        eta: None,
        status: ShipmentStatus::InTransit,
        priority: Priority::Medium,
        carrier: "Nordic Freight".to_string(),
        contents: "Electronics".to_string(),
        driver_contact: String::new(),
        departure_time: None,
        last_updated: ts(10, 8),
    }
}

fn order(id: i64, customer: &str, date: NaiveDate) -> Order {
    Order {
        id: OrderId::new(id),
        customer_name: customer.to_string(),
        order_date: date,
        total_amount: 100.0,
        status: OrderStatus::Pending,
    }
}

fn seed_stock(
    repo: &LocalRepository,
    id: i64,
    product: &str,
    warehouse: &str,
    quantity: i32,
    reorder_point: i32,
) {
    repo.insert_product(Product {
        id: ProductId::new(id),
        name: product.to_string(),
        sku: format!("SKU-{:03}", id),
        reorder_point,
    });
    repo.insert_warehouse(Warehouse {
        id: WarehouseId::new(id),
        name: warehouse.to_string(),
        location: String::new(),
    });
    repo.insert_stock_item(StockItem {
        id: StockItemId::new(id),
        product_id: ProductId::new(id),
        warehouse_id: WarehouseId::new(id),
        quantity,
    });
}

#[tokio::test]
async fn test_text_filter_spans_five_fields() {
    let repo = LocalRepository::new();
    let mut by_origin = shipment(1, "TRK-0001");
    by_origin.origin = "Hamburg Port".to_string();
    let mut by_carrier = shipment(2, "TRK-0002");
    by_carrier.carrier = "Hamburg Express".to_string();
    let mut by_contents = shipment(3, "TRK-0003");
    by_contents.contents = "Frozen goods".to_string();
    repo.insert_shipment(by_origin);
    repo.insert_shipment(by_carrier);
    repo.insert_shipment(by_contents);

    let mut filter = ShipmentFilter::all();
    filter.text = Some("HAMBURG".to_string());

    let count = repo.count_shipments(&filter).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_empty_status_set_matches_nothing() {
    let repo = LocalRepository::new();
    repo.insert_shipment(shipment(1, "TRK-0001"));

    let filter = ShipmentFilter::of_statuses(vec![]);
    assert_eq!(repo.count_shipments(&filter).await.unwrap(), 0);
    // An unset status list is the opposite: no constraint at all.
    assert_eq!(
        repo.count_shipments(&ShipmentFilter::all()).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_updated_window_is_half_open() {
    let repo = LocalRepository::new();
    let mut early = shipment(1, "TRK-0001");
    early.last_updated = ts(10, 0);
    let mut edge = shipment(2, "TRK-0002");
    edge.last_updated = ts(12, 0);
    repo.insert_shipment(early);
    repo.insert_shipment(edge);

    let filter = ShipmentFilter::all().updated_between(ts(10, 0), ts(12, 0));
    let rows = repo
        .list_shipments(&filter, ShipmentSort::RecentlyUpdated, None)
        .await
        .unwrap();

    // Lower bound inclusive, upper bound exclusive.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tracking_id, "TRK-0001");
}

#[tokio::test]
async fn test_eta_sort_puts_missing_last_in_both_directions() {
    let repo = LocalRepository::new();
    let mut a = shipment(1, "TRK-A");
    a.eta = Some(ts(20, 0));
    let mut b = shipment(2, "TRK-B");
    b.eta = Some(ts(18, 0));
    let mut c = shipment(3, "TRK-C");
    c.eta = None;
    repo.insert_shipment(a);
    repo.insert_shipment(b);
    repo.insert_shipment(c);

    let asc = repo
        .list_shipments(&ShipmentFilter::all(), ShipmentSort::EtaAsc, None)
        .await
        .unwrap();
    let asc_ids: Vec<&str> = asc.iter().map(|s| s.tracking_id.as_str()).collect();
    assert_eq!(asc_ids, vec!["TRK-B", "TRK-A", "TRK-C"]);

    let desc = repo
        .list_shipments(&ShipmentFilter::all(), ShipmentSort::EtaDesc, None)
        .await
        .unwrap();
    let desc_ids: Vec<&str> = desc.iter().map(|s| s.tracking_id.as_str()).collect();
    assert_eq!(desc_ids, vec!["TRK-A", "TRK-B", "TRK-C"]);
}

#[tokio::test]
async fn test_priority_sort_ranks_high_medium_low() {
    let repo = LocalRepository::new();
    let mut low = shipment(1, "TRK-A");
    low.priority = Priority::Low;
    let mut high = shipment(2, "TRK-B");
    high.priority = Priority::High;
    let mut medium = shipment(3, "TRK-C");
    medium.priority = Priority::Medium;
    repo.insert_shipment(low);
    repo.insert_shipment(high);
    repo.insert_shipment(medium);

    let rows = repo
        .list_shipments(&ShipmentFilter::all(), ShipmentSort::PriorityRank, None)
        .await
        .unwrap();

    let priorities: Vec<Priority> = rows.iter().map(|s| s.priority).collect();
    assert_eq!(
        priorities,
        vec![Priority::High, Priority::Medium, Priority::Low]
    );
}

#[tokio::test]
async fn test_get_shipment_not_found() {
    let repo = LocalRepository::new();
    let err = repo.get_shipment(ShipmentId::new(404)).await.unwrap_err();
    assert!(err.to_string().contains("Not found"));
}

#[tokio::test]
async fn test_event_timeline_ties_break_by_id() {
    let repo = LocalRepository::new();
    repo.insert_shipment(shipment(1, "TRK-0001"));
    let at = ts(12, 9);
    for id in [2, 1] {
        repo.insert_event(ShipmentEvent {
            id: ShipmentEventId::new(id),
            shipment_id: ShipmentId::new(1),
            timestamp: at,
            description: format!("event {}", id),
            location: String::new(),
            icon: String::new(),
        });
    }

    let events = repo.events_for_shipment(ShipmentId::new(1)).await.unwrap();
    // Same timestamp: lower event id first.
    assert_eq!(events[0].id.value(), 1);
    assert_eq!(events[1].id.value(), 2);
}

#[tokio::test]
async fn test_volume_rows_sorted_and_windowed() {
    let repo = LocalRepository::new();
    for (id, d, hour) in [(1, 9, 23), (2, 12, 1), (3, 12, 22), (4, 14, 5)] {
        let mut s = shipment(id, &format!("TRK-{:04}", id));
        s.last_updated = ts(d, hour);
        repo.insert_shipment(s);
    }

    let rows = repo.shipment_volume_by_day(ts(10, 0)).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].day, day(12));
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[1].day, day(14));
    assert_eq!(rows[1].count, 1);
}

#[tokio::test]
async fn test_status_breakdown_orders_by_count_then_name() {
    let repo = LocalRepository::new();
    let seeds = [
        (1, ShipmentStatus::Delivered),
        (2, ShipmentStatus::Delivered),
        (3, ShipmentStatus::Delayed),
        (4, ShipmentStatus::InTransit),
        (5, ShipmentStatus::InTransit),
    ];
    for (id, status) in seeds {
        let mut s = shipment(id, &format!("TRK-{:04}", id));
        s.status = status;
        repo.insert_shipment(s);
    }

    let rows = repo.status_breakdown().await.unwrap();

    assert_eq!(rows.len(), 3);
    // Two ties at count 2 resolve alphabetically by stored value.
    assert_eq!(rows[0].status, ShipmentStatus::Delivered);
    assert_eq!(rows[1].status, ShipmentStatus::InTransit);
    assert_eq!(rows[2].status, ShipmentStatus::Delayed);
}

#[tokio::test]
async fn test_order_text_filter_matches_id_digits() {
    let repo = LocalRepository::new();
    repo.insert_order(order(123, "ACME", day(3)));
    repo.insert_order(order(456, "Borealis 12", day(4)));

    let mut filter = OrderFilter::all();
    filter.text = Some("12".to_string());

    // "12" hits order 123 through its id and order 456 through its name.
    assert_eq!(repo.count_orders(&filter).await.unwrap(), 2);
}

#[tokio::test]
async fn test_order_sort_ties_follow_direction() {
    let repo = LocalRepository::new();
    repo.insert_order(order(1, "ACME", day(5)));
    repo.insert_order(order(2, "Borealis", day(5)));
    repo.insert_order(order(3, "Cramond", day(2)));

    let desc = repo
        .list_orders(
            &OrderFilter::all(),
            OrderSortField::OrderDate,
            SortDirection::Desc,
            None,
        )
        .await
        .unwrap();
    let desc_ids: Vec<i64> = desc.iter().map(|o| o.id.value()).collect();
    assert_eq!(desc_ids, vec![2, 1, 3]);

    let asc = repo
        .list_orders(
            &OrderFilter::all(),
            OrderSortField::OrderDate,
            SortDirection::Asc,
            None,
        )
        .await
        .unwrap();
    let asc_ids: Vec<i64> = asc.iter().map(|o| o.id.value()).collect();
    assert_eq!(asc_ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_search_orders_exact_id_requires_all_digits() {
    let repo = LocalRepository::new();
    repo.insert_order(order(7, "ACME", day(3)));

    let hit = repo.search_orders("7", 10).await.unwrap();
    assert_eq!(hit.len(), 1);

    // A mixed query is not an id lookup and matches nothing here.
    let miss = repo.search_orders("7x", 10).await.unwrap();
    assert!(miss.is_empty());
}

#[tokio::test]
async fn test_search_orders_matches_status_text() {
    let repo = LocalRepository::new();
    let mut delivered = order(1, "ACME", day(3));
    delivered.status = OrderStatus::Delivered;
    repo.insert_order(delivered);
    repo.insert_order(order(2, "Borealis", day(4)));

    let results = repo.search_orders("deliver", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.value(), 1);
}

#[tokio::test]
async fn test_low_stock_ordering_scarcest_then_name() {
    let repo = LocalRepository::new();
    seed_stock(&repo, 1, "Washer", "Oslo Depot", 3, 10);
    seed_stock(&repo, 2, "Bolt", "Oslo Depot", 3, 10);
    seed_stock(&repo, 3, "Nut", "Oslo Depot", 1, 10);
    seed_stock(&repo, 4, "Gasket", "Oslo Depot", 0, 10); // empty, excluded

    let rows = repo.low_stock_records(10).await.unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["Nut", "Bolt", "Washer"]);
}

#[tokio::test]
async fn test_count_below_reorder_includes_empty_items() {
    let repo = LocalRepository::new();
    seed_stock(&repo, 1, "Bolt", "Oslo Depot", 50, 10);
    seed_stock(&repo, 2, "Nut", "Oslo Depot", 10, 10); // at the point
    seed_stock(&repo, 3, "Gasket", "Oslo Depot", 0, 10); // empty

    assert_eq!(repo.count_below_reorder().await.unwrap(), 2);
    assert_eq!(repo.count_stock_items().await.unwrap(), 3);
    assert_eq!(repo.sum_stock_units().await.unwrap(), 60);
}

#[tokio::test]
async fn test_stock_listing_filter_ignores_warehouse_name() {
    let repo = LocalRepository::new();
    seed_stock(&repo, 1, "Bolt", "Bergen Depot", 50, 10);
    seed_stock(&repo, 2, "Nut", "Oslo Depot", 20, 10);

    // The listing filter covers product name and SKU only.
    let listed = repo.list_stock_records(Some("bergen")).await.unwrap();
    assert!(listed.is_empty());

    // Global search additionally covers the warehouse name.
    let searched = repo.search_stock_records("bergen", 10).await.unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].product_name, "Bolt");
}

#[tokio::test]
async fn test_stock_listing_sorted_by_product_then_warehouse() {
    let repo = LocalRepository::new();
    seed_stock(&repo, 1, "Bolt", "Oslo Depot", 5, 10);
    seed_stock(&repo, 2, "Anchor", "Bergen Depot", 5, 10);
    // Same product name in a second warehouse.
    repo.insert_product(Product {
        id: ProductId::new(3),
        name: "Anchor".to_string(),
        sku: "SKU-900".to_string(),
        reorder_point: 10,
    });
    repo.insert_warehouse(Warehouse {
        id: WarehouseId::new(3),
        name: "Aalborg Depot".to_string(),
        location: String::new(),
    });
    repo.insert_stock_item(StockItem {
        id: StockItemId::new(3),
        product_id: ProductId::new(3),
        warehouse_id: WarehouseId::new(3),
        quantity: 2,
    });

    let rows = repo.list_stock_records(None).await.unwrap();

    let pairs: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.product_name.as_str(), r.warehouse_name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Anchor", "Aalborg Depot"),
            ("Anchor", "Bergen Depot"),
            ("Bolt", "Oslo Depot"),
        ]
    );
}

#[tokio::test]
async fn test_stock_status_counts_partition_the_items() {
    let repo = LocalRepository::new();
    seed_stock(&repo, 1, "Bolt", "Oslo Depot", 50, 10);
    seed_stock(&repo, 2, "Nut", "Oslo Depot", 10, 10);
    seed_stock(&repo, 3, "Gasket", "Oslo Depot", 0, 10);

    let counts = repo.stock_status_counts().await.unwrap();

    assert_eq!(counts.in_stock, 1);
    assert_eq!(counts.low_stock, 1);
    assert_eq!(counts.out_of_stock, 1);
    assert_eq!(counts.total(), 3);
}
