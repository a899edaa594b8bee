//! Global search across shipments, orders, and inventory.

use crate::api::SearchResults;
use crate::db::repository::RepositoryResult;
use crate::db::RecordStore;

/// Cap applied to each entity section independently.
const SECTION_LIMIT: usize = 25;

/// Run the cross-entity search.
///
/// The query is trimmed first; a blank query returns empty sections
/// without touching the store.
pub async fn global_search(repo: &dyn RecordStore, query: &str) -> RepositoryResult<SearchResults> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(SearchResults {
            query: String::new(),
            shipments: vec![],
            orders: vec![],
            inventory_items: vec![],
            total_results: 0,
            has_query: false,
        });
    }

    let shipments = repo.search_shipments(trimmed, SECTION_LIMIT).await?;
    let orders = repo.search_orders(trimmed, SECTION_LIMIT).await?;
    let inventory_items = repo.search_stock_records(trimmed, SECTION_LIMIT).await?;
    let total_results = shipments.len() + orders.len() + inventory_items.len();

    Ok(SearchResults {
        query: trimmed.to_string(),
        shipments,
        orders,
        inventory_items,
        total_results,
        has_query: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OrderId, ProductId, ShipmentId, StockItemId, WarehouseId};
    use crate::db::LocalRepository;
    use crate::models::{
        Order, OrderStatus, Priority, Product, Shipment, ShipmentStatus, StockItem, Warehouse,
    };
    use chrono::{NaiveDate, TimeZone, Utc};

    fn seed(repo: &LocalRepository) {
        repo.insert_shipment(Shipment {
            id: ShipmentId::new(1),
            tracking_id: "TRK-7001".to_string(),
            origin: "Hamburg".to_string(),
            destination: "Aarhus".to_string(),
            eta: None,
            status: ShipmentStatus::InTransit,
            priority: Priority::High,
            carrier: "Baltic Lines".to_string(),
            contents: "Machine parts".to_string(),
            driver_contact: String::new(),
            departure_time: None,
            last_updated: Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
        });
        repo.insert_order(Order {
            id: OrderId::new(42),
            customer_name: "Aarhus Tooling".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
            total_amount: 1999.5,
            status: OrderStatus::Pending,
        });
        repo.insert_product(Product {
            id: ProductId::new(1),
            name: "Torque wrench".to_string(),
            sku: "TW-100".to_string(),
            reorder_point: 5,
        });
        repo.insert_warehouse(Warehouse {
            id: WarehouseId::new(1),
            name: "Aarhus Depot".to_string(),
            location: "DK".to_string(),
        });
        repo.insert_stock_item(StockItem {
            id: StockItemId::new(1),
            product_id: ProductId::new(1),
            warehouse_id: WarehouseId::new(1),
            quantity: 12,
        });
    }

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        let repo = LocalRepository::new();
        seed(&repo);

        let results = global_search(&repo, "   ").await.unwrap();

        assert!(!results.has_query);
        assert_eq!(results.query, "");
        assert_eq!(results.total_results, 0);
        assert!(results.shipments.is_empty());
        assert!(results.orders.is_empty());
        assert!(results.inventory_items.is_empty());
    }

    #[tokio::test]
    async fn test_query_matches_across_entities() {
        let repo = LocalRepository::new();
        seed(&repo);

        let results = global_search(&repo, " aarhus ").await.unwrap();

        assert!(results.has_query);
        assert_eq!(results.query, "aarhus");
        assert_eq!(results.shipments.len(), 1); // destination matches
        assert_eq!(results.orders.len(), 1); // customer name matches
        assert_eq!(results.inventory_items.len(), 1); // warehouse matches
        assert_eq!(results.total_results, 3);
    }

    #[tokio::test]
    async fn test_digit_query_matches_order_id() {
        let repo = LocalRepository::new();
        seed(&repo);

        let results = global_search(&repo, "42").await.unwrap();

        assert_eq!(results.orders.len(), 1);
        assert_eq!(results.orders[0].id, OrderId::new(42));
        assert!(results.shipments.is_empty());
    }
}
