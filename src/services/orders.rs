//! Order desk service.

use std::str::FromStr;

use crate::api::{ChoiceOption, OrderHistoryEntry, OrderId, OrderListData, QuickFilter};
use crate::db::repository::{OrderFilter, OrderSortField, RepositoryResult, SortDirection};
use crate::db::RecordStore;
use crate::models::{Order, OrderStatus};

/// Parsed order desk request options. Unrecognized status values behave
/// like "all".
#[derive(Debug, Clone, Default)]
pub struct OrderDeskQuery {
    pub search: String,
    pub status: Option<OrderStatus>,
    pub selected_id: Option<OrderId>,
}

impl OrderDeskQuery {
    /// Build a query from raw request parameters.
    pub fn from_params(q: Option<&str>, status: Option<&str>, id: Option<i64>) -> Self {
        Self {
            search: q.unwrap_or_default().trim().to_string(),
            status: status.and_then(|raw| OrderStatus::from_str(raw).ok()),
            selected_id: id.map(OrderId::new),
        }
    }
}

/// Synthesize lifecycle milestones for an order from its current status.
///
/// Every milestone carries the order date; the store does not keep real
/// per-step timestamps.
pub(crate) fn order_history(order: &Order) -> Vec<OrderHistoryEntry> {
    let entry = |label: &str, description: &str| OrderHistoryEntry {
        label: label.to_string(),
        timestamp: order.order_date,
        description: description.to_string(),
    };

    let mut history = vec![entry("Order Created", "Order placed by customer")];
    if matches!(
        order.status,
        OrderStatus::Processing | OrderStatus::Delivered | OrderStatus::Cancelled
    ) {
        history.push(entry("Payment Received", "Payment confirmed"));
    }
    if matches!(order.status, OrderStatus::Processing | OrderStatus::Delivered) {
        history.push(entry("Shipped", "Shipment dispatched"));
    }
    if order.status == OrderStatus::Delivered {
        history.push(entry("Delivered", "Shipment delivered to customer"));
    }
    history
}

pub(crate) fn status_options() -> Vec<ChoiceOption> {
    let mut options = vec![ChoiceOption::new("all", "Status: All")];
    for status in OrderStatus::ALL {
        options.push(ChoiceOption::new(status.as_str(), status.label()));
    }
    options
}

pub(crate) fn quick_filters() -> Vec<QuickFilter> {
    vec![
        QuickFilter {
            label: "Pending".to_string(),
            query: "status=pending".to_string(),
        },
        QuickFilter {
            label: "Processing".to_string(),
            query: "status=processing".to_string(),
        },
        QuickFilter {
            label: "Delivered".to_string(),
            query: "status=delivered".to_string(),
        },
    ]
}

/// Assemble the order desk dataset for one request.
///
/// Orders come back newest first, ties broken by newest ID.
pub async fn get_order_desk(
    repo: &dyn RecordStore,
    query: OrderDeskQuery,
) -> RepositoryResult<OrderListData> {
    let mut filter = OrderFilter::all();
    filter.status = query.status;
    if !query.search.is_empty() {
        filter.text = Some(query.search.clone());
    }

    let orders = repo
        .list_orders(&filter, OrderSortField::OrderDate, SortDirection::Desc, None)
        .await?;

    let selected = query
        .selected_id
        .and_then(|id| orders.iter().find(|o| o.id == id))
        .or_else(|| orders.first())
        .cloned();
    let selected_history = selected.as_ref().map(order_history).unwrap_or_default();

    Ok(OrderListData {
        selected,
        selected_history,
        search_query: query.search,
        status_filter: query
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "all".to_string()),
        status_options: status_options(),
        quick_filters: quick_filters(),
        orders,
    })
}
