//! Order repository trait and its filter/sort vocabulary.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{Order, OrderStatus};

/// Conjunctive filter over orders. Unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Case-insensitive substring match over customer name, or a substring
    /// of the order ID rendered as decimal digits.
    pub text: Option<String>,
    /// Keep orders with `order_date >= date_from`.
    pub date_from: Option<NaiveDate>,
    /// Keep orders with `order_date < date_before`.
    pub date_before: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            status: Some(OrderStatus::Pending),
            ..Self::default()
        }
    }

    /// Restrict to `from <= order_date < before`.
    pub fn dated_between(mut self, from: NaiveDate, before: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_before = Some(before);
        self
    }

    /// Restrict to `order_date >= from`.
    pub fn dated_since(mut self, from: NaiveDate) -> Self {
        self.date_from = Some(from);
        self
    }

    /// Restrict to `order_date < before`.
    pub fn dated_before(mut self, before: NaiveDate) -> Self {
        self.date_before = Some(before);
        self
    }
}

/// Fields the recent-orders panel may sort by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OrderSortField {
    Id,
    CustomerName,
    #[default]
    OrderDate,
    TotalAmount,
    Status,
}

impl OrderSortField {
    /// Parse a query-string value against the sort allow-list. Anything not
    /// on the list falls back to [`OrderSortField::OrderDate`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "id" => OrderSortField::Id,
            "customer_name" => OrderSortField::CustomerName,
            "order_date" => OrderSortField::OrderDate,
            "total_amount" => OrderSortField::TotalAmount,
            "status" => OrderSortField::Status,
            _ => OrderSortField::OrderDate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSortField::Id => "id",
            OrderSortField::CustomerName => "customer_name",
            OrderSortField::OrderDate => "order_date",
            OrderSortField::TotalAmount => "total_amount",
            OrderSortField::Status => "status",
        }
    }
}

/// Sort direction for order listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a query-string value. Unknown values fall back to descending.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "asc" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Repository trait for order reads.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Count orders matching a filter.
    async fn count_orders(&self, filter: &OrderFilter) -> RepositoryResult<i64>;

    /// Fetch orders matching a filter, ordered and optionally capped.
    ///
    /// Ties on the sort field break by order ID in the same direction, so
    /// pagination-free listings stay stable across calls.
    ///
    /// # Arguments
    /// * `filter` - Conjunctive constraints
    /// * `sort` - Sort field from the allow-list
    /// * `direction` - Ascending or descending
    /// * `limit` - Maximum rows to return, `None` for all
    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSortField,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Order>>;

    /// Case-insensitive search over customer name and the stored status
    /// value, plus an exact ID match when the query is all digits; newest
    /// order date first.
    async fn search_orders(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Order>>;
}
