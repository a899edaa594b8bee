//! Inventory repository trait.
//!
//! The read side never touches raw stock items; every method returns the
//! denormalized [`StockRecord`] join row or an aggregate over it.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::StockStatusCounts;
use crate::models::StockRecord;

/// Repository trait for inventory reads.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Total units on hand across all warehouses. Empty stores sum to zero.
    async fn sum_stock_units(&self) -> RepositoryResult<i64>;

    /// Count of stock rows per dashboard bucket (in stock, low stock, out
    /// of stock) in one pass.
    async fn stock_status_counts(&self) -> RepositoryResult<StockStatusCounts>;

    /// Stock records with `0 < quantity <= reorder_point`, scarcest first.
    ///
    /// # Arguments
    /// * `limit` - Maximum rows to return
    async fn low_stock_records(&self, limit: usize) -> RepositoryResult<Vec<StockRecord>>;

    /// Count of all stock rows.
    async fn count_stock_items(&self) -> RepositoryResult<i64>;

    /// Count of stock rows with `quantity <= reorder_point`.
    ///
    /// Unlike the dashboard's low-stock bucket this includes rows already
    /// out of stock; the inventory page reports it that way.
    async fn count_below_reorder(&self) -> RepositoryResult<i64>;

    /// Stock records for the inventory listing, ordered by product name then
    /// warehouse name.
    ///
    /// # Arguments
    /// * `text` - Optional case-insensitive match over product name and SKU
    async fn list_stock_records(&self, text: Option<&str>)
        -> RepositoryResult<Vec<StockRecord>>;

    /// Case-insensitive search over product name, SKU, and warehouse name,
    /// ordered by product name.
    async fn search_stock_records(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<StockRecord>>;
}
