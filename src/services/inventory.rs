//! Inventory browser service.

use crate::api::{InventoryListData, InventoryTotals, StatCard, Tone};
use crate::db::repository::RepositoryResult;
use crate::db::RecordStore;

use super::metrics::format_count;

/// The three stat cards above the listing.
///
/// The page has no comparison window, so every delta is pinned at +0.0%.
pub(crate) fn inventory_stats(totals: &InventoryTotals) -> Vec<StatCard> {
    let card = |label: &str, value: i64, tone: Tone| StatCard {
        label: label.to_string(),
        value: format_count(value),
        delta: "+0.0%".to_string(),
        tone,
    };
    vec![
        card("Total Items", totals.total_items, Tone::Success),
        card("Items with Low Stock", totals.low_stock_items, Tone::Danger),
        card("Total Units Available", totals.total_units, Tone::Success),
    ]
}

/// Assemble the inventory browser dataset for one request.
///
/// The search narrows the listing only; totals always cover the whole
/// store.
pub async fn get_inventory_browser(
    repo: &dyn RecordStore,
    q: Option<&str>,
) -> RepositoryResult<InventoryListData> {
    let search = q.unwrap_or_default().trim().to_string();
    let text = if search.is_empty() {
        None
    } else {
        Some(search.as_str())
    };
    let items = repo.list_stock_records(text).await?;

    let totals = InventoryTotals {
        total_items: repo.count_stock_items().await?,
        low_stock_items: repo.count_below_reorder().await?,
        total_units: repo.sum_stock_units().await?,
    };

    Ok(InventoryListData {
        items,
        search_query: search,
        stats: inventory_stats(&totals),
        totals,
    })
}
