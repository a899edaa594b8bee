//! Dashboard composer: orchestrates the metrics engine, alert aggregator,
//! and the chart series into one dataset per request.

use chrono::{DateTime, Utc};

use crate::api::{DashboardData, InventorySlice, StatusCount, TimeframeOption, VolumePoint};
use crate::db::models::{DailyVolumeRow, StatusCountRow, StockStatusCounts};
use crate::db::repository::{OrderFilter, OrderSortField, RepositoryResult, SortDirection};
use crate::db::RecordStore;

use super::alerts::collect_alerts;
use super::metrics::{build_stat_cards, Timeframe};

/// Rows shown in the recent orders panel.
const RECENT_ORDER_LIMIT: usize = 5;

/// Parsed dashboard request options.
///
/// Unrecognized range, sort, or direction values fall back to defaults
/// instead of failing: "Last 7 Days", `order_date`, descending.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardQuery {
    pub timeframe: Timeframe,
    pub sort: OrderSortField,
    pub direction: SortDirection,
}

impl DashboardQuery {
    /// Build a query from raw request parameters.
    pub fn from_params(range: Option<&str>, sort: Option<&str>, dir: Option<&str>) -> Self {
        Self {
            timeframe: range.map(Timeframe::parse).unwrap_or_default(),
            sort: sort.map(OrderSortField::parse).unwrap_or_default(),
            direction: dir.map(SortDirection::parse).unwrap_or_default(),
        }
    }
}

/// Scale raw per-day counts into chart bars.
///
/// Percent is the share of the busiest day, floored; the divisor is floored
/// at 1 so an empty series cannot divide by zero. Days with no shipments
/// stay absent rather than zero-filled.
pub(crate) fn volume_series(rows: &[DailyVolumeRow]) -> Vec<VolumePoint> {
    let max_count = rows.iter().map(|row| row.count).max().unwrap_or(1).max(1);
    rows.iter()
        .map(|row| VolumePoint {
            label: row.day.format("%b %d").to_string(),
            count: row.count,
            percent: row.count * 100 / max_count,
        })
        .collect()
}

/// Bucket inventory counts into the three dashboard slices.
///
/// Percentages are floored against the bucket total, which is itself
/// floored at 1 when everything is empty.
pub(crate) fn inventory_breakdown(counts: &StockStatusCounts) -> Vec<InventorySlice> {
    let total = counts.total().max(1);
    let slice = |label: &str, count: i64, color: &str| InventorySlice {
        label: label.to_string(),
        count,
        percent: count * 100 / total,
        color: color.to_string(),
    };
    vec![
        slice("In Stock", counts.in_stock, "bg-success"),
        slice("Low Stock", counts.low_stock, "bg-warning"),
        slice("Out of Stock", counts.out_of_stock, "bg-danger"),
    ]
}

/// Attach display labels to the per-status shipment counts.
pub(crate) fn status_overview(rows: &[StatusCountRow]) -> Vec<StatusCount> {
    rows.iter()
        .map(|row| StatusCount {
            label: row.status.label().to_string(),
            count: row.count,
        })
        .collect()
}

/// The selectable reporting windows with the active one flagged.
pub(crate) fn timeframe_options(active: Timeframe) -> Vec<TimeframeOption> {
    Timeframe::ALL
        .iter()
        .map(|timeframe| TimeframeOption {
            label: timeframe.label().to_string(),
            value: timeframe.value().to_string(),
            active: *timeframe == active,
        })
        .collect()
}

/// Assemble the complete dashboard dataset for one request.
pub async fn get_dashboard_data(
    repo: &dyn RecordStore,
    query: DashboardQuery,
    now: DateTime<Utc>,
) -> RepositoryResult<DashboardData> {
    let date_from = now - query.timeframe.window();

    let stats = build_stat_cards(repo, now, query.timeframe).await?;
    let volume_rows = repo.shipment_volume_by_day(date_from).await?;
    let stock_counts = repo.stock_status_counts().await?;
    let alerts = collect_alerts(repo, now).await?;
    let breakdown_rows = repo.status_breakdown().await?;
    let recent_orders = repo
        .list_orders(
            &OrderFilter::all(),
            query.sort,
            query.direction,
            Some(RECENT_ORDER_LIMIT),
        )
        .await?;

    Ok(DashboardData {
        timeframes: timeframe_options(query.timeframe),
        active_timeframe: query.timeframe.value().to_string(),
        stats,
        shipment_volume: volume_series(&volume_rows),
        inventory_status: inventory_breakdown(&stock_counts),
        alerts,
        status_overview: status_overview(&breakdown_rows),
        recent_orders,
        sort_by: query.sort.as_str().to_string(),
        sort_dir: query.direction.as_str().to_string(),
    })
}
