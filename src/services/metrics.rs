//! Metrics engine: headline KPI values and period-over-period deltas.
//!
//! Every percentage and delta here is a total function. Zero denominators
//! take a fallback branch instead of dividing.

use chrono::{DateTime, Duration, Utc};

use crate::api::{StatCard, Tone};
use crate::db::repository::{OrderFilter, RepositoryResult, ShipmentFilter};
use crate::db::RecordStore;
use crate::models::ShipmentStatus;

/// Reporting window the dashboard compares over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    Today,
    #[default]
    LastSevenDays,
    ThisMonth,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [
        Timeframe::Today,
        Timeframe::LastSevenDays,
        Timeframe::ThisMonth,
    ];

    /// Parse a query value. Unknown values fall back to the default window.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "today" => Timeframe::Today,
            "7d" => Timeframe::LastSevenDays,
            "month" => Timeframe::ThisMonth,
            _ => Timeframe::LastSevenDays,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Timeframe::Today => "today",
            Timeframe::LastSevenDays => "7d",
            Timeframe::ThisMonth => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Today => "Today",
            Timeframe::LastSevenDays => "Last 7 Days",
            Timeframe::ThisMonth => "This Month",
        }
    }

    /// Length of the comparison window.
    pub fn window(&self) -> Duration {
        match self {
            Timeframe::Today => Duration::days(1),
            Timeframe::LastSevenDays => Duration::days(7),
            Timeframe::ThisMonth => Duration::days(30),
        }
    }
}

/// Percentage change of `current` against `previous`.
///
/// A zero baseline reports +100% when anything arrived and 0% when nothing
/// did.
pub(crate) fn percent_change(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

/// Share of `part` in `total` as a percentage, 0.0 for an empty total.
pub(crate) fn rate_percent(part: i64, total: i64) -> f64 {
    if total > 0 {
        part as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Tone for a delta: positive reads as success, negative as danger, and an
/// effectively-zero change as warning regardless of sign.
pub(crate) fn delta_tone(change: f64) -> Tone {
    if change.abs() < 0.0001 {
        Tone::Warning
    } else if change > 0.0 {
        Tone::Success
    } else {
        Tone::Danger
    }
}

/// Format a delta as a signed one-decimal percentage, e.g. `+12.3%`.
pub(crate) fn format_delta(change: f64) -> String {
    format!("{:+.1}%", change)
}

/// Format a count with thousands separators, e.g. `1,428`.
pub(crate) fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Display delta and tone for a window-over-window count comparison.
pub(crate) fn count_delta(current: i64, previous: i64) -> (String, Tone) {
    let change = percent_change(current, previous);
    (format_delta(change), delta_tone(change))
}

/// Display delta and tone for two percentage-valued KPIs, compared as a
/// point difference rather than relative change.
pub(crate) fn point_delta(current_pct: f64, previous_pct: f64) -> (String, Tone) {
    let change = current_pct - previous_pct;
    (format_delta(change), delta_tone(change))
}

/// Build the four dashboard KPI cards.
///
/// Headline values are all-time aggregates; deltas compare the selected
/// window against the equally-sized window immediately before it.
pub async fn build_stat_cards(
    repo: &dyn RecordStore,
    now: DateTime<Utc>,
    timeframe: Timeframe,
) -> RepositoryResult<Vec<StatCard>> {
    let window = timeframe.window();
    let date_from = now - window;
    let previous_from = date_from - window;

    let active_total = repo.count_shipments(&ShipmentFilter::active()).await?;
    let active_current = repo
        .count_shipments(&ShipmentFilter::active().updated_since(date_from))
        .await?;
    let active_previous = repo
        .count_shipments(&ShipmentFilter::active().updated_between(previous_from, date_from))
        .await?;
    let (active_delta, active_tone) = count_delta(active_current, active_previous);

    // Orders carry a calendar date, so the windows compare dates.
    let pending_total = repo.count_orders(&OrderFilter::pending()).await?;
    let pending_current = repo
        .count_orders(&OrderFilter::pending().dated_since(date_from.date_naive()))
        .await?;
    let pending_previous = repo
        .count_orders(
            &OrderFilter::pending()
                .dated_between(previous_from.date_naive(), date_from.date_naive()),
        )
        .await?;
    let (pending_delta, pending_tone) = count_delta(pending_current, pending_previous);

    // On-time rate is an all-time percentage; its delta is the point
    // difference against the previous window's rate.
    let on_time_statuses = vec![ShipmentStatus::OnTime, ShipmentStatus::Delivered];
    let shipments_total = repo.count_shipments(&ShipmentFilter::all()).await?;
    let on_time_total = repo
        .count_shipments(&ShipmentFilter::of_statuses(on_time_statuses.clone()))
        .await?;
    let previous_total = repo
        .count_shipments(&ShipmentFilter::all().updated_between(previous_from, date_from))
        .await?;
    let previous_on_time = repo
        .count_shipments(
            &ShipmentFilter::of_statuses(on_time_statuses)
                .updated_between(previous_from, date_from),
        )
        .await?;
    let on_time_pct = rate_percent(on_time_total, shipments_total);
    let on_time_previous_pct = rate_percent(previous_on_time, previous_total);
    let (on_time_delta, on_time_tone) = point_delta(on_time_pct, on_time_previous_pct);

    let total_units = repo.sum_stock_units().await?;

    Ok(vec![
        StatCard {
            label: "Active Shipments".to_string(),
            value: format_count(active_total),
            delta: active_delta,
            tone: active_tone,
        },
        StatCard {
            label: "Pending Orders".to_string(),
            value: format_count(pending_total),
            delta: pending_delta,
            tone: pending_tone,
        },
        StatCard {
            label: "On-Time Delivery".to_string(),
            value: format!("{:.1}%", on_time_pct),
            delta: on_time_delta,
            tone: on_time_tone,
        },
        StatCard {
            label: "Inventory Units".to_string(),
            value: format_count(total_units),
            delta: "+0.0%".to_string(),
            tone: Tone::Warning,
        },
    ])
}
