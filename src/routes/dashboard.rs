use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Order;

// =========================================================
// Dashboard types + route
// =========================================================

/// Visual tone attached to a KPI delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of an operational alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Danger,
    Warning,
    Info,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Danger => "danger",
            AlertLevel::Warning => "warning",
            AlertLevel::Info => "info",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One KPI card on the dashboard.
/// `value` and `delta` are pre-formatted display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub delta: String,
    pub tone: Tone,
}

/// One bar of the shipment volume chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumePoint {
    pub label: String,
    pub count: i64,
    pub percent: i64,
}

/// One segment of the inventory status breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySlice {
    pub label: String,
    pub count: i64,
    pub percent: i64,
    pub color: String,
}

/// Operational alert shown in the dashboard feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub icon: String,
    pub message: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

/// Shipment count for one status, used by the status overview panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub label: String,
    pub count: i64,
}

/// Selectable reporting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeframeOption {
    pub label: String,
    pub value: String,
    pub active: bool,
}

/// Complete dashboard dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub timeframes: Vec<TimeframeOption>,
    pub active_timeframe: String,
    pub stats: Vec<StatCard>,
    pub shipment_volume: Vec<VolumePoint>,
    pub inventory_status: Vec<InventorySlice>,
    pub alerts: Vec<Alert>,
    pub status_overview: Vec<StatusCount>,
    pub recent_orders: Vec<Order>,
    pub sort_by: String,
    pub sort_dir: String,
}

/// Route path constant for the dashboard endpoint (under /v1).
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_as_str() {
        assert_eq!(Tone::Success.as_str(), "success");
        assert_eq!(Tone::Warning.as_str(), "warning");
        assert_eq!(Tone::Danger.as_str(), "danger");
    }

    #[test]
    fn test_alert_level_serializes_lowercase() {
        let json = serde_json::to_string(&AlertLevel::Info).unwrap();
        assert_eq!(json, "\"info\"");
    }

    #[test]
    fn test_stat_card_clone() {
        let card = StatCard {
            label: "Active Shipments".to_string(),
            value: "1,428".to_string(),
            delta: "+4.2%".to_string(),
            tone: Tone::Success,
        };
        let cloned = card.clone();
        assert_eq!(cloned.value, "1,428");
        assert_eq!(cloned.tone, Tone::Success);
    }

    #[test]
    fn test_volume_point_debug() {
        let point = VolumePoint {
            label: "Jun 03".to_string(),
            count: 12,
            percent: 80,
        };
        let debug_str = format!("{:?}", point);
        assert!(debug_str.contains("VolumePoint"));
    }

    #[test]
    fn test_inventory_slice_serializes() {
        let slice = InventorySlice {
            label: "Low Stock".to_string(),
            count: 3,
            percent: 25,
            color: "bg-warning".to_string(),
        };
        let json = serde_json::to_string(&slice).unwrap();
        assert!(json.contains("\"bg-warning\""));
    }

    #[test]
    fn test_dashboard_data_debug() {
        let data = DashboardData {
            timeframes: vec![],
            active_timeframe: "7d".to_string(),
            stats: vec![],
            shipment_volume: vec![],
            inventory_status: vec![],
            alerts: vec![],
            status_overview: vec![],
            recent_orders: vec![],
            sort_by: "order_date".to_string(),
            sort_dir: "desc".to_string(),
        };
        let debug_str = format!("{:?}", data);
        assert!(debug_str.contains("DashboardData"));
    }

    #[test]
    fn test_const_value() {
        assert_eq!(DASHBOARD_ROUTE, "/dashboard");
    }
}
