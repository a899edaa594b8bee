use serde::{Deserialize, Serialize};

use crate::models::{Shipment, ShipmentEvent};

// =========================================================
// Shipment board types + routes
// =========================================================

/// One entry of a filter or sort dropdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Preset filter shortcut with its ready-made query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickFilter {
    pub label: String,
    pub query: String,
}

/// Complete shipment board dataset for one tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentListData {
    pub shipments: Vec<Shipment>,
    pub selected: Option<Shipment>,
    pub current_tab: String,
    pub status_filter: String,
    pub priority_filter: String,
    pub sort_option: String,
    pub search_query: String,
    pub active_count: i64,
    pub completed_count: i64,
    pub status_choices: Vec<ChoiceOption>,
    pub priority_choices: Vec<ChoiceOption>,
    pub sort_choices: Vec<ChoiceOption>,
    pub quick_filters: Vec<QuickFilter>,
}

/// Single shipment with its transit history, newest event first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentDetailData {
    pub shipment: Shipment,
    pub events: Vec<ShipmentEvent>,
}

/// Route path constant for the shipment board endpoint (under /v1).
pub const SHIPMENTS_ROUTE: &str = "/shipments";

/// Route path constant for the shipment detail endpoint (under /v1).
pub const SHIPMENT_DETAIL_ROUTE: &str = "/shipments/{id}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_option_new() {
        let choice = ChoiceOption::new("all", "Status: All");
        assert_eq!(choice.value, "all");
        assert_eq!(choice.label, "Status: All");
    }

    #[test]
    fn test_quick_filter_clone() {
        let filter = QuickFilter {
            label: "Delayed shipments".to_string(),
            query: "tab=active&status=delayed".to_string(),
        };
        let cloned = filter.clone();
        assert_eq!(cloned.query, "tab=active&status=delayed");
    }

    #[test]
    fn test_shipment_list_data_debug() {
        let data = ShipmentListData {
            shipments: vec![],
            selected: None,
            current_tab: "active".to_string(),
            status_filter: "all".to_string(),
            priority_filter: "all".to_string(),
            sort_option: "eta".to_string(),
            search_query: String::new(),
            active_count: 0,
            completed_count: 0,
            status_choices: vec![],
            priority_choices: vec![],
            sort_choices: vec![],
            quick_filters: vec![],
        };
        let debug_str = format!("{:?}", data);
        assert!(debug_str.contains("ShipmentListData"));
    }

    #[test]
    fn test_const_values() {
        assert_eq!(SHIPMENTS_ROUTE, "/shipments");
        assert_eq!(SHIPMENT_DETAIL_ROUTE, "/shipments/{id}");
    }
}
