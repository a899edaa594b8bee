//! Shipment board and shipment detail services.

use std::str::FromStr;

use crate::api::{
    ChoiceOption, QuickFilter, ShipmentDetailData, ShipmentId, ShipmentListData,
};
use crate::db::repository::{RepositoryResult, ShipmentFilter, ShipmentSort};
use crate::db::RecordStore;
use crate::models::{Priority, ShipmentStatus};

/// Which half of the board is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardTab {
    /// Everything still moving.
    #[default]
    Active,
    /// Delivered shipments only.
    Completed,
}

impl BoardTab {
    /// Parse a query value. Anything but "completed" is the active tab.
    pub fn parse(raw: &str) -> Self {
        if raw == "completed" {
            BoardTab::Completed
        } else {
            BoardTab::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardTab::Active => "active",
            BoardTab::Completed => "completed",
        }
    }
}

/// Parsed shipment board request options.
///
/// Unrecognized status or priority values behave like "all"; unknown sort
/// values fall back to the ETA sort.
#[derive(Debug, Clone, Default)]
pub struct ShipmentBoardQuery {
    pub tab: BoardTab,
    pub status: Option<ShipmentStatus>,
    pub priority: Option<Priority>,
    pub search: String,
    pub sort: ShipmentSort,
    pub selected_id: Option<ShipmentId>,
}

impl ShipmentBoardQuery {
    /// Build a query from raw request parameters.
    pub fn from_params(
        tab: Option<&str>,
        status: Option<&str>,
        priority: Option<&str>,
        q: Option<&str>,
        sort: Option<&str>,
        id: Option<i64>,
    ) -> Self {
        Self {
            tab: tab.map(BoardTab::parse).unwrap_or_default(),
            status: status.and_then(|raw| ShipmentStatus::from_str(raw).ok()),
            priority: priority.and_then(|raw| Priority::from_str(raw).ok()),
            search: q.unwrap_or_default().trim().to_string(),
            sort: sort.map(ShipmentSort::parse).unwrap_or_default(),
            selected_id: id.map(ShipmentId::new),
        }
    }
}

/// Status dropdown for a tab. The active tab hides the delivered option
/// since those shipments live on the completed tab.
pub(crate) fn status_choices(tab: BoardTab) -> Vec<ChoiceOption> {
    let mut choices = vec![ChoiceOption::new("all", "Status: All")];
    for status in ShipmentStatus::ALL {
        if tab == BoardTab::Active && status == ShipmentStatus::Delivered {
            continue;
        }
        choices.push(ChoiceOption::new(status.as_str(), status.label()));
    }
    choices
}

pub(crate) fn priority_choices() -> Vec<ChoiceOption> {
    let mut choices = vec![ChoiceOption::new("all", "Priority: All")];
    for priority in Priority::ALL {
        choices.push(ChoiceOption::new(priority.as_str(), priority.label()));
    }
    choices
}

pub(crate) fn sort_choices() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("eta", "Sort by: ETA (Soonest)"),
        ChoiceOption::new("eta_desc", "Sort by: ETA (Latest)"),
        ChoiceOption::new("updated", "Sort by: Last Updated"),
        ChoiceOption::new("priority", "Sort by: Priority"),
    ]
}

/// Preset shortcuts shown above the board.
pub(crate) fn quick_filters() -> Vec<QuickFilter> {
    vec![
        QuickFilter {
            label: "Delayed shipments".to_string(),
            query: "tab=active&status=delayed".to_string(),
        },
        QuickFilter {
            label: "High priority".to_string(),
            query: "tab=active&priority=high".to_string(),
        },
        QuickFilter {
            label: "Delivered this week".to_string(),
            query: "tab=completed&sort=eta_desc".to_string(),
        },
    ]
}

/// Combine the tab constraint with an explicit status filter.
///
/// The two constraints intersect: asking the completed tab for a
/// non-delivered status (or the active tab for delivered) matches nothing.
fn board_filter(query: &ShipmentBoardQuery) -> ShipmentFilter {
    let mut filter = match query.tab {
        BoardTab::Completed => ShipmentFilter::of_statuses(vec![ShipmentStatus::Delivered]),
        BoardTab::Active => ShipmentFilter::active(),
    };
    if let Some(status) = query.status {
        let visible_on_tab = match query.tab {
            BoardTab::Completed => status == ShipmentStatus::Delivered,
            BoardTab::Active => status != ShipmentStatus::Delivered,
        };
        filter.statuses = if visible_on_tab {
            Some(vec![status])
        } else {
            Some(vec![])
        };
    }
    filter.priority = query.priority;
    if !query.search.is_empty() {
        filter.text = Some(query.search.clone());
    }
    filter
}

/// Assemble the shipment board dataset for one request.
pub async fn get_shipment_board(
    repo: &dyn RecordStore,
    query: ShipmentBoardQuery,
) -> RepositoryResult<ShipmentListData> {
    let filter = board_filter(&query);
    let shipments = repo.list_shipments(&filter, query.sort, None).await?;

    let active_count = repo.count_shipments(&ShipmentFilter::active()).await?;
    let completed_count = repo
        .count_shipments(&ShipmentFilter::of_statuses(vec![ShipmentStatus::Delivered]))
        .await?;

    let selected = query
        .selected_id
        .and_then(|id| shipments.iter().find(|s| s.id == id))
        .or_else(|| shipments.first())
        .cloned();

    Ok(ShipmentListData {
        selected,
        current_tab: query.tab.as_str().to_string(),
        status_filter: query
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "all".to_string()),
        priority_filter: query
            .priority
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "all".to_string()),
        sort_option: query.sort.as_str().to_string(),
        search_query: query.search,
        active_count,
        completed_count,
        status_choices: status_choices(query.tab),
        priority_choices: priority_choices(),
        sort_choices: sort_choices(),
        quick_filters: quick_filters(),
        shipments,
    })
}

/// Fetch one shipment with its transit timeline, newest event first.
pub async fn get_shipment_detail(
    repo: &dyn RecordStore,
    id: ShipmentId,
) -> RepositoryResult<ShipmentDetailData> {
    let shipment = repo.get_shipment(id).await?;
    let events = repo.events_for_shipment(id).await?;
    Ok(ShipmentDetailData { shipment, events })
}
