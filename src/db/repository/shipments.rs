//! Shipment repository trait and its filter/sort vocabulary.
//!
//! All dashboard and listing reads over shipments go through this trait so
//! that the in-memory and PostgreSQL backends stay interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::ShipmentId;
use crate::db::models::{DailyVolumeRow, StatusCountRow};
use crate::models::{Priority, Shipment, ShipmentEvent, ShipmentStatus};

/// Conjunctive filter over shipments. Unset fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct ShipmentFilter {
    /// Keep shipments whose status is in this set.
    pub statuses: Option<Vec<ShipmentStatus>>,
    /// Drop shipments with this status.
    pub exclude_status: Option<ShipmentStatus>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring match over tracking id, origin,
    /// destination, carrier, and contents.
    pub text: Option<String>,
    /// Keep shipments with `last_updated >= updated_from`.
    pub updated_from: Option<DateTime<Utc>>,
    /// Keep shipments with `last_updated < updated_before`.
    pub updated_before: Option<DateTime<Utc>>,
}

impl ShipmentFilter {
    /// Filter matching every shipment.
    pub fn all() -> Self {
        Self::default()
    }

    /// Shipments still moving (anything but delivered).
    pub fn active() -> Self {
        Self {
            exclude_status: Some(ShipmentStatus::Delivered),
            ..Self::default()
        }
    }

    /// Shipments flagged for attention: delayed or with an issue.
    pub fn troubled() -> Self {
        Self {
            statuses: Some(vec![ShipmentStatus::Delayed, ShipmentStatus::Issue]),
            ..Self::default()
        }
    }

    /// Shipments whose status is in the given set.
    pub fn of_statuses(statuses: Vec<ShipmentStatus>) -> Self {
        Self {
            statuses: Some(statuses),
            ..Self::default()
        }
    }

    /// Restrict to `from <= last_updated < before`.
    pub fn updated_between(mut self, from: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        self.updated_from = Some(from);
        self.updated_before = Some(before);
        self
    }

    /// Restrict to `last_updated >= from`.
    pub fn updated_since(mut self, from: DateTime<Utc>) -> Self {
        self.updated_from = Some(from);
        self
    }
}

/// Sort orders the shipment list view offers.
///
/// Every variant tie-breaks by tracking id ascending so listings are stable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ShipmentSort {
    /// Soonest ETA first, shipments without an ETA last.
    #[default]
    EtaAsc,
    /// Latest ETA first, shipments without an ETA last.
    EtaDesc,
    /// Most recently updated first.
    RecentlyUpdated,
    /// High priority first, then by ETA ascending.
    PriorityRank,
}

impl ShipmentSort {
    /// Parse a query-string value. Unknown values fall back to [`ShipmentSort::EtaAsc`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "eta" => ShipmentSort::EtaAsc,
            "eta_desc" => ShipmentSort::EtaDesc,
            "updated" => ShipmentSort::RecentlyUpdated,
            "priority" => ShipmentSort::PriorityRank,
            _ => ShipmentSort::EtaAsc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentSort::EtaAsc => "eta",
            ShipmentSort::EtaDesc => "eta_desc",
            ShipmentSort::RecentlyUpdated => "updated",
            ShipmentSort::PriorityRank => "priority",
        }
    }
}

/// Repository trait for shipment reads.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Count shipments matching a filter.
    ///
    /// # Arguments
    /// * `filter` - Conjunctive constraints; `ShipmentFilter::all()` counts everything
    ///
    /// # Returns
    /// * `Ok(i64)` - Matching row count
    /// * `Err(RepositoryError)` - If the operation fails
    async fn count_shipments(&self, filter: &ShipmentFilter) -> RepositoryResult<i64>;

    /// Fetch shipments matching a filter, ordered and optionally capped.
    ///
    /// # Arguments
    /// * `filter` - Conjunctive constraints
    /// * `sort` - Ordering; see [`ShipmentSort`]
    /// * `limit` - Maximum rows to return, `None` for all
    async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        sort: ShipmentSort,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Shipment>>;

    /// Fetch one shipment by ID.
    ///
    /// # Returns
    /// * `Ok(Shipment)` - The shipment
    /// * `Err(RepositoryError::NotFound)` - If no shipment has this ID
    async fn get_shipment(&self, id: ShipmentId) -> RepositoryResult<Shipment>;

    /// Fetch the event timeline for a shipment, newest first.
    async fn events_for_shipment(
        &self,
        id: ShipmentId,
    ) -> RepositoryResult<Vec<ShipmentEvent>>;

    /// Shipments-per-day counts for shipments updated at or after `from`.
    ///
    /// Days with no shipments are absent from the result. Rows are ordered
    /// by day ascending.
    async fn shipment_volume_by_day(
        &self,
        from: DateTime<Utc>,
    ) -> RepositoryResult<Vec<DailyVolumeRow>>;

    /// Count of shipments per status over the whole table, ordered by count
    /// descending.
    async fn status_breakdown(&self) -> RepositoryResult<Vec<StatusCountRow>>;

    /// Case-insensitive search over tracking id, origin, destination,
    /// carrier, and contents; most recently updated first.
    ///
    /// # Arguments
    /// * `query` - Raw search text (caller trims and rejects blanks)
    /// * `limit` - Maximum rows to return
    async fn search_shipments(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<Shipment>>;
}
