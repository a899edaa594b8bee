//! Shipment domain entities and their status/priority vocabularies.

use crate::api::{ShipmentEventId, ShipmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a shipment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    InTransit,
    Delayed,
    OnTime,
    Issue,
    Delivered,
}

impl ShipmentStatus {
    /// All statuses, in the order filter dropdowns present them.
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::InTransit,
        ShipmentStatus::Delayed,
        ShipmentStatus::OnTime,
        ShipmentStatus::Issue,
        ShipmentStatus::Delivered,
    ];

    /// Wire value (stored form).
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Delayed => "delayed",
            ShipmentStatus::OnTime => "on_time",
            ShipmentStatus::Issue => "issue",
            ShipmentStatus::Delivered => "delivered",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delayed => "Delayed",
            ShipmentStatus::OnTime => "On Time",
            ShipmentStatus::Issue => "Issue",
            ShipmentStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_transit" => Ok(ShipmentStatus::InTransit),
            "delayed" => Ok(ShipmentStatus::Delayed),
            "on_time" => Ok(ShipmentStatus::OnTime),
            "issue" => Ok(ShipmentStatus::Issue),
            "delivered" => Ok(ShipmentStatus::Delivered),
            other => Err(format!("Unknown shipment status '{}'", other)),
        }
    }
}

/// Delivery priority. Ordering rank: high before medium before low.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort rank for priority ordering (high first).
    pub fn rank(&self) -> i32 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("Unknown priority '{}'", other)),
        }
    }
}

/// A tracked freight shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Database ID
    pub id: ShipmentId,
    /// Unique tracking code shown to customers
    pub tracking_id: String,
    pub origin: String,
    pub destination: String,
    /// Estimated arrival; unknown for some shipments
    pub eta: Option<DateTime<Utc>>,
    pub status: ShipmentStatus,
    pub priority: Priority,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub driver_contact: String,
    pub departure_time: Option<DateTime<Utc>>,
    /// Last state change, maintained by the store
    pub last_updated: DateTime<Utc>,
}

impl Shipment {
    /// Whether the shipment has reached its terminal state.
    pub fn is_completed(&self) -> bool {
        self.status == ShipmentStatus::Delivered
    }
}

/// A timeline entry attached to a shipment, newest shown first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentEvent {
    pub id: ShipmentEventId,
    pub shipment_id: ShipmentId,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Material icon name; empty when the feed did not provide one
    #[serde(default)]
    pub icon: String,
}
