pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod search;
pub mod shipments;
