pub mod inventory;
pub mod order;
pub mod shipment;

pub use inventory::*;
pub use order::*;
pub use shipment::*;
