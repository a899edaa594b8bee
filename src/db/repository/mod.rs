//! Record store contract.
//!
//! One read trait per entity family plus [`RecordStore`], the combined
//! contract the HTTP layer holds. Splitting the traits keeps services honest
//! about which slice of the store they actually read.

pub mod error;
pub mod inventory;
pub mod orders;
pub mod shipments;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use inventory::InventoryRepository;
pub use orders::{OrderFilter, OrderRepository, OrderSortField, SortDirection};
pub use shipments::{ShipmentFilter, ShipmentRepository, ShipmentSort};

use async_trait::async_trait;

/// Combined read contract over every entity the back office serves.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait RecordStore: ShipmentRepository + OrderRepository + InventoryRepository {
    /// Verify the backing store is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` - Store answered
    /// * `Err(RepositoryError)` - If the probe fails
    async fn health_check(&self) -> RepositoryResult<bool>;
}

impl std::fmt::Debug for dyn RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RecordStore")
    }
}
