//! Application state for the HTTP server.

use crate::db::repository::RecordStore;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store instance for database operations
    pub repository: Arc<dyn RecordStore>,
}

impl AppState {
    /// Create a new application state with the given record store.
    pub fn new(repository: Arc<dyn RecordStore>) -> Self {
        Self { repository }
    }
}
