use std::sync::Arc;

use crate::db::store::HolderStore;

/// Per-server context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HolderStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn HolderStore>) -> Self {
        Self { store }
    }
}
