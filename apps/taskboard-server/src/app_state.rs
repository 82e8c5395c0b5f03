use std::sync::Arc;

use crate::store::TaskStore;

/// Shared handles cloned into every request handler. The store is injected
/// here once at bootstrap; there is no ambient singleton.
#[derive(Clone)]
pub(crate) struct AppState {
    store: Arc<TaskStore>,
    endpoints: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(store: Arc<TaskStore>, endpoints: Arc<Vec<String>>) -> Self {
        Self { store, endpoints }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// `METHOD path` strings recorded while the router was built.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}
