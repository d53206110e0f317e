//! Directory module: countries, dialing areas and subscriber numbers

mod service;


use std::sync::Arc;

use crate::repositories::MockDirectoryStore;

pub use service::DirectoryService;

/// Directory service running entirely on the in-memory store
pub type MockDirectoryService =
    DirectoryService<MockDirectoryStore, MockDirectoryStore, MockDirectoryStore, MockDirectoryStore>;

impl MockDirectoryService {
    /// Build a service whose every repository is the given store
    pub fn from_store(store: &MockDirectoryStore) -> Self {
        let store = Arc::new(store.clone());
        DirectoryService::new(store.clone(), store.clone(), store.clone(), store)
    }
}
