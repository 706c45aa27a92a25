use std::path::Path;
use std::sync::Arc;

use crate::store::{MemoryStore, StoreError};

pub struct AppState {
    pub store: MemoryStore,
}

impl AppState {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self { store: MemoryStore::new(db_path)? })
    }
}

pub type SharedState = Arc<AppState>;
