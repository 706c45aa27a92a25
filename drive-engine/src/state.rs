use std::path::Path;
use std::sync::Arc;

use crate::store::{DriveStore, StoreError};

pub struct AppState {
    pub store: DriveStore,
}

impl AppState {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self { store: DriveStore::new(db_path)? })
    }
}

pub type SharedState = Arc<AppState>;
