use std::sync::Arc;

pub struct AppState;

pub type SharedState = Arc<AppState>;
