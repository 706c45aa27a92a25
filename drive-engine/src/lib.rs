pub mod engine;
pub mod handlers;
pub mod router;
pub mod state;
pub mod store;

pub use router::build_router;
pub use state::{AppState, SharedState};
