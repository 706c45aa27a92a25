pub mod analyze;
pub mod critique;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;
pub mod tone;

pub use router::build_router;
pub use state::{AppState, SharedState};
