//! Intent Router: content-family classification and provider/model routing
//! hints (spec §4.2, §6).

pub mod classify;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::{AppState, SharedState};
