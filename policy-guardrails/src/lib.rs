pub mod apply;
pub mod filters;
pub mod handlers;
pub mod lanes;
pub mod repairs;
pub mod router;
pub mod state;
pub mod validate;

pub use router::build_router;
pub use state::{AppState, SharedState};
