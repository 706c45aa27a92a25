//! One module per downstream dependency the gateway fans out to (spec §4.1,
//! §6's "Outbound HTTP contracts"). Each wraps [`crate::http_client::ServiceClient`].

pub mod drive;
pub mod feeling;
pub mod intent;
pub mod memory;
pub mod policy;
pub mod provider;
pub mod telemetry;
pub mod tools;

pub use drive::DriveClient;
pub use feeling::FeelingClient;
pub use intent::IntentClient;
pub use memory::MemoryClient;
pub use policy::PolicyClient;
pub use provider::ProviderClient;
pub use telemetry::TelemetryClient;
pub use tools::ToolsClient;
