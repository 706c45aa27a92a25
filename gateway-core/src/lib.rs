//! Shared types, HTTP client contracts, routing policy, and the tool-call
//! loop used by the gateway orchestrator and its satellite services.

pub mod cache;
pub mod clients;
pub mod drive;
pub mod error;
pub mod hmac_sign;
pub mod http_client;
pub mod intent;
pub mod memory;
pub mod message;
pub mod openai_sse;
pub mod pii;
pub mod routing;
pub mod task;
pub mod tool_loop;

pub use cache::{tool_cache_key, ArgPair, ArgValue, CacheEntry};
pub use drive::{categorize, derive_focus, style_hints, DriveDelta, DriveLevel, DrivePolicy, DriveVector};
pub use error::{ErrorKind, ServiceError, ToolLoopError};
pub use intent::{Family, IntentRecord, ProviderPreference};
pub use memory::{summarize_extractive, Episode, Trait, MIN_EPISODE_CONTENT_LEN, MIN_PERSIST_CONFIDENCE};
pub use message::{Attachment, ChatMessage, Role, ToolCall};
pub use task::{DeadLetter, DeadLetterReason, Task};
