pub mod error;
pub mod execute;
pub mod lifecycle;

mod http;
mod wire;

// Re-exports
pub use error::{Error, Result};
pub use execute::{ExecutionClient, TIMEOUT_MARGIN_SECONDS};
pub use lifecycle::LifecycleClient;
