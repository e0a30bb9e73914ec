pub mod error;
pub mod execution;
pub mod function;
pub mod language;
pub mod routing;

// Re-exports
pub use error::{Error, Result};
pub use execution::{ExecutionOutcome, ExecutionRequest, ExecutionStatus};
pub use function::{FunctionRecord, FunctionSpec, TIMEOUT_MAX_SECONDS, TIMEOUT_MIN_SECONDS};
pub use language::{Language, SandboxMode};
pub use routing::{resolve, Endpoint, Operation, Verb};
