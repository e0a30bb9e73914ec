use crate::error::Result;
use crate::function::validate_timeout;
use crate::language::{Language, SandboxMode};
use serde::{Deserialize, Serialize};

/// Outcome classification for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
    // execution backends record failed runs as "error"
    #[serde(alias = "error")]
    Failure,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }
}

/// An ad-hoc execution request. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: Language,
    pub timeout_seconds: u64,
    pub sandbox_mode: SandboxMode,
}

impl ExecutionRequest {
    pub fn new(
        code: String,
        language: Language,
        timeout_seconds: u64,
        sandbox_mode: SandboxMode,
    ) -> Result<Self> {
        validate_timeout(timeout_seconds)?;

        Ok(Self {
            code,
            language,
            timeout_seconds,
            sandbox_mode,
        })
    }
}

/// What came back from a run: output on success, an optional backend
/// message on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: ExecutionStatus,
    pub output: Option<String>,
    pub error_message: Option<String>,
}

impl ExecutionOutcome {
    pub fn success(output: String) -> Self {
        Self {
            status: ExecutionStatus::Success,
            output: Some(output),
            error_message: None,
        }
    }

    pub fn failure(error_message: Option<String>) -> Self {
        Self {
            status: ExecutionStatus::Failure,
            output: None,
            error_message,
        }
    }
}
