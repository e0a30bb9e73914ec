use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Backend error ({status}): {body}")]
    BackendError { status: u16, body: String },

    #[error("Function not found: {0}")]
    RecordNotFound(String),

    #[error("No response within the {0}s execution window")]
    ExecutionTimeout(u64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] faasctl_core::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
