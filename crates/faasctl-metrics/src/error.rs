use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Backend error ({status}): {body}")]
    BackendError { status: u16, body: String },

    #[error("Metrics source {source_id} returned an unexpected shape: {detail}")]
    SchemaMismatch { source_id: String, detail: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
