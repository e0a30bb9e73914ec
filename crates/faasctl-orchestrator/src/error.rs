use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] faasctl_client::Error),

    #[error(transparent)]
    Metrics(#[from] faasctl_metrics::Error),

    #[error(transparent)]
    Core(#[from] faasctl_core::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
