use crate::error::{Error, Result};
use faasctl_core::routing::{Endpoint, Verb};
use std::time::Duration;

/// Upper bound on any single lifecycle call; execution calls carry their
/// own request-derived bound instead.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn request(
    http: &reqwest::Client,
    base_url: &str,
    endpoint: &Endpoint,
) -> reqwest::RequestBuilder {
    let url = endpoint.url(base_url);
    match endpoint.verb {
        Verb::Get => http.get(url),
        Verb::Post => http.post(url),
        Verb::Put => http.put(url),
        Verb::Delete => http.delete(url),
    }
}

/// Transport-level failures: connection refused, DNS, timeout before any
/// response. Never retried, never masked.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    Error::NetworkUnreachable(err.to_string())
}

/// Surfaces any non-2xx response verbatim as a backend error.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::BackendError {
        status: status.as_u16(),
        body,
    })
}
