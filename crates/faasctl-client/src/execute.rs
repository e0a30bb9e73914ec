use crate::error::{Error, Result};
use crate::http;
use crate::wire;
use faasctl_core::routing::{resolve, Operation};
use faasctl_core::{ExecutionOutcome, ExecutionRequest};
use std::time::Duration;

/// Extra local wait beyond the wire timeout handed to the backend, so a
/// run that uses its full budget can still deliver its response.
pub const TIMEOUT_MARGIN_SECONDS: u64 = 2;

/// Dispatches ad-hoc code to one of the execution families, selected by
/// the request's sandbox mode. The wire timeout equals the request's
/// timeout; the client waits at most that long plus
/// [`TIMEOUT_MARGIN_SECONDS`] before giving up locally.
#[derive(Clone)]
pub struct ExecutionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExecutionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Run a snippet and classify the result.
    ///
    /// A 2xx response is a successful run with its output. Any non-2xx
    /// response on this route is a backend-reported failure and comes
    /// back as an `Ok` outcome with `status = Failure` and whatever
    /// message the body carried. Local timeout expiry is
    /// `ExecutionTimeout`, distinct from both.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionOutcome> {
        tracing::info!(
            "Executing {} code on the {} path (timeout {}s)",
            request.language,
            request.sandbox_mode,
            request.timeout_seconds
        );

        let endpoint = resolve(&Operation::Execute {
            mode: request.sandbox_mode,
        });

        let payload = wire::ExecutePayload {
            code: &request.code,
            timeout: request.timeout_seconds,
            language: request.language,
        };

        let wait = Duration::from_secs(request.timeout_seconds + TIMEOUT_MARGIN_SECONDS);

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .json(&payload)
            .timeout(wait)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    Error::ExecutionTimeout(request.timeout_seconds)
                } else {
                    http::transport(err)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(http::transport)?;

        if status.is_success() {
            let parsed: wire::ExecuteResponse = serde_json::from_str(&body)?;
            Ok(ExecutionOutcome::success(parsed.output))
        } else {
            tracing::warn!("Execution reported failure ({})", status);
            Ok(ExecutionOutcome::failure(wire::failure_message(&body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faasctl_core::{ExecutionStatus, Language, SandboxMode};

    fn request(mode: SandboxMode) -> ExecutionRequest {
        ExecutionRequest::new("print(1)".to_string(), Language::Python, 5, mode).unwrap()
    }

    #[tokio::test]
    async fn test_plain_execution_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/api/execute")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "code": "print(1)",
                "timeout": 5,
                "language": "python"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"output":"1\n"}"#)
            .create_async()
            .await;

        let client = ExecutionClient::new(server.url());
        let outcome = client.execute(&request(SandboxMode::Plain)).await.unwrap();

        assert_eq!(outcome.status, ExecutionStatus::Success);
        assert_eq!(outcome.output.as_deref(), Some("1\n"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_isolated_execution_routes_to_gvisor_family() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/api/gvisor/execute")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"output":"ok"}"#)
            .create_async()
            .await;

        let client = ExecutionClient::new(server.url());
        let outcome = client
            .execute(&request(SandboxMode::Isolated))
            .await
            .unwrap();

        assert!(outcome.status.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_failure_outcome() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/execute")
            .with_status(500)
            .with_body(
                r#"{"error":"Execution failed or timeout","details":"ZeroDivisionError: division by zero"}"#,
            )
            .create_async()
            .await;

        let client = ExecutionClient::new(server.url());
        let failing =
            ExecutionRequest::new("1/0".to_string(), Language::Python, 5, SandboxMode::Plain)
                .unwrap();
        let outcome = client.execute(&failing).await.unwrap();

        assert_eq!(outcome.status, ExecutionStatus::Failure);
        assert!(outcome.output.is_none());
        let message = outcome.error_message.unwrap();
        assert!(message.contains("ZeroDivisionError"));
    }

    #[tokio::test]
    async fn test_failure_without_message_keeps_none() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/api/execute")
            .with_status(500)
            .with_body("")
            .create_async()
            .await;

        let client = ExecutionClient::new(server.url());
        let outcome = client.execute(&request(SandboxMode::Plain)).await.unwrap();

        assert_eq!(outcome.status, ExecutionStatus::Failure);
        assert!(outcome.error_message.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = ExecutionClient::new("http://127.0.0.1:9");
        let err = client
            .execute(&request(SandboxMode::Plain))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NetworkUnreachable(_)));
    }
}
