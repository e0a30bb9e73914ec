use crate::error::{Error, Result};
use crate::model::{
    AggregatedMetricsRow, ExecutionMetricsReport, HistoryView, Page, SourceKind, SourceWarning,
};
use crate::wire;
use chrono::{DateTime, Utc};
use faasctl_core::routing::{resolve, Endpoint, Operation};
use faasctl_core::SandboxMode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Synthetic source identity for the plain family's ad-hoc stream in the
/// merged history.
pub const ADHOC_PLAIN_SOURCE_ID: &str = "adhoc-plain";
pub const ADHOC_PLAIN_SOURCE_NAME: &str = "Ad-hoc Execution";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches raw metrics from the execution families and the function
/// store and reconciles their differing schemas into one read-only
/// historical view. Source data is never mutated and never re-rounded;
/// full precision flows through to the caller.
#[derive(Clone)]
pub struct MetricsAggregator {
    http: reqwest::Client,
    base_url: String,
}

impl MetricsAggregator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self
            .http
            .get(endpoint.url(&self.base_url))
            .timeout(REQUEST_TIMEOUT);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|err| Error::NetworkUnreachable(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| Error::NetworkUnreachable(err.to_string()))?;

        if !status.is_success() {
            return Err(Error::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| Error::SchemaMismatch {
            source_id: endpoint.path.clone(),
            detail: err.to_string(),
        })
    }

    /// Per execution family: the backend's rolling aggregate plus its
    /// most recent sample list.
    pub async fn fetch_execution_metrics(
        &self,
        family: SandboxMode,
    ) -> Result<ExecutionMetricsReport> {
        let endpoint = resolve(&Operation::ExecutionMetrics { mode: family });
        let raw: wire::RawMetricsResponse = self.get_json(&endpoint, &[]).await?;
        Ok(raw.into_report())
    }

    /// One pre-aggregated row per persisted function.
    pub async fn fetch_function_metrics(&self) -> Result<Vec<AggregatedMetricsRow>> {
        let endpoint = resolve(&Operation::FunctionMetrics);
        let raw: Vec<wire::RawFunctionAggregate> = self.get_json(&endpoint, &[]).await?;
        Ok(raw.into_iter().map(wire::RawFunctionAggregate::into_row).collect())
    }

    /// Samples and aggregate for one persisted function, newest-first,
    /// optionally paged (the backend defaults to the first ten).
    pub async fn fetch_function_execution_metrics(
        &self,
        id: &str,
        page: Option<Page>,
    ) -> Result<ExecutionMetricsReport> {
        let endpoint = resolve(&Operation::FunctionExecutionMetrics { id });
        let query = match page {
            Some(page) => vec![
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
            ],
            None => Vec::new(),
        };
        let raw: wire::RawMetricsResponse = self.get_json(&endpoint, &query).await?;
        Ok(raw.into_report())
    }

    /// Per-function aggregate rows restricted to runs inside the window.
    pub async fn fetch_function_metrics_timeframe(
        &self,
        start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<AggregatedMetricsRow>> {
        let endpoint = resolve(&Operation::FunctionMetricsTimeframe);
        let query = vec![
            ("start_date", start.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("end_date", until.format("%Y-%m-%d %H:%M:%S").to_string()),
        ];
        let raw: Vec<wire::RawFunctionAggregate> = self.get_json(&endpoint, &query).await?;
        Ok(raw.into_iter().map(wire::RawFunctionAggregate::into_row).collect())
    }

    /// Assemble the unified history: function rows first, then one
    /// synthesized ad-hoc row when the plain family has recorded at
    /// least one sample. A failed source contributes zero rows and one
    /// warning; the view itself always comes back.
    ///
    /// Sources are read sequentially, each a fresh snapshot at fetch
    /// time — a run recorded asynchronously by the backend may show up
    /// only on the next assembly.
    pub async fn build_history(&self) -> HistoryView {
        let mut rows = Vec::new();
        let mut warnings = Vec::new();

        match self.fetch_function_metrics().await {
            Ok(function_rows) => rows.extend(function_rows),
            Err(err) => {
                tracing::warn!("Function metrics source failed: {}", err);
                warnings.push(SourceWarning::new(SourceKind::Functions, &err));
            }
        }

        match self.fetch_execution_metrics(SandboxMode::Plain).await {
            Ok(report) => {
                if !report.samples.is_empty() {
                    rows.push(
                        report
                            .aggregate
                            .into_row(ADHOC_PLAIN_SOURCE_ID, ADHOC_PLAIN_SOURCE_NAME),
                    );
                }
            }
            Err(err) => {
                tracing::warn!("Plain execution metrics source failed: {}", err);
                warnings.push(SourceWarning::new(SourceKind::PlainExecution, &err));
            }
        }

        HistoryView { rows, warnings }
    }
}
