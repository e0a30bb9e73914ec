use chrono::{DateTime, Utc};
use faasctl_core::ExecutionStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded run from an execution family's sample list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetricSample {
    pub execution_time_seconds: f64,
    pub status: ExecutionStatus,
    pub error_message: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Rolling aggregate an execution family keeps for its own stream.
/// Latency fields are `None` when nothing has run yet. Values keep full
/// precision; rounding belongs to presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionAggregate {
    pub total_executions: u64,
    pub successful_executions: u64,
    pub failed_executions: u64,
    pub avg_execution_time_seconds: Option<f64>,
    pub min_execution_time_seconds: Option<f64>,
    pub max_execution_time_seconds: Option<f64>,
}

impl ExecutionAggregate {
    /// Lifts the family aggregate into a history row under a synthetic
    /// source identity, fields copied verbatim.
    pub fn into_row(self, source_id: &str, source_name: &str) -> AggregatedMetricsRow {
        AggregatedMetricsRow {
            source_id: source_id.to_string(),
            source_name: source_name.to_string(),
            total_executions: self.total_executions,
            successful_executions: self.successful_executions,
            failed_executions: self.failed_executions,
            avg_execution_time_seconds: self.avg_execution_time_seconds,
            min_execution_time_seconds: self.min_execution_time_seconds,
            max_execution_time_seconds: self.max_execution_time_seconds,
        }
    }
}

/// What one execution family reports: its most recent samples plus its
/// rolling aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetricsReport {
    pub samples: Vec<ExecutionMetricSample>,
    pub aggregate: ExecutionAggregate,
}

impl ExecutionMetricsReport {
    /// The backend orders samples newest-first.
    pub fn latest_sample(&self) -> Option<&ExecutionMetricSample> {
        self.samples.first()
    }
}

/// One summarized row in the unified history: a persisted function or a
/// synthetic ad-hoc stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetricsRow {
    pub source_id: String,
    pub source_name: String,
    pub total_executions: u64,
    pub successful_executions: u64,
    pub failed_executions: u64,
    pub avg_execution_time_seconds: Option<f64>,
    pub min_execution_time_seconds: Option<f64>,
    pub max_execution_time_seconds: Option<f64>,
}

/// Metrics source families that feed the history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Functions,
    PlainExecution,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Functions => f.write_str("function metrics"),
            SourceKind::PlainExecution => f.write_str("plain execution metrics"),
        }
    }
}

/// A source that failed during history assembly. The view still carries
/// whatever the other sources produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceWarning {
    pub source: SourceKind,
    pub message: String,
}

impl SourceWarning {
    pub fn new(source: SourceKind, message: impl fmt::Display) -> Self {
        Self {
            source,
            message: message.to_string(),
        }
    }
}

/// The merged historical table: function rows first, then the synthetic
/// ad-hoc row when the plain family has samples. Concatenation order,
/// never sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub rows: Vec<AggregatedMetricsRow>,
    pub warnings: Vec<SourceWarning>,
}

/// Sample-list paging; the backend defaults to the first ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}
