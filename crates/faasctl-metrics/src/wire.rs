//! Raw metrics shapes as the backends emit them.
//!
//! The execution families answer `{detailed_metrics, aggregated_metrics}`;
//! the function store answers a flat list of per-function aggregate rows.
//! Aggregates computed over zero rows arrive with SQL NULLs in the summed
//! and averaged columns, so everything but the count is optional here and
//! normalized on conversion.

use crate::model::{
    AggregatedMetricsRow, ExecutionAggregate, ExecutionMetricSample, ExecutionMetricsReport,
};
use chrono::{DateTime, Utc};
use faasctl_core::ExecutionStatus;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawMetricsResponse {
    pub detailed_metrics: Vec<RawSample>,
    pub aggregated_metrics: RawAggregate,
}

impl RawMetricsResponse {
    pub(crate) fn into_report(self) -> ExecutionMetricsReport {
        ExecutionMetricsReport {
            samples: self
                .detailed_metrics
                .into_iter()
                .map(RawSample::into_sample)
                .collect(),
            aggregate: self.aggregated_metrics.into_aggregate(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSample {
    pub execution_time: f64,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl RawSample {
    fn into_sample(self) -> ExecutionMetricSample {
        ExecutionMetricSample {
            execution_time_seconds: self.execution_time,
            status: self.status,
            error_message: self.error_message,
            started_at: self.start_time,
            finished_at: self.end_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAggregate {
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: Option<u64>,
    #[serde(default)]
    pub failed_executions: Option<u64>,
    #[serde(default)]
    pub avg_execution_time: Option<f64>,
    #[serde(default)]
    pub min_execution_time: Option<f64>,
    #[serde(default)]
    pub max_execution_time: Option<f64>,
}

impl RawAggregate {
    pub(crate) fn into_aggregate(self) -> ExecutionAggregate {
        ExecutionAggregate {
            total_executions: self.total_executions,
            successful_executions: self.successful_executions.unwrap_or(0),
            failed_executions: self.failed_executions.unwrap_or(0),
            avg_execution_time_seconds: self.avg_execution_time,
            min_execution_time_seconds: self.min_execution_time,
            max_execution_time_seconds: self.max_execution_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFunctionAggregate {
    pub function_id: String,
    pub function_name: String,
    #[serde(default)]
    pub total_executions: u64,
    #[serde(default)]
    pub successful_executions: Option<u64>,
    #[serde(default)]
    pub failed_executions: Option<u64>,
    #[serde(default)]
    pub avg_execution_time: Option<f64>,
    #[serde(default)]
    pub min_execution_time: Option<f64>,
    #[serde(default)]
    pub max_execution_time: Option<f64>,
}

impl RawFunctionAggregate {
    pub(crate) fn into_row(self) -> AggregatedMetricsRow {
        AggregatedMetricsRow {
            source_id: self.function_id,
            source_name: self.function_name,
            total_executions: self.total_executions,
            successful_executions: self.successful_executions.unwrap_or(0),
            failed_executions: self.failed_executions.unwrap_or(0),
            avg_execution_time_seconds: self.avg_execution_time,
            min_execution_time_seconds: self.min_execution_time,
            max_execution_time_seconds: self.max_execution_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_execution_row_normalizes_nulls() {
        let raw: RawFunctionAggregate = serde_json::from_str(
            r#"{
                "function_id": "f-1",
                "function_name": "idle",
                "total_executions": 0,
                "successful_executions": null,
                "failed_executions": null,
                "avg_execution_time": null,
                "min_execution_time": null,
                "max_execution_time": null
            }"#,
        )
        .unwrap();

        let row = raw.into_row();
        assert_eq!(row.total_executions, 0);
        assert_eq!(row.successful_executions, 0);
        assert_eq!(row.failed_executions, 0);
        assert!(row.avg_execution_time_seconds.is_none());
    }

    #[test]
    fn test_sample_status_error_spelling() {
        let raw: RawSample = serde_json::from_str(
            r#"{
                "execution_time": 0.42,
                "status": "error",
                "error_message": "boom",
                "start_time": "2024-03-01T12:00:00Z",
                "end_time": "2024-03-01T12:00:01Z"
            }"#,
        )
        .unwrap();

        let sample = raw.into_sample();
        assert_eq!(sample.status, ExecutionStatus::Failure);
        assert_eq!(sample.error_message.as_deref(), Some("boom"));
        assert!(sample.started_at.is_some());
    }
}
