pub mod aggregator;
pub mod error;
pub mod model;

mod wire;

// Re-exports
pub use aggregator::{MetricsAggregator, ADHOC_PLAIN_SOURCE_ID, ADHOC_PLAIN_SOURCE_NAME};
pub use error::{Error, Result};
pub use model::{
    AggregatedMetricsRow, ExecutionAggregate, ExecutionMetricSample, ExecutionMetricsReport,
    HistoryView, Page, SourceKind, SourceWarning,
};
