use chrono::{DateTime, Utc};
use faasctl_core::{ExecutionOutcome, ExecutionRequest, FunctionRecord, FunctionSpec};
use faasctl_metrics::{AggregatedMetricsRow, ExecutionMetricSample, ExecutionMetricsReport, HistoryView, Page};

/// One user-triggered action, carried as an immutable value. Everything
/// the dispatch needs travels inside the action; there is no session
/// state to consult.
#[derive(Debug, Clone)]
pub enum Action {
    CreateFunction(FunctionSpec),
    ListFunctions,
    GetFunction { id: String },
    UpdateFunction { id: String, spec: FunctionSpec },
    DeleteFunction { id: String },
    Execute(ExecutionRequest),
    FetchHistory,
    FetchFunctionMetrics { id: String, page: Option<Page> },
    FetchHistoryTimeframe { start: DateTime<Utc>, until: DateTime<Utc> },
}

/// What an execution action hands back: the run's outcome plus the
/// freshest recorded sample of that family at fetch time. The sample is
/// a best-effort snapshot — backends record metrics asynchronously, so
/// it may lag the run that was just issued.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub outcome: ExecutionOutcome,
    pub latest_sample: Option<ExecutionMetricSample>,
}

/// The result of a dispatched action.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Created { id: String },
    Functions(Vec<FunctionRecord>),
    Function(FunctionRecord),
    Updated { id: String },
    Deleted { id: String },
    Executed(ExecutionReport),
    History(HistoryView),
    FunctionMetrics(ExecutionMetricsReport),
    TimeframeRows(Vec<AggregatedMetricsRow>),
}
