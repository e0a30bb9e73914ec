use crate::action::{Action, ActionOutcome, ExecutionReport};
use crate::error::Result;
use chrono::{DateTime, Utc};
use faasctl_client::{ExecutionClient, LifecycleClient};
use faasctl_core::{ExecutionRequest, FunctionRecord, FunctionSpec};
use faasctl_metrics::{
    AggregatedMetricsRow, ExecutionMetricsReport, HistoryView, MetricsAggregator, Page,
};

/// Single entry point for a presentation layer. Owns one client per
/// concern and composes them per action; every action recomputes from
/// fresh backend responses, so no state is shared between dispatches.
#[derive(Clone)]
pub struct Orchestrator {
    lifecycle: LifecycleClient,
    executor: ExecutionClient,
    metrics: MetricsAggregator,
}

impl Orchestrator {
    pub fn new(base_url: &str) -> Self {
        Self {
            lifecycle: LifecycleClient::new(base_url),
            executor: ExecutionClient::new(base_url),
            metrics: MetricsAggregator::new(base_url),
        }
    }

    /// Dispatch one immutable action value.
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::CreateFunction(spec) => {
                let id = self.create_function(&spec).await?;
                Ok(ActionOutcome::Created { id })
            }
            Action::ListFunctions => Ok(ActionOutcome::Functions(self.list_functions().await?)),
            Action::GetFunction { id } => Ok(ActionOutcome::Function(self.get_function(&id).await?)),
            Action::UpdateFunction { id, spec } => {
                self.update_function(&id, &spec).await?;
                Ok(ActionOutcome::Updated { id })
            }
            Action::DeleteFunction { id } => {
                self.delete_function(&id).await?;
                Ok(ActionOutcome::Deleted { id })
            }
            Action::Execute(request) => Ok(ActionOutcome::Executed(self.execute(&request).await?)),
            Action::FetchHistory => Ok(ActionOutcome::History(self.history().await)),
            Action::FetchFunctionMetrics { id, page } => Ok(ActionOutcome::FunctionMetrics(
                self.function_metrics(&id, page).await?,
            )),
            Action::FetchHistoryTimeframe { start, until } => Ok(ActionOutcome::TimeframeRows(
                self.history_timeframe(start, until).await?,
            )),
        }
    }

    pub async fn create_function(&self, spec: &FunctionSpec) -> Result<String> {
        Ok(self.lifecycle.create(spec).await?)
    }

    pub async fn list_functions(&self) -> Result<Vec<FunctionRecord>> {
        Ok(self.lifecycle.list().await?)
    }

    pub async fn get_function(&self, id: &str) -> Result<FunctionRecord> {
        Ok(self.lifecycle.get(id).await?)
    }

    pub async fn update_function(&self, id: &str, spec: &FunctionSpec) -> Result<()> {
        Ok(self.lifecycle.update(id, spec).await?)
    }

    pub async fn delete_function(&self, id: &str) -> Result<()> {
        Ok(self.lifecycle.delete(id).await?)
    }

    /// Run ad-hoc code, then read that family's metrics for the
    /// freshest sample. The two calls are sequential; the sample is the
    /// latest available at fetch time and may not yet include the run
    /// just issued. A metrics failure here degrades to `None` rather
    /// than failing an execution that already completed.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionReport> {
        let outcome = self.executor.execute(request).await?;

        let latest_sample = match self
            .metrics
            .fetch_execution_metrics(request.sandbox_mode)
            .await
        {
            Ok(report) => report.samples.into_iter().next(),
            Err(err) => {
                tracing::warn!("Could not fetch post-execution metrics: {}", err);
                None
            }
        };

        Ok(ExecutionReport {
            outcome,
            latest_sample,
        })
    }

    /// The unified history view; partial failures surface as warnings
    /// inside the view, never as an error.
    pub async fn history(&self) -> HistoryView {
        self.metrics.build_history().await
    }

    pub async fn function_metrics(
        &self,
        id: &str,
        page: Option<Page>,
    ) -> Result<ExecutionMetricsReport> {
        Ok(self.metrics.fetch_function_execution_metrics(id, page).await?)
    }

    pub async fn history_timeframe(
        &self,
        start: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<AggregatedMetricsRow>> {
        Ok(self.metrics.fetch_function_metrics_timeframe(start, until).await?)
    }
}
