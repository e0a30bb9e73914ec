//! Endpoint routing table.
//!
//! Every user action maps to exactly one backend route. CRUD operations
//! are keyed by [`Language`] because the two language runtimes are
//! operated as independently deployable families; execution operations
//! are keyed by [`SandboxMode`] and share one execution family per mode
//! across languages.
//!
//! Deleting by id is the one resolution that cannot be decided from the
//! request alone: the delete request carries only an id, so the caller
//! must first fetch the record to learn its language (read-then-route),
//! then build `Operation::DeleteFunction` with that language.

use crate::language::{Language, SandboxMode};

/// HTTP verb of a resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// A resolved backend address: verb plus path relative to the deployment
/// base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    pub path: String,
}

impl Endpoint {
    fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
        }
    }

    /// Joins the path onto a deployment base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// One user-triggered operation, tagged with everything routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<'a> {
    CreateFunction { language: Language },
    ListFunctions,
    GetFunction { id: &'a str },
    UpdateFunction { id: &'a str, language: Language },
    DeleteFunction { id: &'a str, language: Language },
    Execute { mode: SandboxMode },
    ExecutionMetrics { mode: SandboxMode },
    FunctionMetrics,
    FunctionExecutionMetrics { id: &'a str },
    FunctionMetricsTimeframe,
}

fn crud_family(language: Language) -> &'static str {
    match language {
        Language::Javascript => "/api/js-functions",
        Language::Python => "/api/functions",
    }
}

fn execute_family(mode: SandboxMode) -> &'static str {
    match mode {
        SandboxMode::Plain => "/api/execute",
        SandboxMode::Isolated => "/api/gvisor/execute",
    }
}

/// Resolves an operation to its backend endpoint. Total over the
/// operation space: an unroutable language or mode cannot be expressed.
pub fn resolve(op: &Operation<'_>) -> Endpoint {
    match op {
        Operation::CreateFunction { language } => {
            Endpoint::new(Verb::Post, crud_family(*language))
        }
        // Only the default family exposes the listing used here; see
        // LifecycleClient::list for the asymmetry.
        Operation::ListFunctions => Endpoint::new(Verb::Get, "/api/functions"),
        Operation::GetFunction { id } => {
            Endpoint::new(Verb::Get, format!("/api/functions/{id}"))
        }
        Operation::UpdateFunction { id, language } => {
            Endpoint::new(Verb::Put, format!("{}/{id}", crud_family(*language)))
        }
        Operation::DeleteFunction { id, language } => {
            Endpoint::new(Verb::Delete, format!("{}/{id}", crud_family(*language)))
        }
        Operation::Execute { mode } => Endpoint::new(Verb::Post, execute_family(*mode)),
        Operation::ExecutionMetrics { mode } => {
            Endpoint::new(Verb::Get, format!("{}/metrics", execute_family(*mode)))
        }
        Operation::FunctionMetrics => {
            Endpoint::new(Verb::Get, "/api/functions/metrics/aggregate")
        }
        Operation::FunctionExecutionMetrics { id } => {
            Endpoint::new(Verb::Get, format!("/api/functions/{id}/metrics"))
        }
        Operation::FunctionMetricsTimeframe => {
            Endpoint::new(Verb::Get, "/api/functions/metrics/timeframe")
        }
    }
}
