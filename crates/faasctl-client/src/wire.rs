//! Raw backend shapes. Responses are normalized into `faasctl-core`
//! types at this boundary; nothing raw leaks past the clients.

use crate::error::Result;
use faasctl_core::{FunctionRecord, FunctionSpec, Language};
use serde::{Deserialize, Serialize};

/// Applied when a record row omits its timeout column (the listing
/// projection does); matches the backend's own default.
const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Serialize)]
pub(crate) struct FunctionPayload<'a> {
    pub name: &'a str,
    pub language: Language,
    pub code: &'a str,
    pub timeout: u64,
}

impl<'a> From<&'a FunctionSpec> for FunctionPayload<'a> {
    fn from(spec: &'a FunctionSpec) -> Self {
        Self {
            name: &spec.name,
            language: spec.language,
            code: &spec.code,
            timeout: spec.timeout_seconds,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub function_id: String,
}

/// A function row as the backend returns it. The language arrives as a
/// free-form string and is parsed here, so an unrecognized language
/// surfaces as `UnsupportedLanguage` rather than a decode error.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFunction {
    pub id: String,
    pub name: String,
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl RawFunction {
    pub(crate) fn into_record(self) -> Result<FunctionRecord> {
        let language: Language = self.language.parse()?;

        Ok(FunctionRecord {
            id: self.id,
            name: self.name,
            language,
            code: self.code,
            timeout_seconds: self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExecutePayload<'a> {
    pub code: &'a str,
    pub timeout: u64,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExecuteResponse {
    pub output: String,
}

#[derive(Debug, Deserialize)]
struct BackendFailure {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Pulls the most informative message out of an execute-route failure
/// body: `details` over `error` over the raw body, `None` if the backend
/// sent nothing usable.
pub(crate) fn failure_message(body: &str) -> Option<String> {
    if let Ok(failure) = serde_json::from_str::<BackendFailure>(body) {
        if let Some(message) = failure.details.or(failure.error) {
            return Some(message);
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
