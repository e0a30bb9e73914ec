use crate::error::{Error, Result};
use crate::http;
use crate::wire;
use faasctl_core::routing::{resolve, Operation};
use faasctl_core::{FunctionRecord, FunctionSpec, Language};

/// CRUD client for function records. Create and update route by the
/// spec's declared language; delete resolves the owning family with a
/// prior read (the delete request carries only an id). Failed calls are
/// reported immediately, never retried.
#[derive(Clone)]
pub struct LifecycleClient {
    http: reqwest::Client,
    base_url: String,
}

impl LifecycleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a function record; returns the backend-assigned id.
    pub async fn create(&self, spec: &FunctionSpec) -> Result<String> {
        tracing::info!("Creating {} function: {}", spec.language, spec.name);

        let endpoint = resolve(&Operation::CreateFunction {
            language: spec.language,
        });

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .json(&wire::FunctionPayload::from(spec))
            .timeout(http::DEFAULT_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(http::transport)?;
        let response = http::ensure_success(response).await?;

        let body = response.text().await.map_err(http::transport)?;
        let created: wire::CreateResponse = serde_json::from_str(&body)?;

        tracing::info!("Function created: {}", created.function_id);

        Ok(created.function_id)
    }

    /// List stored functions.
    ///
    /// Only the default (python) family exposes the listing consumed
    /// here; js-family records do not appear. Known asymmetry, kept as
    /// observed rather than papered over with an invented fan-out.
    pub async fn list(&self) -> Result<Vec<FunctionRecord>> {
        let endpoint = resolve(&Operation::ListFunctions);

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .timeout(http::DEFAULT_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(http::transport)?;
        let response = http::ensure_success(response).await?;

        let body = response.text().await.map_err(http::transport)?;
        let raw: Vec<wire::RawFunction> = serde_json::from_str(&body)?;

        raw.into_iter().map(wire::RawFunction::into_record).collect()
    }

    /// Fetch one function record by id.
    pub async fn get(&self, id: &str) -> Result<FunctionRecord> {
        let endpoint = resolve(&Operation::GetFunction { id });

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .timeout(http::DEFAULT_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(http::transport)?;
        let response = http::ensure_success(response).await?;

        let body = response.text().await.map_err(http::transport)?;
        let raw: wire::RawFunction = serde_json::from_str(&body)?;

        raw.into_record()
    }

    /// Update a function record in place; routes by the new spec's
    /// language.
    pub async fn update(&self, id: &str, spec: &FunctionSpec) -> Result<()> {
        tracing::info!("Updating function {} ({})", id, spec.language);

        let endpoint = resolve(&Operation::UpdateFunction {
            id,
            language: spec.language,
        });

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .json(&wire::FunctionPayload::from(spec))
            .timeout(http::DEFAULT_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(http::transport)?;
        http::ensure_success(response).await?;

        Ok(())
    }

    /// First step of the delete pipeline: read the record to learn which
    /// family owns it. A record that cannot be fetched leaves no route to
    /// choose, so any backend refusal here is `RecordNotFound`.
    pub async fn resolve_language(&self, id: &str) -> Result<Language> {
        match self.get(id).await {
            Ok(record) => Ok(record.language),
            Err(Error::BackendError { status, .. }) => {
                tracing::warn!("Delete resolution read for {} failed with {}", id, status);
                Err(Error::RecordNotFound(id.to_string()))
            }
            Err(other) => Err(other),
        }
    }

    /// Second step of the delete pipeline: issue the delete against the
    /// resolved family.
    pub async fn dispatch_delete(&self, id: &str, language: Language) -> Result<()> {
        tracing::info!("Deleting function {} from the {} family", id, language);

        let endpoint = resolve(&Operation::DeleteFunction { id, language });

        let response = http::request(&self.http, &self.base_url, &endpoint)
            .timeout(http::DEFAULT_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(http::transport)?;
        http::ensure_success(response).await?;

        Ok(())
    }

    /// Delete a function record: read-then-route.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let language = self.resolve_language(id).await?;
        self.dispatch_delete(id, language).await
    }
}
