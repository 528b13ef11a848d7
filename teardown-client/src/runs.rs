//! Run endpoints

use reqwest::{Method, StatusCode};
use teardown_core::domain::run::{LogSource, Run};
use teardown_core::dto::jsonapi::Document;
use teardown_core::dto::log::LogSourceResource;
use teardown_core::dto::run::{CreateRun, RunResource};
use tracing::debug;

use crate::error::Result;
use crate::{TerraformCloudClient, handle_response, require_non_empty};

impl TerraformCloudClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Create a run
    ///
    /// Only `201 Created` counts as success.
    ///
    /// # Example
    /// ```no_run
    /// # use teardown_client::TerraformCloudClient;
    /// # use teardown_core::domain::run::RunMode;
    /// # use teardown_core::dto::run::CreateRun;
    /// # async fn example() -> teardown_client::Result<()> {
    /// let client = TerraformCloudClient::new("https://app.terraform.io/api/v2", "token");
    /// let run = client.create_run(CreateRun::new("ws-abc123", RunMode::Apply)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_run(&self, run: CreateRun) -> Result<Run> {
        require_non_empty(run.relationships.workspace.id().unwrap_or_default(), "workspace id")?;

        let request = self
            .request(Method::POST, "/runs")
            .json(&run.into_document());
        let response = self.retry.execute(request).await?;
        let doc: Document<RunResource> = handle_response(response, StatusCode::CREATED).await?;

        Ok(doc.data.into())
    }

    /// Get a run by ID
    ///
    /// Sent once, without transport retries. Callers poll this endpoint.
    pub async fn get_run(&self, run_id: &str) -> Result<Run> {
        require_non_empty(run_id, "run id")?;

        let path = format!("/runs/{}", run_id);
        let response = self.request(Method::GET, &path).send().await?;
        let doc: Document<RunResource> = handle_response(response, StatusCode::OK).await?;

        Ok(doc.data.into())
    }

    // =============================================================================
    // Run Logs
    // =============================================================================

    /// Get the temporary log-read URL of a plan or apply
    pub async fn get_log_read_url(&self, source: &LogSource) -> Result<String> {
        require_non_empty(source.id(), "log source id")?;

        let path = format!("/{}/{}", source.collection(), source.id());
        debug!("Fetching log location from {}", path);

        let response = self.request(Method::GET, &path).send().await?;
        let doc: Document<LogSourceResource> = handle_response(response, StatusCode::OK).await?;

        Ok(doc.data.attributes.log_read_url)
    }
}
