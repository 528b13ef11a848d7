//! Control plane repository
//!
//! Handles the Terraform Cloud side of the teardown:
//! - Resolving workspace IDs by name
//! - Reading the droplet ID from the current state outputs
//! - Triggering snapshot and destroy runs
//! - Reading run status and log locations

use async_trait::async_trait;
use teardown_client::TerraformCloudClient;
use teardown_core::domain::output::find_output;
use teardown_core::domain::run::{LogSource, Run, RunMode};
use teardown_core::dto::run::{CreateRun, RunVariable};
use tracing::{error, info, warn};

#[cfg(test)]
use mockall::automock;

/// Terraform variable carrying the provider token into runs
const PROVIDER_TOKEN_VARIABLE: &str = "do_token";

/// Repository trait for control-plane operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ControlPlaneRepository: Send + Sync {
    /// Resolves a workspace name to its ID
    async fn resolve_workspace(&self, name: &str) -> Option<String>;

    /// Reads a named output from the workspace's current state
    async fn fetch_output(&self, workspace_id: &str, output_name: &str) -> Option<String>;

    /// Triggers an auto-applied run and returns its ID
    async fn trigger_run(&self, workspace_id: &str, is_destroy: bool) -> Option<String>;

    /// Reads the current state of a run
    async fn fetch_run(&self, run_id: &str) -> Option<Run>;

    /// Looks up where the logs of a plan or apply can be read
    async fn log_read_url(&self, source: &LogSource) -> Option<String>;
}

/// HTTP implementation of ControlPlaneRepository
pub struct HttpControlPlaneRepository {
    client: TerraformCloudClient,
    organization: String,
    provider_token: String,
}

impl HttpControlPlaneRepository {
    /// Creates a new HTTP control plane repository
    ///
    /// # Arguments
    /// * `client` - Terraform Cloud client
    /// * `organization` - Organization scoping workspace lookups
    /// * `provider_token` - DigitalOcean token passed to runs as a sensitive variable
    pub fn new(
        client: TerraformCloudClient,
        organization: impl Into<String>,
        provider_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            organization: organization.into(),
            provider_token: provider_token.into(),
        }
    }
}

#[async_trait]
impl ControlPlaneRepository for HttpControlPlaneRepository {
    async fn resolve_workspace(&self, name: &str) -> Option<String> {
        match self.client.get_workspace(&self.organization, name).await {
            Ok(workspace) => {
                info!("Workspace ID: {}", workspace.id);
                Some(workspace.id)
            }
            Err(e) => {
                error!("Failed to fetch workspace ID for '{}': {}", name, e);
                None
            }
        }
    }

    async fn fetch_output(&self, workspace_id: &str, output_name: &str) -> Option<String> {
        info!("Fetching the current state version and outputs...");

        let state = match self.client.get_current_state_version(workspace_id).await {
            Ok(state) => state,
            Err(e) => {
                error!("Failed to fetch outputs: {}", e);
                return None;
            }
        };

        let Some(outputs) = state.outputs else {
            warn!("No outputs found in the included list");
            return None;
        };

        let Some(output) = find_output(&outputs, output_name) else {
            warn!("No {} found in the outputs", output_name);
            return None;
        };

        match output.value_as_string() {
            Some(value) if output.sensitive => {
                info!("Found {} (sensitive)", output_name);
                Some(value)
            }
            Some(value) => {
                info!("Found {}: {}", output_name, value);
                Some(value)
            }
            None => {
                warn!("Output {} has no usable value", output_name);
                None
            }
        }
    }

    async fn trigger_run(&self, workspace_id: &str, is_destroy: bool) -> Option<String> {
        let mode = RunMode::from_destroy_flag(is_destroy);
        let request = CreateRun::new(workspace_id, mode).with_variable(
            RunVariable::sensitive_string(PROVIDER_TOKEN_VARIABLE, &self.provider_token),
        );

        match self.client.create_run(request).await {
            Ok(run) => {
                info!("{:?} run triggered successfully (Run ID: {})", mode, run.id);
                Some(run.id)
            }
            Err(e) => {
                error!("Failed to trigger {:?} run: {}", mode, e);
                None
            }
        }
    }

    async fn fetch_run(&self, run_id: &str) -> Option<Run> {
        match self.client.get_run(run_id).await {
            Ok(run) => Some(run),
            Err(e) => {
                error!("Error fetching run status: {}", e);
                None
            }
        }
    }

    async fn log_read_url(&self, source: &LogSource) -> Option<String> {
        match self.client.get_log_read_url(source).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    "Failed to fetch log read URL for {} {}: {}",
                    source.collection(),
                    source.id(),
                    e
                );
                None
            }
        }
    }
}
