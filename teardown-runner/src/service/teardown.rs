//! Teardown service
//!
//! Snapshots and destroys a droplet:
//! 1. Resolve the droplet workspace and read the droplet ID from its outputs
//! 2. Confirm the droplet still exists
//! 3. Resolve the snapshot workspace and apply it, waiting for the run
//! 4. Trigger a destroy run on the droplet workspace
//!
//! A failed snapshot does not stop the destroy.

use std::sync::Arc;
use std::time::Instant;
use teardown_core::dto::event::{TeardownEvent, TeardownResult, TeardownStatus};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::repository::{ControlPlaneRepository, ProviderRepository};
use crate::scheduler::RunPoller;

/// Workspace and output names the workflow operates on
#[derive(Debug, Clone)]
pub struct TeardownSettings {
    pub droplet_workspace: String,
    pub snapshot_workspace: String,
    pub droplet_output: String,
    pub wait_for_destroy: bool,
}

impl From<&Config> for TeardownSettings {
    fn from(config: &Config) -> Self {
        Self {
            droplet_workspace: config.droplet_workspace.clone(),
            snapshot_workspace: config.snapshot_workspace.clone(),
            droplet_output: config.droplet_output.clone(),
            wait_for_destroy: config.wait_for_destroy,
        }
    }
}

/// Orchestrates one teardown invocation
pub struct TeardownService {
    control_plane: Arc<dyn ControlPlaneRepository>,
    provider: Arc<dyn ProviderRepository>,
    poller: RunPoller,
    settings: TeardownSettings,
}

impl TeardownService {
    pub fn new(
        control_plane: Arc<dyn ControlPlaneRepository>,
        provider: Arc<dyn ProviderRepository>,
        poller: RunPoller,
        settings: TeardownSettings,
    ) -> Self {
        Self {
            control_plane,
            provider,
            poller,
            settings,
        }
    }

    /// Runs the workflow for one event
    ///
    /// Always produces a result; failures are reported through its status.
    pub async fn execute(&self, event: &TeardownEvent) -> TeardownResult {
        let start = Instant::now();
        info!("Starting the snapshot creation and destroy process...");

        let status = self.run_steps(event).await;

        info!(
            "Function runtime: {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        status.into()
    }

    async fn run_steps(&self, event: &TeardownEvent) -> TeardownStatus {
        let Some(droplet_name) = event.droplet_name() else {
            error!("droplet_name is required. Aborting operations.");
            return TeardownStatus::MissingDropletName;
        };
        info!("Tearing down droplet '{}'", droplet_name);

        // Step 1: droplet workspace
        let Some(droplet_workspace_id) = self
            .control_plane
            .resolve_workspace(&self.settings.droplet_workspace)
            .await
        else {
            return TeardownStatus::WorkspaceNotFound;
        };

        // Step 2: droplet ID from the last applied state
        let Some(droplet_id) = self
            .control_plane
            .fetch_output(&droplet_workspace_id, &self.settings.droplet_output)
            .await
        else {
            error!(
                "No {} found in the Terraform outputs. Aborting operations.",
                self.settings.droplet_output
            );
            return TeardownStatus::DropletIdNotFound;
        };

        // Step 3: the droplet must still exist
        if !self.provider.droplet_exists(&droplet_id).await {
            error!(
                "Droplet with ID {} does not exist. Aborting operations.",
                droplet_id
            );
            return TeardownStatus::DropletNotFound;
        }

        // Step 4: snapshot workspace
        let Some(snapshot_workspace_id) = self
            .control_plane
            .resolve_workspace(&self.settings.snapshot_workspace)
            .await
        else {
            return TeardownStatus::WorkspaceNotFound;
        };

        // Step 5: snapshot; failure is reported but does not block the destroy
        info!(
            "Creating snapshot via Terraform (waiting up to {:?})...",
            self.poller.policy().ceiling()
        );
        if self.snapshot(&snapshot_workspace_id).await {
            info!("Snapshot creation ran successfully");
        } else {
            warn!("Snapshot creation failed. Proceeding with destroy.");
        }

        // Step 6: destroy
        info!("Droplet destroy via Terraform...");
        if self.destroy(&droplet_workspace_id).await {
            TeardownStatus::Done
        } else {
            error!("Droplet destroy failed.");
            TeardownStatus::DestroyFailed
        }
    }

    async fn snapshot(&self, workspace_id: &str) -> bool {
        match self.control_plane.trigger_run(workspace_id, false).await {
            Some(run_id) => self.poller.wait_for_run(&run_id).await,
            None => false,
        }
    }

    async fn destroy(&self, workspace_id: &str) -> bool {
        let Some(run_id) = self.control_plane.trigger_run(workspace_id, true).await else {
            return false;
        };

        if !self.settings.wait_for_destroy {
            info!("Destroy run queued (Run ID: {})", run_id);
            return true;
        }

        let applied = self.poller.wait_for_run(&run_id).await;
        if applied {
            info!("Destroy ran successfully (Run ID: {})", run_id);
        }
        applied
    }
}
