//! State version endpoints

use reqwest::{Method, StatusCode};
use teardown_core::dto::state::{StateVersion, StateVersionDocument};

use crate::error::Result;
use crate::{TerraformCloudClient, handle_response, require_non_empty};

impl TerraformCloudClient {
    /// Get the workspace's current state version with its outputs included
    pub async fn get_current_state_version(&self, workspace_id: &str) -> Result<StateVersion> {
        require_non_empty(workspace_id, "workspace id")?;

        let path = format!(
            "/workspaces/{}/current-state-version?include=outputs",
            workspace_id
        );
        let response = self.retry.execute(self.request(Method::GET, &path)).await?;
        let doc: StateVersionDocument = handle_response(response, StatusCode::OK).await?;

        Ok(doc.into())
    }
}
