//! Workspace endpoints

use reqwest::{Method, StatusCode};
use teardown_core::domain::workspace::Workspace;
use teardown_core::dto::jsonapi::Document;
use teardown_core::dto::workspace::WorkspaceResource;
use tracing::debug;

use crate::error::Result;
use crate::{TerraformCloudClient, handle_response, require_non_empty};

impl TerraformCloudClient {
    /// Look up a workspace by organization and name
    ///
    /// Every call issues a fresh request; nothing is cached.
    pub async fn get_workspace(&self, organization: &str, name: &str) -> Result<Workspace> {
        require_non_empty(organization, "organization")?;
        require_non_empty(name, "workspace name")?;

        let path = format!("/organizations/{}/workspaces/{}", organization, name);
        debug!("Looking up workspace {}", path);

        let response = self.retry.execute(self.request(Method::GET, &path)).await?;
        let doc: Document<WorkspaceResource> = handle_response(response, StatusCode::OK).await?;

        Ok(doc.data.into())
    }
}
