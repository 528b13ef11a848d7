//! Workspace DTOs

use serde::{Deserialize, Serialize};

use crate::domain::workspace::Workspace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResource {
    pub id: String,
    pub attributes: WorkspaceAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceAttributes {
    pub name: String,
}

impl From<WorkspaceResource> for Workspace {
    fn from(resource: WorkspaceResource) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
        }
    }
}
