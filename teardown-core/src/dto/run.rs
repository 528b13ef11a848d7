//! Run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::{Run, RunMode, RunStatus};
use crate::dto::jsonapi::{Document, Relationship};

/// Message attached to every run this function triggers
pub const RUN_MESSAGE: &str = "Create snapshot before destroy";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResource {
    pub id: String,
    pub attributes: RunAttributes,
    #[serde(default)]
    pub relationships: RunRelationships,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunAttributes {
    pub status: RunStatus,
    #[serde(default)]
    pub is_destroy: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunRelationships {
    #[serde(default)]
    pub workspace: Relationship,
    #[serde(default)]
    pub plan: Relationship,
    #[serde(default)]
    pub apply: Relationship,
}

impl From<RunResource> for Run {
    fn from(resource: RunResource) -> Self {
        let relationships = resource.relationships;
        Self {
            id: resource.id,
            workspace_id: relationships.workspace.id().map(str::to_string),
            mode: RunMode::from_destroy_flag(resource.attributes.is_destroy),
            status: resource.attributes.status,
            message: resource.attributes.message,
            created_at: resource.attributes.created_at,
            plan_id: relationships.plan.id().map(str::to_string),
            apply_id: relationships.apply.id().map(str::to_string),
        }
    }
}

/// Variable passed to a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunVariable {
    pub key: String,
    /// HCL-encoded value
    pub value: String,
    pub category: String,
    pub sensitive: bool,
}

impl RunVariable {
    /// A sensitive terraform variable holding a string literal
    pub fn sensitive_string(key: impl Into<String>, value: &str) -> Self {
        Self {
            key: key.into(),
            value: format!("\"{}\"", value),
            category: "terraform".to_string(),
            sensitive: true,
        }
    }
}

/// Request body for `POST /runs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRun {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: CreateRunAttributes,
    pub relationships: CreateRunRelationships,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreateRunAttributes {
    pub message: String,
    pub is_destroy: bool,
    pub auto_apply: bool,
    pub variables: Vec<RunVariable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRunRelationships {
    pub workspace: Relationship,
}

impl CreateRun {
    /// An auto-applied run for the workspace
    pub fn new(workspace_id: impl Into<String>, mode: RunMode) -> Self {
        Self {
            kind: "runs".to_string(),
            attributes: CreateRunAttributes {
                message: RUN_MESSAGE.to_string(),
                is_destroy: mode.is_destroy(),
                auto_apply: true,
                variables: Vec::new(),
            },
            relationships: CreateRunRelationships {
                workspace: Relationship::to("workspaces", workspace_id),
            },
        }
    }

    pub fn with_variable(mut self, variable: RunVariable) -> Self {
        self.attributes.variables.push(variable);
        self
    }

    pub fn into_document(self) -> Document<CreateRun> {
        Document { data: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_run_body() {
        let body = CreateRun::new("ws-1", RunMode::Destroy)
            .with_variable(RunVariable::sensitive_string("do_token", "secret"))
            .into_document();

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "data": {
                    "type": "runs",
                    "attributes": {
                        "message": "Create snapshot before destroy",
                        "is-destroy": true,
                        "auto-apply": true,
                        "variables": [{
                            "key": "do_token",
                            "value": "\"secret\"",
                            "category": "terraform",
                            "sensitive": true
                        }]
                    },
                    "relationships": {
                        "workspace": {"data": {"type": "workspaces", "id": "ws-1"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_run_resource_conversion() {
        let doc: Document<RunResource> = serde_json::from_value(json!({
            "data": {
                "id": "run-1",
                "type": "runs",
                "attributes": {
                    "status": "applied",
                    "is-destroy": false,
                    "message": "Create snapshot before destroy",
                    "created-at": "2024-01-02T03:04:05.000Z"
                },
                "relationships": {
                    "workspace": {"data": {"id": "ws-1", "type": "workspaces"}},
                    "plan": {"data": {"id": "plan-1", "type": "plans"}},
                    "apply": {"data": {"id": "apply-1", "type": "applies"}}
                }
            }
        }))
        .unwrap();

        let run = Run::from(doc.data);
        assert_eq!(run.id, "run-1");
        assert_eq!(run.status, RunStatus::Applied);
        assert_eq!(run.mode, RunMode::Apply);
        assert_eq!(run.workspace_id.as_deref(), Some("ws-1"));
        assert_eq!(run.plan_id.as_deref(), Some("plan-1"));
        assert_eq!(run.apply_id.as_deref(), Some("apply-1"));
        assert!(run.created_at.is_some());
    }
}
