//! State version DTOs
//!
//! `GET /workspaces/{id}/current-state-version?include=outputs` returns the
//! state version as primary data and its outputs in the `included` member.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::output::OutputValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVersionDocument {
    pub data: StateVersionResource,
    /// Absent when the state version carries no outputs
    #[serde(default)]
    pub included: Option<Vec<OutputResource>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateVersionResource {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputResource {
    pub id: String,
    pub attributes: OutputAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputAttributes {
    pub name: String,
    #[serde(default)]
    pub value: JsonValue,
    #[serde(default)]
    pub sensitive: bool,
}

impl From<OutputResource> for OutputValue {
    fn from(resource: OutputResource) -> Self {
        Self {
            name: resource.attributes.name,
            value: resource.attributes.value,
            sensitive: resource.attributes.sensitive,
        }
    }
}

/// Current state version with its outputs
#[derive(Debug, Clone)]
pub struct StateVersion {
    pub id: String,
    /// `None` when the response had no `included` member
    pub outputs: Option<Vec<OutputValue>>,
}

impl From<StateVersionDocument> for StateVersion {
    fn from(doc: StateVersionDocument) -> Self {
        Self {
            id: doc.data.id,
            outputs: doc
                .included
                .map(|included| included.into_iter().map(OutputValue::from).collect()),
        }
    }
}
