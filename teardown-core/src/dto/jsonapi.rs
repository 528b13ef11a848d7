//! Minimal JSON:API envelope types

use serde::{Deserialize, Serialize};

/// Top-level document with a single primary resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// Reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// To-one relationship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

impl Relationship {
    pub fn to(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            data: Some(ResourceIdentifier {
                kind: kind.into(),
                id: id.into(),
            }),
        }
    }

    /// Identifier of the related resource, if any
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.id.as_str())
    }
}
