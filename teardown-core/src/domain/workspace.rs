//! Workspace domain types

use serde::{Deserialize, Serialize};

/// A named unit of infrastructure state managed by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
}
