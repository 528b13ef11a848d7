//! Invocation event and result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event delivered by the function runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeardownEvent {
    #[serde(default)]
    pub droplet_name: Option<String>,
}

impl TeardownEvent {
    pub fn for_droplet(name: impl Into<String>) -> Self {
        Self {
            droplet_name: Some(name.into()),
        }
    }

    /// The droplet name, treating an empty string as missing
    pub fn droplet_name(&self) -> Option<&str> {
        self.droplet_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// How a teardown invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStatus {
    MissingDropletName,
    WorkspaceNotFound,
    DropletIdNotFound,
    DropletNotFound,
    DestroyFailed,
    Done,
}

impl TeardownStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TeardownStatus::MissingDropletName => "droplet_name is required",
            TeardownStatus::WorkspaceNotFound => "Workspace ID not found",
            TeardownStatus::DropletIdNotFound => "Droplet ID not found",
            TeardownStatus::DropletNotFound => "Droplet not found",
            TeardownStatus::DestroyFailed => "Droplet destroy failed",
            TeardownStatus::Done => "done",
        }
    }
}

impl fmt::Display for TeardownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result object returned to the function runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownResult {
    pub status: String,
}

impl From<TeardownStatus> for TeardownResult {
    fn from(status: TeardownStatus) -> Self {
        Self {
            status: status.as_str().to_string(),
        }
    }
}
