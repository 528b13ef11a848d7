//! Run domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single plan/apply (or destroy) execution against a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub workspace_id: Option<String>,
    pub mode: RunMode,
    pub status: RunStatus,
    pub message: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Plan sub-resource, used to locate logs of failed runs
    pub plan_id: Option<String>,
    /// Apply sub-resource, used to locate logs of applied runs
    pub apply_id: Option<String>,
}

/// Whether a run applies the configuration or destroys it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    Apply,
    Destroy,
}

impl RunMode {
    pub fn from_destroy_flag(is_destroy: bool) -> Self {
        if is_destroy {
            RunMode::Destroy
        } else {
            RunMode::Apply
        }
    }

    pub fn is_destroy(self) -> bool {
        matches!(self, RunMode::Destroy)
    }
}

/// Run status as reported by the control plane
///
/// Values without a dedicated variant are kept verbatim in `Other` and
/// treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Planning,
    Planned,
    Applying,
    Applied,
    Errored,
    Canceled,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Planning => "planning",
            RunStatus::Planned => "planned",
            RunStatus::Applying => "applying",
            RunStatus::Applied => "applied",
            RunStatus::Errored => "errored",
            RunStatus::Canceled => "canceled",
            RunStatus::Other(s) => s,
        }
    }

    /// No further transition happens from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Applied | RunStatus::Errored | RunStatus::Canceled
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Applied)
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => RunStatus::Pending,
            "planning" => RunStatus::Planning,
            "planned" => RunStatus::Planned,
            "applying" => RunStatus::Applying,
            "applied" => RunStatus::Applied,
            "errored" => RunStatus::Errored,
            "canceled" => RunStatus::Canceled,
            _ => RunStatus::Other(s),
        }
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        RunStatus::from(s.to_string())
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plan or apply sub-resource whose log location can be looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Plan(String),
    Apply(String),
}

impl LogSource {
    /// Collection name used in the control-plane URL
    pub fn collection(&self) -> &'static str {
        match self {
            LogSource::Plan(_) => "plans",
            LogSource::Apply(_) => "applies",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            LogSource::Plan(id) | LogSource::Apply(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(RunStatus::Applied.is_terminal());
        assert!(RunStatus::Applied.is_success());
        assert!(RunStatus::Errored.is_terminal());
        assert!(!RunStatus::Errored.is_success());
        assert!(RunStatus::Canceled.is_terminal());
        assert!(!RunStatus::Pending.is_terminal());
        assert!(!RunStatus::from("plan_queued").is_terminal());
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: RunStatus = serde_json::from_str("\"policy_checking\"").unwrap();
        assert_eq!(status, RunStatus::Other("policy_checking".to_string()));
        assert_eq!(status.to_string(), "policy_checking");
        assert_eq!(
            serde_json::to_string(&RunStatus::Applied).unwrap(),
            "\"applied\""
        );
    }

    #[test]
    fn test_log_source_collection() {
        let plan = LogSource::Plan("plan-1".to_string());
        let apply = LogSource::Apply("apply-1".to_string());
        assert_eq!(plan.collection(), "plans");
        assert_eq!(apply.collection(), "applies");
        assert_eq!(apply.id(), "apply-1");
    }
}
