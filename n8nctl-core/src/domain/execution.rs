//! Execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A past or running workflow execution
///
/// Read-only from this client's perspective except for retry, which creates a
/// new execution derived from a prior one. The optional `data` payload (per
/// node inputs/outputs) is only present when requested with `includeData`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: i64,
    #[serde(default)]
    pub status: Option<ExecutionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<DateTime<Utc>>,
    /// Snapshot of the workflow at execution time (name is what we read)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_data: Option<WorkflowSnapshot>,
    /// Full execution data, fetched on demand with `includeData`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Execution {
    /// Best available display name for the workflow this execution ran
    pub fn workflow_name(&self) -> &str {
        self.workflow_data
            .as_ref()
            .map(|w| w.name.as_str())
            .or(self.workflow_id.as_deref())
            .unwrap_or("-")
    }
}

/// Workflow snapshot embedded in an execution record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Execution status as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Canceled,
    Error,
    New,
    Running,
    Success,
    Waiting,
    /// Statuses this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Canceled => "canceled",
            Self::Error => "error",
            Self::New => "new",
            Self::Running => "running",
            Self::Success => "success",
            Self::Waiting => "waiting",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
