//! Generation job identifiers and status snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the generation service.
///
/// Unlike locally generated ids, this value is never minted on our side;
/// it is whatever token the remote service returned at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoJobId(pub String);

impl VideoJobId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the service returned a blank id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VideoJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a generation job as reported by the service.
///
/// Services in this family have reported several spellings for the same
/// state across API generations; the aliases fold them together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted but not yet running
    #[default]
    #[serde(alias = "queued", alias = "preprocessing")]
    Pending,
    /// Job is actively rendering
    #[serde(alias = "processing", alias = "running")]
    InProgress,
    /// Job finished and output is available
    #[serde(alias = "completed")]
    Succeeded,
    /// Job failed with an error
    #[serde(alias = "error")]
    Failed,
    /// Job was cancelled before completion
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Check if this is a terminal failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time view of a generation job, returned by submission and polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Service-assigned job id
    pub id: VideoJobId,

    /// Current status
    #[serde(default)]
    pub status: JobStatus,

    /// Progress percentage (0-100), not reported by every service generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    /// Service-reported error payload, shape varies by API generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl JobSnapshot {
    /// True when the job finished successfully.
    ///
    /// Some service generations report completion only through `progress`
    /// reaching 100, so both signals count.
    pub fn is_complete(&self) -> bool {
        self.status == JobStatus::Succeeded || self.progress == Some(100)
    }

    /// Render the service error payload as text, if present.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| match e {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
