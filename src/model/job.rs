//! Asynchronous analysis job state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an analysis job, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepted but not yet observed running
    Submitted,
    /// Still running
    InProgress,
    /// Finished; results are available
    Succeeded,
    /// Finished with some pages unprocessed; results are available
    PartialSuccess,
    /// Finished without results
    Failed,
}

impl JobStatus {
    /// Check if no further transitions will happen.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::PartialSuccess | JobStatus::Failed
        )
    }

    /// Check if results can be fetched.
    pub fn has_results(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::PartialSuccess)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::PartialSuccess => "PARTIAL_SUCCESS",
            JobStatus::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// One in-flight analysis job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Service-assigned job identifier
    pub id: String,

    /// Last observed status
    pub status: JobStatus,

    /// When the job was submitted
    pub created: DateTime<Utc>,
}

impl Job {
    /// Create a job in the `Submitted` state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Submitted,
            created: Utc::now(),
        }
    }

    /// Record a newly observed status.
    pub fn observe(&mut self, status: JobStatus) {
        if status != self.status {
            log::debug!("Job {}: {} -> {}", self.id, self.status, status);
            self.status = status;
        }
    }

    /// Check if the job reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}
