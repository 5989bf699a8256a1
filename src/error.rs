//! Error types for untextract library.

use std::io;
use thiserror::Error;

/// Result type alias for untextract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while driving an analysis or rebuilding its output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding or encoding JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage reference was invalid or the service rejected the request.
    #[error("Submission rejected: {0}")]
    Submission(String),

    /// The analysis job reached the FAILED state.
    #[error("Analysis job {job_id} failed: {message}")]
    AnalysisFailed {
        /// Identifier of the failed job
        job_id: String,
        /// Status message reported by the service
        message: String,
    },

    /// A call to the analysis service could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The job did not reach a terminal state within the configured bounds.
    #[error("Analysis job {job_id} did not finish after {attempts} polls")]
    Timeout {
        /// Identifier of the job being polled
        job_id: String,
        /// Number of status polls issued
        attempts: u32,
    },

    /// The block graph is missing a page or references an absent block.
    #[error("Malformed block graph at {block_id}: {reason}")]
    MalformedGraph {
        /// Block where the problem was found
        block_id: String,
        /// What was wrong
        reason: String,
    },

    /// The input document type is not accepted by the analysis service.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Error during rendering (text, export, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build a [`Error::MalformedGraph`] for the given block.
    pub fn malformed(block_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedGraph {
            block_id: block_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller may reasonably retry the operation.
    ///
    /// Transport failures and poll timeouts are transient; failed jobs and
    /// malformed graphs are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::AnalysisFailed {
            job_id: "job-1".to_string(),
            message: "bad document".to_string(),
        };
        assert_eq!(err.to_string(), "Analysis job job-1 failed: bad document");

        let err = Error::malformed("cell-9", "referenced block is missing");
        assert_eq!(
            err.to_string(),
            "Malformed block graph at cell-9: referenced block is missing"
        );

        let err = Error::Timeout {
            job_id: "job-2".to_string(),
            attempts: 3,
        };
        assert_eq!(err.to_string(), "Analysis job job-2 did not finish after 3 polls");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::Transport("connection reset".into()).is_transient());
        assert!(Error::Timeout {
            job_id: "j".into(),
            attempts: 3
        }
        .is_transient());
        assert!(!Error::Submission("no bucket".into()).is_transient());
        assert!(!Error::malformed("p", "no pages").is_transient());
    }
}
