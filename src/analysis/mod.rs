//! Driving the external document-analysis service.
//!
//! The service itself is reached through the [`AnalysisService`] trait; this
//! module only implements the job protocol around it: submit, poll until the
//! job is terminal, then follow continuation tokens until every page of blocks
//! has been collected.
//!
//! # Example
//!
//! ```no_run
//! use untextract::analysis::{DocumentLocation, JobDriver, PollOptions, ReplayService};
//!
//! fn main() -> untextract::Result<()> {
//!     let service = ReplayService::from_files(["page-1.json", "page-2.json"])?;
//!     let driver = JobDriver::new(service, PollOptions::default());
//!     let doc = driver.analyze(&DocumentLocation::new("bucket", "scan.pdf"))?;
//!     println!("{} pages", doc.page_count());
//!     Ok(())
//! }
//! ```

mod driver;
mod options;
mod replay;
mod store;
mod worker;

pub use driver::JobDriver;
pub use options::PollOptions;
pub use replay::ReplayService;
pub use store::{DirectoryStore, DocumentStore};
pub use worker::{spawn_analysis, AnalysisHandle};

use crate::error::{Error, Result};
use crate::model::{Block, JobStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a stored document can be read by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentLocation {
    /// Storage bucket
    pub bucket: String,

    /// Object name within the bucket
    pub name: String,

    /// Object version, if the store is versioned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DocumentLocation {
    /// Create a location from bucket and object name.
    pub fn new(bucket: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Check that both parts of the reference are present.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(Error::Submission("storage bucket is empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Submission("storage object name is empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.name)
    }
}

/// Analysis features requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    /// Table detection
    Tables,
    /// Key/value form detection
    Forms,
}

/// One response to a status poll or page fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisPage {
    /// Job status (present on status polls)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,

    /// Human-readable status detail, typically set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,

    /// Blocks carried by this page of results
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Cursor for the next page of results, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl AnalysisPage {
    /// A response carrying only a status.
    pub fn status(status: JobStatus) -> Self {
        Self {
            job_status: Some(status),
            ..Default::default()
        }
    }

    /// Set blocks and return self.
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Set the continuation token and return self.
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Set the status message and return self.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// Continuation token, treating an empty token as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// The external document-analysis service.
///
/// Implementations perform network calls; failures to reach the service are
/// reported as [`Error::Transport`], rejected requests as [`Error::Submission`].
pub trait AnalysisService: Send + Sync {
    /// Synchronously detect text in a single image, returning its blocks.
    fn detect(&self, document: &[u8]) -> Result<Vec<Block>>;

    /// Start an asynchronous analysis of a stored document, returning the job id.
    fn start(&self, location: &DocumentLocation, features: &[FeatureType]) -> Result<String>;

    /// Poll a job's status, or fetch the page after `next_token`.
    fn poll(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage>;
}

impl<T: AnalysisService + ?Sized> AnalysisService for &T {
    fn detect(&self, document: &[u8]) -> Result<Vec<Block>> {
        (**self).detect(document)
    }

    fn start(&self, location: &DocumentLocation, features: &[FeatureType]) -> Result<String> {
        (**self).start(location, features)
    }

    fn poll(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage> {
        (**self).poll(job_id, next_token)
    }
}

impl<T: AnalysisService + ?Sized> AnalysisService for Arc<T> {
    fn detect(&self, document: &[u8]) -> Result<Vec<Block>> {
        (**self).detect(document)
    }

    fn start(&self, location: &DocumentLocation, features: &[FeatureType]) -> Result<String> {
        (**self).start(location, features)
    }

    fn poll(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage> {
        (**self).poll(job_id, next_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        assert!(DocumentLocation::new("bucket", "scan.pdf").validate().is_ok());
        assert!(matches!(
            DocumentLocation::new("", "scan.pdf").validate(),
            Err(Error::Submission(_))
        ));
        assert!(matches!(
            DocumentLocation::new("bucket", "  ").validate(),
            Err(Error::Submission(_))
        ));
    }

    #[test]
    fn test_analysis_page_wire_format() {
        let json = r#"{
            "JobStatus": "SUCCEEDED",
            "NextToken": "abc",
            "Blocks": [{"BlockType": "PAGE", "Id": "p1"}]
        }"#;
        let page: AnalysisPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.job_status, Some(JobStatus::Succeeded));
        assert_eq!(page.continuation(), Some("abc"));
        assert_eq!(page.blocks.len(), 1);
    }

    #[test]
    fn test_empty_token_is_no_continuation() {
        let page = AnalysisPage::status(JobStatus::Succeeded).with_next_token("");
        assert_eq!(page.continuation(), None);
    }
}
