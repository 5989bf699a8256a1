//! An analysis service that serves recorded responses.

use super::{AnalysisPage, AnalysisService, DocumentLocation, FeatureType};
use crate::error::{Error, Result};
use crate::model::{Block, JobStatus};
use std::fs;
use std::path::Path;

const REPLAY_JOB_ID: &str = "replay";

/// Serves previously recorded analysis responses as if from a live service.
///
/// Every job succeeds immediately. The first poll returns the first recorded
/// page; each continuation token is answered with the page that follows the
/// one carrying that token. `detect` returns the blocks of all pages.
#[derive(Debug, Clone, Default)]
pub struct ReplayService {
    pages: Vec<AnalysisPage>,
}

impl ReplayService {
    /// Create a replay over recorded pages, in order.
    pub fn from_pages(pages: Vec<AnalysisPage>) -> Self {
        Self { pages }
    }

    /// Load recorded pages from JSON files, in order.
    pub fn from_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut pages = Vec::new();
        for path in paths {
            let data = fs::read_to_string(path.as_ref())?;
            pages.push(serde_json::from_str::<AnalysisPage>(&data)?);
        }
        log::debug!("Loaded {} recorded pages", pages.len());
        Ok(Self::from_pages(pages))
    }

    /// Number of recorded pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn check_job(job_id: &str) -> Result<()> {
        if job_id != REPLAY_JOB_ID {
            return Err(Error::Transport(format!("unknown job {}", job_id)));
        }
        Ok(())
    }
}

impl AnalysisService for ReplayService {
    fn detect(&self, _document: &[u8]) -> Result<Vec<Block>> {
        Ok(self
            .pages
            .iter()
            .flat_map(|p| p.blocks.iter().cloned())
            .collect())
    }

    fn start(&self, location: &DocumentLocation, _features: &[FeatureType]) -> Result<String> {
        if self.pages.is_empty() {
            return Err(Error::Submission(format!(
                "no recorded responses for {}",
                location
            )));
        }
        Ok(REPLAY_JOB_ID.to_string())
    }

    fn poll(&self, job_id: &str, next_token: Option<&str>) -> Result<AnalysisPage> {
        Self::check_job(job_id)?;

        let mut page = match next_token {
            None => self
                .pages
                .first()
                .cloned()
                .ok_or_else(|| Error::Transport("no recorded responses".into()))?,
            Some(token) => {
                let position = self
                    .pages
                    .iter()
                    .position(|p| p.continuation() == Some(token))
                    .ok_or_else(|| {
                        Error::Transport(format!("unknown continuation token {}", token))
                    })?;
                self.pages.get(position + 1).cloned().ok_or_else(|| {
                    Error::Transport(format!("no recorded page after token {}", token))
                })?
            }
        };

        if next_token.is_none() && page.job_status.is_none() {
            page.job_status = Some(JobStatus::Succeeded);
        }
        Ok(page)
    }
}
