//! Job submission, status polling, and result pagination.

use super::{AnalysisService, DocumentLocation, DocumentStore, PollOptions};
use crate::error::{Error, Result};
use crate::model::{BlockGraph, Job, JobStatus, StructuredDocument};
use crate::reconstruct::{reconstruct_detection, reconstruct_with_options, ReconstructOptions};
use std::thread;
use std::time::Instant;

/// Drives analysis jobs on a service to a complete [`BlockGraph`].
///
/// The driver blocks the calling thread while a job runs. Use
/// [`spawn_analysis`](super::spawn_analysis) to run it on a worker instead.
#[derive(Debug, Clone)]
pub struct JobDriver<S> {
    service: S,
    options: PollOptions,
    reconstruct: ReconstructOptions,
}

impl<S: AnalysisService> JobDriver<S> {
    /// Create a driver for a service.
    pub fn new(service: S, options: PollOptions) -> Self {
        Self {
            service,
            options,
            reconstruct: ReconstructOptions::default(),
        }
    }

    /// Set reconstruction options and return self.
    pub fn with_reconstruct_options(mut self, options: ReconstructOptions) -> Self {
        self.reconstruct = options;
        self
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The polling options in effect.
    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Submit a stored document for asynchronous analysis.
    pub fn submit(&self, location: &DocumentLocation) -> Result<Job> {
        location.validate()?;

        let job_id = self.service.start(location, &self.options.features)?;
        if job_id.trim().is_empty() {
            return Err(Error::Submission(format!(
                "service returned an empty job id for {}",
                location
            )));
        }

        log::info!("Submitted {} as job {}", location, job_id);
        Ok(Job::new(job_id))
    }

    /// Poll a job until it is terminal, then collect every page of its blocks.
    ///
    /// Fails with [`Error::AnalysisFailed`] if the job fails (nothing is
    /// fetched) and [`Error::Timeout`] if the poll bounds are exceeded.
    pub fn await_completion(&self, job_id: &str) -> Result<BlockGraph> {
        let mut job = Job::new(job_id);
        let started = Instant::now();
        let mut attempts: u32 = 0;

        let first = loop {
            attempts += 1;
            let response = self.service.poll(job_id, None)?;
            let status = response.job_status.ok_or_else(|| {
                Error::Transport(format!("status poll for job {} carried no status", job_id))
            })?;
            job.observe(status);
            log::debug!("Job {} poll {}: {}", job_id, attempts, status);

            if job.is_finished() {
                break response;
            }
            if self.options.exhausted(attempts, started.elapsed()) {
                return Err(Error::Timeout {
                    job_id: job_id.to_string(),
                    attempts,
                });
            }
            thread::sleep(self.options.interval);
        };

        if !job.status.has_results() {
            let message = first
                .status_message
                .unwrap_or_else(|| "no status message".to_string());
            log::info!("Job {} failed after {} polls: {}", job_id, attempts, message);
            return Err(Error::AnalysisFailed {
                job_id: job_id.to_string(),
                message,
            });
        }

        match job.status {
            JobStatus::PartialSuccess => {
                log::warn!(
                    "Job {} partially succeeded: {}",
                    job_id,
                    first.status_message.as_deref().unwrap_or("some pages failed")
                );
            }
            _ => log::info!("Job {} succeeded after {} polls", job_id, attempts),
        }

        let mut next_token = first.continuation().map(str::to_string);
        let mut blocks = first.blocks;
        let mut pages = 1;
        while let Some(token) = next_token {
            let response = self.service.poll(job_id, Some(token.as_str()))?;
            pages += 1;
            log::debug!(
                "Job {} result page {}: {} blocks",
                job_id,
                pages,
                response.blocks.len()
            );
            next_token = response.continuation().map(str::to_string);
            blocks.extend(response.blocks);
        }

        log::info!(
            "Job {} returned {} blocks in {} pages",
            job_id,
            blocks.len(),
            pages
        );
        Ok(BlockGraph::from_blocks(blocks))
    }

    /// Submit a stored document, wait for it, and rebuild its structure.
    pub fn analyze(&self, location: &DocumentLocation) -> Result<StructuredDocument> {
        let job = self.submit(location)?;
        let graph = self.await_completion(&job.id)?;
        reconstruct_with_options(&graph, &self.reconstruct)
    }

    /// Upload a document to a store under `key`, then analyze it.
    pub fn analyze_stored<D: DocumentStore + ?Sized>(
        &self,
        store: &D,
        bytes: &[u8],
        key: &str,
    ) -> Result<StructuredDocument> {
        let location = store.put(bytes, key)?;
        self.analyze(&location)
    }

    /// Synchronously analyze a single image.
    pub fn detect(&self, image: &[u8]) -> Result<StructuredDocument> {
        let blocks = self.service.detect(image)?;
        log::debug!("Detection returned {} blocks", blocks.len());
        reconstruct_detection(&blocks)
    }
}
