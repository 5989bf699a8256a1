//! Running an analysis on a background thread.

use super::{AnalysisService, DocumentLocation, JobDriver};
use crate::error::{Error, Result};
use crate::model::StructuredDocument;
use crossbeam_channel::{Receiver, TryRecvError};
use std::thread;

const WORKER_THREAD_NAME: &str = "untextract-analysis";

/// Handle to an analysis running on a worker thread.
#[derive(Debug)]
pub struct AnalysisHandle {
    receiver: Receiver<Result<StructuredDocument>>,
}

impl AnalysisHandle {
    /// Block until the analysis finishes.
    pub fn wait(self) -> Result<StructuredDocument> {
        self.receiver
            .recv()
            .map_err(|_| Error::Transport("analysis worker exited without a result".into()))?
    }

    /// Return the result if the analysis has finished, without blocking.
    pub fn try_result(&self) -> Option<Result<StructuredDocument>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::Transport(
                "analysis worker exited without a result".into(),
            ))),
        }
    }

    /// Channel the result will be delivered on, for use with `select!`.
    pub fn receiver(&self) -> &Receiver<Result<StructuredDocument>> {
        &self.receiver
    }
}

/// Run [`JobDriver::analyze`] on a new thread.
///
/// The driver is moved to the worker; the result arrives on the returned
/// handle's channel.
pub fn spawn_analysis<S>(driver: JobDriver<S>, location: DocumentLocation) -> Result<AnalysisHandle>
where
    S: AnalysisService + 'static,
{
    let (sender, receiver) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let result = driver.analyze(&location);
            if let Err(ref e) = result {
                log::warn!("Analysis of {} failed: {}", location, e);
            }
            // The receiver may already be gone; nothing to report then.
            let _ = sender.send(result);
        })?;

    Ok(AnalysisHandle { receiver })
}
