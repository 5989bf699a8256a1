//! Polling configuration.

use super::FeatureType;
use std::time::Duration;

/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default upper bound on the total time spent waiting for a job.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Options controlling how a job is submitted and awaited.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between consecutive status polls
    pub interval: Duration,

    /// Maximum number of status polls (None = bounded by `timeout` only)
    pub max_attempts: Option<u32>,

    /// Maximum total time to wait for a terminal state
    pub timeout: Duration,

    /// Features requested when submitting a job
    pub features: Vec<FeatureType>,
}

impl PollOptions {
    /// Create new poll options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay between status polls.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the maximum number of status polls.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// Set the maximum total wait.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the requested analysis features.
    pub fn with_features(mut self, features: impl Into<Vec<FeatureType>>) -> Self {
        self.features = features.into();
        self
    }

    /// Whether polling must stop after `attempts` polls taking `elapsed`.
    pub fn exhausted(&self, attempts: u32, elapsed: Duration) -> bool {
        if let Some(max) = self.max_attempts {
            if attempts >= max {
                return true;
            }
        }
        elapsed + self.interval > self.timeout
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: DEFAULT_TIMEOUT,
            features: vec![FeatureType::Tables, FeatureType::Forms],
        }
    }
}
