//! Reconstruction options.

/// Options for rebuilding a document from a block graph.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Whether to rebuild pages in parallel
    pub parallel: bool,
}

impl ReconstructOptions {
    /// Create new reconstruction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}
