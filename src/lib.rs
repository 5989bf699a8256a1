//! # untextract
//!
//! Drive document-analysis jobs to completion and rebuild their flat block
//! output into lines, tables, and form fields.
//!
//! The optical character recognition itself is done by an external service
//! reached through [`analysis::AnalysisService`]. This crate owns the job
//! protocol around that service (submit, poll, paginate) and the
//! reconstruction of its identifier-linked block graph into a
//! [`StructuredDocument`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use untextract::{reconstruct_files, render};
//!
//! fn main() -> untextract::Result<()> {
//!     // Rebuild a recorded multi-page analysis response
//!     let doc = reconstruct_files(["response-1.json", "response-2.json"])?;
//!
//!     for table in doc.tables() {
//!         println!("{}", render::render_grid(table));
//!     }
//!     println!("{:?}", doc.first_date_line);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Job driver**: bounded polling and continuation-token pagination
//! - **Tables**: sparse cells densified into rectangular grids
//! - **Forms**: key/value pairs resolved across VALUE links
//! - **Export**: the fixed text result-file format, plus text and JSON
//! - **Parallel processing**: uses Rayon for multi-page documents

pub mod analysis;
pub mod detect;
pub mod error;
pub mod model;
pub mod naming;
pub mod reconstruct;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    spawn_analysis, AnalysisHandle, AnalysisPage, AnalysisService, DirectoryStore,
    DocumentLocation, DocumentStore, FeatureType, JobDriver, PollOptions, ReplayService,
};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, DocumentKind};
pub use error::{Error, Result};
pub use model::{
    Block, BlockGraph, BlockType, EntityType, Form, FormField, Job, JobStatus, Page,
    Relationship, RelationshipType, StructuredDocument, Table,
};
pub use reconstruct::{reconstruct, reconstruct_detection, reconstruct_with_options, ReconstructOptions};
pub use render::{JsonFormat, TextOptions};

use std::fs;
use std::path::Path;

/// Load a block graph from recorded response pages, in order.
///
/// Each file holds one JSON response with a `Blocks` array; blocks are
/// appended in file order.
///
/// # Example
///
/// ```no_run
/// use untextract::load_graph;
///
/// let graph = load_graph(["page-1.json", "page-2.json"]).unwrap();
/// println!("{} blocks, {} pages", graph.len(), graph.page_count());
/// ```
pub fn load_graph<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<BlockGraph> {
    let mut blocks = Vec::new();
    for path in paths {
        let data = fs::read_to_string(path.as_ref())?;
        let page: AnalysisPage = serde_json::from_str(&data)?;
        blocks.extend(page.blocks);
    }
    Ok(BlockGraph::from_blocks(blocks))
}

/// Rebuild a document from recorded multi-page analysis responses.
pub fn reconstruct_files<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> Result<StructuredDocument> {
    let graph = load_graph(paths)?;
    reconstruct(&graph)
}

/// Rebuild a document from one analysis response given as JSON text.
///
/// # Example
///
/// ```
/// let json = r#"{"Blocks": [
///     {"BlockType": "PAGE", "Id": "p", "Relationships": [{"Type": "CHILD", "Ids": ["l"]}]},
///     {"BlockType": "LINE", "Id": "l", "Text": "Total: $50"}
/// ]}"#;
/// let doc = untextract::reconstruct_json(json)?;
/// assert_eq!(doc.pages[0].lines, vec!["Total: $50"]);
/// # Ok::<(), untextract::Error>(())
/// ```
pub fn reconstruct_json(json: &str) -> Result<StructuredDocument> {
    let page: AnalysisPage = serde_json::from_str(json)?;
    reconstruct(&BlockGraph::from_blocks(page.blocks))
}

/// Rebuild a single-page document from an image detection response given as JSON text.
pub fn reconstruct_detection_json(json: &str) -> Result<StructuredDocument> {
    let page: AnalysisPage = serde_json::from_str(json)?;
    reconstruct_detection(&page.blocks)
}
