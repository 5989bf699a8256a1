//! Data model for analysis output and reconstructed documents.
//!
//! The service returns a flat graph of [`Block`]s linked by id. A
//! [`BlockGraph`] indexes those blocks; reconstruction turns it into a
//! [`StructuredDocument`] of pages, lines, tables, and form fields.

mod block;
mod document;
mod form;
mod graph;
mod job;
mod page;
mod table;

pub use block::{Block, BlockType, EntityType, Relationship, RelationshipType};
pub use document::StructuredDocument;
pub use form::{Form, FormField};
pub use graph::BlockGraph;
pub use job::{Job, JobStatus};
pub use page::Page;
pub use table::Table;
