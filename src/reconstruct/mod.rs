//! Rebuilding structured documents from block graphs.
//!
//! Reconstruction is a pure function of its input: no I/O, and the same graph
//! always yields the same [`StructuredDocument`].
//!
//! # Example
//!
//! ```
//! use untextract::model::{Block, BlockGraph, BlockType};
//! use untextract::reconstruct::reconstruct;
//!
//! let graph = BlockGraph::from_blocks(vec![
//!     Block::new("p1", BlockType::Page).with_children(["l1"]),
//!     Block::new("l1", BlockType::Line).with_text("Date: 2024-01-01"),
//! ]);
//! let doc = reconstruct(&graph)?;
//! assert_eq!(doc.first_date_line.as_deref(), Some("Date: 2024-01-01"));
//! # Ok::<(), untextract::Error>(())
//! ```

mod options;
mod table;

pub use options::ReconstructOptions;
pub use table::{build_grid, CellEntry, CellSource, FlatIndex, MAX_GRID_CELLS};

use crate::error::{Error, Result};
use crate::model::{Block, BlockGraph, BlockType, Page, StructuredDocument};
use rayon::prelude::*;

/// Rebuild a document from a complete block graph with default options.
pub fn reconstruct(graph: &BlockGraph) -> Result<StructuredDocument> {
    reconstruct_with_options(graph, &ReconstructOptions::default())
}

/// Rebuild a document from a complete block graph.
///
/// Fails with [`Error::MalformedGraph`] if the graph has no PAGE block or any
/// relationship points at a missing block. No partial document is returned.
pub fn reconstruct_with_options(
    graph: &BlockGraph,
    options: &ReconstructOptions,
) -> Result<StructuredDocument> {
    if graph.page_count() == 0 {
        return Err(Error::malformed("<graph>", "no PAGE block in graph"));
    }

    let pages: Vec<(u32, &Block)> = graph
        .pages()
        .enumerate()
        .map(|(i, page)| (i as u32 + 1, page))
        .collect();

    let pages = if options.parallel && pages.len() > 1 {
        pages
            .par_iter()
            .map(|&(number, page)| build_page(graph, page, number))
            .collect::<Result<Vec<_>>>()?
    } else {
        pages
            .iter()
            .map(|&(number, page)| build_page(graph, page, number))
            .collect::<Result<Vec<_>>>()?
    };

    log::debug!(
        "Reconstructed {} pages from {} blocks",
        pages.len(),
        graph.len()
    );
    Ok(StructuredDocument::new(pages))
}

/// Rebuild a single-page document from raw image detection output.
///
/// This shape carries no reliable relationship graph: lines are the LINE
/// blocks in list order, and tables resolve their cells by list position.
/// No PAGE block is required, and neither form fields nor a date line are
/// produced.
pub fn reconstruct_detection(blocks: &[Block]) -> Result<StructuredDocument> {
    let source = CellSource::flat(blocks);
    let mut page = Page::new(1);

    for block in blocks {
        match block.block_type {
            BlockType::Line => {
                if let Some(text) = block.text() {
                    page.add_line(text);
                }
            }
            BlockType::Table => page.add_table(source.synthesize(block)?),
            _ => {}
        }
    }

    Ok(StructuredDocument::without_date_line(vec![page]))
}

fn build_page(graph: &BlockGraph, page_block: &Block, number: u32) -> Result<Page> {
    let mut page = Page::new(number);
    let cells = CellSource::GraphLinked(graph);

    for block in graph.descendants(page_block)? {
        match block.block_type {
            BlockType::Line => page.add_line(line_text(graph, block)?),
            BlockType::Table => page.add_table(cells.synthesize(block)?),
            BlockType::KeyValueSet if block.is_key() => {
                let (key, value) = form_pair(graph, block)?;
                if let Some(previous) = page.form.insert(key, value) {
                    log::debug!("Key {} overwrote value {:?}", block.id, previous);
                }
            }
            _ => {}
        }
    }

    Ok(page)
}

fn line_text(graph: &BlockGraph, line: &Block) -> Result<String> {
    match line.text() {
        Some(text) => Ok(text.to_string()),
        None => graph.child_text(line),
    }
}

/// Key text and value text of a KEY block; missing text becomes "".
fn form_pair(graph: &BlockGraph, key: &Block) -> Result<(String, String)> {
    let key_text = graph.child_text(key)?;

    let mut values = Vec::new();
    for target in graph.values(key)? {
        if target.block_type != BlockType::KeyValueSet {
            continue;
        }
        let text = graph.child_text(target)?;
        if !text.is_empty() {
            values.push(text);
        }
    }

    Ok((key_text, values.join(" ")))
}
