//! Identifier-addressed block graph.

use super::{Block, BlockType};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// The complete set of blocks for one analysis, addressable by id.
///
/// Blocks are stored in append order; an `id -> position` index is built once
/// and every lookup goes through it. The graph is read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct BlockGraph {
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
    pages: Vec<usize>,
}

impl BlockGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from blocks in service order.
    ///
    /// A block whose id was already seen is dropped.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let mut graph = Self::new();
        for block in blocks {
            if graph.index.contains_key(&block.id) {
                log::warn!("Dropping duplicate block id {}", block.id);
                continue;
            }
            let position = graph.blocks.len();
            if block.block_type == BlockType::Page {
                graph.pages.push(position);
            }
            graph.index.insert(block.id.clone(), position);
            graph.blocks.push(block);
        }
        graph
    }

    /// Number of blocks in the graph.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the graph has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in append order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.index.get(id).map(|&i| &self.blocks[i])
    }

    /// Look up a block referenced by `from`, failing if it is absent.
    pub fn resolve(&self, from: &Block, id: &str) -> Result<&Block> {
        self.get(id).ok_or_else(|| {
            Error::malformed(
                from.id.as_str(),
                format!("references missing block {}", id),
            )
        })
    }

    /// PAGE blocks in first-seen order.
    pub fn pages(&self) -> impl Iterator<Item = &Block> + '_ {
        self.pages.iter().map(|&i| &self.blocks[i])
    }

    /// Number of PAGE blocks.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Direct CHILD blocks of `block`, in relationship order.
    pub fn children<'a>(&'a self, block: &'a Block) -> Result<Vec<&'a Block>> {
        block.child_ids().map(|id| self.resolve(block, id)).collect()
    }

    /// Blocks linked from `block` through VALUE relationships.
    pub fn values<'a>(&'a self, block: &'a Block) -> Result<Vec<&'a Block>> {
        block.value_ids().map(|id| self.resolve(block, id)).collect()
    }

    /// All blocks reachable from `root` through CHILD edges, depth-first in
    /// relationship order, excluding `root` itself.
    ///
    /// Each block is yielded once even if several parents reference it.
    pub fn descendants<'a>(&'a self, root: &'a Block) -> Result<Vec<&'a Block>> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(root.id.as_str());

        let mut out = Vec::new();
        let mut stack: Vec<&Block> = self.children(root)?.into_iter().rev().collect();
        while let Some(block) = stack.pop() {
            if !seen.insert(block.id.as_str()) {
                continue;
            }
            out.push(block);
            for child in self.children(block)?.into_iter().rev() {
                stack.push(child);
            }
        }
        Ok(out)
    }

    /// Text of a block's WORD / SELECTION_ELEMENT children joined by spaces.
    ///
    /// Selection elements contribute their status (`SELECTED` / `NOT_SELECTED`).
    pub fn child_text(&self, block: &Block) -> Result<String> {
        let mut parts = Vec::new();
        for child in self.children(block)? {
            match child.block_type {
                BlockType::Word => {
                    if let Some(text) = child.text() {
                        parts.push(text);
                    }
                }
                BlockType::SelectionElement => {
                    if let Some(ref status) = child.selection_status {
                        parts.push(status.as_str());
                    }
                }
                _ => {}
            }
        }
        Ok(parts.join(" "))
    }
}

impl FromIterator<Block> for BlockGraph {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter)
    }
}
