//! Table synthesis: turning TABLE blocks into dense grids.
//!
//! Cells are collected from one of two response shapes by a [`CellSource`],
//! then densified by the shared [`build_grid`] routine.

use crate::error::{Error, Result};
use crate::model::{Block, BlockGraph, BlockType, Table};
use std::collections::{BTreeMap, HashMap};

/// A cell position and its text, as read from a CELL block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEntry {
    /// 1-based row index
    pub row: u32,
    /// 1-based column index
    pub column: u32,
    /// Cell text ("" if none)
    pub text: String,
}

impl CellEntry {
    /// Create a cell entry.
    pub fn new(row: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            row,
            column,
            text: text.into(),
        }
    }
}

/// Raw detection output addressed by list position.
///
/// Child ids are mapped to positions in the block list once; ids that do not
/// resolve are skipped rather than treated as errors, because this shape makes
/// no referential guarantee.
#[derive(Debug, Clone)]
pub struct FlatIndex<'a> {
    blocks: &'a [Block],
    positions: HashMap<&'a str, usize>,
}

impl<'a> FlatIndex<'a> {
    /// Index a raw block list.
    pub fn new(blocks: &'a [Block]) -> Self {
        let mut positions = HashMap::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            positions.entry(block.id.as_str()).or_insert(i);
        }
        Self { blocks, positions }
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.positions.get(id).map(|&i| &self.blocks[i])
    }

    fn child_text(&self, block: &Block) -> String {
        block
            .child_ids()
            .filter_map(|id| self.get(id))
            .filter(|b| b.block_type == BlockType::Word)
            .filter_map(Block::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Where a table's cells come from.
#[derive(Debug, Clone)]
pub enum CellSource<'a> {
    /// Cells resolved through the full relationship graph (document analysis).
    ///
    /// A child id that is not in the graph is a malformed graph.
    GraphLinked(&'a BlockGraph),

    /// Cells resolved by position in a raw block list (image detection).
    FlatIndexed(FlatIndex<'a>),
}

impl<'a> CellSource<'a> {
    /// Cell source over a raw block list.
    pub fn flat(blocks: &'a [Block]) -> Self {
        CellSource::FlatIndexed(FlatIndex::new(blocks))
    }

    /// Collect the CELL children of a TABLE block.
    ///
    /// Non-CELL children and cells without a usable position are skipped.
    pub fn cells(&self, table: &Block) -> Result<Vec<CellEntry>> {
        let mut entries = Vec::new();
        match self {
            CellSource::GraphLinked(graph) => {
                for child in graph.children(table)? {
                    if child.block_type != BlockType::Cell {
                        continue;
                    }
                    let text = match child.text() {
                        Some(text) => text.to_string(),
                        None => graph.child_text(child)?,
                    };
                    push_cell(&mut entries, child, text);
                }
            }
            CellSource::FlatIndexed(index) => {
                for id in table.child_ids() {
                    let Some(child) = index.get(id) else {
                        log::debug!("Table {}: skipping unresolved child {}", table.id, id);
                        continue;
                    };
                    if child.block_type != BlockType::Cell {
                        continue;
                    }
                    let text = match child.text() {
                        Some(text) => text.to_string(),
                        None => index.child_text(child),
                    };
                    push_cell(&mut entries, child, text);
                }
            }
        }
        Ok(entries)
    }

    /// Build the grid for one TABLE block.
    pub fn synthesize(&self, table: &Block) -> Result<Table> {
        let cells = self.cells(table)?;
        log::debug!("Table {}: {} cells", table.id, cells.len());
        build_grid(&table.id, cells)
    }
}

fn push_cell(entries: &mut Vec<CellEntry>, cell: &Block, text: String) {
    match (cell.row_index, cell.column_index) {
        (Some(row), Some(column)) if row > 0 && column > 0 => {
            entries.push(CellEntry::new(row, column, text));
        }
        _ => log::debug!("Cell {} has no usable row/column index", cell.id),
    }
}

/// Largest grid `build_grid` will allocate, in cells.
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Densify sparse cells into a rectangular grid.
///
/// Rows `1..=max_row` and columns `1..=max_col` are emitted in ascending order,
/// where both maxima are taken over the whole table. Positions with no cell
/// hold the empty string. A later cell at an occupied position replaces the
/// earlier one. No cells yields an empty table.
///
/// Fails with [`Error::MalformedGraph`] naming `table_id` if the dense grid
/// would exceed [`MAX_GRID_CELLS`].
pub fn build_grid(table_id: &str, cells: impl IntoIterator<Item = CellEntry>) -> Result<Table> {
    let mut sparse: BTreeMap<(u32, u32), String> = BTreeMap::new();
    let mut max_row = 0;
    let mut max_col = 0;
    for cell in cells {
        max_row = max_row.max(cell.row);
        max_col = max_col.max(cell.column);
        sparse.insert((cell.row, cell.column), cell.text);
    }

    let area = usize::try_from(max_row)
        .ok()
        .zip(usize::try_from(max_col).ok())
        .and_then(|(rows, cols)| rows.checked_mul(cols));
    match area {
        Some(area) if area <= MAX_GRID_CELLS => {}
        _ => {
            return Err(Error::malformed(
                table_id,
                format!(
                    "cell index {}x{} exceeds the {} cell grid limit",
                    max_row, max_col, MAX_GRID_CELLS
                ),
            ))
        }
    }

    let rows: Vec<Vec<String>> = (1..=max_row)
        .map(|row| {
            (1..=max_col)
                .map(|column| sparse.remove(&(row, column)).unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(Table { rows })
}
