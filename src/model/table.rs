//! Table types.

use serde::{Deserialize, Serialize};

/// A rectangular grid of cell text.
///
/// Every row has the same number of cells; positions the service did not
/// report hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, top to bottom
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create a table from rows of text values.
    ///
    /// Short rows are padded with empty strings to the widest row.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-based row and column.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(vec![vec!["Name", "Age", "City"], vec!["Alice"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 2), Some(""));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_plain_text() {
        let table = Table::from_rows([["a", "b"], ["c", "d"]]);
        assert_eq!(table.plain_text(), "a\tb\nc\td");
    }
}
