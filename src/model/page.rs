//! Page-level types.

use super::{Form, Table};
use serde::{Deserialize, Serialize};

/// One page of a reconstructed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Non-empty text lines in reading order
    pub lines: Vec<String>,

    /// Tables found on the page
    pub tables: Vec<Table>,

    /// Form fields found on the page
    pub form: Form,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Add a line, ignoring empty text.
    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    /// Add a table to the page.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Check if the page has no lines, tables, or form fields.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.tables.is_empty() && self.form.is_empty()
    }
}
