//! Document-level types.

use super::{Form, Page, Table};
use serde::{Deserialize, Serialize};

/// Marker searched for by [`StructuredDocument::first_date_line`].
const DATE_MARKER: &str = "Date";

/// Lines, tables, and form fields rebuilt from one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Pages in the order the service reported them
    pub pages: Vec<Page>,

    /// First line, across all pages, containing the literal text "Date"
    pub first_date_line: Option<String>,
}

impl StructuredDocument {
    /// Create a document from its pages.
    pub fn new(pages: Vec<Page>) -> Self {
        let first_date_line = first_line_containing(&pages, DATE_MARKER);
        Self {
            pages,
            first_date_line,
        }
    }

    /// Create a document without searching for a date line.
    ///
    /// Used for single-image detection results, whose export carries no date.
    pub fn without_date_line(pages: Vec<Page>) -> Self {
        Self {
            pages,
            first_date_line: None,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All lines in page order.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter().map(String::as_str))
    }

    /// All tables in page order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }

    /// Form fields of every page merged into one form, last write winning.
    pub fn form_fields(&self) -> Form {
        let mut form = Form::new();
        for page in &self.pages {
            form.extend_from(&page.form);
        }
        form
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn first_line_containing(pages: &[Page], needle: &str) -> Option<String> {
    pages
        .iter()
        .flat_map(|p| p.lines.iter())
        .find(|line| line.contains(needle))
        .cloned()
}
