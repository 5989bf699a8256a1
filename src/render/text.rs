//! Plain text rendering for reconstructed documents.

use super::render_grid;
use crate::model::StructuredDocument;

/// Options for plain text output.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    /// Append each page's tables as grids after its lines
    pub include_tables: bool,

    /// Append each page's form fields as `key: value` after its lines
    pub include_forms: bool,
}

impl TextOptions {
    /// Create new text options with defaults (lines only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Include tables in the output.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Include form fields in the output.
    pub fn with_forms(mut self, include: bool) -> Self {
        self.include_forms = include;
        self
    }
}

/// Convert a document to plain text, pages separated by a blank line.
pub fn to_text(doc: &StructuredDocument, options: &TextOptions) -> String {
    let pages: Vec<String> = doc
        .pages
        .iter()
        .map(|page| {
            let mut sections = vec![page.plain_text()];
            if options.include_tables {
                sections.extend(page.tables.iter().map(render_grid));
            }
            if options.include_forms && !page.form.is_empty() {
                let form = page
                    .form
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("\n");
                sections.push(form);
            }
            sections.retain(|s| !s.is_empty());
            sections.join("\n\n")
        })
        .collect();

    pages.join("\n\n").trim().to_string()
}
