//! JSON rendering for reconstructed documents.

use crate::error::{Error, Result};
use crate::model::StructuredDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &StructuredDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_to_json_pretty() {
        let mut page = Page::new(1);
        page.add_line("Date: today");
        let doc = StructuredDocument::new(vec![page]);

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"first_date_line\""));
        assert!(json.contains("Date: today"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let doc = StructuredDocument::new(vec![Page::new(1)]);
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }
}
