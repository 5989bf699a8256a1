//! Result file export.

use super::render_grid;
use crate::error::Result;
use crate::model::StructuredDocument;
use crate::naming::export_file_name;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Render the export file contents for a document.
///
/// Sections, in order: every table as a labelled grid, every form field as
/// `key: value`, then `Date: <line>` if the document has a date line.
pub fn to_export_text(doc: &StructuredDocument) -> String {
    let mut out = String::from("Extracted Tables:\n");
    for (i, table) in doc.tables().enumerate() {
        out.push_str(&format!("Table {}:\n", i + 1));
        out.push_str(&render_grid(table));
        out.push_str("\n\n");
    }

    out.push_str("Extracted Key-Value Pairs:\n");
    for (key, value) in doc.form_fields().iter() {
        out.push_str(&format!("{}: {}\n", key, value));
    }

    if let Some(ref date) = doc.first_date_line {
        out.push_str(&format!("Date: {}\n", date));
    }
    out
}

/// Write the export file for a document into `dir`.
///
/// The file is named after the source document and `date`; see
/// [`export_file_name`]. Returns the path written.
pub fn write_export(
    doc: &StructuredDocument,
    dir: &Path,
    source_name: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(source_name, date));
    fs::write(&path, to_export_text(doc))?;
    log::info!("Wrote export to {}", path.display());
    Ok(path)
}
