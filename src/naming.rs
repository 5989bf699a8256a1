//! File and storage key naming.
//!
//! Uploaded documents and exported results are named
//! `<base name with spaces replaced by underscores>_<YYYY-MM-DD>.<ext>`.

use chrono::NaiveDate;

/// Split a file name into a sanitized base name and its extension.
///
/// The extension is everything after the last `.`; spaces in the base name
/// become underscores.
pub fn sanitize_file_name(file_name: &str) -> (String, Option<&str>) {
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base.replace(' ', "_"), Some(ext)),
        _ => (file_name.replace(' ', "_"), None),
    }
}

/// Storage key for an uploaded document: `<base>_<date>.<ext>`.
pub fn storage_key(file_name: &str, date: NaiveDate) -> String {
    let (base, ext) = sanitize_file_name(file_name);
    match ext {
        Some(ext) => format!("{}_{}.{}", base, date.format("%Y-%m-%d"), ext),
        None => format!("{}_{}", base, date.format("%Y-%m-%d")),
    }
}

/// File name of the text export for a document: `<base>_<date>.txt`.
pub fn export_file_name(file_name: &str, date: NaiveDate) -> String {
    let (base, _) = sanitize_file_name(file_name);
    format!("{}_{}.txt", base, date.format("%Y-%m-%d"))
}
