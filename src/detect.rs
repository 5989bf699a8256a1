//! Input document type detection.
//!
//! The analysis service accepts multi-page PDFs through the asynchronous job
//! path and single images (PNG, JPEG, TIFF) through synchronous detection.
//! Anything else is rejected before the service is called.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of document submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// PDF document (asynchronous analysis)
    Pdf,
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// TIFF image
    Tiff,
}

impl DocumentKind {
    /// Check if the document is an image, analyzed by synchronous detection.
    pub fn is_image(self) -> bool {
        !matches!(self, DocumentKind::Pdf)
    }

    /// MIME type of the document.
    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::Tiff => "image/tiff",
        }
    }

    /// Kind for a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "png" => Some(DocumentKind::Png),
            "jpg" | "jpeg" => Some(DocumentKind::Jpeg),
            "tif" | "tiff" => Some(DocumentKind::Tiff),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";
const TIFF_LE_MAGIC: &[u8] = b"II*\x00";
const TIFF_BE_MAGIC: &[u8] = b"MM\x00*";

/// Detect the document kind from its leading bytes.
///
/// # Returns
/// * `Ok(DocumentKind)` if the data starts with a supported signature
/// * `Err(Error::UnsupportedFormat)` otherwise
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<DocumentKind> {
    let kind = if data.starts_with(PDF_MAGIC) {
        DocumentKind::Pdf
    } else if data.starts_with(PNG_MAGIC) {
        DocumentKind::Png
    } else if data.starts_with(JPEG_MAGIC) {
        DocumentKind::Jpeg
    } else if data.starts_with(TIFF_LE_MAGIC) || data.starts_with(TIFF_BE_MAGIC) {
        DocumentKind::Tiff
    } else {
        return Err(Error::UnsupportedFormat(
            "unrecognized file signature".to_string(),
        ));
    };
    Ok(kind)
}

/// Detect the document kind of a file from its leading bytes.
///
/// # Example
/// ```no_run
/// use untextract::detect::detect_kind_from_path;
///
/// let kind = detect_kind_from_path("scan.pdf").unwrap();
/// println!("{}", kind);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let file = File::open(path.as_ref())?;
    let mut header = Vec::with_capacity(8);
    file.take(8).read_to_end(&mut header)?;
    detect_kind_from_bytes(&header).map_err(|_| {
        Error::UnsupportedFormat(format!("{} is not a PDF or image", path.as_ref().display()))
    })
}
