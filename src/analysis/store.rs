//! Durable document storage read by the analysis service.

use super::DocumentLocation;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A durable blob store the analysis service can read from.
pub trait DocumentStore: Send + Sync {
    /// Store `bytes` under `key`, returning where the service can find them.
    fn put(&self, bytes: &[u8], key: &str) -> Result<DocumentLocation>;
}

/// A store backed by a local directory, one file per key.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    bucket: String,
}

impl DirectoryStore {
    /// Create a store rooted at `root`, reporting locations in `bucket`.
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    /// Directory holding stored documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(Error::Submission(format!("invalid storage key {:?}", key)));
        }
        Ok(())
    }
}

impl DocumentStore for DirectoryStore {
    fn put(&self, bytes: &[u8], key: &str) -> Result<DocumentLocation> {
        Self::validate_key(key)?;
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(key);
        fs::write(&path, bytes)?;
        log::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(DocumentLocation::new(self.bucket.clone(), key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("docs"), "local");

        let location = store.put(b"%PDF-1.7", "scan_2024-01-01.pdf").unwrap();
        assert_eq!(location, DocumentLocation::new("local", "scan_2024-01-01.pdf"));
        let written = fs::read(store.root().join("scan_2024-01-01.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.7");
    }

    #[test]
    fn test_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path(), "local");
        assert!(matches!(
            store.put(b"x", "../escape.pdf"),
            Err(Error::Submission(_))
        ));
        assert!(matches!(store.put(b"x", ""), Err(Error::Submission(_))));
    }
}
