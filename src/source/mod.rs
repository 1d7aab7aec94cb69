//! Fetch capability: where export documents come from
//!
//! The engine only needs produced text; connection handling, retries,
//! and the registry's web-service protocol live behind this seam.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while obtaining an export document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A producer of raw export documents
pub trait DocumentSource {
    fn fetch_document(&self) -> Result<String, FetchError>;
}

/// Reads an export document from a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn fetch_document(&self) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_document_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<Dictionary/>").unwrap();

        let source = FileSource::new(file.path());
        assert_eq!(source.fetch_document().unwrap(), "<Dictionary/>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = FileSource::new("/nonexistent/export.xml");
        assert!(source.fetch_document().is_err());
    }
}
