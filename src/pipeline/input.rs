//! Input resolution: find collection directories and the PDFs a job names.
//!
//! Document paths are validated before pdfium sees them, checking existence,
//! read permission and the `%PDF` magic bytes. Callers get a
//! [`DocumentError`] they can log and skip instead of a pdfium failure.

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, DocumentError};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Bytes searched for the `%PDF` header; leading junk before it is tolerated.
const HEADER_SEARCH_LEN: usize = 1024;

/// List the immediate subdirectories of `config.collections_dir` whose name
/// starts with `config.collection_prefix`, sorted by name.
///
/// # Errors
/// [`AnalyzerError::CollectionsDirUnreadable`] if the root cannot be listed,
/// [`AnalyzerError::NoCollectionsFound`] if nothing matches.
pub fn discover_collections(config: &AnalyzerConfig) -> Result<Vec<PathBuf>, AnalyzerError> {
    let root = &config.collections_dir;
    let unreadable = |source| AnalyzerError::CollectionsDirUnreadable {
        path: root.clone(),
        source,
    };

    let mut collections = Vec::new();
    for entry in std::fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        let matches_prefix = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(&config.collection_prefix));
        if matches_prefix && path.is_dir() {
            collections.push(path);
        }
    }

    if collections.is_empty() {
        return Err(AnalyzerError::NoCollectionsFound {
            path: root.clone(),
            prefix: config.collection_prefix.clone(),
        });
    }

    collections.sort();
    debug!("Discovered {} collections in {}", collections.len(), root.display());
    Ok(collections)
}

/// Directory name of a collection, for logs and error messages.
pub fn collection_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolve `filename` inside `pdf_dir`, validating existence and that a
/// `%PDF` header occurs within the first kilobyte.
pub fn resolve_document(pdf_dir: &Path, filename: &str) -> Result<PathBuf, DocumentError> {
    let path = pdf_dir.join(filename);

    if !path.is_file() {
        return Err(DocumentError::Missing {
            filename: filename.to_string(),
        });
    }

    match std::fs::File::open(&path) {
        Ok(f) => {
            let mut head = Vec::with_capacity(HEADER_SEARCH_LEN);
            if f.take(HEADER_SEARCH_LEN as u64).read_to_end(&mut head).is_ok()
                && !head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
            {
                let mut magic = [0u8; 4];
                let n = head.len().min(magic.len());
                magic[..n].copy_from_slice(&head[..n]);
                return Err(DocumentError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DocumentError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(DocumentError::Missing {
                filename: filename.to_string(),
            });
        }
    }

    debug!("Resolved PDF: {}", path.display());
    Ok(path)
}
