//! Error types for the persona-digest library.
//!
//! Three error types cover three scopes of failure:
//!
//! * [`AnalyzerError`]: **Fatal for its scope**: a collection cannot be
//!   analysed at all (missing or malformed job config, output write failure),
//!   or the run cannot start (unreadable root, pdfium unavailable).
//!
//! * [`DocumentError`]: **Non-fatal**: a single document referenced by the
//!   job config is absent or unreadable. The document is skipped and the rest
//!   of the collection is still analysed.
//!
//! * [`CollectionProcessingError`]: an [`AnalyzerError`] tagged with the
//!   collection it happened in. [`crate::analyze::run`] records one per
//!   failed collection and moves on to the next.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the persona-digest library.
///
/// Document-level failures use [`DocumentError`] and never surface here.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    // ── Discovery errors ──────────────────────────────────────────────────
    /// The collections root directory could not be listed.
    #[error("Cannot read collections directory '{path}': {source}")]
    CollectionsDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root directory holds no subdirectory with the collection prefix.
    #[error("No collections found in '{path}' (expected subdirectories starting with '{prefix}')")]
    NoCollectionsFound { path: PathBuf, prefix: String },

    // ── Job config errors ─────────────────────────────────────────────────
    /// The collection has no job config file.
    #[error("Job config not found: '{path}'")]
    ConfigNotFound { path: PathBuf },

    /// The job config exists but could not be read.
    #[error("Failed to read job config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The job config is not valid JSON or lacks a required field.
    #[error("Invalid job config '{path}': {source}")]
    InvalidJobConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The collection output could not be serialised.
    #[error("Failed to serialise output for '{path}': {source}")]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium system-wide so the dynamic loader can find it.\n"
    )]
    PdfiumBindingFailed(String),
}

/// A non-fatal error for a single document of a collection.
///
/// The orchestrator logs it, reports it to the progress callback and moves on
/// to the next document.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// The job config names a file that is not in the PDF directory.
    #[error("File not found - {filename}")]
    Missing { filename: String },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The file exists but has no `%PDF` header in its first kilobyte.
    #[error("File is not a valid PDF: '{path}' (first bytes: {magic:?})")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// pdfium could not open the document or read its text.
    #[error("Cannot extract text from '{path}': {detail}")]
    Unreadable { path: PathBuf, detail: String },
}

/// The failure of one whole collection.
///
/// Produced by [`crate::analyze::process_collection`]; the collection writes
/// no output file but the run continues with the next collection.
#[derive(Debug, Error)]
#[error("Error processing collection '{collection}': {source}")]
pub struct CollectionProcessingError {
    /// Directory name of the failed collection.
    pub collection: String,
    #[source]
    pub source: AnalyzerError,
}
