//! Progress-callback trait for per-collection and per-document events.
//!
//! Inject an [`Arc<dyn AnalysisProgressCallback>`] via
//! [`crate::config::AnalyzerConfigBuilder::progress_callback`] to receive
//! events as the orchestrator walks the collections.
//!
//! The library itself only logs through `tracing`; anything user-facing
//! (progress bars, console lines) lives behind this trait so the host
//! application decides how to present it.
//!
//! # Example
//!
//! ```rust
//! use persona_digest::{AnalysisProgressCallback, AnalyzerConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct SkipCounter {
//!     skipped: AtomicUsize,
//! }
//!
//! impl AnalysisProgressCallback for SkipCounter {
//!     fn on_document_skipped(&self, collection: &str, document: &str, reason: &str) {
//!         self.skipped.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{collection}: skipped {document} ({reason})");
//!     }
//! }
//!
//! let counter = Arc::new(SkipCounter { skipped: AtomicUsize::new(0) });
//!
//! let config = AnalyzerConfig::builder()
//!     .progress_callback(counter as Arc<dyn AnalysisProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the orchestrator as it processes collections and documents.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events arrive strictly in order: the orchestrator
/// never processes two collections or documents at once.
pub trait AnalysisProgressCallback: Send + Sync {
    /// Called once after discovery, before the first collection.
    ///
    /// # Arguments
    /// * `collections`: directory names of the collections about to be processed
    fn on_run_start(&self, collections: &[String]) {
        let _ = collections;
    }

    /// Called after a collection's job config is loaded.
    ///
    /// # Arguments
    /// * `collection`     : directory name of the collection
    /// * `total_documents`: documents listed in the job config
    fn on_collection_start(&self, collection: &str, total_documents: usize) {
        let _ = (collection, total_documents);
    }

    /// Called when a document's pages have been scored.
    ///
    /// # Arguments
    /// * `collection`: directory name of the collection
    /// * `document`  : filename from the job config
    /// * `pages`     : non-empty pages analysed
    fn on_document_complete(&self, collection: &str, document: &str, pages: usize) {
        let _ = (collection, document, pages);
    }

    /// Called when a document is missing or unreadable and gets skipped.
    fn on_document_skipped(&self, collection: &str, document: &str, reason: &str) {
        let _ = (collection, document, reason);
    }

    /// Called once the collection's output file has been written.
    ///
    /// # Arguments
    /// * `collection`     : directory name of the collection
    /// * `total_documents`: documents listed in the job config
    fn on_collection_complete(&self, collection: &str, total_documents: usize) {
        let _ = (collection, total_documents);
    }

    /// Called when a collection fails and produces no output.
    fn on_collection_error(&self, collection: &str, error: &str) {
        let _ = (collection, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl AnalysisProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::AnalyzerConfig`].
pub type ProgressCallback = Arc<dyn AnalysisProgressCallback>;
