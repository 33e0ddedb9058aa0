//! Output types: the JSON record written per collection, plus run statistics.

use crate::error::{CollectionProcessingError, DocumentError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The JSON document written to `challenge1b_output.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOutput {
    pub metadata: OutputMetadata,
    /// At most `max_output_items`, highest importance first.
    pub extracted_sections: Vec<ExtractedSection>,
    /// At most `max_output_items`, lowest page number first.
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Provenance block of a [`CollectionOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// Every filename from the job config in config order, including
    /// documents that were skipped.
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 local time at which the output was assembled.
    pub processing_timestamp: String,
}

/// One scored page, headed by its extracted title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    /// Keyword occurrence count; only used for ordering.
    pub importance_rank: usize,
    /// 1-indexed.
    pub page_number: usize,
}

/// One page's normalised, length-bounded text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    /// 1-indexed.
    pub page_number: usize,
}

/// Counters gathered while analysing one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Documents listed in the job config.
    pub documents_requested: usize,
    /// Documents whose pages were extracted.
    pub documents_processed: usize,
    /// Non-empty pages scored across all processed documents.
    pub pages_analyzed: usize,
    /// Skipped documents with the reason each was skipped.
    pub skipped: Vec<SkippedDocument>,
    pub duration_ms: u64,
}

/// A document the orchestrator had to skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: String,
}

impl SkippedDocument {
    pub fn new(filename: impl Into<String>, error: &DocumentError) -> Self {
        Self {
            filename: filename.into(),
            reason: error.to_string(),
        }
    }
}

/// Result of analysing a collection in memory.
#[derive(Debug, Clone)]
pub struct CollectionAnalysis {
    pub output: CollectionOutput,
    pub stats: AnalysisStats,
}

/// Result of a fully processed collection: analysis plus where it was written.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    /// Directory name of the collection.
    pub collection: String,
    pub output_path: PathBuf,
    pub output: CollectionOutput,
    pub stats: AnalysisStats,
}

/// Per-collection outcomes of one run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<Result<CollectionReport, CollectionProcessingError>>,
}

impl RunSummary {
    /// Collections that produced an output file.
    pub fn succeeded(&self) -> impl Iterator<Item = &CollectionReport> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Collections that failed.
    pub fn failed(&self) -> impl Iterator<Item = &CollectionProcessingError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.succeeded().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failed().count()
    }
}
