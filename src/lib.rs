//! # persona-digest
//!
//! Rank the pages of a PDF collection against a persona's task and write a
//! condensed JSON digest per collection.
//!
//! Each collection directory holds a job config naming a persona, a task and
//! the documents to read. Every non-empty page of every document is scored by
//! how often the task's keywords occur in it; the best pages become
//! `extracted_sections` and the first pages in reading order become
//! `subsection_analysis`, each capped at [`MAX_OUTPUT_ITEMS`].
//!
//! ## Pipeline Overview
//!
//! ```text
//! Collection dir
//!  │
//!  ├─ 1. Job     load challenge1b_input.json (persona, task, documents)
//!  ├─ 2. Terms   derive keywords from the task (lowercase, >3 chars)
//!  ├─ 3. Extract read page text via pdfium, skipping missing documents
//!  ├─ 4. Page    score + section title + refined text per page
//!  ├─ 5. Rank    top K by score (stable), first K by page number
//!  └─ 6. Output  challenge1b_output.json, written atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use persona_digest::{run, AnalyzerConfig, PdfiumTextSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalyzerConfig::builder()
//!         .collections_dir("./challenge")
//!         .build()?;
//!     let source = PdfiumTextSource::new()?;
//!     let summary = run(&config, &source)?;
//!     eprintln!(
//!         "{} collections written, {} failed",
//!         summary.success_count(),
//!         summary.failure_count()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `persona-digest` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! persona-digest = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod recipe;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::{analyze_collection, analyze_page, process_collection, run, write_output};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, MAX_OUTPUT_ITEMS, REFINED_TEXT_LIMIT};
pub use error::{AnalyzerError, CollectionProcessingError, DocumentError};
pub use job::{DocumentRef, JobConfig, JobToBeDone, Persona};
pub use output::{
    AnalysisStats, CollectionAnalysis, CollectionOutput, CollectionReport, ExtractedSection,
    OutputMetadata, RunSummary, SkippedDocument, SubsectionAnalysis,
};
pub use pipeline::extract::{PageTextSource, PageTexts, PdfiumTextSource};
pub use pipeline::keywords::KeywordSet;
pub use progress::{AnalysisProgressCallback, NoopProgressCallback, ProgressCallback};
pub use recipe::{extract_recipes, meets_dietary_requirements, DietaryNeed, RecipeRecord};
