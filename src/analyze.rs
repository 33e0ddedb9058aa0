//! Collection orchestration: job config → per-page records → ranked output.
//!
//! Three entry points, each wrapping the previous one:
//!
//! * [`analyze_collection`]: build the [`CollectionOutput`] in memory.
//! * [`process_collection`]: analyse, write the output file, and tag any
//!   failure with the collection name.
//! * [`run`]: discover every collection under the root and process them one
//!   after another. A failed collection is recorded and skipped.

use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, CollectionProcessingError};
use crate::job::JobConfig;
use crate::output::{
    AnalysisStats, CollectionAnalysis, CollectionOutput, CollectionReport, ExtractedSection,
    OutputMetadata, RunSummary, SkippedDocument, SubsectionAnalysis,
};
use crate::pipeline::extract::{non_empty_trimmed, PageTextSource};
use crate::pipeline::keywords::KeywordSet;
use crate::pipeline::{input, rank, refine, score, title};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Analyse one collection directory without writing anything.
///
/// # Errors
/// Returns `Err(AnalyzerError)` only when the job config is missing or
/// malformed. Missing or unreadable documents are skipped and listed in
/// [`AnalysisStats::skipped`].
pub fn analyze_collection(
    collection: &Path,
    config: &AnalyzerConfig,
    source: &dyn PageTextSource,
) -> Result<CollectionAnalysis, AnalyzerError> {
    let start = Instant::now();
    let name = input::collection_name(collection);
    info!("Processing {}", name);

    // ── Step 1: Load job config ──────────────────────────────────────────
    let job = JobConfig::load(&config.input_path(collection))?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_collection_start(&name, job.documents.len());
    }

    // ── Step 2: Derive keywords once ─────────────────────────────────────
    let keywords = KeywordSet::from_task(&job.job_to_be_done.task);
    debug!(
        "{}: {} keywords: {:?}",
        name,
        keywords.len(),
        keywords.iter().collect::<Vec<_>>()
    );

    // ── Step 3: Score every page of every document ───────────────────────
    let pdf_dir = config.pdf_dir(collection);
    let mut sections = Vec::new();
    let mut subsections = Vec::new();
    let mut stats = AnalysisStats {
        documents_requested: job.documents.len(),
        ..AnalysisStats::default()
    };

    for doc in &job.documents {
        let filename = doc.filename.as_str();
        let pages = match input::resolve_document(&pdf_dir, filename)
            .and_then(|path| source.page_texts(&path))
        {
            Ok(pages) => pages,
            Err(e) => {
                warn!("{}: skipping '{}': {}", name, filename, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_document_skipped(&name, filename, &e.to_string());
                }
                stats.skipped.push(SkippedDocument::new(filename, &e));
                continue;
            }
        };

        let mut analysed = 0;
        for (&page_number, text) in &pages {
            let Some(text) = non_empty_trimmed(text) else {
                continue;
            };
            let (section, subsection) = analyze_page(
                filename,
                page_number,
                text,
                &keywords,
                config.refined_text_limit,
            );
            debug!(
                "{} p{}: rank {}, title {:?}",
                filename, page_number, section.importance_rank, section.section_title
            );
            sections.push(section);
            subsections.push(subsection);
            analysed += 1;
        }

        stats.documents_processed += 1;
        stats.pages_analyzed += analysed;
        if let Some(ref cb) = config.progress_callback {
            cb.on_document_complete(&name, filename, analysed);
        }
    }

    // ── Step 4: Rank, truncate and assemble ──────────────────────────────
    let output = CollectionOutput {
        metadata: OutputMetadata {
            input_documents: job.filenames(),
            persona: job.persona.role,
            job_to_be_done: job.job_to_be_done.task,
            processing_timestamp: processing_timestamp(),
        },
        extracted_sections: rank::rank_sections(sections, config.max_output_items),
        subsection_analysis: rank::order_subsections(subsections, config.max_output_items),
    };

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "{}: {}/{} documents, {} pages analysed in {}ms",
        name,
        stats.documents_processed,
        stats.documents_requested,
        stats.pages_analyzed,
        stats.duration_ms
    );

    Ok(CollectionAnalysis { output, stats })
}

/// Build both per-page records for one page of text.
pub fn analyze_page(
    document: &str,
    page_number: usize,
    text: &str,
    keywords: &KeywordSet,
    refined_text_limit: usize,
) -> (ExtractedSection, SubsectionAnalysis) {
    let lines = title::page_lines(text);
    let section = ExtractedSection {
        document: document.to_string(),
        section_title: title::extract_section_title(&lines),
        importance_rank: score::score_text(text, keywords),
        page_number,
    };
    let subsection = SubsectionAnalysis {
        document: document.to_string(),
        refined_text: refine::refine_text(text, refined_text_limit),
        page_number,
    };
    (section, subsection)
}

/// Analyse a collection and write its output file.
///
/// Any fatal error is wrapped with the collection name, logged, and reported
/// to the progress callback; no output file is written in that case.
pub fn process_collection(
    collection: &Path,
    config: &AnalyzerConfig,
    source: &dyn PageTextSource,
) -> Result<CollectionReport, CollectionProcessingError> {
    let name = input::collection_name(collection);
    let output_path = config.output_path(collection);

    let result = analyze_collection(collection, config, source).and_then(|analysis| {
        write_output(&output_path, &analysis.output)?;
        Ok(analysis)
    });

    match result {
        Ok(CollectionAnalysis { output, stats }) => {
            info!("{}: wrote {}", name, output_path.display());
            if let Some(ref cb) = config.progress_callback {
                cb.on_collection_complete(&name, stats.documents_requested);
            }
            Ok(CollectionReport {
                collection: name,
                output_path,
                output,
                stats,
            })
        }
        Err(err) => {
            error!("Error processing collection {}: {}", name, err);
            if let Some(ref cb) = config.progress_callback {
                cb.on_collection_error(&name, &err.to_string());
            }
            Err(CollectionProcessingError {
                collection: name,
                source: err,
            })
        }
    }
}

/// Process every collection under `config.collections_dir`, in name order.
///
/// # Errors
/// Only discovery failures are returned, including
/// [`AnalyzerError::NoCollectionsFound`]. Per-collection failures are
/// collected in the [`RunSummary`].
pub fn run(config: &AnalyzerConfig, source: &dyn PageTextSource) -> Result<RunSummary, AnalyzerError> {
    let collections = input::discover_collections(config)?;
    let names: Vec<String> = collections
        .iter()
        .map(|p| input::collection_name(p))
        .collect();
    info!("Found {} collections to process", collections.len());
    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(&names);
    }

    let mut summary = RunSummary::default();
    for collection in &collections {
        summary
            .outcomes
            .push(process_collection(collection, config, source));
    }

    info!(
        "Run complete: {} succeeded, {} failed",
        summary.success_count(),
        summary.failure_count()
    );
    Ok(summary)
}

/// Serialise `output` as pretty JSON and write it to `path`.
///
/// Uses atomic write (temp file + rename) so a failed write never leaves a
/// truncated output behind.
pub fn write_output(path: &Path, output: &CollectionOutput) -> Result<(), AnalyzerError> {
    let json = serde_json::to_string_pretty(output).map_err(|source| {
        AnalyzerError::SerializeFailed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let write_failed = |source| AnalyzerError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(write_failed)?;
    std::fs::rename(&tmp_path, path).map_err(write_failed)?;
    Ok(())
}

/// Local time in ISO-8601 with microseconds, e.g. `2025-07-10T15:31:22.632389`.
fn processing_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
