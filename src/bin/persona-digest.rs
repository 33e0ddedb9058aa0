//! CLI binary for persona-digest.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `AnalyzerConfig`, runs every collection and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use persona_digest::{
    run, AnalysisProgressCallback, AnalyzerConfig, AnalyzerError, PdfiumTextSource,
    ProgressCallback, RunSummary, MAX_OUTPUT_ITEMS,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar over the collections of the run, with
/// per-document log lines printed above it on stdout.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Spinner only; `on_run_start` switches to a bar once the collection
    /// count is known.
    fn new() -> Arc<Self> {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICKS),
        );
        bar.set_prefix("Scanning");
        bar.set_message("Looking for collections…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    /// Print a line above the bar. Unlike `ProgressBar::println` this still
    /// prints when stdout is not a terminal.
    fn line(&self, text: String) {
        self.bar.suspend(|| println!("{text}"));
    }
}

impl AnalysisProgressCallback for CliProgressCallback {
    fn on_run_start(&self, collections: &[String]) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>2}/{len} collections  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(collections.len() as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Analysing");
        self.bar.set_message("");
        self.line(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {} collections to process", collections.len()))
        ));
    }

    fn on_collection_start(&self, collection: &str, total_documents: usize) {
        self.bar.set_message(collection.to_string());
        self.line(format!(
            "{} Processing {}  {}",
            cyan("▸"),
            bold(collection),
            dim(&format!("{total_documents} documents"))
        ));
    }

    fn on_document_complete(&self, _collection: &str, document: &str, pages: usize) {
        self.line(format!(
            "  {} {:<48}  {}",
            green("✓"),
            document,
            dim(&format!("{pages:>3} pages"))
        ));
    }

    fn on_document_skipped(&self, _collection: &str, document: &str, reason: &str) {
        self.line(format!(
            "  {} {:<48}  {}",
            yellow("⚠"),
            document,
            yellow(&format!("Warning: {reason}"))
        ));
    }

    fn on_collection_complete(&self, collection: &str, _total_documents: usize) {
        self.line(format!("{} Completed {}", green("✔"), bold(collection)));
        self.bar.inc(1);
    }

    fn on_collection_error(&self, collection: &str, error: &str) {
        self.line(format!(
            "{} {}",
            red("✘"),
            red(&format!("Error processing collection {collection}: {error}"))
        ));
        self.bar.inc(1);
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyse every "Collection*" directory under the current directory
  persona-digest

  # Analyse collections somewhere else
  persona-digest ./challenge_1b

  # Keep the 10 best pages per collection, no progress bar
  persona-digest --max-items 10 --no-progress ./challenge_1b

COLLECTION LAYOUT:
  Collection 1/
    challenge1b_input.json    persona, job_to_be_done and documents
    PDFs/                     the documents named in the job config
    challenge1b_output.json   written by persona-digest

ENVIRONMENT VARIABLES:
  COLLECTIONS_DIR   Root directory holding the collections (default: .)
  PDFIUM_LIB_PATH   Path to libpdfium; otherwise ./ then the system library
  RUST_LOG          tracing filter, overrides --verbose / --quiet
"#;

/// Rank PDF pages against a persona's task for every collection.
#[derive(Parser, Debug)]
#[command(
    name = "persona-digest",
    version,
    about = "Rank PDF pages against a persona's task and write a JSON digest per collection",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the `Collection*` subdirectories.
    #[arg(env = "COLLECTIONS_DIR", default_value = ".")]
    collections_dir: PathBuf,

    /// Number of sections and subsections kept per collection.
    #[arg(long, env = "PERSONA_DIGEST_MAX_ITEMS", default_value_t = MAX_OUTPUT_ITEMS)]
    max_items: usize,

    /// Disable progress bar.
    #[arg(long, env = "PERSONA_DIGEST_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PERSONA_DIGEST_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PERSONA_DIGEST_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports every event; keep library logs to
    // errors unless asked otherwise.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Bind pdfium before touching any collection ──────────────────────
    let source = PdfiumTextSource::new().context("PDF engine unavailable")?;

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb = show_progress.then(CliProgressCallback::new);
    let mut builder = AnalyzerConfig::builder()
        .collections_dir(&cli.collections_dir)
        .max_output_items(cli.max_items);
    if let Some(ref cb) = progress_cb {
        builder = builder.progress_callback(Arc::clone(cb) as ProgressCallback);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run ──────────────────────────────────────────────────────────────
    let result = run(&config, &source);
    drop(config);
    drop(progress_cb);

    match result {
        Ok(summary) => {
            if !cli.quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(AnalyzerError::NoCollectionsFound { path, .. }) => {
            if !cli.quiet {
                println!("No collections found in {}", path.display());
            }
            Ok(())
        }
        Err(e) => Err(e).context("Failed to scan collections"),
    }
}

fn print_summary(summary: &RunSummary) {
    for report in summary.succeeded() {
        let stats = &report.stats;
        println!(
            "  {} {:<24} {}/{} documents  {:>4} pages  {:>5}ms  →  {}",
            green("✓"),
            report.collection,
            stats.documents_processed,
            stats.documents_requested,
            stats.pages_analyzed,
            stats.duration_ms,
            dim(&report.output_path.display().to_string()),
        );
    }
    for failure in summary.failed() {
        println!("  {} {:<24} {}", red("✗"), failure.collection, red(&failure.source.to_string()));
    }

    let (ok, failed) = (summary.success_count(), summary.failure_count());
    let mark = if failed == 0 { green("✔") } else { yellow("⚠") };
    println!(
        "{} Processing complete: {} collections written, {} failed",
        mark,
        bold(&ok.to_string()),
        if failed == 0 {
            failed.to_string()
        } else {
            red(&failed.to_string())
        },
    );
}
