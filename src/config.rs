//! Configuration types for collection analysis.
//!
//! Everything the orchestrator needs to know about the on-disk layout and the
//! output bounds lives in [`AnalyzerConfig`], built via its
//! [`AnalyzerConfigBuilder`]. The defaults reproduce the challenge layout:
//!
//! ```text
//! <collections_dir>/
//!   Collection 1/
//!     challenge1b_input.json
//!     challenge1b_output.json   (written)
//!     PDFs/
//!       *.pdf
//! ```

use crate::error::AnalyzerError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of extracted sections and subsection analyses kept per collection.
pub const MAX_OUTPUT_ITEMS: usize = 5;

/// Character cap applied to refined page text before the ellipsis marker.
pub const REFINED_TEXT_LIMIT: usize = 500;

/// Configuration for a collection analysis run.
///
/// # Example
/// ```rust
/// use persona_digest::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .collections_dir("/data/challenge")
///     .max_output_items(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_output_items, 10);
/// ```
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// Root directory scanned for collection subdirectories. Default: `.`.
    pub collections_dir: PathBuf,

    /// Name prefix identifying collection subdirectories. Default: `Collection`.
    pub collection_prefix: String,

    /// Job config file inside each collection. Default: `challenge1b_input.json`.
    pub input_file_name: String,

    /// Output file written inside each collection. Default: `challenge1b_output.json`.
    pub output_file_name: String,

    /// Subdirectory of a collection holding the PDFs. Default: `PDFs`.
    pub pdf_dir_name: String,

    /// Length of both ranked output lists. Default: 5.
    pub max_output_items: usize,

    /// Characters of normalised page text kept in a subsection analysis. Default: 500.
    pub refined_text_limit: usize,

    /// Receives collection and document events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            collections_dir: PathBuf::from("."),
            collection_prefix: "Collection".to_string(),
            input_file_name: "challenge1b_input.json".to_string(),
            output_file_name: "challenge1b_output.json".to_string(),
            pdf_dir_name: "PDFs".to_string(),
            max_output_items: MAX_OUTPUT_ITEMS,
            refined_text_limit: REFINED_TEXT_LIMIT,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("collections_dir", &self.collections_dir)
            .field("collection_prefix", &self.collection_prefix)
            .field("input_file_name", &self.input_file_name)
            .field("output_file_name", &self.output_file_name)
            .field("pdf_dir_name", &self.pdf_dir_name)
            .field("max_output_items", &self.max_output_items)
            .field("refined_text_limit", &self.refined_text_limit)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn AnalysisProgressCallback>"),
            )
            .finish()
    }
}

impl AnalyzerConfig {
    /// Create a new builder for `AnalyzerConfig`.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the job config inside `collection`.
    pub fn input_path(&self, collection: &Path) -> PathBuf {
        collection.join(&self.input_file_name)
    }

    /// Path of the output file inside `collection`.
    pub fn output_path(&self, collection: &Path) -> PathBuf {
        collection.join(&self.output_file_name)
    }

    /// Directory holding the PDFs of `collection`.
    pub fn pdf_dir(&self, collection: &Path) -> PathBuf {
        collection.join(&self.pdf_dir_name)
    }
}

/// Builder for [`AnalyzerConfig`].
#[derive(Debug)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    pub fn collections_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.collections_dir = dir.into();
        self
    }

    pub fn collection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.collection_prefix = prefix.into();
        self
    }

    pub fn input_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.input_file_name = name.into();
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    pub fn pdf_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.pdf_dir_name = name.into();
        self
    }

    pub fn max_output_items(mut self, n: usize) -> Self {
        self.config.max_output_items = n;
        self
    }

    pub fn refined_text_limit(mut self, chars: usize) -> Self {
        self.config.refined_text_limit = chars;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalyzerConfig, AnalyzerError> {
        let c = &self.config;
        if c.max_output_items == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "max_output_items must be ≥ 1".into(),
            ));
        }
        if c.refined_text_limit == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "refined_text_limit must be ≥ 1".into(),
            ));
        }
        for (field, value) in [
            ("input_file_name", &c.input_file_name),
            ("output_file_name", &c.output_file_name),
            ("pdf_dir_name", &c.pdf_dir_name),
        ] {
            if value.trim().is_empty() {
                return Err(AnalyzerError::InvalidConfig(format!(
                    "{field} must not be empty"
                )));
            }
        }
        if c.input_file_name == c.output_file_name {
            return Err(AnalyzerError::InvalidConfig(format!(
                "output file '{}' would overwrite the job config",
                c.output_file_name
            )));
        }
        Ok(self.config)
    }
}
