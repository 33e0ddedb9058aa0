//! Page text extraction: PDF file → map of page number to trimmed text.
//!
//! The orchestrator only depends on the [`PageTextSource`] trait, so tests
//! and alternative backends can supply page text without a pdfium library.
//! [`PdfiumTextSource`] is the production implementation.

use crate::error::{AnalyzerError, DocumentError};
use pdfium_render::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Non-empty, trimmed page text keyed by 1-indexed page number.
pub type PageTexts = BTreeMap<usize, String>;

/// Yields the text of every page of a document.
///
/// Implementations must omit pages whose text is empty after trimming and
/// must trim the text they return.
pub trait PageTextSource {
    fn page_texts(&self, path: &Path) -> Result<PageTexts, DocumentError>;
}

/// [`PageTextSource`] backed by the pdfium C++ library.
///
/// Binding to pdfium happens once, in [`PdfiumTextSource::new`]; every
/// [`PageTextSource::page_texts`] call opens the document, reads all pages and
/// drops the document before returning.
pub struct PdfiumTextSource {
    pdfium: Pdfium,
}

impl PdfiumTextSource {
    /// Bind to pdfium, trying in order:
    ///
    /// 1. `PDFIUM_LIB_PATH`, when set and non-empty
    /// 2. the platform library file in the working directory
    /// 3. the system library search path
    pub fn new() -> Result<Self, AnalyzerError> {
        let bindings = match std::env::var("PDFIUM_LIB_PATH") {
            Ok(path) if !path.is_empty() => {
                debug!("Binding pdfium from PDFIUM_LIB_PATH={}", path);
                Pdfium::bind_to_library(&path)
            }
            _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| AnalyzerError::PdfiumBindingFailed(format!("{:?}", e)))?;

        info!("pdfium bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl PageTextSource for PdfiumTextSource {
    fn page_texts(&self, path: &Path) -> Result<PageTexts, DocumentError> {
        let unreadable = |e: PdfiumError| DocumentError::Unreadable {
            path: path.to_path_buf(),
            detail: format!("{:?}", e),
        };

        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(unreadable)?;

        let pages = document.pages();
        debug!("PDF loaded: {} pages", pages.len());

        let mut texts = PageTexts::new();
        for (idx, page) in pages.iter().enumerate() {
            let text = page.text().map_err(unreadable)?.all();
            if let Some(trimmed) = non_empty_trimmed(&text) {
                texts.insert(idx + 1, trimmed.to_string());
            } else {
                debug!("Page {} of {} has no text", idx + 1, path.display());
            }
        }

        Ok(texts)
    }
}

/// `Some(trimmed)` unless the text is whitespace only.
pub fn non_empty_trimmed(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
