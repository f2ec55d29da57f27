//! PDF text extraction behind a trait seam.
//!
//! Uses [`pdf_extract`] to pull per-page text out of a PDF. Since
//! `pdf_extract` can panic on malformed input (rather than returning
//! errors), the call is wrapped in [`std::panic::catch_unwind`] so one bad
//! file degrades to "no text" instead of taking down the whole batch.
//!
//! The [`TextExtractor`] trait exists so callers (and tests) can inject a
//! different backend through [`crate::config::ExtractConfig`]; production
//! code always uses [`PdfExtractBackend`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, warn};

/// Per-file text extraction.
///
/// Implementations must not fail hard: a file that cannot be read or parsed
/// yields an empty page list, and the batch driver treats that as a skipped
/// record.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of each page, in page order.
    fn extract_pages(&self, path: &Path) -> Vec<String>;
}

/// The default backend, built on the `pdf_extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractBackend;

impl TextExtractor for PdfExtractBackend {
    fn extract_pages(&self, path: &Path) -> Vec<String> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to read '{}': {}", path.display(), e);
                return Vec::new();
            }
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&data)
        }));

        match result {
            Ok(Ok(pages)) => {
                debug!("Extracted {} pages from '{}'", pages.len(), path.display());
                pages
            }
            Ok(Err(e)) => {
                warn!("Text extraction failed for '{}': {}", path.display(), e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "Text extraction panicked for '{}' (malformed document)",
                    path.display()
                );
                Vec::new()
            }
        }
    }
}
