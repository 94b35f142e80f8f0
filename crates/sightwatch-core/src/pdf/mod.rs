//! PDF processing module.

mod extractor;

pub use extractor::{LoadedPdf, PdfExtractor};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of raw report text.
///
/// Implementations are total: any read or decode failure is logged and
/// reported as an empty string so that callers can degrade the report
/// instead of aborting a scan.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the document at `path`, or `""` on failure.
    fn extract_text(&self, path: &Path) -> String;
}
