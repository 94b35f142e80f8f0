//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, error, info, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf (loading, decryption) and
/// pdf-extract (text decoding).
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

/// A parsed PDF ready for text decoding.
#[derive(Debug, Clone)]
pub struct LoadedPdf {
    /// Number of pages in the document.
    pub page_count: usize,
    /// Document bytes, decrypted if the source used an empty password.
    pub data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Parse PDF bytes, decrypting documents protected by an empty password.
    pub fn load(&self, data: &[u8]) -> Result<LoadedPdf> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes, not the original stream
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(LoadedPdf { page_count, data })
    }

    /// Decode the text of every page.
    ///
    /// pdf-extract panics on some malformed content streams; a panic is
    /// reported as a text extraction error.
    pub fn extract_pages(&self, pdf: &LoadedPdf) -> Result<Vec<String>> {
        let decoded = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&pdf.data)
        }))
        .map_err(|_| PdfError::TextExtraction("text decoder panicked".to_string()))?;

        decoded.map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Read and decode a PDF file, concatenating page texts with a
    /// trailing newline after each page.
    pub fn try_extract_text(&self, path: &Path) -> crate::Result<String> {
        info!("Attempting to read PDF: {}", path.display());

        let data = fs::read(path)?;
        let pdf = self.load(&data)?;
        info!("PDF has {} pages", pdf.page_count);

        let pages = self.extract_pages(&pdf)?;
        let mut text = String::new();
        for (i, page_text) in pages.iter().enumerate() {
            trace!("Page {} extracted {} characters", i + 1, page_text.chars().count());
            text.push_str(page_text);
            text.push('\n');
        }

        info!("Total extracted text: {} characters", text.chars().count());
        Ok(text)
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> String {
        match self.try_extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                error!("Error reading PDF {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}
