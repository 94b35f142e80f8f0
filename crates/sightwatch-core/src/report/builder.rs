//! Builds one status-tagged report per PDF file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};
use tracing::{error, info, warn};

use crate::models::report::{
    Report, ReportStatus, SightingFields, DEFAULT_URGENCY, ERROR, ERROR_URGENCY, UNKNOWN,
};
use crate::pdf::{PdfExtractor, TextExtractor};
use crate::sighting::{char_prefix, FieldParser, SightingParser, FREE_FORM_LIMIT};

/// Report id for a file name: the name without its extension.
pub fn report_id(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Combines text extraction, field parsing and file metadata.
///
/// [`ReportBuilder::build`] never fails: unreadable files become
/// `parsing_failed` reports and any other failure an `error` report.
pub struct ReportBuilder {
    extractor: Box<dyn TextExtractor>,
    parser: Box<dyn FieldParser>,
    preview_chars: usize,
}

impl ReportBuilder {
    /// Create a builder around the given text extractor.
    pub fn new(extractor: impl TextExtractor + 'static) -> Self {
        Self {
            extractor: Box::new(extractor),
            parser: Box::new(SightingParser::new()),
            preview_chars: FREE_FORM_LIMIT,
        }
    }

    /// Replace the field parser.
    pub fn with_parser(mut self, parser: impl FieldParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Set how many characters of extracted text are kept as a preview.
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Build the report for `path`.
    pub fn build(&self, path: &Path) -> Report {
        match self.try_build(path) {
            Ok(report) => report,
            Err(e) => {
                error!("Error processing {}: {}", path.display(), e);
                error_report(path, &e.to_string())
            }
        }
    }

    /// Build the report for `path`, surfacing I/O failures.
    pub fn try_build(&self, path: &Path) -> crate::Result<Report> {
        let filename = file_name(path);
        info!("Processing: {}", filename);

        let text = self.extractor.extract_text(path);
        info!("Extracted text length: {} characters", text.chars().count());

        let metadata = fs::metadata(path)?;
        let last_modified = DateTime::<Local>::from(metadata.modified()?).naive_local();
        let timestamp = now();

        if text.trim().is_empty() {
            warn!("No text extracted from {}", filename);
            let description = format!(
                "PDF file {} could not be parsed. Manual review required.",
                filename
            );
            return Ok(Report {
                id: report_id(&filename),
                filename,
                timestamp,
                fields: SightingFields::placeholder(UNKNOWN, DEFAULT_URGENCY, timestamp, description),
                file_path: path.display().to_string(),
                file_size: metadata.len(),
                last_modified,
                status: ReportStatus::ParsingFailed,
                raw_text_preview: None,
            });
        }

        let parsed = self.parser.parse(&text, &filename);
        info!("Successfully processed: {}", filename);

        Ok(Report {
            id: report_id(&filename),
            filename,
            timestamp,
            fields: parsed.fields,
            file_path: path.display().to_string(),
            file_size: metadata.len(),
            last_modified,
            status: ReportStatus::Processed,
            raw_text_preview: Some(char_prefix(&text, self.preview_chars).to_string()),
        })
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(PdfExtractor::new())
    }
}

fn error_report(path: &Path, message: &str) -> Report {
    let filename = file_name(path);
    let timestamp = now();

    Report {
        id: report_id(&filename),
        filename,
        timestamp,
        fields: SightingFields::placeholder(
            ERROR,
            ERROR_URGENCY,
            timestamp,
            format!("Error processing PDF: {}", message),
        ),
        file_path: path.display().to_string(),
        file_size: 0,
        last_modified: timestamp,
        status: ReportStatus::Error,
        raw_text_preview: None,
    }
}
