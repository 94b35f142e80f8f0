//! Non-recursive scan of the reports directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::builder::ReportBuilder;
use crate::models::report::Report;

/// Whether `path` names a PDF by extension (case-insensitive).
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Lists and processes the PDF files of one directory.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    dir: PathBuf,
}

impl DirectoryScanner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// PDF files directly inside the directory, in listing order.
    ///
    /// A missing directory yields an empty list.
    pub fn list_pdfs(&self) -> std::io::Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            warn!("Reports folder does not exist: {}", self.dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.dir.display(), e);
                    continue;
                }
            };
            if is_pdf(&path) && path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Build one report per PDF file. Never fails: listing errors are
    /// logged and produce an empty set.
    pub fn scan(&self, builder: &ReportBuilder) -> Vec<Report> {
        let files = match self.list_pdfs() {
            Ok(files) => files,
            Err(e) => {
                error!("Failed to list {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };
        info!("Found {} PDF files to process", files.len());

        let reports: Vec<Report> = files.iter().map(|path| builder.build(path)).collect();

        info!("Total reports collected: {}", reports.len());
        reports
    }
}
