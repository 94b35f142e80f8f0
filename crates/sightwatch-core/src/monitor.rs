//! Report monitor: one scan-and-publish pipeline shared by the poll loop
//! and the filesystem watcher.

use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::models::config::MonitorConfig;
use crate::models::report::{Report, ReportStatus};
use crate::models::snapshot::Snapshot;
use crate::pdf::{PdfExtractor, TextExtractor};
use crate::report::{DirectoryScanner, ProcessedFiles, ReportBuilder};
use crate::sighting::SightingParser;
use crate::snapshot::SnapshotWriter;

/// Scans the reports directory and publishes snapshots.
///
/// Every method is safe to call from several threads at once; each
/// publish recomputes the full report set, so the last writer wins.
pub struct ReportMonitor {
    config: MonitorConfig,
    scanner: DirectoryScanner,
    builder: ReportBuilder,
    writer: SnapshotWriter,
    processed: ProcessedFiles,
}

impl ReportMonitor {
    /// Create a monitor reading PDFs with [`PdfExtractor`].
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_extractor(config, PdfExtractor::new())
    }

    /// Create a monitor with a custom text extractor.
    pub fn with_extractor(config: MonitorConfig, extractor: impl TextExtractor + 'static) -> Self {
        let builder = ReportBuilder::new(extractor)
            .with_parser(SightingParser::new().with_free_form_limit(config.preview_chars))
            .with_preview_chars(config.preview_chars);

        Self {
            scanner: DirectoryScanner::new(&config.reports_path),
            writer: SnapshotWriter::new(&config.output_path),
            builder,
            processed: ProcessedFiles::new(),
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn processed(&self) -> &ProcessedFiles {
        &self.processed
    }

    /// Create the reports directory and the snapshot's parent directory.
    pub fn prepare_dirs(&self) -> crate::Result<()> {
        fs::create_dir_all(&self.config.reports_path)?;
        if let Some(parent) = self.config.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        info!("Monitoring folder: {}", self.config.reports_path.display());
        info!("Output file: {}", self.config.output_path.display());
        Ok(())
    }

    /// Build the report for a single file and record it as processed.
    pub fn process_file(&self, path: &Path) -> Report {
        let report = self.builder.build(path);
        self.record(&report);
        report
    }

    /// Full rescan: every PDF is reprocessed, whatever the bookkeeping says.
    pub fn scan(&self) -> Vec<Report> {
        self.processed.clear();
        info!("Cleared processed files cache for fresh scan");

        let reports = self.scanner.scan(&self.builder);
        for report in &reports {
            self.record(report);
        }
        reports
    }

    /// Write a snapshot of `reports`. Failures are logged, not returned.
    pub fn publish(&self, reports: Vec<Report>) -> Option<Snapshot> {
        match self.writer.write(reports) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!("Error saving monitoring data: {}", e);
                None
            }
        }
    }

    /// One scan cycle: rescan and publish. Returns the number of reports.
    pub fn refresh(&self) -> usize {
        let reports = self.scan();
        let count = reports.len();
        if count > 0 {
            info!(
                "Found and processed {} reports ({} tracked as processed)",
                count,
                self.processed.len()
            );
        }
        self.publish(reports);
        count
    }

    /// Drop a file from the bookkeeping set so it counts as fresh.
    pub fn forget(&self, filename: &str) -> bool {
        self.processed.remove(filename)
    }

    fn record(&self, report: &Report) {
        if report.status != ReportStatus::Error {
            self.processed.insert(report.filename.clone());
        }
    }
}
