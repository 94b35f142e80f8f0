//! Core library for wildlife sighting report monitoring.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - Heuristic field parsing of `Label: value` sighting reports
//! - Report building, directory scanning and processed-file bookkeeping
//! - JSON snapshot publishing for downstream dashboards

pub mod error;
pub mod models;
pub mod pdf;
pub mod sighting;
pub mod report;
pub mod snapshot;
pub mod monitor;

pub use error::{SightwatchError, Result};
pub use models::config::MonitorConfig;
pub use models::report::{Report, ReportStatus, SightingFields};
pub use models::snapshot::Snapshot;
pub use pdf::{PdfExtractor, TextExtractor};
pub use sighting::{FieldParser, SightingParser};
pub use report::{DirectoryScanner, ProcessedFiles, ReportBuilder};
pub use snapshot::SnapshotWriter;
pub use monitor::ReportMonitor;
