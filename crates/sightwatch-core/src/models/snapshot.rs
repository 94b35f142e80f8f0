//! Aggregated snapshot published for downstream consumers.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::report::{Report, ReportStatus};

/// All current reports plus publication metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Moment the snapshot was assembled.
    pub last_updated: NaiveDateTime,

    /// Number of entries in `reports`.
    pub total_reports: usize,

    /// Full report set of the last scan.
    pub reports: Vec<Report>,
}

impl Snapshot {
    /// Assemble a snapshot stamped with the current local time.
    pub fn new(reports: Vec<Report>) -> Self {
        Self::at(Local::now().naive_local(), reports)
    }

    /// Assemble a snapshot stamped with `last_updated`.
    pub fn at(last_updated: NaiveDateTime, reports: Vec<Report>) -> Self {
        Self {
            last_updated,
            total_reports: reports.len(),
            reports,
        }
    }

    /// Number of reports with the given status.
    pub fn count_status(&self, status: ReportStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }
}
