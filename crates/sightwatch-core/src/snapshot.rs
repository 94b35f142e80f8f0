//! Snapshot publishing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::models::report::Report;
use crate::models::snapshot::Snapshot;

/// Writes the aggregated snapshot as pretty-printed UTF-8 JSON.
///
/// Every write goes to its own temporary file next to the target and is
/// then renamed over it. Readers see either the previous snapshot or the
/// new one, even with several writers publishing at once.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    output_path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Stamp `reports` with the current time and write them.
    pub fn write(&self, reports: Vec<Report>) -> crate::Result<Snapshot> {
        let snapshot = Snapshot::new(reports);
        self.write_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    /// Write an assembled snapshot.
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> crate::Result<()> {
        let body = serde_json::to_string_pretty(snapshot)?;

        let parent = match self.output_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // Dropped (and removed) on any error below.
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        debug!("Wrote snapshot body to {}", tmp.path().display());

        tmp.persist(&self.output_path).map_err(|e| e.error)?;
        info!(
            "Saved {} reports to {}",
            snapshot.total_reports,
            self.output_path.display()
        );
        Ok(())
    }

    /// Read back the current snapshot file.
    pub fn read(&self) -> crate::Result<Snapshot> {
        let content = fs::read_to_string(&self.output_path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{ReportStatus, SightingFields};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn report(id: &str, observer: &str) -> Report {
        let at = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Report {
            id: id.to_string(),
            filename: format!("{}.pdf", id),
            timestamp: at,
            fields: SightingFields {
                observer_name: observer.to_string(),
                ..SightingFields::unparsed()
            },
            file_path: format!("/reports/{}.pdf", id),
            file_size: 42,
            last_modified: at,
            status: ReportStatus::Processed,
            raw_text_preview: Some("Observer Name: ...".to_string()),
        }
    }

    #[test]
    fn test_write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("public").join("monitoring_data.json"));

        let written = writer
            .write(vec![report("a", "Jane Doe"), report("b", "Zoë Ñúñez")])
            .unwrap();
        let read = writer.read().unwrap();

        assert_eq!(read, written);
        assert_eq!(read.total_reports, read.reports.len());
        assert_eq!(read.total_reports, 2);
    }

    #[test]
    fn test_output_is_indented_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("out.json"));
        writer.write(vec![report("a", "Zoë")]).unwrap();

        let raw = fs::read_to_string(writer.output_path()).unwrap();
        assert!(raw.contains("\"observer_name\": \"Zoë\""));
        assert!(raw.starts_with("{\n  \"last_updated\""));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path().join("out.json"));
        writer.write(Vec::new()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(writer.output_path()).unwrap()).unwrap();
        assert_eq!(value["total_reports"], 0);
        assert_eq!(value["reports"], serde_json::json!([]));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target cannot be replaced by a file.
        let target = dir.path().join("out.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(SnapshotWriter::new(&target).write(Vec::new()).is_err());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
        assert!(target.join("keep").exists());
    }

    #[test]
    fn test_concurrent_writers_always_leave_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        let body: Vec<Report> = (0..300)
            .map(|i| report(&format!("r{}", i), "Jane Doe"))
            .collect();

        std::thread::scope(|s| {
            let writers: Vec<_> = (0..4)
                .map(|_| {
                    let writer = SnapshotWriter::new(&target);
                    let body = body.clone();
                    s.spawn(move || {
                        (0..50)
                            .filter(|_| writer.write(body.clone()).is_err())
                            .count()
                    })
                })
                .collect();

            let reader = SnapshotWriter::new(&target);
            while writers.iter().any(|w| !w.is_finished()) {
                if target.exists() {
                    assert_eq!(reader.read().unwrap().total_reports, 300);
                }
            }

            let errors: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
            assert_eq!(errors, 0);
        });

        assert_eq!(SnapshotWriter::new(&target).read().unwrap().total_reports, 300);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
