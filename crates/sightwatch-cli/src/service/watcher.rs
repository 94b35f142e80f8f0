//! Filesystem change watcher for the reports folder.

use std::path::PathBuf;
use std::sync::Arc;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

use sightwatch_core::report::is_pdf;
use sightwatch_core::ReportMonitor;

use super::poll::run_cycle;
use super::ShutdownSignal;

const EVENT_BUFFER: usize = 100;

/// A PDF-level change derived from a raw notify event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// A PDF appeared (created, or renamed into the folder).
    Created(PathBuf),
    /// An existing PDF was written to.
    Modified(PathBuf),
}

/// Map a notify event to the PDF changes it describes.
pub fn classify(event: &Event) -> Vec<FileChange> {
    let make: fn(PathBuf) -> FileChange = match event.kind {
        EventKind::Create(_) => FileChange::Created,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => FileChange::Created,
        EventKind::Modify(_) => FileChange::Modified,
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .filter(|p| is_pdf(p) && !p.is_dir())
        .cloned()
        .map(make)
        .collect()
}

/// React to one change.
///
/// A new file gets its report built right away, followed by a full
/// rescan and publish so the snapshot stays authoritative. A modified
/// file is only dropped from the processed bookkeeping.
pub async fn handle(monitor: &Arc<ReportMonitor>, change: FileChange) -> Result<(), JoinError> {
    match change {
        FileChange::Created(path) => {
            info!("New PDF detected: {}", path.display());
            let worker = Arc::clone(monitor);
            let report = tokio::task::spawn_blocking(move || worker.process_file(&path)).await?;
            info!("Built report {} with status {}", report.id, report.status);
            run_cycle(monitor).await?;
        }
        FileChange::Modified(path) => {
            info!("PDF modified: {}", path.display());
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                monitor.forget(name);
            }
        }
    }
    Ok(())
}

/// Install a non-recursive watch on the reports folder and spawn the task
/// handling its events. Dropping out of the task on shutdown releases the
/// OS subscription.
pub fn spawn(
    monitor: Arc<ReportMonitor>,
    mut shutdown: ShutdownSignal,
) -> notify::Result<JoinHandle<()>> {
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Err(e) = tx.blocking_send(res) {
            error!("Failed to send file event: {:?}", e);
        }
    })?;

    let dir = monitor.config().reports_path.clone();
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!("Watching {} for new and modified PDFs", dir.display());

    Ok(tokio::spawn(async move {
        // keep watcher alive
        let _watcher = watcher;

        loop {
            let res = tokio::select! {
                _ = shutdown.wait() => break,
                res = rx.recv() => res,
            };
            if shutdown.is_triggered() {
                break;
            }

            match res {
                Some(Ok(event)) => {
                    for change in classify(&event) {
                        if let Err(e) = handle(&monitor, change).await {
                            error!("Error handling file event: {}", e);
                        }
                    }
                }
                Some(Err(e)) => warn!("Watch error: {:?}", e),
                None => break,
            }
        }

        info!("Change watcher stopped");
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, RemoveKind};
    use pretty_assertions::assert_eq;
    use sightwatch_core::{MonitorConfig, ReportStatus, SnapshotWriter};
    use std::path::Path;

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |event, p| event.add_path(PathBuf::from(p)))
    }

    fn monitor(root: &Path) -> Arc<ReportMonitor> {
        let monitor = ReportMonitor::new(MonitorConfig {
            reports_path: root.join("reports"),
            output_path: root.join("out.json"),
            ..MonitorConfig::default()
        });
        monitor.prepare_dirs().unwrap();
        Arc::new(monitor)
    }

    #[test]
    fn test_classify_filters_pdfs() {
        let created = event(
            EventKind::Create(CreateKind::File),
            &["/r/a.pdf", "/r/notes.txt", "/r/B.PDF"],
        );
        assert_eq!(
            classify(&created),
            vec![
                FileChange::Created(PathBuf::from("/r/a.pdf")),
                FileChange::Created(PathBuf::from("/r/B.PDF")),
            ]
        );
    }

    #[test]
    fn test_classify_kinds() {
        let modified = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/r/a.pdf"],
        );
        assert_eq!(
            classify(&modified),
            vec![FileChange::Modified(PathBuf::from("/r/a.pdf"))]
        );

        let moved_in = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            &["/r/a.pdf"],
        );
        assert_eq!(
            classify(&moved_in),
            vec![FileChange::Created(PathBuf::from("/r/a.pdf"))]
        );

        assert!(classify(&event(EventKind::Remove(RemoveKind::File), &["/r/a.pdf"])).is_empty());
        assert!(classify(&event(EventKind::Access(AccessKind::Any), &["/r/a.pdf"])).is_empty());
    }

    #[tokio::test]
    async fn test_created_file_triggers_full_publish() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(dir.path());
        let reports = dir.path().join("reports");
        std::fs::write(reports.join("old.pdf"), b"garbage").unwrap();
        std::fs::write(reports.join("new.pdf"), b"garbage").unwrap();

        handle(&monitor, FileChange::Created(reports.join("new.pdf")))
            .await
            .unwrap();

        let snapshot = SnapshotWriter::new(dir.path().join("out.json")).read().unwrap();
        assert_eq!(snapshot.total_reports, 2);
        assert_eq!(snapshot.count_status(ReportStatus::ParsingFailed), 2);
    }

    #[tokio::test]
    async fn test_modified_file_is_forgotten() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(dir.path());
        monitor.processed().insert("a.pdf");

        handle(&monitor, FileChange::Modified(dir.path().join("reports").join("a.pdf")))
            .await
            .unwrap();

        assert!(!monitor.processed().contains("a.pdf"));
        assert!(!dir.path().join("out.json").exists());
    }
}
