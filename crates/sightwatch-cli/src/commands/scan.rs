//! Scan command - one scan cycle, then exit.

use std::time::Instant;

use clap::Args;
use console::style;

use sightwatch_core::{MonitorConfig, ReportMonitor, ReportStatus, Snapshot, SnapshotWriter};

use super::PathOverrides;

/// Arguments for the scan command.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    #[command(flatten)]
    paths: PathOverrides,

    /// Print the snapshot to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,
}

pub async fn run(args: ScanArgs, config: MonitorConfig) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = args.paths.finalize(config)?;
    let output_path = config.output_path.clone();

    let monitor = ReportMonitor::new(config);
    let reports = tokio::task::spawn_blocking(move || monitor.scan()).await?;

    if args.stdout {
        let snapshot = Snapshot::new(reports);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let snapshot = SnapshotWriter::new(&output_path).write(reports)?;

    println!(
        "{} Scanned {} reports in {:?}",
        style("✓").green(),
        snapshot.total_reports,
        start.elapsed()
    );
    println!(
        "   {} processed, {} parsing failed, {} errors",
        style(snapshot.count_status(ReportStatus::Processed)).green(),
        style(snapshot.count_status(ReportStatus::ParsingFailed)).yellow(),
        style(snapshot.count_status(ReportStatus::Error)).red()
    );

    let needs_review: Vec<_> = snapshot.reports.iter().filter(|r| r.needs_review()).collect();
    if !needs_review.is_empty() {
        println!();
        println!("{}", style("Needs review:").yellow());
        for report in needs_review {
            println!("  - {} ({})", report.filename, report.status);
        }
    }

    println!("   Snapshot written to {}", output_path.display());
    Ok(())
}
