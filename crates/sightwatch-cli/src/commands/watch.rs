//! Watch command - continuous monitoring until Ctrl-C.

use std::sync::Arc;

use clap::Args;
use console::style;
use tracing::{info, warn};

use sightwatch_core::{MonitorConfig, ReportMonitor};

use super::PathOverrides;
use crate::service::{poll, watcher, Shutdown};

/// Arguments for the watch command.
#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    paths: PathOverrides,

    /// Rely on periodic rescans only, without filesystem notifications
    #[arg(long)]
    no_notify: bool,
}

pub async fn run(args: WatchArgs, config: MonitorConfig) -> anyhow::Result<()> {
    let config = args.paths.finalize(config)?;

    println!("{} Wildlife report monitoring", style("ℹ").blue());
    println!("   Reports folder: {}", config.reports_path.display());
    println!("   Snapshot file:  {}", config.output_path.display());
    println!("   Press Ctrl+C to stop monitoring");

    let monitor = Arc::new(ReportMonitor::new(config));
    monitor.prepare_dirs()?;

    let shutdown = Shutdown::new();

    let watcher_task = if args.no_notify {
        info!("Filesystem notifications disabled, polling only");
        None
    } else {
        match watcher::spawn(Arc::clone(&monitor), shutdown.subscribe()) {
            Ok(task) => Some(task),
            Err(e) => {
                warn!("Could not watch reports folder, polling only: {}", e);
                None
            }
        }
    };

    let poll_task = tokio::spawn(poll::run(Arc::clone(&monitor), shutdown.subscribe()));

    tokio::signal::ctrl_c().await?;
    info!("Monitoring stopped by user");
    shutdown.trigger();

    poll_task.await?;
    if let Some(task) = watcher_task {
        task.await?;
    }

    println!("{} Monitoring stopped", style("✓").green());
    Ok(())
}
