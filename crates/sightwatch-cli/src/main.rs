//! CLI application for wildlife sighting report monitoring.

mod commands;
mod service;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, scan, watch};

/// Wildlife sighting monitor - turn a folder of PDF reports into a live JSON snapshot
#[derive(Parser)]
#[command(name = "sightwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the reports folder and keep the snapshot current (default)
    Watch(watch::WatchArgs),

    /// Scan the reports folder once and write the snapshot
    Scan(scan::ScanArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let monitor_config = commands::load_config(cli.config.as_deref())?;
    let log_file = cli.log_file.clone().or_else(|| monitor_config.log_file.clone());
    init_logging(cli.verbose, log_file.as_deref())?;

    // Execute command
    match cli.command {
        Some(Commands::Watch(args)) => watch::run(args, monitor_config).await,
        Some(Commands::Scan(args)) => scan::run(args, monitor_config).await,
        Some(Commands::Config(args)) => config::run(args, monitor_config).await,
        None => watch::run(watch::WatchArgs::default(), monitor_config).await,
    }
}

/// Console logging on stderr plus an optional plain-text log file.
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
