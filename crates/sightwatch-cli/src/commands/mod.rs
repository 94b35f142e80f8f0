//! Subcommands and the configuration layering they share.

pub mod config;
pub mod scan;
pub mod watch;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use sightwatch_core::MonitorConfig;

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sightwatch")
        .join("config.json")
}

/// Defaults, then the config file (explicit or default location), then the
/// environment.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<MonitorConfig> {
    let mut config = match config_path {
        Some(path) => MonitorConfig::from_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                MonitorConfig::from_file(&path)?
            } else {
                MonitorConfig::default()
            }
        }
    };

    config.apply_env(|var| std::env::var(var).ok())?;
    Ok(config)
}

/// Command-line overrides of the environment-sourced settings.
#[derive(Args, Debug, Default)]
pub struct PathOverrides {
    /// Folder watched for PDF reports [env: REPORTS_PATH]
    #[arg(long)]
    reports_path: Option<PathBuf>,

    /// Snapshot JSON file [env: OUTPUT_PATH]
    #[arg(long)]
    output_path: Option<PathBuf>,

    /// Seconds between forced rescans [env: POLL_INTERVAL]
    #[arg(long)]
    poll_interval: Option<u64>,
}

impl PathOverrides {
    /// Apply overrides, resolve relative paths and validate.
    pub fn finalize(&self, mut config: MonitorConfig) -> anyhow::Result<MonitorConfig> {
        if let Some(path) = &self.reports_path {
            config.reports_path = path.clone();
        }
        if let Some(path) = &self.output_path {
            config.output_path = path.clone();
        }
        if let Some(secs) = self.poll_interval {
            config.poll_interval_secs = secs;
        }

        config.absolutize(&std::env::current_dir()?);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_and_paths_become_absolute() {
        let overrides = PathOverrides {
            reports_path: Some(PathBuf::from("inbox")),
            output_path: Some(PathBuf::from("/tmp/snapshot.json")),
            poll_interval: Some(9),
        };

        let config = overrides.finalize(MonitorConfig::default()).unwrap();

        assert!(config.reports_path.is_absolute());
        assert!(config.reports_path.ends_with("inbox"));
        assert_eq!(config.output_path, PathBuf::from("/tmp/snapshot.json"));
        assert_eq!(config.poll_interval_secs, 9);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let overrides = PathOverrides {
            poll_interval: Some(0),
            ..PathOverrides::default()
        };
        assert!(overrides.finalize(MonitorConfig::default()).is_err());
    }
}
