//! Configuration for the report monitor.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable naming the watched reports directory.
pub const ENV_REPORTS_PATH: &str = "REPORTS_PATH";
/// Environment variable naming the snapshot file.
pub const ENV_OUTPUT_PATH: &str = "OUTPUT_PATH";
/// Environment variable holding the rescan interval in seconds.
pub const ENV_POLL_INTERVAL: &str = "POLL_INTERVAL";
/// Environment variable naming an optional log file.
pub const ENV_LOG_FILE: &str = "LOG_FILE";

/// Main configuration for the monitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Directory watched for PDF reports (non-recursive).
    pub reports_path: PathBuf,

    /// Snapshot JSON file.
    pub output_path: PathBuf,

    /// Seconds between forced rescans.
    pub poll_interval_secs: u64,

    /// Seconds to pause after a failed cycle.
    pub error_backoff_secs: u64,

    /// Characters of extracted text kept as `raw_text_preview`.
    pub preview_chars: usize,

    /// Append log lines to this file in addition to the console.
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reports_path: PathBuf::from("./src/reports"),
            output_path: PathBuf::from("./public/monitoring_data.json"),
            poll_interval_secs: 2,
            error_backoff_secs: 5,
            preview_chars: 500,
            log_file: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables supplied by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_REPORTS_PATH) {
            self.reports_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_OUTPUT_PATH) {
            self.output_path = PathBuf::from(path);
        }
        if let Some(value) = get(ENV_POLL_INTERVAL) {
            self.poll_interval_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_POLL_INTERVAL.to_string(),
                    value: value.clone(),
                })?;
        }
        if let Some(path) = get(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "poll_interval_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        if self.reports_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "reports_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "output_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve relative paths against `base`.
    pub fn absolutize(&mut self, base: &Path) {
        for path in [&mut self.reports_path, &mut self.output_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(log_file) = self.log_file.as_mut() {
            if log_file.is_relative() {
                *log_file = base.join(&*log_file);
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.reports_path, PathBuf::from("./src/reports"));
        assert_eq!(config.output_path, PathBuf::from("./public/monitoring_data.json"));
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.error_backoff(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = MonitorConfig::default();
        config
            .apply_env(env(&[
                ("REPORTS_PATH", "/data/reports"),
                ("OUTPUT_PATH", "/srv/out.json"),
                ("POLL_INTERVAL", " 10 "),
                ("LOG_FILE", ""),
            ]))
            .unwrap();

        assert_eq!(config.reports_path, PathBuf::from("/data/reports"));
        assert_eq!(config.output_path, PathBuf::from("/srv/out.json"));
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_invalid_poll_interval() {
        let mut config = MonitorConfig::default();
        let err = config.apply_env(env(&[("POLL_INTERVAL", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref var, .. } if var == "POLL_INTERVAL"));

        config.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_absolutize() {
        let mut config = MonitorConfig {
            output_path: PathBuf::from("/abs/out.json"),
            log_file: Some(PathBuf::from("monitor.log")),
            ..MonitorConfig::default()
        };
        config.absolutize(Path::new("/work"));

        assert_eq!(config.reports_path, PathBuf::from("/work/./src/reports"));
        assert_eq!(config.output_path, PathBuf::from("/abs/out.json"));
        assert_eq!(config.log_file, Some(PathBuf::from("/work/monitor.log")));
    }

    #[test]
    fn test_file_roundtrip_with_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "poll_interval_secs": 30 }"#).unwrap();

        let config = MonitorConfig::from_file(&path).unwrap();
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.preview_chars, 500);

        config.save(&path).unwrap();
        assert_eq!(MonitorConfig::from_file(&path).unwrap(), config);
    }
}
