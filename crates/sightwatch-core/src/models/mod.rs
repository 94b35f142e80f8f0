//! Data models: reports, snapshots and monitor configuration.

pub mod config;
pub mod report;
pub mod snapshot;
