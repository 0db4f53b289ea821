//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata (system, configuration, timestamp)
    pub meta: ReportMeta,
    /// One entry per strategy, in registry order
    pub results: Vec<StrategyReportResult>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// UTC time the report was generated
    pub timestamp: DateTime<Utc>,
    /// Host details
    pub system: SystemInfo,
    /// Run configuration
    pub config: ReportConfig,
}

/// Host details captured with every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model string, "Unknown" where undetectable
    pub cpu: String,
    /// Detected hardware processor count
    pub cpu_cores: u32,
}

/// Run configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Timed trials per strategy
    pub iterations: u32,
    /// Buffer length in elements
    pub buffer_len: usize,
}

/// Final outcome of one strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    /// All trials ran and verified
    Completed,
    /// Capability probe reported the strategy inapplicable; no trial ran
    Skipped,
}

/// Aggregated result for one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReportResult {
    /// Strategy identifier
    pub id: String,
    /// Human-readable strategy name
    pub name: String,
    /// Final outcome
    pub status: StrategyStatus,
    /// Mean wall-clock seconds per trial; absent when skipped
    pub mean_seconds: Option<f64>,
    /// Mean raw cycles per trial; absent when skipped or when the platform
    /// has no cycle counter
    pub mean_cycles: Option<f64>,
    /// Trials this mean covers (0 when skipped)
    pub iterations: u32,
    /// Why the strategy was skipped, when it was
    pub skip_reason: Option<String>,
}
