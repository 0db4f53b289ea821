#![warn(missing_docs)]
//! Fillbench Report
//!
//! Report data structures and the two output renderers:
//! - human-readable terminal text
//! - JSON (machine-readable, serde)

mod human;
mod json;
mod report;

pub use human::format_human_output;
pub use json::generate_json_report;
pub use report::{
    Report, ReportConfig, ReportMeta, StrategyReportResult, StrategyStatus, SystemInfo,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Machine-readable JSON
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
