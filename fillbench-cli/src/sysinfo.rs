//! System Metadata Collection
//!
//! Host details recorded in every report: OS, architecture, CPU model,
//! processor count, timestamp. Linux-specific lookups degrade to "Unknown"
//! on other platforms.

use crate::executor::ExecutionConfig;
use chrono::Utc;
use fillbench_report::{ReportConfig, ReportMeta, SystemInfo};

/// Build report metadata for the current host and configuration.
pub fn build_report_meta(config: &ExecutionConfig) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: fillbench_core::detected_processors() as u32,
    };

    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        config: ReportConfig {
            iterations: config.iterations,
            buffer_len: config.buffer_len,
        },
    }
}

/// CPU model name from /proc/cpuinfo (Linux only).
fn cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_reflects_config_and_host() {
        let config = ExecutionConfig {
            iterations: 7,
            buffer_len: 128,
        };
        let meta = build_report_meta(&config);
        assert_eq!(meta.config.iterations, 7);
        assert_eq!(meta.config.buffer_len, 128);
        assert!(meta.system.cpu_cores >= 1);
        assert!(!meta.system.os.is_empty());
    }
}
