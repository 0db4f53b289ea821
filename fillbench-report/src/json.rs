//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::*;

    #[test]
    fn report_survives_serialization() {
        let report = Report {
            meta: ReportMeta {
                version: "0.1.0".to_string(),
                timestamp: chrono::Utc::now(),
                system: SystemInfo {
                    os: "linux".to_string(),
                    arch: "x86_64".to_string(),
                    cpu: "test".to_string(),
                    cpu_cores: 8,
                },
                config: ReportConfig {
                    iterations: 5,
                    buffer_len: 1024,
                },
            },
            results: vec![StrategyReportResult {
                id: "seq_loop".to_string(),
                name: "sequential for loop".to_string(),
                status: StrategyStatus::Completed,
                mean_seconds: Some(0.001),
                mean_cycles: None,
                iterations: 5,
                skip_reason: None,
            }],
        };

        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].status, StrategyStatus::Completed);
        assert_eq!(parsed.meta.config.iterations, 5);
    }
}
