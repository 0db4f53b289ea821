//! Human-Readable Output
//!
//! One header line with the detected processor count and iteration count,
//! then one line per strategy: `<name>: <mean seconds>`, or a skip marker
//! with the probe's reason.

use crate::report::{Report, StrategyStatus};

/// Render a report for terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Number of processors: {}, number of iterations: {}\n",
        report.meta.system.cpu_cores, report.meta.config.iterations
    ));

    let pad = report
        .results
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);

    for result in &report.results {
        match result.status {
            StrategyStatus::Completed => {
                output.push_str(&format!(
                    "{:<pad$}: {:.8}\n",
                    result.name,
                    result.mean_seconds.unwrap_or_default(),
                ));
            }
            StrategyStatus::Skipped => {
                let reason = result.skip_reason.as_deref().unwrap_or("unavailable");
                output.push_str(&format!("{:<pad$}: skipped ({})\n", result.name, reason));
            }
        }
    }

    output
}
