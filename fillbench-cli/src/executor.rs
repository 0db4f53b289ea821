//! Benchmark Driver
//!
//! Runs every strategy through the same measurement protocol, strictly
//! sequentially: allocate a fresh buffer, time the fill, verify the result,
//! accumulate, release. Strategies and iterations never overlap, so one
//! strategy's internal concurrency cannot contaminate another's timing.
//!
//! ```text
//! FillStrategy (from registry)
//!       │
//!       ▼
//! availability probe ──unavailable──▶ Skipped result
//!       │ ready
//!       ▼
//! per iteration: allocate → Timer → fill → verify → accumulate → drop
//!       │
//!       ▼
//! StrategyRunResult (mean over all iterations)
//! ```
//!
//! A failed verification or allocation aborts the whole run with a typed
//! error; results for strategies that already completed stay queryable so
//! the caller can still report them.

use fillbench_core::{
    first_divergence, is_sequential_fill, Availability, FillStrategy, Timer, TrialBuffer,
    HAS_CYCLE_COUNTER,
};
use fillbench_report::{Report, ReportMeta, StrategyReportResult, StrategyStatus};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

/// Configuration for one run
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Timed trials per strategy
    pub iterations: u32,
    /// Buffer length in elements
    pub buffer_len: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: fillbench_core::DEFAULT_ITERATIONS,
            buffer_len: fillbench_core::DEFAULT_BUFFER_LEN,
        }
    }
}

/// Fatal run outcome. Neither case is retried; the top-level loop decides
/// termination and the exit code.
#[derive(Debug, Error)]
pub enum RunError {
    /// A trial buffer could not be allocated.
    #[error(transparent)]
    Allocation(#[from] fillbench_core::AllocError),
    /// A strategy produced a buffer that is not the sequence `0..len`.
    #[error("{strategy} failed!")]
    Verification {
        /// Name of the failing strategy.
        strategy: String,
    },
}

/// Aggregated outcome for one strategy
#[derive(Debug, Clone)]
pub struct StrategyRunResult {
    /// Strategy identifier
    pub id: String,
    /// Human-readable strategy name
    pub name: String,
    /// Completed or Skipped
    pub status: StrategyStatus,
    /// Mean wall-clock seconds per trial
    pub mean_seconds: Option<f64>,
    /// Mean raw cycles per trial, where the platform counts them
    pub mean_cycles: Option<f64>,
    /// Trials the mean covers
    pub iterations: u32,
    /// Probe reason when skipped
    pub skip_reason: Option<String>,
}

/// Execute strategies and accumulate per-strategy results
pub struct Executor {
    config: ExecutionConfig,
    results: Vec<StrategyRunResult>,
}

impl Executor {
    /// Create a driver for the given configuration.
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            results: Vec::new(),
        }
    }

    /// Run all strategies in order. Returns the full result list on
    /// success; aborts on the first fatal error, leaving already-completed
    /// results readable via [`Executor::completed`].
    pub fn execute(&mut self, strategies: &[FillStrategy]) -> Result<&[StrategyRunResult], RunError> {
        let pb = ProgressBar::new(strategies.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for strategy in strategies {
            pb.set_message(strategy.id.to_string());
            match (strategy.availability)() {
                Availability::Unavailable { reason } => {
                    tracing::info!(strategy = strategy.id, %reason, "strategy inapplicable, skipping");
                    self.results.push(StrategyRunResult {
                        id: strategy.id.to_string(),
                        name: strategy.name.to_string(),
                        status: StrategyStatus::Skipped,
                        mean_seconds: None,
                        mean_cycles: None,
                        iterations: 0,
                        skip_reason: Some(reason),
                    });
                }
                Availability::Ready => {
                    let result = self.run_strategy(strategy)?;
                    self.results.push(result);
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(&self.results)
    }

    /// Run every iteration of one strategy and aggregate its timings.
    fn run_strategy(&self, strategy: &FillStrategy) -> Result<StrategyRunResult, RunError> {
        let mut total_seconds = 0.0f64;
        let mut total_cycles = 0u64;

        for iteration in 0..self.config.iterations {
            // Fresh buffer per trial, dropped unconditionally at scope end.
            let mut buffer = TrialBuffer::allocate(self.config.buffer_len)?;

            let timer = Timer::start();
            (strategy.fill)(buffer.as_mut_slice());
            let timing = timer.stop();

            if !is_sequential_fill(buffer.as_slice(), self.config.buffer_len) {
                tracing::error!(
                    strategy = strategy.id,
                    iteration,
                    divergence = ?first_divergence(buffer.as_slice()),
                    "fill verification failed"
                );
                return Err(RunError::Verification {
                    strategy: strategy.name.to_string(),
                });
            }

            total_seconds += timing.seconds;
            total_cycles += timing.cycles;
            tracing::debug!(
                strategy = strategy.id,
                iteration,
                seconds = timing.seconds,
                "trial verified"
            );
        }

        let trials = f64::from(self.config.iterations.max(1));
        Ok(StrategyRunResult {
            id: strategy.id.to_string(),
            name: strategy.name.to_string(),
            status: StrategyStatus::Completed,
            mean_seconds: Some(total_seconds / trials),
            mean_cycles: HAS_CYCLE_COUNTER.then_some(total_cycles as f64 / trials),
            iterations: self.config.iterations,
            skip_reason: None,
        })
    }

    /// Results for strategies that finished (or were skipped) so far.
    pub fn completed(&self) -> &[StrategyRunResult] {
        &self.results
    }
}

/// Assemble the final report from driver results.
pub fn build_report(meta: ReportMeta, results: &[StrategyRunResult]) -> Report {
    Report {
        meta,
        results: results
            .iter()
            .map(|r| StrategyReportResult {
                id: r.id.clone(),
                name: r.name.clone(),
                status: r.status,
                mean_seconds: r.mean_seconds,
                mean_cycles: r.mean_cycles,
                iterations: r.iterations,
                skip_reason: r.skip_reason.clone(),
            })
            .collect(),
    }
}
