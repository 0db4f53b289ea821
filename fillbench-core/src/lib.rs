#![warn(missing_docs)]
//! Fillbench Core
//!
//! This crate provides everything the benchmark driver measures and measures
//! with:
//! - `Timer` for monotonic wall-clock timing (with hardware cycle counts
//!   where the platform provides them)
//! - `TrialBuffer`, the per-trial owned buffer with fallible allocation
//! - the sequential-fill verifier
//! - `FillStrategy` descriptors and the fill implementations themselves

mod buffer;
mod measure;
mod strategy;
pub mod strategies;
mod verify;

pub use buffer::{AllocError, TrialBuffer};
pub use measure::{pin_to_cpu, Timer, TrialTiming, HAS_CYCLE_COUNTER};
pub use strategy::{registry, Availability, FillStrategy};
pub use verify::{first_divergence, is_sequential_fill};

/// Buffer length of the reference configuration (elements).
pub const DEFAULT_BUFFER_LEN: usize = 10_000_000;

/// Timed trials per strategy in the reference configuration.
pub const DEFAULT_ITERATIONS: u32 = 50;

/// Number of hardware processors visible to this process.
///
/// Falls back to 1 when the query fails (e.g. restricted sandboxes), so
/// partitioning strategies always have at least one worker.
pub fn detected_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
