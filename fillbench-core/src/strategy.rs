//! Strategy Descriptors
//!
//! A strategy is one interchangeable algorithm for filling the buffer with
//! sequential values. The set of strategies is constructed explicitly by
//! [`registry`] and handed to the driver; there is no process-wide mutable
//! registration.

use crate::strategies;

/// Whether a strategy can run in the current process/environment.
///
/// Pass/fail alone is not enough here: a strategy whose backing capability
/// is absent (no compute device, feature compiled out) is *inapplicable*,
/// which the driver reports distinctly from success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The strategy can run.
    Ready,
    /// The strategy cannot run here; the reason is surfaced in reports.
    Unavailable {
        /// Human-readable explanation shown next to the skip marker.
        reason: String,
    },
}

impl Availability {
    /// True when the strategy can run.
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready)
    }

    /// The skip reason, when unavailable.
    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            Availability::Ready => None,
            Availability::Unavailable { reason } => Some(reason),
        }
    }
}

/// One buffer-fill algorithm under measurement.
///
/// The fill fn must leave `buf[i] == i` for every index before returning,
/// and must fully join any internal concurrency first: the verifier runs
/// immediately after the call with no further synchronization. Internal
/// workers must write disjoint index ranges.
pub struct FillStrategy {
    /// Short identifier used for filtering and logging.
    pub id: &'static str,
    /// Human-readable name used in reports.
    pub name: &'static str,
    /// Capability probe, queried once per run before any trial.
    pub availability: fn() -> Availability,
    /// The unit of work.
    pub fill: fn(&mut [u32]),
}

fn always_ready() -> Availability {
    Availability::Ready
}

/// Build the ordered strategy list for a run.
///
/// Order is part of the interface: serial baselines first, then the
/// CPU-parallel decompositions, with the scheduler-pool variant last.
pub fn registry() -> Vec<FillStrategy> {
    vec![
        FillStrategy {
            id: "seq_loop",
            name: "sequential for loop",
            availability: always_ready,
            fill: strategies::sequential,
        },
        FillStrategy {
            id: "generator",
            name: "generator fill",
            availability: always_ready,
            fill: strategies::generator,
        },
        FillStrategy {
            id: "static_partition",
            name: "static partition parallel for",
            availability: always_ready,
            fill: strategies::static_partition,
        },
        FillStrategy {
            id: "four_way_split",
            name: "four-way split",
            availability: always_ready,
            fill: strategies::four_way_split,
        },
        FillStrategy {
            id: "elementwise",
            name: "parallel elementwise transform",
            availability: always_ready,
            fill: strategies::elementwise,
        },
        FillStrategy {
            id: "device_offload",
            name: "device offload",
            availability: strategies::device_availability,
            fill: strategies::device_offload,
        },
        FillStrategy {
            id: "thread_per_core",
            name: "thread per core",
            availability: always_ready,
            fill: strategies::thread_per_core,
        },
        FillStrategy {
            id: "par_index_loop",
            name: "parallel index loop",
            availability: always_ready,
            fill: strategies::par_index_loop,
        },
        FillStrategy {
            id: "scheduler_pool",
            name: "scheduler pool fill",
            availability: always_ready,
            fill: strategies::scheduler_pool,
        },
    ]
}
