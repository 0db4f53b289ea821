//! Fill-Strategy Implementations
//!
//! Each function fills `buf[i] = i` with a different decomposition policy.
//! All of them are synchronous barriers: internal threads, tasks, or device
//! work are fully joined before the function returns.

mod device;
mod parallel;
mod serial;

pub use device::{device_availability, device_offload};
pub use parallel::{
    elementwise, four_way_split, par_index_loop, scheduler_pool, static_partition,
    thread_per_core,
};
pub use serial::{generator, sequential};
