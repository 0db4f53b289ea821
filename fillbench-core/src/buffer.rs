//! Per-Trial Buffer
//!
//! Each trial owns a freshly allocated buffer and drops it at trial end, so
//! no strategy can observe another trial's memory. Allocation is fallible:
//! the reference configuration is 40 MB per trial, and running out of memory
//! must surface as a reportable error, not an abort.

use std::collections::TryReserveError;
use thiserror::Error;

/// A trial buffer could not be allocated.
#[derive(Debug, Error)]
#[error("failed to allocate trial buffer of {len} elements: {source}")]
pub struct AllocError {
    /// Requested length in elements.
    pub len: usize,
    source: TryReserveError,
}

/// Contiguous zero-initialized `u32` buffer owned by exactly one trial.
pub struct TrialBuffer {
    data: Vec<u32>,
}

impl TrialBuffer {
    /// Allocate a zeroed buffer of `len` elements.
    pub fn allocate(len: usize) -> Result<Self, AllocError> {
        let mut data: Vec<u32> = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|source| AllocError { len, source })?;
        data.resize(len, 0);
        Ok(Self { data })
    }

    /// Buffer length in elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds zero elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view, used by verification.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Mutable view handed to a fill strategy for the duration of one call.
    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }
}
