//! CPU-Parallel Decompositions
//!
//! Five variants, distinguished by who decides the partitioning:
//! pre-computed static chunks, a fixed four-way split, an elementwise map
//! with address-derived indices, a runtime-partitioned index loop, and an
//! explicitly sized scheduler pool with blocked range splitting. Every
//! partition is a contiguous, disjoint index range.

use rayon::prelude::*;
use std::sync::OnceLock;

/// Minimum elements per scheduler-pool block; below this, splitting a range
/// further costs more than the writes it distributes.
const BLOCK_MIN_LEN: usize = 4096;

/// Split `0..len` into `parts` contiguous half-open ranges.
///
/// Integer division leaves `len % parts` elements over; the last range
/// absorbs them, so the union of the ranges is always exactly `0..len`.
pub(crate) fn partition_points(len: usize, parts: usize) -> Vec<(usize, usize)> {
    let parts = parts.max(1);
    let base = len / parts;
    (0..parts)
        .map(|p| {
            let start = p * base;
            let end = if p == parts - 1 { len } else { start + base };
            (start, end)
        })
        .collect()
}

/// Write `base + i` into each slot of a partition starting at `base`.
fn fill_from(slice: &mut [u32], base: usize) {
    for (i, slot) in slice.iter_mut().enumerate() {
        *slot = (base + i) as u32;
    }
}

/// Data-parallel loop over pre-computed size-based chunks, one chunk per
/// available hardware thread.
pub fn static_partition(buf: &mut [u32]) {
    let workers = crate::detected_processors();
    let chunk = buf.len().div_ceil(workers).max(1);
    buf.par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(index, part)| fill_from(part, index * chunk));
}

/// Exactly four contiguous ranges of size/4 filled by four concurrently
/// launched tasks; the remainder of a non-divisible length lands in the
/// fourth range. Returns after all four tasks complete.
pub fn four_way_split(buf: &mut [u32]) {
    let bounds = partition_points(buf.len(), 4);
    let (first, rest) = buf.split_at_mut(bounds[0].1 - bounds[0].0);
    let (second, rest) = rest.split_at_mut(bounds[1].1 - bounds[1].0);
    let (third, fourth) = rest.split_at_mut(bounds[2].1 - bounds[2].0);
    let starts = [bounds[0].0, bounds[1].0, bounds[2].0, bounds[3].0];
    rayon::scope(|s| {
        s.spawn(move |_| fill_from(first, starts[0]));
        s.spawn(move |_| fill_from(second, starts[1]));
        s.spawn(move |_| fill_from(third, starts[2]));
        s.spawn(move |_| fill_from(fourth, starts[3]));
    });
}

/// Elementwise parallel transform over the whole buffer. The written value
/// is the element's offset from the buffer origin, derived from its
/// address rather than an enumeration counter.
pub fn elementwise(buf: &mut [u32]) {
    let origin = buf.as_ptr() as usize;
    buf.par_iter_mut().for_each(|slot| {
        let address = &*slot as *const u32 as usize;
        *slot = ((address - origin) / std::mem::size_of::<u32>()) as u32;
    });
}

/// One OS thread per detected hardware processor, each filling a
/// contiguous slice of size/(processor count); the last slice absorbs any
/// remainder. All threads are joined before returning.
pub fn thread_per_core(buf: &mut [u32]) {
    let workers = crate::detected_processors();
    let bounds = partition_points(buf.len(), workers);
    std::thread::scope(|scope| {
        let mut remaining: &mut [u32] = buf;
        for (start, end) in bounds {
            let (part, tail) = std::mem::take(&mut remaining).split_at_mut(end - start);
            remaining = tail;
            scope.spawn(move || fill_from(part, start));
        }
    });
}

/// Single parallel loop over the full index range; how the range is split
/// across workers is left entirely to the runtime.
pub fn par_index_loop(buf: &mut [u32]) {
    buf.par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = i as u32);
}

fn scheduler() -> &'static rayon::ThreadPool {
    static POOL: OnceLock<rayon::ThreadPool> = OnceLock::new();
    POOL.get_or_init(|| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(crate::detected_processors())
            .thread_name(|i| format!("fill-sched-{i}"))
            .build()
            .expect("failed to build scheduler pool")
    })
}

/// Blocked range splitting on an explicitly sized scheduler pool. The pool
/// is built once (processor-count threads) and reused across trials;
/// `install` blocks until every block has been filled.
pub fn scheduler_pool(buf: &mut [u32]) {
    scheduler().install(|| {
        buf.par_iter_mut()
            .with_min_len(BLOCK_MIN_LEN)
            .enumerate()
            .for_each(|(i, slot)| *slot = i as u32);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_sequential_fill;

    // Odd length: exercises remainder handling in every partitioned variant.
    const ODD_LEN: usize = 100_003;

    #[test]
    fn partition_points_cover_range_exactly() {
        for (len, parts) in [(100, 4), (103, 4), (7, 16), (1, 1), (4096, 3)] {
            let bounds = partition_points(len, parts);
            assert_eq!(bounds.len(), parts);
            assert_eq!(bounds[0].0, 0);
            assert_eq!(bounds[parts - 1].1, len);
            for pair in bounds.windows(2) {
                assert_eq!(pair[0].1, pair[1].0, "ranges must be contiguous");
            }
        }
    }

    #[test]
    fn partition_remainder_goes_to_last_range() {
        let bounds = partition_points(103, 4);
        assert_eq!(bounds[0], (0, 25));
        assert_eq!(bounds[3], (75, 103));
    }

    #[test]
    fn static_partition_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        static_partition(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn four_way_split_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        four_way_split(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn four_way_split_fills_remainder_tail() {
        // 10,000,003 = 4 * 2,500,000 + 3: the final three elements exist
        // only because the fourth partition absorbs the remainder.
        let len = 10_000_003;
        let mut buf = vec![0u32; len];
        four_way_split(&mut buf);
        assert_eq!(buf[len - 3] as usize, len - 3);
        assert_eq!(buf[len - 2] as usize, len - 2);
        assert_eq!(buf[len - 1] as usize, len - 1);
        assert!(is_sequential_fill(&buf, len));
    }

    #[test]
    fn elementwise_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        elementwise(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn thread_per_core_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        thread_per_core(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn thread_per_core_handles_fewer_elements_than_workers() {
        let mut buf = vec![0u32; 3];
        thread_per_core(&mut buf);
        assert_eq!(buf, [0, 1, 2]);
    }

    #[test]
    fn par_index_loop_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        par_index_loop(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn scheduler_pool_fills_completely() {
        let mut buf = vec![0u32; ODD_LEN];
        scheduler_pool(&mut buf);
        assert!(is_sequential_fill(&buf, ODD_LEN));
    }

    #[test]
    fn scheduler_pool_handles_buffer_smaller_than_block() {
        let mut buf = vec![0u32; 100];
        scheduler_pool(&mut buf);
        assert!(is_sequential_fill(&buf, 100));
    }
}
