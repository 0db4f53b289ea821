//! Fill Verification
//!
//! Confirms a populated buffer holds the strictly ascending sequence
//! `0..len`, independently of which strategy produced it. Checking the full
//! extent (not just the endpoints) catches partial-partition bugs where an
//! internal slice was skipped or overwritten.

/// Whether `buf` is a correct sequential fill of `expected_len` elements.
///
/// Checks, in order: length matches, values strictly ascend across the full
/// extent, first element is 0, last element is `expected_len - 1`.
pub fn is_sequential_fill(buf: &[u32], expected_len: usize) -> bool {
    if buf.len() != expected_len || buf.is_empty() {
        return false;
    }
    if !buf.windows(2).all(|pair| pair[0] < pair[1]) {
        return false;
    }
    buf[0] == 0 && buf[buf.len() - 1] as usize == expected_len - 1
}

/// First index whose value differs from the index itself, if any.
///
/// Used only for failure diagnostics; the pass/fail decision is
/// [`is_sequential_fill`].
pub fn first_divergence(buf: &[u32]) -> Option<usize> {
    buf.iter()
        .enumerate()
        .find(|&(i, &value)| value as usize != i)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(len: usize) -> Vec<u32> {
        (0..len as u32).collect()
    }

    #[test]
    fn accepts_valid_fill() {
        assert!(is_sequential_fill(&valid(1), 1));
        assert!(is_sequential_fill(&valid(1000), 1000));
    }

    #[test]
    fn rejects_all_zero_buffer() {
        let buf = vec![0u32; 100];
        assert!(!is_sequential_fill(&buf, 100));
    }

    #[test]
    fn rejects_off_by_one_tail() {
        let mut buf = valid(100);
        // Last element never written: stays at its zeroed value.
        buf[99] = 0;
        assert!(!is_sequential_fill(&buf, 100));
    }

    #[test]
    fn rejects_swapped_adjacent_pair() {
        let mut buf = valid(100);
        buf.swap(40, 41);
        assert!(!is_sequential_fill(&buf, 100));
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(!is_sequential_fill(&valid(99), 100));
        assert!(!is_sequential_fill(&[], 0));
    }

    #[test]
    fn divergence_points_at_first_bad_index() {
        let mut buf = valid(100);
        buf[17] = 99;
        assert_eq!(first_divergence(&buf), Some(17));
        assert_eq!(first_divergence(&valid(100)), None);
    }
}
