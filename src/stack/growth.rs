//! Bounded buffer growth for sources of unknown output size.
//!
//! A source is asked to fill a buffer and reports how many bytes it wrote.
//! A report equal to the buffer length is treated as truncation, so the
//! buffer is doubled and the source asked again, up to a fixed number of
//! attempts.

use crate::constants::{DEF_STACK_LEN, MAX_GROW_ATTEMPTS, MAX_STACK_LEN};

// ============================================================================
// GrowthPolicy
// ============================================================================

/// Starting size and attempt cap for [`GrowthPolicy::grow_until_fits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Size of the first buffer, in bytes.
    pub initial: usize,
    /// Maximum number of fill attempts.
    pub max_attempts: u32,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::for_stack(false)
    }
}

impl GrowthPolicy {
    /// Creates a policy with the given starting size and attempt cap.
    ///
    /// A zero starting size is bumped to one byte so doubling makes progress.
    #[must_use]
    pub fn new(initial: usize, max_attempts: u32) -> Self {
        Self {
            initial: initial.max(1),
            max_attempts,
        }
    }

    /// Policy used for stack capture. "All" mode starts from the larger size.
    #[must_use]
    pub fn for_stack(all: bool) -> Self {
        let initial = if all { MAX_STACK_LEN } else { DEF_STACK_LEN };
        Self::new(initial, MAX_GROW_ATTEMPTS)
    }

    /// Size of the buffer used on the given zero-based attempt.
    #[must_use]
    pub fn size_at(&self, attempt: u32) -> usize {
        self.initial.saturating_mul(1usize.checked_shl(attempt).unwrap_or(usize::MAX))
    }

    /// Repeatedly fills a fresh buffer until the output fits.
    ///
    /// `fill` receives a zeroed buffer and returns the number of bytes the
    /// source reports as written. The returned vector is trimmed to that
    /// length. When every attempt is truncated, or the next buffer cannot be
    /// allocated, the last full buffer is returned as-is; the cut is not an
    /// error.
    pub fn grow_until_fits<F>(&self, mut fill: F) -> Vec<u8>
    where
        F: FnMut(&mut [u8]) -> usize,
    {
        let mut buf = Vec::new();
        for attempt in 0..self.max_attempts {
            let size = self.size_at(attempt);
            let mut next = Vec::new();
            if next.try_reserve_exact(size).is_err() {
                tracing::warn!(
                    attempt,
                    size,
                    kept = buf.len(),
                    "cannot allocate a larger buffer, keeping the last one"
                );
                return buf;
            }
            next.resize(size, 0u8);
            buf = next;

            let written = fill(&mut buf);
            if written < buf.len() {
                buf.truncate(written);
                return buf;
            }
        }

        if self.max_attempts > 0 {
            tracing::warn!(
                attempts = self.max_attempts,
                size = buf.len(),
                "output still truncated after the last attempt"
            );
        }
        buf
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Copies as much of `data` as fits and reports the copied length,
    /// the way a runtime dump into a fixed buffer does.
    fn copy_into(data: &[u8], buf: &mut [u8]) -> usize {
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        n
    }

    #[test]
    fn test_stack_policy_sizes() {
        assert_eq!(GrowthPolicy::for_stack(false).initial, DEF_STACK_LEN);
        assert_eq!(GrowthPolicy::for_stack(true).initial, MAX_STACK_LEN);
        assert!(GrowthPolicy::for_stack(true).initial >= GrowthPolicy::for_stack(false).initial);
        assert_eq!(GrowthPolicy::default().max_attempts, MAX_GROW_ATTEMPTS);
    }

    #[test]
    fn test_zero_initial_is_bumped() {
        assert_eq!(GrowthPolicy::new(0, 3).initial, 1);
    }

    #[rstest]
    #[case(0, 8)]
    #[case(1, 16)]
    #[case(3, 64)]
    fn test_size_doubles(#[case] attempt: u32, #[case] expected: usize) {
        assert_eq!(GrowthPolicy::new(8, 10).size_at(attempt), expected);
    }

    #[test]
    fn test_size_saturates() {
        assert_eq!(GrowthPolicy::new(usize::MAX / 2, 10).size_at(4), usize::MAX);
        assert_eq!(GrowthPolicy::new(2, 200).size_at(150), usize::MAX);
    }

    #[rstest]
    #[case::fits_first(5, 1)]
    #[case::exactly_full_first(8, 2)]
    #[case::needs_growth(40, 4)]
    fn test_grows_until_output_fits(#[case] len: usize, #[case] expected_calls: usize) {
        let data = vec![b'x'; len];
        let mut calls = 0;
        let out = GrowthPolicy::new(8, 10).grow_until_fits(|buf| {
            calls += 1;
            copy_into(&data, buf)
        });

        assert_eq!(out, data);
        assert_eq!(calls, expected_calls);
    }

    #[test]
    fn test_returns_last_buffer_when_capped() {
        let data = vec![b'y'; 1000];
        let policy = GrowthPolicy::new(4, 3);
        let mut sizes = Vec::new();
        let out = policy.grow_until_fits(|buf| {
            sizes.push(buf.len());
            copy_into(&data, buf)
        });

        assert_eq!(sizes, vec![4, 8, 16]);
        assert_eq!(out.len(), 16);
        assert_eq!(out.len(), policy.size_at(policy.max_attempts - 1));
        assert!(out.iter().all(|&b| b == b'y'));
    }

    #[test]
    fn test_never_longer_than_reported() {
        let policy = GrowthPolicy::new(16, 10);
        let out = policy.grow_until_fits(|_| 3);
        assert_eq!(out.len(), 3);
    }

    #[rstest]
    #[case::half_address_space(usize::MAX / 2)]
    #[case::saturated(usize::MAX)]
    fn test_unallocatable_buffer_degrades(#[case] initial: usize) {
        let mut calls = 0;
        let out = GrowthPolicy::new(initial, 10).grow_until_fits(|buf| {
            calls += 1;
            buf.len().min(3)
        });
        assert!(out.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_zero_attempts_returns_empty() {
        let out = GrowthPolicy::new(16, 0).grow_until_fits(|_| unreachable!());
        assert!(out.is_empty());
    }
}
