//! Injectable random source for overlay selection and trim offsets.

use rand::Rng;

/// Source of the pipeline's two random decisions: which fallback clip to
/// use and where to start the overlay trim. Injected so tests can pin
/// deterministic values; production draws uniformly.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform offset in `[0, max)`. Returns `0.0` when `max` is not
    /// positive.
    fn offset_within(&mut self, max: f64) -> f64;
}

/// Production random source backed by the thread RNG.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }

    fn offset_within(&mut self, max: f64) -> f64 {
        if max > 0.0 {
            rand::rng().random_range(0.0..max)
        } else {
            0.0
        }
    }
}

/// Start offset for the overlay trim.
///
/// Uniform in `[0, overlay_duration - target_duration)` when the overlay
/// outlasts the target; otherwise exactly `0.0` (the trim will then be as
/// long as the footage allows). An unknown duration (`0.0` from the probe)
/// also lands in the zero branch.
pub fn choose_overlay_start(
    overlay_duration: f64,
    target_duration: f64,
    rng: &mut dyn RandomSource,
) -> f64 {
    if overlay_duration > target_duration {
        rng.offset_within(overlay_duration - target_duration)
    } else {
        0.0
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedRandom;
    use super::*;

    #[test]
    fn test_short_overlay_starts_at_zero() {
        let mut rng = FixedRandom {
            index: 0,
            offset: 99.0,
        };
        // 20s overlay, 30s target: offset must be exactly zero
        assert_eq!(choose_overlay_start(20.0, 30.0, &mut rng), 0.0);
        // Unknown duration behaves the same
        assert_eq!(choose_overlay_start(0.0, 30.0, &mut rng), 0.0);
        // Equal durations too
        assert_eq!(choose_overlay_start(30.0, 30.0, &mut rng), 0.0);
    }

    #[test]
    fn test_long_overlay_bounded_offset() {
        let mut rng = FixedRandom {
            index: 0,
            offset: 7.5,
        };
        let start = choose_overlay_start(40.0, 30.0, &mut rng);
        assert_eq!(start, 7.5);

        // Production source stays inside [0, duration - target)
        let mut thread_rng = ThreadRandom;
        for _ in 0..100 {
            let start = choose_overlay_start(40.0, 30.0, &mut thread_rng);
            assert!((0.0..10.0).contains(&start));
        }
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
        }
    }
}
