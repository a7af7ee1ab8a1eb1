//! Difficulty curve
//!
//! Scroll speed depends on score alone. Player position never feeds into it.

use crate::tuning::Tuning;

/// World scroll speed (units/s) for a given score
#[inline]
pub fn scroll_speed(score: u64, tuning: &Tuning) -> f32 {
    tuning.base_scroll_speed * (1.0 + score as f32 * tuning.difficulty_coefficient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_speed_at_zero() {
        let tuning = Tuning::default();
        assert_eq!(scroll_speed(0, &tuning), 180.0);
    }

    #[test]
    fn test_hundred_points_is_one_and_a_half_times() {
        let tuning = Tuning::default();
        assert!((scroll_speed(100, &tuning) - 270.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn speed_is_monotonic(a in 0u64..100_000, b in 0u64..100_000) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scroll_speed(hi, &tuning) >= scroll_speed(lo, &tuning));
        }
    }
}
