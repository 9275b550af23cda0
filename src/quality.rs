//! The quality-upgrade probability kernel.
//!
//! Pure, stateless, and the one piece of this crate allowed to panic on bad
//! input: a call with `s > e`, `s > m`, or `e > m` is a programming error in
//! the caller, not a recoverable condition (`KernelContractViolation` in the
//! error-handling design).

use crate::error::ConfigError;

/// The probability that an extra tier jump succeeds, given the roll already advanced once.
pub const JUMP: f64 = 0.1;

pub const QUALITY_NAMES: [&str; 5] = ["normal", "uncommon", "rare", "epic", "legendary"];

/// Highest tier index the reference catalog's quality table supports.
pub const MAX_TIER: u8 = (QUALITY_NAMES.len() - 1) as u8;

pub fn tier_name(tier: u8) -> &'static str {
    QUALITY_NAMES[tier as usize]
}

pub fn tier_from_name(name: &str) -> Result<u8, ConfigError> {
    QUALITY_NAMES
        .iter()
        .position(|&candidate| candidate == name)
        .map(|index| index as u8)
        .ok_or_else(|| ConfigError::UnknownTier(name.to_owned(), &QUALITY_NAMES))
}

/// Probability that an activity starting at tier `s` yields a result at tier `e`,
/// under per-roll advance probability `q`, capped at `max_tier`.
///
/// # Panics
///
/// Panics if `s > max_tier`, `e > max_tier`, or `e < s` — these are precondition
/// violations in the caller, not data the kernel can reject gracefully.
pub fn factor(s: u8, e: u8, max_tier: u8, q: f64) -> f64 {
    assert!(s <= max_tier, "starting tier {s} is above max tier {max_tier}");
    assert!(e <= max_tier, "ending tier {e} is above max tier {max_tier}");
    assert!(e >= s, "ending tier {e} is below starting tier {s}");

    if e == s && s == max_tier {
        1.0
    } else if e == s {
        1.0 - q
    } else if e < max_tier {
        q * (1.0 - JUMP) * JUMP.powi((e - s - 1) as i32)
    } else {
        q * JUMP.powi((e - s - 1) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: u8 = 4;

    #[test]
    fn closure_sums_to_one() {
        for s in 0..=M {
            for &q in &[0.0, 0.05, 0.1, 0.25, 0.5, 1.0] {
                let total: f64 = (s..=M).map(|e| factor(s, e, M, q)).sum();
                assert!(
                    (total - 1.0).abs() < 1e-12,
                    "s={s} q={q} summed to {total}"
                );
            }
        }
    }

    #[test]
    fn cap_endpoint_is_certain() {
        assert_eq!(factor(2, 2, 2, 0.0), 1.0);
        assert_eq!(factor(2, 2, 2, 0.5), 1.0);
        assert_eq!(factor(2, 2, 2, 1.0), 1.0);
    }

    #[test]
    fn same_tier_is_one_minus_q() {
        assert_eq!(factor(0, 0, 4, 0.0), 1.0);
        let q = 0.062;
        assert!((factor(0, 0, 4, q) - (1.0 - q)).abs() < 1e-12);
    }

    #[test]
    fn top_jump_has_no_stopping_factor() {
        let q = 0.3;
        let expected = q * JUMP.powi(3);
        assert!((factor(0, 4, 4, q) - expected).abs() < 1e-12);
    }

    #[test]
    fn single_step_from_legendary_quality_modules() {
        let expected = 0.062 * 0.9;
        assert!((factor(0, 1, 4, 0.062) - expected).abs() < 1e-12);
    }

    #[test]
    fn exact_value_for_two_step_jump() {
        assert!((factor(0, 2, 4, 0.1) - 0.009).abs() < 1e-12);
    }

    #[test]
    fn monotonic_quality_mass_with_more_quality_modules() {
        // Higher q shifts mass away from the starting tier and onto higher tiers.
        let low_q = factor(0, 0, 4, 0.02);
        let high_q = factor(0, 0, 4, 0.08);
        assert!(high_q <= low_q);

        let low_q_top = factor(0, 4, 4, 0.02);
        let high_q_top = factor(0, 4, 4, 0.08);
        assert!(high_q_top >= low_q_top);
    }

    #[test]
    #[should_panic]
    fn rejects_ending_below_starting() {
        factor(2, 1, 4, 0.1);
    }

    #[test]
    #[should_panic]
    fn rejects_starting_above_cap() {
        factor(5, 5, 4, 0.1);
    }

    #[test]
    fn tier_name_roundtrip() {
        for (index, name) in QUALITY_NAMES.iter().enumerate() {
            assert_eq!(tier_from_name(name).unwrap(), index as u8);
            assert_eq!(tier_name(index as u8), *name);
        }
        assert!(tier_from_name("mythic").is_err());
    }
}
