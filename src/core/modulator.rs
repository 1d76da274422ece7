//! Heart-rate noise/effect modulation
//!
//! Cursed locks route every crown delta through here before it touches the
//! stage. Higher tiers add uniform noise, multiply the delta by a jitter
//! factor, and shrink the tolerance zone. Calm is an exact identity, and
//! uncursed challenges never reach this module at all.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::types::IntensityTier;

// =============================================================================
// TIER TABLES [C] - amplitudes widen, tolerance shrinks, Calm touches nothing
// =============================================================================

/// Additive noise amplitude per tier, coarse profile (pin/dial input scale)
const COARSE_NOISE_AMP: [f64; 4] = [0.0, 0.02, 0.04, 0.1];

/// Additive noise amplitude per tier, fine profile (ring phase scale)
const FINE_NOISE_AMP: [f64; 4] = [0.0, 0.01, 0.02, 0.05];

/// Multiplicative jitter half-width per tier, coarse profile
const COARSE_JITTER: [f64; 4] = [0.0, 0.0, 0.2, 0.5];

/// Multiplicative jitter half-width per tier, fine profile
const FINE_JITTER: [f64; 4] = [0.0, 0.0, 0.2, 0.4];

/// Tolerance multiplier per tier (higher heart rate = tighter zone)
const TOLERANCE_SCALE: [f64; 4] = [1.0, 0.9, 0.7, 0.5];

/// Input scale class; which amplitude table a variant uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseProfile {
    /// Pin heights and dial steps: deltas on the order of 0.1
    Coarse,
    /// Ring phases: deltas an order of magnitude finer
    Fine,
}

impl NoiseProfile {
    fn noise_amp(&self, tier: IntensityTier) -> f64 {
        match self {
            NoiseProfile::Coarse => COARSE_NOISE_AMP[tier_index(tier)],
            NoiseProfile::Fine => FINE_NOISE_AMP[tier_index(tier)],
        }
    }

    fn jitter(&self, tier: IntensityTier) -> f64 {
        match self {
            NoiseProfile::Coarse => COARSE_JITTER[tier_index(tier)],
            NoiseProfile::Fine => FINE_JITTER[tier_index(tier)],
        }
    }
}

fn tier_index(tier: IntensityTier) -> usize {
    match tier {
        IntensityTier::Calm => 0,
        IntensityTier::Elevated => 1,
        IntensityTier::High => 2,
        IntensityTier::Critical => 3,
    }
}

/// Modulated input delta and tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulated {
    /// Delta after jitter and noise
    pub delta: f64,
    /// Tolerance after tier scaling
    pub tolerance: f64,
}

/// Apply one tier's noise, jitter, and tolerance scaling to a raw delta.
///
/// Calm returns the inputs untouched, bit for bit.
pub fn modulate(
    rng: &mut ChaCha8Rng,
    profile: NoiseProfile,
    raw_delta: f64,
    tolerance_base: f64,
    tier: IntensityTier,
) -> Modulated {
    if tier == IntensityTier::Calm {
        return Modulated {
            delta: raw_delta,
            tolerance: tolerance_base,
        };
    }

    let jitter = profile.jitter(tier);
    let damped = if jitter > 0.0 {
        raw_delta * rng.gen_range(1.0 - jitter..=1.0 + jitter)
    } else {
        raw_delta
    };

    let amp = profile.noise_amp(tier);
    let noise = if amp > 0.0 {
        rng.gen_range(-amp..=amp)
    } else {
        0.0
    };

    Modulated {
        delta: damped + noise,
        tolerance: tolerance_base * TOLERANCE_SCALE[tier_index(tier)],
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn test_calm_is_identity() {
        let mut rng = rng();
        for profile in [NoiseProfile::Coarse, NoiseProfile::Fine] {
            let out = modulate(&mut rng, profile, 0.123456789, 0.1, IntensityTier::Calm);
            assert_eq!(out.delta, 0.123456789);
            assert_eq!(out.tolerance, 0.1);
        }
    }

    #[test]
    fn test_noise_stays_within_amplitude() {
        let mut rng = rng();
        let raw = 0.05;
        for _ in 0..500 {
            let out = modulate(
                &mut rng,
                NoiseProfile::Coarse,
                raw,
                0.1,
                IntensityTier::Critical,
            );
            // Worst case: jitter 1.5x plus full noise amplitude
            let bound = raw * 1.5 + 0.1;
            let floor = raw * 0.5 - 0.1;
            assert!(out.delta <= bound + 1e-12);
            assert!(out.delta >= floor - 1e-12);
        }
    }

    #[test]
    fn test_elevated_adds_noise_without_jitter() {
        let mut rng = rng();
        let raw = 0.04;
        for _ in 0..500 {
            let out = modulate(
                &mut rng,
                NoiseProfile::Fine,
                raw,
                0.05,
                IntensityTier::Elevated,
            );
            assert!((out.delta - raw).abs() <= 0.01 + 1e-12);
        }
    }

    #[test]
    fn test_tolerance_shrinks_monotonically() {
        let mut rng = rng();
        let tiers = [
            IntensityTier::Calm,
            IntensityTier::Elevated,
            IntensityTier::High,
            IntensityTier::Critical,
        ];
        let mut last = f64::INFINITY;
        for tier in tiers {
            let out = modulate(&mut rng, NoiseProfile::Coarse, 0.1, 0.1, tier);
            assert!(out.tolerance < last);
            last = out.tolerance;
        }
        assert_eq!(last, 0.05);
    }

    #[test]
    fn test_fine_profile_is_gentler_than_coarse() {
        for tier in [IntensityTier::Elevated, IntensityTier::High, IntensityTier::Critical] {
            assert!(
                NoiseProfile::Fine.noise_amp(tier) < NoiseProfile::Coarse.noise_amp(tier),
                "fine noise should stay below coarse at {}",
                tier
            );
        }
    }
}
