//! Per-variant lock mechanics
//!
//! The session state machine is identical for all three lock types; what
//! differs is the secret space, how crown input moves the current value,
//! and how distance-to-target is measured. Each variant supplies those
//! pieces behind the [`Mechanics`] trait.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::modulator::NoiseProfile;
use crate::types::LockVariant;
use crate::{
    DIAL_MAX_STAGES, DIAL_STEP_THRESHOLD, DIAL_TOLERANCE, PIN_MAX_STAGES, PIN_TARGET_MAX,
    PIN_TARGET_MIN, PIN_TOLERANCE, ROTARY_MAX_STAGES, ROTARY_TARGET_MAX_SCALE, ROTARY_TARGET_MIN,
    ROTARY_TOLERANCE,
};

/// Result of feeding one input delta to a stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advance {
    /// New current value for the stage
    pub value: f64,
    /// True when the input registered as a discrete step (dial click)
    pub stepped: bool,
}

/// Variant-specific behavior plugged into the engine
pub trait Mechanics {
    /// Which variant this is
    fn variant(&self) -> LockVariant;

    /// Upper stage-count clamp for this variant
    fn max_stages(&self) -> usize;

    /// Base tolerance before heart-rate adjustment
    fn tolerance(&self) -> f64;

    /// Noise scale class for the modulator
    fn noise_profile(&self) -> NoiseProfile;

    /// Draw one secret target for the given stage
    fn generate_target(&self, rng: &mut ChaCha8Rng, stage: usize, stage_count: usize) -> f64;

    /// Value a stage rests at before any input (and after a stage reset)
    fn rest_value(&self) -> f64 {
        0.0
    }

    /// Apply one input delta to the current value
    fn advance(&self, current: f64, delta: f64) -> Advance;

    /// Distance between current value and target, in the variant's own units
    fn distance(&self, current: f64, target: f64) -> f64;

    /// Map distance to a feedback magnitude in [0.1, 1.0]
    fn resistance(&self, distance: f64) -> f64;
}

/// Build the mechanics for a variant
pub fn mechanics_for(variant: LockVariant) -> Box<dyn Mechanics> {
    match variant {
        LockVariant::PinTumbler => Box::new(PinTumbler),
        LockVariant::DialCombination => Box::new(DialCombination),
        LockVariant::RotaryPuzzle => Box::new(RotaryPuzzle),
    }
}

/// Height-matching: raise each pin into a hidden sweet spot
#[derive(Debug, Default)]
pub struct PinTumbler;

impl Mechanics for PinTumbler {
    fn variant(&self) -> LockVariant {
        LockVariant::PinTumbler
    }

    fn max_stages(&self) -> usize {
        PIN_MAX_STAGES
    }

    fn tolerance(&self) -> f64 {
        PIN_TOLERANCE
    }

    fn noise_profile(&self) -> NoiseProfile {
        NoiseProfile::Coarse
    }

    fn generate_target(&self, rng: &mut ChaCha8Rng, _stage: usize, _stage_count: usize) -> f64 {
        rng.gen_range(PIN_TARGET_MIN..=PIN_TARGET_MAX)
    }

    fn advance(&self, current: f64, delta: f64) -> Advance {
        Advance {
            value: (current + delta).clamp(0.0, 1.0),
            stepped: false,
        }
    }

    fn distance(&self, current: f64, target: f64) -> f64 {
        (current - target).abs()
    }

    fn resistance(&self, distance: f64) -> f64 {
        (distance * 2.0).clamp(0.1, 1.0)
    }
}

/// Discrete-digit stepping: turn each dial to a hidden digit
#[derive(Debug, Default)]
pub struct DialCombination;

impl Mechanics for DialCombination {
    fn variant(&self) -> LockVariant {
        LockVariant::DialCombination
    }

    fn max_stages(&self) -> usize {
        DIAL_MAX_STAGES
    }

    fn tolerance(&self) -> f64 {
        DIAL_TOLERANCE
    }

    fn noise_profile(&self) -> NoiseProfile {
        NoiseProfile::Coarse
    }

    fn generate_target(&self, rng: &mut ChaCha8Rng, _stage: usize, _stage_count: usize) -> f64 {
        rng.gen_range(0..=9) as f64
    }

    fn advance(&self, current: f64, delta: f64) -> Advance {
        if delta.abs() < DIAL_STEP_THRESHOLD {
            return Advance {
                value: current,
                stepped: false,
            };
        }

        let direction = if delta > 0.0 { 1.0 } else { -1.0 };
        Advance {
            value: (current + direction + 10.0).rem_euclid(10.0),
            stepped: true,
        }
    }

    fn distance(&self, current: f64, target: f64) -> f64 {
        let d = (current - target).abs();
        d.min(10.0 - d)
    }

    fn resistance(&self, distance: f64) -> f64 {
        (distance * 0.2).clamp(0.1, 1.0)
    }
}

/// Circular-offset matching: rotate each ring to a hidden phase
#[derive(Debug, Default)]
pub struct RotaryPuzzle;

impl Mechanics for RotaryPuzzle {
    fn variant(&self) -> LockVariant {
        LockVariant::RotaryPuzzle
    }

    fn max_stages(&self) -> usize {
        ROTARY_MAX_STAGES
    }

    fn tolerance(&self) -> f64 {
        ROTARY_TOLERANCE
    }

    fn noise_profile(&self) -> NoiseProfile {
        NoiseProfile::Fine
    }

    /// Outer rings draw from a narrow band; inner rings from most of the circle
    fn generate_target(&self, rng: &mut ChaCha8Rng, stage: usize, stage_count: usize) -> f64 {
        let complexity = (stage + 1) as f64 / stage_count as f64;
        rng.gen_range(ROTARY_TARGET_MIN..=(ROTARY_TARGET_MAX_SCALE * complexity))
    }

    fn advance(&self, current: f64, delta: f64) -> Advance {
        Advance {
            value: (current + delta).rem_euclid(1.0),
            stepped: false,
        }
    }

    fn distance(&self, current: f64, target: f64) -> f64 {
        let d = (current - target).abs();
        d.min(1.0 - d)
    }

    fn resistance(&self, distance: f64) -> f64 {
        (distance * 4.0).clamp(0.1, 1.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
