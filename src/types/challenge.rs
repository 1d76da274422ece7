//! Lock challenge definitions

use serde::{Deserialize, Serialize};

/// The three lock mechanisms a chest can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockVariant {
    /// Raise each pin to its hidden sweet-spot height
    PinTumbler,
    /// Step each dial to its hidden digit
    DialCombination,
    /// Rotate each ring to its hidden phase
    RotaryPuzzle,
}

impl LockVariant {
    /// Human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            LockVariant::PinTumbler => "Pin Tumbler",
            LockVariant::DialCombination => "Dial Combination",
            LockVariant::RotaryPuzzle => "Rotary Puzzle",
        }
    }

    /// What one stage is called for this variant
    pub fn stage_noun(&self) -> &'static str {
        match self {
            LockVariant::PinTumbler => "pin",
            LockVariant::DialCombination => "dial",
            LockVariant::RotaryPuzzle => "ring",
        }
    }
}

impl std::fmt::Display for LockVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for LockVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pin" | "pin_tumbler" | "pin-tumbler" => Ok(LockVariant::PinTumbler),
            "dial" | "dial_combination" | "dial-combination" => Ok(LockVariant::DialCombination),
            "rotary" | "rotary_puzzle" | "rotary-puzzle" => Ok(LockVariant::RotaryPuzzle),
            other => Err(format!(
                "unknown lock variant '{}' (expected pin, dial, or rotary)",
                other
            )),
        }
    }
}

/// Immutable description of one lock to pick.
///
/// Created once when a chest's lock screen opens and never mutated;
/// a fresh [`crate::core::LockEngine`] is built around it per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockChallenge {
    /// Which mechanism guards the chest
    pub variant: LockVariant,
    /// Raw difficulty from the chest; clamped to the variant's stage range
    pub difficulty: u32,
    /// Cursed chests feed heart-rate noise into the input path
    pub cursed: bool,
    /// Seconds allowed per attempt, or None for an untimed lock
    pub time_limit_secs: Option<f64>,
}

impl LockChallenge {
    /// Create an untimed, uncursed challenge
    pub fn new(variant: LockVariant, difficulty: u32) -> Self {
        Self {
            variant,
            difficulty,
            cursed: false,
            time_limit_secs: None,
        }
    }

    /// Mark the challenge as cursed
    pub fn cursed(mut self) -> Self {
        self.cursed = true;
        self
    }

    /// Attach a time limit in seconds
    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
