//! Heart-rate intensity tiers
//!
//! The biometric collaborator classifies raw bpm into a tier; the engine
//! only ever reads the tier. Thresholds are fixed at 80/100/120 bpm.

use serde::{Deserialize, Serialize};

use crate::{BPM_CRITICAL, BPM_ELEVATED, BPM_HIGH};

/// Discretized heart-rate bucket used to scale cursed-lock difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntensityTier {
    /// Below 80 bpm: no effect
    Calm,
    /// 80+ bpm: light input noise
    Elevated,
    /// 100+ bpm: noise plus jitter, tighter tolerance
    High,
    /// 120+ bpm: heavy noise and jitter, half tolerance
    Critical,
}

impl IntensityTier {
    /// Classify a bpm reading into a tier
    pub fn from_bpm(bpm: f64) -> Self {
        if bpm >= BPM_CRITICAL {
            IntensityTier::Critical
        } else if bpm >= BPM_HIGH {
            IntensityTier::High
        } else if bpm >= BPM_ELEVATED {
            IntensityTier::Elevated
        } else {
            IntensityTier::Calm
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            IntensityTier::Calm => "\x1b[32m",     // Green
            IntensityTier::Elevated => "\x1b[33m", // Yellow
            IntensityTier::High => "\x1b[38;5;208m", // Orange
            IntensityTier::Critical => "\x1b[31m", // Red
        }
    }
}

impl std::fmt::Display for IntensityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IntensityTier::Calm => "CALM",
            IntensityTier::Elevated => "ELEVATED",
            IntensityTier::High => "HIGH",
            IntensityTier::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(IntensityTier::from_bpm(0.0), IntensityTier::Calm);
        assert_eq!(IntensityTier::from_bpm(79.9), IntensityTier::Calm);
        assert_eq!(IntensityTier::from_bpm(80.0), IntensityTier::Elevated);
        assert_eq!(IntensityTier::from_bpm(100.0), IntensityTier::High);
        assert_eq!(IntensityTier::from_bpm(119.9), IntensityTier::High);
        assert_eq!(IntensityTier::from_bpm(120.0), IntensityTier::Critical);
        assert_eq!(IntensityTier::from_bpm(180.0), IntensityTier::Critical);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(IntensityTier::Calm < IntensityTier::Elevated);
        assert!(IntensityTier::Elevated < IntensityTier::High);
        assert!(IntensityTier::High < IntensityTier::Critical);
    }
}
