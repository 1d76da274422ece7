//! ChronoLock: lock-picking simulation core
//!
//! Crown rotation deltas and a heart-rate intensity tier go in; a typed
//! event stream (zone edges, resistance, commits, warnings, outcome) comes
//! out. Haptics, audio, rendering, and reward bookkeeping live outside.

pub mod core;
pub mod types;

// =============================================================================
// STAGE COUNTS [C]
// =============================================================================

/// Minimum stages for every variant
pub const MIN_STAGES: usize = 3;

/// Maximum pins in a pin-tumbler lock
pub const PIN_MAX_STAGES: usize = 6;

/// Maximum dials in a combination lock
pub const DIAL_MAX_STAGES: usize = 6;

/// Maximum rings in a rotary puzzle
pub const ROTARY_MAX_STAGES: usize = 5;

// =============================================================================
// TOLERANCES & INPUT THRESHOLDS [C]
// =============================================================================

/// Pin height tolerance around the sweet spot
pub const PIN_TOLERANCE: f64 = 0.1;

/// Ring phase tolerance (finer than pins - rings are precision work)
pub const ROTARY_TOLERANCE: f64 = 0.05;

/// Dial alignment tolerance in digit units (< 0.5 means exact digit)
pub const DIAL_TOLERANCE: f64 = 0.5;

/// Minimum crown delta that registers as one dial step
pub const DIAL_STEP_THRESHOLD: f64 = 0.3;

// =============================================================================
// SECRET SPACES [C]
// =============================================================================

/// Lowest pin sweet-spot height
pub const PIN_TARGET_MIN: f64 = 0.3;

/// Highest pin sweet-spot height
pub const PIN_TARGET_MAX: f64 = 0.9;

/// Lowest ring target phase
pub const ROTARY_TARGET_MIN: f64 = 0.1;

/// Ring target phase ceiling, scaled by ring complexity
pub const ROTARY_TARGET_MAX_SCALE: f64 = 0.9;

// =============================================================================
// SESSION CLOCK [C]
// =============================================================================

/// Nominal external tick cadence in seconds (100 ms)
pub const TICK_CADENCE_SECS: f64 = 0.1;

/// Warnings fire inside this many final seconds
pub const WARNING_WINDOW_SECS: f64 = 5.0;

// =============================================================================
// HEART-RATE TIER THRESHOLDS [C] - classified by the biometric collaborator
// =============================================================================

/// Elevated tier floor (bpm)
pub const BPM_ELEVATED: f64 = 80.0;

/// High tier floor (bpm)
pub const BPM_HIGH: f64 = 100.0;

/// Critical tier floor (bpm)
pub const BPM_CRITICAL: f64 = 120.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
