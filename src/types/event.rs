//! Engine event stream
//!
//! Every observable thing the engine does is one of these. Feedback
//! collaborators map them to haptics and audio; the engine never waits for
//! a response.

use serde::{Deserialize, Serialize};

use crate::types::LockVariant;

/// One fire-and-forget notification from the engine.
///
/// Within a single `apply_input` call the order is: dial-step `Tick` (if
/// the dial advanced), then the `ZoneEntered`/`ZoneLeft` edge (if one was
/// crossed), then `Resistance` (always).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LockEvent {
    /// Neutral cue: session began, cursor moved, or a dial clicked one step
    Tick,
    /// The active stage entered its tolerance zone
    ZoneEntered { stage: usize },
    /// The active stage left its tolerance zone
    ZoneLeft { stage: usize },
    /// Per-input feedback magnitude in [0,1]; light vs heavy haptic cue
    Resistance { magnitude: f64 },
    /// A stage was locked in
    StageCommitted { stage: usize },
    /// Commit attempted on a stage that was not aligned
    Rejected,
    /// Clock entered a whole-second boundary inside the final window
    Warning { remaining_secs: f64 },
    /// All stages committed
    Succeeded { variant: LockVariant },
    /// Clock expired
    Failed,
}

impl LockEvent {
    /// Short label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            LockEvent::Tick => "TICK",
            LockEvent::ZoneEntered { .. } => "ZONE_ENTERED",
            LockEvent::ZoneLeft { .. } => "ZONE_LEFT",
            LockEvent::Resistance { .. } => "RESISTANCE",
            LockEvent::StageCommitted { .. } => "STAGE_COMMITTED",
            LockEvent::Rejected => "REJECTED",
            LockEvent::Warning { .. } => "WARNING",
            LockEvent::Succeeded { .. } => "SUCCEEDED",
            LockEvent::Failed => "FAILED",
        }
    }

    /// True for events that mark a state edge rather than continuous feedback
    pub fn is_edge(&self) -> bool {
        !matches!(self, LockEvent::Resistance { .. } | LockEvent::Tick)
    }
}

impl std::fmt::Display for LockEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockEvent::ZoneEntered { stage } => write!(f, "ZONE_ENTERED stage={}", stage),
            LockEvent::ZoneLeft { stage } => write!(f, "ZONE_LEFT stage={}", stage),
            LockEvent::Resistance { magnitude } => write!(f, "RESISTANCE {:.2}", magnitude),
            LockEvent::StageCommitted { stage } => write!(f, "STAGE_COMMITTED stage={}", stage),
            LockEvent::Warning { remaining_secs } => {
                write!(f, "WARNING {:.1}s", remaining_secs)
            }
            LockEvent::Succeeded { variant } => write!(f, "SUCCEEDED {}", variant),
            other => write!(f, "{}", other.label()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
