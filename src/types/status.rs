//! Session status snapshot for terminal display and JSON output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LockVariant, SessionState};

/// Point-in-time view of a session, safe to show the player.
///
/// Secret targets never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Which mechanism is being picked
    pub variant: LockVariant,
    /// Current session state
    pub state: SessionState,
    /// Cursor position (0-based)
    pub active_stage: usize,
    /// Total stages in this lock
    pub stage_count: usize,
    /// Committed stages / total stages, in [0,1]
    pub progress: f64,
    /// Seconds left on the clock, if the lock is timed
    pub time_remaining_secs: Option<f64>,
}

impl SessionStatus {
    /// Create a status stamped with the current time
    pub fn new(
        variant: LockVariant,
        state: SessionState,
        active_stage: usize,
        stage_count: usize,
        progress: f64,
        time_remaining_secs: Option<f64>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            variant,
            state,
            active_stage,
            stage_count,
            progress,
            time_remaining_secs,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = SessionState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} {} {}/{} | state={} | progress={:.0}%{}{}",
            color,
            emoji,
            self.variant.stage_noun(),
            self.active_stage + 1,
            self.stage_count,
            self.state,
            self.progress * 100.0,
            self.clock_suffix(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "{} {}/{} | state={} | progress={:.0}%{}",
            self.variant.stage_noun(),
            self.active_stage + 1,
            self.stage_count,
            self.state,
            self.progress * 100.0,
            self.clock_suffix()
        )
    }

    fn clock_suffix(&self) -> String {
        match self.time_remaining_secs {
            Some(t) => format!(" | t={:.1}s", t),
            None => String::new(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
