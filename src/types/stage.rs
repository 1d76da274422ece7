//! Stage and session state definitions

use serde::{Deserialize, Serialize};

/// State of one stage (a pin, a dial, a ring) within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageState {
    /// Current value is outside the tolerance zone
    Searching,
    /// Current value is inside the tolerance zone, ready to commit
    Aligned,
    /// Locked in by the player; counts toward completion
    Committed,
}

impl std::fmt::Display for StageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageState::Searching => "SEARCHING",
            StageState::Aligned => "ALIGNED",
            StageState::Committed => "COMMITTED",
        };
        write!(f, "{}", name)
    }
}

/// The four possible states of a lock session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Constructed but not started
    Idle,
    /// Attempt in progress, clock running
    Running,
    /// All stages committed; terminal
    Succeeded,
    /// Clock expired; start() begins a fresh attempt
    Failed,
}

impl SessionState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            SessionState::Idle => "\x1b[90m",      // Gray
            SessionState::Running => "\x1b[33m",   // Orange/Yellow
            SessionState::Succeeded => "\x1b[32m", // Green
            SessionState::Failed => "\x1b[31m",    // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            SessionState::Idle => "⏳",
            SessionState::Running => "🔐",
            SessionState::Succeeded => "🔓",
            SessionState::Failed => "🔴",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "IDLE",
            SessionState::Running => "RUNNING",
            SessionState::Succeeded => "SUCCEEDED",
            SessionState::Failed => "FAILED",
        };
        write!(f, "{}", name)
    }
}
