//! Core types for ChronoLock

mod challenge;
mod event;
mod stage;
mod status;
mod tier;

pub use challenge::{LockChallenge, LockVariant};
pub use event::LockEvent;
pub use stage::{SessionState, StageState};
pub use status::SessionStatus;
pub use tier::IntensityTier;
