//! Core modules for ChronoLock

pub mod engine;
pub mod feedback;
pub mod mechanics;
pub mod modulator;
pub mod script;

pub use engine::LockEngine;
pub use feedback::{
    BiometricSource, CalmBiometric, EventBuffer, FeedbackSink, NullFeedback, NullProgression,
    ProgressionSink,
};
pub use mechanics::{mechanics_for, Advance, Mechanics};
pub use modulator::{modulate, Modulated, NoiseProfile};
pub use script::{parse_command, Command, ScriptError};
