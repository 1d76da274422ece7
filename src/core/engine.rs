//! Lock session engine
//!
//! One engine instance owns one attempt's mutable state: the secret
//! targets, the live stage values, the cursor, and the clock. It is driven
//! entirely from outside (input deltas plus clock ticks, serialized by the
//! caller) and owns no timer or thread, so dropping it is a complete
//! teardown and can emit no further events.
//!
//! Session transitions:
//! - IDLE → RUNNING: start()
//! - RUNNING → SUCCEEDED: final stage committed
//! - RUNNING → FAILED: clock crossed zero
//! - FAILED → RUNNING: start() (fresh secrets, fresh clock)

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::feedback::{BiometricSource, FeedbackSink, ProgressionSink};
use crate::core::mechanics::{mechanics_for, Mechanics};
use crate::core::modulator::modulate;
use crate::types::{
    IntensityTier, LockChallenge, LockEvent, SessionState, SessionStatus, StageState,
};
use crate::{MIN_STAGES, WARNING_WINDOW_SECS};

/// State machine for one lock-picking attempt
pub struct LockEngine {
    challenge: LockChallenge,
    mechanics: Box<dyn Mechanics>,
    stage_count: usize,
    /// Secret per-stage targets; regenerated on start() and on failure
    targets: Vec<f64>,
    /// Live per-stage values the player steers
    current: Vec<f64>,
    stage_states: Vec<StageState>,
    active_stage: usize,
    session_state: SessionState,
    time_remaining_secs: Option<f64>,
    unlock_reported: bool,
    rng: ChaCha8Rng,
    feedback: Box<dyn FeedbackSink>,
    progression: Box<dyn ProgressionSink>,
    biometric: Box<dyn BiometricSource>,
}

impl LockEngine {
    /// Create an engine with an entropy-seeded RNG
    pub fn new(
        challenge: LockChallenge,
        feedback: Box<dyn FeedbackSink>,
        progression: Box<dyn ProgressionSink>,
        biometric: Box<dyn BiometricSource>,
    ) -> Self {
        Self::with_seed(challenge, rand::random(), feedback, progression, biometric)
    }

    /// Create an engine with a fixed RNG seed (deterministic secrets and noise)
    pub fn with_seed(
        challenge: LockChallenge,
        seed: u64,
        feedback: Box<dyn FeedbackSink>,
        progression: Box<dyn ProgressionSink>,
        biometric: Box<dyn BiometricSource>,
    ) -> Self {
        let mechanics = mechanics_for(challenge.variant);
        let stage_count = (challenge.difficulty as usize).clamp(MIN_STAGES, mechanics.max_stages());
        let rest = mechanics.rest_value();
        let time_remaining_secs = challenge.time_limit_secs;

        Self {
            challenge,
            mechanics,
            stage_count,
            targets: vec![0.0; stage_count],
            current: vec![rest; stage_count],
            stage_states: vec![StageState::Searching; stage_count],
            active_stage: 0,
            session_state: SessionState::Idle,
            time_remaining_secs,
            unlock_reported: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
            feedback,
            progression,
            biometric,
        }
    }

    /// Begin an attempt: draw fresh secrets, reset the clock, emit a begin cue.
    ///
    /// No-op while Running, and after Succeeded (the session is spent).
    /// Accepted from Failed - that is how the app offers a retry.
    pub fn start(&mut self) {
        match self.session_state {
            SessionState::Running | SessionState::Succeeded => return,
            SessionState::Idle | SessionState::Failed => {}
        }

        self.regenerate();
        self.active_stage = 0;
        self.time_remaining_secs = self.challenge.time_limit_secs;
        self.session_state = SessionState::Running;
        self.emit(LockEvent::Tick);
    }

    /// Feed one crown rotation delta to the active stage.
    ///
    /// Cursed challenges pass the delta through the heart-rate modulator
    /// first; everything else is a bit-for-bit passthrough. Emits zone
    /// events only on edge crossings, and a resistance event on every call.
    pub fn apply_input(&mut self, delta: f64) {
        if self.session_state != SessionState::Running || self.active_stage >= self.stage_count {
            return;
        }

        let stage = self.active_stage;
        let base_tolerance = self.mechanics.tolerance();

        let (delta, tolerance) = if self.challenge.cursed {
            let tier = if self.biometric.is_active() {
                self.biometric.intensity_tier()
            } else {
                IntensityTier::Calm
            };
            let profile = self.mechanics.noise_profile();
            let modulated = modulate(&mut self.rng, profile, delta, base_tolerance, tier);
            (modulated.delta, modulated.tolerance)
        } else {
            (delta, base_tolerance)
        };

        let advance = self.mechanics.advance(self.current[stage], delta);
        self.current[stage] = advance.value;
        if advance.stepped {
            self.emit(LockEvent::Tick);
        }

        let distance = self.mechanics.distance(advance.value, self.targets[stage]);
        let in_zone = distance < tolerance;

        match (self.stage_states[stage], in_zone) {
            (StageState::Searching, true) => {
                self.stage_states[stage] = StageState::Aligned;
                self.emit(LockEvent::ZoneEntered { stage });
            }
            (StageState::Aligned, false) => {
                self.stage_states[stage] = StageState::Searching;
                self.emit(LockEvent::ZoneLeft { stage });
            }
            _ => {}
        }

        let magnitude = self.mechanics.resistance(distance);
        self.emit(LockEvent::Resistance { magnitude });
    }

    /// Lock in the active stage.
    ///
    /// Rejected (with a cue, no state change) unless the stage is Aligned.
    /// Committing the last stage succeeds the session and reports the
    /// unlock to the progression collaborator exactly once.
    pub fn commit_active_stage(&mut self) {
        if self.session_state != SessionState::Running || self.active_stage >= self.stage_count {
            return;
        }

        let stage = self.active_stage;
        if self.stage_states[stage] != StageState::Aligned {
            self.emit(LockEvent::Rejected);
            return;
        }

        self.stage_states[stage] = StageState::Committed;
        self.emit(LockEvent::StageCommitted { stage });

        if stage + 1 == self.stage_count {
            self.session_state = SessionState::Succeeded;
            let variant = self.mechanics.variant();
            self.emit(LockEvent::Succeeded { variant });
            if !self.unlock_reported {
                self.unlock_reported = true;
                self.progression.report_unlock(&self.challenge);
            }
        } else {
            self.active_stage += 1;
            self.emit(LockEvent::Tick);
        }
    }

    /// Step the cursor back one stage.
    ///
    /// A Committed stage the cursor lands on reopens to Aligned, so the
    /// player can redo it; it stops counting toward progress until
    /// re-committed.
    pub fn retreat(&mut self) {
        if self.session_state != SessionState::Running || self.active_stage == 0 {
            return;
        }

        self.active_stage -= 1;
        if self.stage_states[self.active_stage] == StageState::Committed {
            self.stage_states[self.active_stage] = StageState::Aligned;
        }
        self.emit(LockEvent::Tick);
    }

    /// Return the active stage to its rest value and Searching state
    pub fn reset_active_stage(&mut self) {
        if self.session_state != SessionState::Running || self.active_stage >= self.stage_count {
            return;
        }

        let stage = self.active_stage;
        self.current[stage] = self.mechanics.rest_value();
        self.stage_states[stage] = StageState::Searching;
        self.emit(LockEvent::Tick);
    }

    /// Advance the session clock.
    ///
    /// Driven externally at a fixed cadence, nominally 100 ms. Untimed
    /// sessions ignore ticks. Crossing zero fails the attempt: secrets are
    /// regenerated, stages reset, and the clock refilled, but the state
    /// stays Failed until start() is invoked again. Inside the final
    /// warning window a warning fires at each whole-second boundary.
    pub fn tick(&mut self, delta_secs: f64) {
        if self.session_state != SessionState::Running {
            return;
        }
        let Some(remaining) = self.time_remaining_secs else {
            return;
        };

        let remaining = remaining - delta_secs;
        self.time_remaining_secs = Some(remaining);

        if remaining <= 0.0 {
            self.fail();
            return;
        }

        // Tenths arithmetic so float drift at the nominal cadence cannot
        // skip a boundary.
        let tenths = (remaining * 10.0).round() as i64;
        if tenths > 0 && tenths <= (WARNING_WINDOW_SECS * 10.0) as i64 && tenths % 10 == 0 {
            self.emit(LockEvent::Warning {
                remaining_secs: remaining,
            });
        }
    }

    fn fail(&mut self) {
        self.session_state = SessionState::Failed;
        self.emit(LockEvent::Failed);
        self.regenerate();
        self.active_stage = 0;
        self.time_remaining_secs = self.challenge.time_limit_secs;
    }

    /// Draw fresh secrets and reset every stage to rest
    fn regenerate(&mut self) {
        for stage in 0..self.stage_count {
            let target = self
                .mechanics
                .generate_target(&mut self.rng, stage, self.stage_count);
            self.targets[stage] = target;
            self.current[stage] = self.mechanics.rest_value();
            self.stage_states[stage] = StageState::Searching;
        }
    }

    fn emit(&mut self, event: LockEvent) {
        self.feedback.on_event(&event);
    }

    /// Get the challenge this engine was built for
    pub fn challenge(&self) -> &LockChallenge {
        &self.challenge
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.session_state
    }

    /// Get number of stages in this lock
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Get the cursor position
    pub fn active_stage(&self) -> usize {
        self.active_stage
    }

    /// Get per-stage states
    pub fn stage_states(&self) -> &[StageState] {
        &self.stage_states
    }

    /// Get live per-stage values (for rendering; targets stay hidden)
    pub fn current_values(&self) -> &[f64] {
        &self.current
    }

    /// Is the active stage inside its tolerance zone?
    pub fn is_aligned(&self) -> bool {
        self.active_stage < self.stage_count
            && self.stage_states[self.active_stage] == StageState::Aligned
    }

    /// Committed stages over total stages, in [0,1]
    pub fn progress(&self) -> f64 {
        let committed = self
            .stage_states
            .iter()
            .filter(|s| **s == StageState::Committed)
            .count();
        committed as f64 / self.stage_count as f64
    }

    /// Seconds left on the clock, if the lock is timed
    pub fn time_remaining_secs(&self) -> Option<f64> {
        self.time_remaining_secs
    }

    /// Timestamped snapshot for display or serialization
    pub fn status(&self) -> SessionStatus {
        SessionStatus::new(
            self.challenge.variant,
            self.session_state,
            self.active_stage,
            self.stage_count,
            self.progress(),
            self.time_remaining_secs,
        )
    }
}

impl std::fmt::Debug for LockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockEngine")
            .field("challenge", &self.challenge)
            .field("state", &self.session_state)
            .field("active_stage", &self.active_stage)
            .field("stage_count", &self.stage_count)
            .field("time_remaining_secs", &self.time_remaining_secs)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
