//! Collaborator contracts
//!
//! The engine never owns a haptic driver, a reward ledger, or a heart-rate
//! monitor; it talks to all three through these traits, injected at
//! construction. Inert defaults keep tests and headless runs simple.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::types::{IntensityTier, LockChallenge, LockEvent};

/// Receives the engine's event stream; every call is fire-and-forget
pub trait FeedbackSink {
    fn on_event(&mut self, event: &LockEvent);
}

/// Receives exactly one unlock report per successful session
pub trait ProgressionSink {
    fn report_unlock(&mut self, challenge: &LockChallenge);
}

/// Supplies the latest heart-rate intensity tier.
///
/// Classification happens on the monitoring side; the engine only reads,
/// and treats an inactive monitor as Calm.
pub trait BiometricSource {
    fn intensity_tier(&self) -> IntensityTier;
    fn is_active(&self) -> bool;
}

/// Feedback sink that drops every event
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn on_event(&mut self, _event: &LockEvent) {}
}

/// Progression sink that ignores unlock reports
#[derive(Debug, Default)]
pub struct NullProgression;

impl ProgressionSink for NullProgression {
    fn report_unlock(&mut self, _challenge: &LockChallenge) {}
}

/// Biometric source pinned at Calm, monitor inactive
#[derive(Debug, Default)]
pub struct CalmBiometric;

impl BiometricSource for CalmBiometric {
    fn intensity_tier(&self) -> IntensityTier {
        IntensityTier::Calm
    }

    fn is_active(&self) -> bool {
        false
    }
}

/// Feedback sink that queues events for a polling consumer.
///
/// Clones share one queue: hand one handle to the engine and drain from
/// another on the host's own cadence (once per frame, typically).
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    events: Rc<RefCell<VecDeque<LockEvent>>>,
}

impl EventBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued events, oldest first
    pub fn drain(&self) -> Vec<LockEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl FeedbackSink for EventBuffer {
    fn on_event(&mut self, event: &LockEvent) {
        self.events.borrow_mut().push_back(*event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
