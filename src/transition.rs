//! Enter/exit transition
//!
//! Timed state machine for the popover's fade/scale animation. It only
//! reports phase changes; styling each phase is up to the renderer, and
//! placement never waits on it. The `Enter` event is the point at which the
//! controller should place the panel, before it turns opaque.

use std::time::{Duration, Instant};

use crate::constants::TRANSITION_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Hidden,
    Entering,
    Visible,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Enter,
    Entered,
    Exit,
    Exited,
}

#[derive(Debug, Clone)]
pub struct Transition {
    phase: TransitionPhase,
    duration: Duration,
    started: Option<Instant>,
}

impl Transition {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: TransitionPhase::Hidden,
            duration,
            started: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether the panel is in the document at all.
    pub fn is_rendered(&self) -> bool {
        self.phase != TransitionPhase::Hidden
    }

    /// Drive the transition towards shown (`true`) or hidden (`false`).
    pub fn set_in(&mut self, shown: bool, now: Instant) -> Option<TransitionEvent> {
        let (phase, event) = match (self.phase, shown) {
            (TransitionPhase::Hidden | TransitionPhase::Exiting, true) => {
                (TransitionPhase::Entering, TransitionEvent::Enter)
            }
            (TransitionPhase::Visible | TransitionPhase::Entering, false) => {
                (TransitionPhase::Exiting, TransitionEvent::Exit)
            }
            _ => return None,
        };
        self.phase = phase;
        self.started = Some(now);
        Some(event)
    }

    /// Finish the running phase once `duration` has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<TransitionEvent> {
        let started = self.started?;
        if now.saturating_duration_since(started) < self.duration {
            return None;
        }
        let (phase, event) = match self.phase {
            TransitionPhase::Entering => (TransitionPhase::Visible, TransitionEvent::Entered),
            TransitionPhase::Exiting => (TransitionPhase::Hidden, TransitionEvent::Exited),
            _ => return None,
        };
        self.phase = phase;
        self.started = None;
        Some(event)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(TRANSITION_DURATION)
    }
}
