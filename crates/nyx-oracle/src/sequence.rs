//! Timed step sequences driven by a caller-supplied clock.
//!
//! A sequence is plain data: an ordered list of steps, each waiting
//! `delay_ms` after the previous one before its action fires. Nothing runs
//! on its own; the owner polls [`Sequencer::due`] with the current time and
//! applies whatever actions come back. Fast-forwarding a virtual clock plays
//! the whole sequence in one call.

use std::collections::VecDeque;

/// One step: wait, then fire `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<A> {
    /// Wait after the previous step (or the start).
    pub delay_ms: u64,
    /// What the owner should do when the step fires.
    pub action: A,
}

impl<A> Step<A> {
    /// Create a step.
    pub fn new(delay_ms: u64, action: A) -> Self {
        Self { delay_ms, action }
    }
}

/// Plays a list of steps against the caller's clock.
#[derive(Debug, Clone)]
pub struct Sequencer<A> {
    steps: VecDeque<Step<A>>,
    cursor_ms: u64,
}

impl<A> Sequencer<A> {
    /// Start a sequence at `now`.
    pub fn start(now: u64, steps: impl IntoIterator<Item = Step<A>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            cursor_ms: now,
        }
    }

    /// Pop every step whose time has come, in order.
    pub fn due(&mut self, now: u64) -> Vec<A> {
        let mut fired = Vec::new();
        while let Some(step) = self.steps.front() {
            let at = self.cursor_ms.saturating_add(step.delay_ms);
            if at > now {
                break;
            }
            self.cursor_ms = at;
            if let Some(step) = self.steps.pop_front() {
                fired.push(step.action);
            }
        }
        fired
    }

    /// When the next step fires, if any remain.
    pub fn next_due_at(&self) -> Option<u64> {
        self.steps
            .front()
            .map(|s| self.cursor_ms.saturating_add(s.delay_ms))
    }

    /// When the final step fires, if any remain.
    pub fn finishes_at(&self) -> Option<u64> {
        if self.steps.is_empty() {
            return None;
        }
        Some(
            self.steps
                .iter()
                .fold(self.cursor_ms, |at, s| at.saturating_add(s.delay_ms)),
        )
    }

    /// Whether every step has fired.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps not yet fired.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Drop all pending steps. Returns how many were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.steps.len();
        self.steps.clear();
        dropped
    }
}
