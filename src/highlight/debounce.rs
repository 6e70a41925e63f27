//! Debounce gate in front of the controller
//!
//! Coalesces a burst of events into a single trigger that fires once no
//! new event has arrived for the quiet period. Time is passed in by the
//! caller, which keeps the gate deterministic under test.

use std::time::{Duration, Instant};

/// What caused a trigger to be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCause {
    Activation,
    SelectionChanged,
    DocumentChanged,
}

/// A scheduled trigger
///
/// Carries no selection or document text: the controller reads the
/// current state from the host when the trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRequest {
    pub cause: TriggerCause,
    pub requested_at: Instant,
}

impl TriggerRequest {
    pub fn new(cause: TriggerCause, requested_at: Instant) -> Self {
        Self { cause, requested_at }
    }
}

/// Trailing-edge debounce with a single pending slot
#[derive(Debug)]
pub struct DebounceGate {
    delay: Duration,
    pending: Option<TriggerRequest>,
    /// Requests replaced since the pending one was first scheduled
    coalesced: usize,
}

impl DebounceGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            coalesced: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule a trigger, restarting the quiet period.
    ///
    /// The quiet period runs from the latest request seen, so a request
    /// stamped earlier than the pending one never pulls the deadline in.
    pub fn schedule(&mut self, request: TriggerRequest) {
        let request = match self.pending {
            Some(pending) => {
                self.coalesced += 1;
                TriggerRequest {
                    requested_at: pending.requested_at.max(request.requested_at),
                    ..request
                }
            }
            None => request,
        };
        self.pending = Some(request);
    }

    /// When the pending trigger will fire
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.requested_at + self.delay)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending trigger if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<TriggerRequest> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }

        if self.coalesced > 0 {
            tracing::trace!("Debounce coalesced {} events", self.coalesced + 1);
        }
        self.coalesced = 0;
        self.pending.take()
    }

    /// Drop the pending trigger without firing
    pub fn cancel(&mut self) {
        self.pending = None;
        self.coalesced = 0;
    }
}
