//! Debounced, single-flight scheduling of syntax checks for one document.

use std::time::{Duration, Instant};

use super::analyzer::{CheckOutcome, DEFAULT_ANALYZER_TIMEOUT};
use super::document::DocumentId;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    Idle,
    /// An edit armed the debounce timer.
    Pending,
    /// A check is in flight and no newer edit is waiting.
    Running,
}

/// A snapshot dispatched to the analyzer. `seq` orders requests of one
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub doc: DocumentId,
    pub seq: u64,
    pub version: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub doc: DocumentId,
    pub seq: u64,
    pub version: u64,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    seq: u64,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct CheckRunner {
    debounce: Duration,
    stall_after: Duration,
    deadline: Option<Instant>,
    in_flight: Option<InFlight>,
    next_seq: u64,
    last_applied: Option<u64>,
}

impl CheckRunner {
    /// `stall_after` bounds how long an in-flight check may block the next
    /// one; after that its result is treated as lost.
    pub fn new(debounce: Duration, stall_after: Duration) -> Self {
        Self {
            debounce,
            stall_after,
            deadline: None,
            in_flight: None,
            next_seq: 1,
            last_applied: None,
        }
    }

    pub fn phase(&self) -> CheckPhase {
        if self.deadline.is_some() {
            CheckPhase::Pending
        } else if self.in_flight.is_some() {
            CheckPhase::Running
        } else {
            CheckPhase::Idle
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight.map(|f| f.seq)
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    /// Re-arms the debounce timer.
    pub fn on_text_changed(&mut self, now: Instant) {
        self.deadline = Some(now + self.debounce);
    }

    /// Returns the sequence number of a check to start now, if any. The
    /// caller snapshots the document at this point, not earlier.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        if let Some(in_flight) = self.in_flight {
            if now.duration_since(in_flight.started) < self.stall_after {
                return None;
            }
            tracing::warn!(
                seq = in_flight.seq,
                stalled_ms = now.duration_since(in_flight.started).as_millis() as u64,
                "syntax check stalled; starting a fresh one"
            );
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 50 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "check debounce overshoot"
            );
        }

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.deadline = None;
        self.in_flight = Some(InFlight { seq, started: now });
        Some(seq)
    }

    /// Records completion of `seq`; returns whether its result is the newest
    /// one seen and should be published.
    pub fn on_completed(&mut self, seq: u64) -> bool {
        if self.in_flight.is_some_and(|f| f.seq == seq) {
            self.in_flight = None;
        }
        if seq >= self.next_seq {
            return false;
        }
        if self.last_applied.is_some_and(|last| seq <= last) {
            return false;
        }
        self.last_applied = Some(seq);
        true
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_ANALYZER_TIMEOUT + Duration::from_secs(1))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/check_runner.rs"]
mod tests;
