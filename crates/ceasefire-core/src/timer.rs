//! Vote timer state machine
//!
//! Time-based transitions are evaluated lazily on every read: querying the
//! phase is the only path through which Running -> Done and Cooldown -> Ready
//! occur. A timer that is never queried never advances, so there is no
//! per-timer callback or background task to cancel.

use ceasefire_util::MonotonicInstant;
use std::time::Duration;
use tracing::debug;

/// Phase of a vote timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No vote running, a new one may start
    Ready,
    /// Vote in progress, accumulating toward the timeout
    Running,
    /// Vote ended (timeout elapsed or skipped), awaiting tally
    Done,
    /// Tally finished, waiting out the retry cooldown
    Cooldown,
}

/// Countdown/cooldown state machine for one faction's votes.
///
/// Edges: Ready -(start)-> Running -(timeout or skip)-> Done
/// -(start_cooldown)-> Cooldown -(cooldown elapsed)-> Ready. Calling an
/// inapplicable transition is a no-op reported via the returned bool.
#[derive(Debug)]
pub struct VoteTimer {
    phase: TimerPhase,
    since: Option<MonotonicInstant>,
    duration: Duration,
    cooldown: Duration,
}

impl VoteTimer {
    pub fn new(duration: Duration, cooldown: Duration) -> Self {
        Self {
            phase: TimerPhase::Ready,
            since: None,
            duration,
            cooldown,
        }
    }

    /// Materialize any elapsed-time transition before acting on the phase
    fn evaluate(&mut self, now: MonotonicInstant) {
        match self.phase {
            TimerPhase::Ready | TimerPhase::Done => {}
            TimerPhase::Running => {
                if self.elapsed(now) >= self.duration {
                    self.since = None;
                    self.phase = TimerPhase::Done;
                }
            }
            TimerPhase::Cooldown => {
                if self.elapsed(now) >= self.cooldown {
                    self.since = None;
                    self.phase = TimerPhase::Ready;
                }
            }
        }
    }

    fn elapsed(&self, now: MonotonicInstant) -> Duration {
        match self.since {
            Some(since) => now.duration_since(since),
            None => Duration::ZERO,
        }
    }

    /// Current phase, after lazy evaluation
    pub fn phase(&mut self, now: MonotonicInstant) -> TimerPhase {
        self.evaluate(now);
        self.phase
    }

    /// Ready -> Running. Returns false (no-op) from any other phase.
    pub fn start(&mut self, now: MonotonicInstant) -> bool {
        self.evaluate(now);
        if self.phase != TimerPhase::Ready {
            debug!(phase = ?self.phase, "Timer start rejected");
            return false;
        }
        self.phase = TimerPhase::Running;
        self.since = Some(now);
        true
    }

    /// Done -> Cooldown, restarting the accumulator. Returns false otherwise.
    pub fn start_cooldown(&mut self, now: MonotonicInstant) -> bool {
        self.evaluate(now);
        if self.phase != TimerPhase::Done {
            debug!(phase = ?self.phase, "Timer cooldown rejected");
            return false;
        }
        self.phase = TimerPhase::Cooldown;
        self.since = Some(now);
        true
    }

    /// Force Running -> Done immediately (all eligible players have voted).
    /// No-op from any other phase.
    pub fn skip(&mut self) {
        if self.phase == TimerPhase::Running {
            self.since = None;
            self.phase = TimerPhase::Done;
        }
    }

    /// Remaining cooldown while in Cooldown, None otherwise
    pub fn remaining_cooldown(&mut self, now: MonotonicInstant) -> Option<Duration> {
        self.evaluate(now);
        if self.phase == TimerPhase::Cooldown {
            Some(self.cooldown.saturating_sub(self.elapsed(now)))
        } else {
            None
        }
    }
}
