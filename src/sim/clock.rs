//! Per-question countdown
//!
//! The countdown itself is a plain value advanced one second at a time. Hosts
//! pick how seconds are produced: `ManualClock` for tests and frame loops,
//! `platform::timer::TokioClock` for wall-clock time. Every notification is
//! tagged with the `RoundId` it was started for so the game can discard
//! stragglers from a round that already resolved.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generation token for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> RoundId {
        RoundId(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the countdown reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockSignal {
    /// One second elapsed, `remaining` seconds left
    Tick { remaining: u32 },
    /// Time is up
    Expired,
}

/// A countdown notification for a specific round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    pub round: RoundId,
    pub signal: ClockSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownStatus {
    Running,
    Cancelled,
    Expired,
}

/// Countdown for one round.
///
/// A duration of N seconds yields ticks for N-1 down to 1 remaining, then a
/// single `Expired`. Nothing is emitted after expiry or cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    round: RoundId,
    remaining: u32,
    status: CountdownStatus,
}

impl Countdown {
    pub fn new(round: RoundId, seconds: u32) -> Self {
        Self {
            round,
            remaining: seconds,
            status: CountdownStatus::Running,
        }
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.status == CountdownStatus::Running
    }

    pub fn is_expired(&self) -> bool {
        self.status == CountdownStatus::Expired
    }

    /// Let one second elapse
    pub fn advance(&mut self) -> Option<ClockEvent> {
        if !self.is_running() {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let signal = if self.remaining == 0 {
            self.status = CountdownStatus::Expired;
            ClockSignal::Expired
        } else {
            ClockSignal::Tick {
                remaining: self.remaining,
            }
        };
        Some(ClockEvent {
            round: self.round,
            signal,
        })
    }

    /// Stop the countdown. Returns true only if it was still running.
    pub fn cancel(&mut self) -> bool {
        if self.is_running() {
            self.status = CountdownStatus::Cancelled;
            true
        } else {
            false
        }
    }
}

/// Source of countdown notifications for the game.
///
/// Implementations deliver `ClockEvent`s back to `QuizGame::handle_clock_event`
/// on the same queue as user input.
pub trait SessionClock {
    /// Start a countdown for `round`, replacing any previous one
    fn start(&mut self, round: RoundId, seconds: u32);

    /// Stop the current countdown; safe to call any number of times
    fn cancel(&mut self);
}

/// Clock advanced explicitly by its owner
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    countdown: Option<Countdown>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_running)
    }

    /// Let one second elapse on the active countdown
    pub fn advance_second(&mut self) -> Option<ClockEvent> {
        self.countdown.as_mut().and_then(Countdown::advance)
    }
}

impl SessionClock for ManualClock {
    fn start(&mut self, round: RoundId, seconds: u32) {
        self.countdown = Some(Countdown::new(round, seconds));
    }

    fn cancel(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(countdown: &mut Countdown) -> Vec<ClockSignal> {
        std::iter::from_fn(|| countdown.advance())
            .map(|e| e.signal)
            .collect()
    }

    #[test]
    fn test_countdown_ticks_then_expires_once() {
        let mut countdown = Countdown::new(RoundId(1), 3);
        let signals = drain(&mut countdown);
        assert_eq!(
            signals,
            vec![
                ClockSignal::Tick { remaining: 2 },
                ClockSignal::Tick { remaining: 1 },
                ClockSignal::Expired,
            ]
        );
        assert!(countdown.is_expired());
        assert_eq!(countdown.advance(), None);
    }

    #[test]
    fn test_events_carry_round() {
        let mut countdown = Countdown::new(RoundId(7), 2);
        assert_eq!(countdown.advance().map(|e| e.round), Some(RoundId(7)));
    }

    #[test]
    fn test_full_level_one_countdown() {
        let mut countdown = Countdown::new(RoundId(1), 20);
        let signals = drain(&mut countdown);
        assert_eq!(signals.len(), 20);
        assert_eq!(signals[0], ClockSignal::Tick { remaining: 19 });
        assert_eq!(signals.last(), Some(&ClockSignal::Expired));
    }

    #[test]
    fn test_cancel_suppresses_everything() {
        let mut countdown = Countdown::new(RoundId(1), 10);
        countdown.advance();
        assert!(countdown.cancel());
        assert_eq!(countdown.advance(), None);
        assert_eq!(countdown.remaining(), 9);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut countdown = Countdown::new(RoundId(1), 10);
        assert!(countdown.cancel());
        assert!(!countdown.cancel());

        let mut expired = Countdown::new(RoundId(2), 1);
        assert_eq!(
            expired.advance().map(|e| e.signal),
            Some(ClockSignal::Expired)
        );
        assert!(!expired.cancel());
        assert!(expired.is_expired());
    }

    #[test]
    fn test_manual_clock_restart_replaces_countdown() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.advance_second(), None);

        clock.start(RoundId(1), 5);
        clock.advance_second();
        clock.start(RoundId(2), 5);
        let event = clock.advance_second().unwrap();
        assert_eq!(event.round, RoundId(2));
        assert_eq!(event.signal, ClockSignal::Tick { remaining: 4 });
    }

    #[test]
    fn test_manual_clock_cancel_without_countdown() {
        let mut clock = ManualClock::new();
        clock.cancel();
        clock.cancel();
        assert!(!clock.is_running());

        clock.start(RoundId(1), 5);
        assert!(clock.is_running());
        clock.cancel();
        clock.cancel();
        assert!(!clock.is_running());
        assert_eq!(clock.advance_second(), None);
    }
}
