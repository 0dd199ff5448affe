//! Wall-clock session clock
//!
//! Each round runs as a tokio task that drives the round's `Countdown` from a
//! `tokio::time::interval` and sends its notifications down an unbounded
//! channel. The game's owner receives them on the same channel as user input,
//! so the game still sees one event at a time.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::consts::TICK_SECONDS;
use crate::sim::{ClockEvent, Countdown, RoundId, SessionClock};

/// `SessionClock` backed by a tokio interval task.
///
/// `T` is the owner's message type, so clock events can share a queue with
/// other input. `start` spawns onto the current runtime and must be called
/// from within one.
#[derive(Debug)]
pub struct TokioClock<T> {
    sender: UnboundedSender<T>,
    tick: Duration,
    task: Option<JoinHandle<()>>,
}

impl<T: From<ClockEvent> + Send + 'static> TokioClock<T> {
    pub fn new(sender: UnboundedSender<T>) -> Self {
        Self {
            sender,
            tick: Duration::from_secs(u64::from(TICK_SECONDS)),
            task: None,
        }
    }

    /// Override the tick length (one countdown "second")
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Whether a countdown task is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl<T: From<ClockEvent> + Send + 'static> SessionClock for TokioClock<T> {
    fn start(&mut self, round: RoundId, seconds: u32) {
        self.cancel();

        let sender = self.sender.clone();
        let tick = self.tick;
        let mut countdown = Countdown::new(round, seconds);
        self.task = Some(tokio::spawn(async move {
            // Default burst behaviour: a late wake-up catches up, so the
            // round's total length stays on wall time.
            let mut ticker = interval_at(Instant::now() + tick, tick);
            while countdown.is_running() {
                ticker.tick().await;
                let Some(event) = countdown.advance() else {
                    break;
                };
                if sender.send(T::from(event)).is_err() {
                    log::debug!("Clock receiver closed, stopping round {round}");
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for TokioClock<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
