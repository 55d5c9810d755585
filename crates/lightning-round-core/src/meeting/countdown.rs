//! Cancellable one-second tick source.
//!
//! A [`Countdown`] owns a Tokio task that emits a [`Tick`] every period.
//! Dropping the handle aborts the task and closes the channel, so a stopped
//! countdown can never deliver a late tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Period between ticks in a real meeting.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick;

#[derive(Debug)]
pub struct Countdown {
    rx: mpsc::Receiver<Tick>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Spawn the tick task. The first tick arrives one full `period` from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Tick).await.is_err() {
                    break;
                }
            }
        });
        tracing::trace!(?period, "countdown started");
        Self { rx, task }
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn tick(&mut self) -> Option<Tick> {
        self.rx.recv().await
    }

    /// Stop the countdown. Same as dropping it.
    pub fn stop(self) {}
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
        tracing::trace!("countdown stopped");
    }
}
