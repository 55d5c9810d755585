//! A session paired with the countdown that drives it.
//!
//! After every command or tick the runner re-derives whether a countdown
//! should exist: one is held exactly while the session is `Running`, and it
//! is dropped on every other path, including when the runner itself drops.

use std::time::Duration;

use super::countdown::{Countdown, TICK_PERIOD};
use super::participant::ParticipantInput;
use super::scheduler::{schedule, AllocationMode};
use super::session::{Command, MeetingState, Session};
use crate::error::ValidationError;
use crate::events::{AdvanceReason, Event};

#[derive(Debug)]
pub struct MeetingRunner {
    session: Session,
    countdown: Option<Countdown>,
    period: Duration,
}

impl Default for MeetingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingRunner {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            session: Session::new(),
            countdown: None,
            period,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    /// Schedule `names` with the thread RNG and start the meeting.
    ///
    /// # Errors
    ///
    /// Returns the scheduler's [`ValidationError`] for unusable input.
    pub fn start<I, P>(
        &mut self,
        names: I,
        time_value: u32,
        mode: AllocationMode,
    ) -> Result<Option<Event>, ValidationError>
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantInput>,
    {
        let plan = schedule(names, time_value, mode, &mut rand::thread_rng())?;
        Ok(self.dispatch(Command::Start(plan)))
    }

    /// Apply a command and bring the countdown in line with the new state.
    pub fn dispatch(&mut self, command: Command) -> Option<Event> {
        let event = self.session.apply(command);
        if let Some(Event::SpeakerAdvanced {
            reason: AdvanceReason::Skipped,
            ..
        }) = &event
        {
            // A skipped-to speaker gets a full first second.
            self.countdown = None;
        }
        self.sync_countdown();
        event
    }

    /// Wait for the next tick and apply it.
    ///
    /// Completes once per tick while running and never completes otherwise,
    /// which makes it suitable as a `tokio::select!` branch.
    pub async fn next_tick(&mut self) -> Option<Event> {
        loop {
            let Some(countdown) = self.countdown.as_mut() else {
                return std::future::pending().await;
            };
            if countdown.tick().await.is_some() {
                return self.dispatch(Command::Tick);
            }
            tracing::warn!("countdown closed unexpectedly, restarting");
            self.countdown = None;
            self.sync_countdown();
        }
    }

    fn sync_countdown(&mut self) {
        let should_run = self.session.state() == MeetingState::Running;
        match (should_run, self.countdown.is_some()) {
            (true, false) => self.countdown = Some(Countdown::start(self.period)),
            (false, true) => self.countdown = None,
            _ => {}
        }
    }
}
