//! Meeting session state machine.
//!
//! The session is a plain value with no timer of its own. A host delivers a
//! `tick()` once per second while the state is `Running` and forwards user
//! commands; every mutation happens on the caller's thread.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |           |
//!           +--> Finished <--+
//! (any non-idle) -> Idle   (end)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let plan = schedule(names, 30, AllocationMode::TotalTime, &mut rand::thread_rng())?;
//! let mut session = Session::new();
//! session.start(plan);
//! // Once per second while running:
//! session.tick(); // Returns Some(Event) when the speaker changes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::participant::{Participant, ParticipantStatus};
use super::scheduler::MeetingPlan;
use crate::events::{AdvanceReason, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// External inputs to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Start(MeetingPlan),
    Tick,
    Pause,
    Resume,
    /// Pause when running, resume when paused.
    Toggle,
    Skip,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    state: MeetingState,
    participants: Vec<Participant>,
    current_speaker_index: usize,
    /// Seconds each speaker gets; constant for the whole meeting.
    time_per_speaker: u64,
    /// Seconds left for the current speaker.
    current_time_remaining: u64,
}

/// Apply `command` to `session` and return the new session.
pub fn reduce(mut session: Session, command: Command) -> Session {
    session.apply(command);
    session
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> MeetingState {
        self.state
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn current_speaker_index(&self) -> usize {
        self.current_speaker_index
    }

    pub fn time_per_speaker(&self) -> u64 {
        self.time_per_speaker
    }

    pub fn current_time_remaining(&self) -> u64 {
        self.current_time_remaining
    }

    /// True while a speaker holds the floor (running or paused).
    pub fn is_active(&self) -> bool {
        matches!(self.state, MeetingState::Running | MeetingState::Paused)
    }

    pub fn current_speaker(&self) -> Option<&Participant> {
        if !self.is_active() {
            return None;
        }
        self.participants.get(self.current_speaker_index)
    }

    pub fn next_speaker(&self) -> Option<&Participant> {
        if !self.is_active() {
            return None;
        }
        self.participants.get(self.current_speaker_index + 1)
    }

    pub fn is_last_speaker(&self) -> bool {
        self.current_speaker_index + 1 >= self.participants.len()
    }

    /// 0.0 .. 1.0 elapsed fraction of the current turn.
    pub fn progress(&self) -> f64 {
        if self.time_per_speaker == 0 {
            return 0.0;
        }
        1.0 - (self.current_time_remaining as f64 / self.time_per_speaker as f64)
    }

    /// Build a full state snapshot event for the render surface.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            participants: self.participants.clone(),
            current_speaker_index: self.current_speaker_index,
            remaining_secs: self.current_time_remaining,
            total_secs: self.time_per_speaker,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Dispatch a [`Command`] to the matching method.
    pub fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start(plan) => self.start(plan),
            Command::Tick => self.tick(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Toggle => self.toggle(),
            Command::Skip => self.skip(),
            Command::End => self.end(),
        }
    }

    /// Seed the session from a scheduled plan. No-op unless idle.
    pub fn start(&mut self, plan: MeetingPlan) -> Option<Event> {
        if self.state != MeetingState::Idle || plan.is_empty() {
            tracing::trace!(state = ?self.state, "start ignored");
            return None;
        }

        let MeetingPlan {
            mut participants,
            time_per_speaker_secs,
        } = plan;
        for (index, p) in participants.iter_mut().enumerate() {
            p.status = if index == 0 {
                ParticipantStatus::Speaking
            } else {
                ParticipantStatus::Pending
            };
        }

        self.participants = participants;
        self.current_speaker_index = 0;
        self.time_per_speaker = time_per_speaker_secs;
        self.current_time_remaining = time_per_speaker_secs;
        self.state = MeetingState::Running;

        tracing::debug!(
            participants = self.participants.len(),
            time_per_speaker = self.time_per_speaker,
            "meeting started"
        );
        Some(Event::MeetingStarted {
            participants: self.participants.len(),
            time_per_speaker_secs: self.time_per_speaker,
            first_speaker: self.participants[0].name.clone(),
            at: Utc::now(),
        })
    }

    /// One second elapsed. Returns an event only when the turn changes.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != MeetingState::Running {
            return None;
        }
        if self.current_time_remaining <= 1 {
            return Some(self.advance(AdvanceReason::TimeUp));
        }
        self.current_time_remaining -= 1;
        None
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != MeetingState::Running {
            tracing::trace!(state = ?self.state, "pause ignored");
            return None;
        }
        self.state = MeetingState::Paused;
        tracing::debug!(remaining = self.current_time_remaining, "meeting paused");
        Some(Event::MeetingPaused {
            speaker_index: self.current_speaker_index,
            remaining_secs: self.current_time_remaining,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != MeetingState::Paused {
            tracing::trace!(state = ?self.state, "resume ignored");
            return None;
        }
        self.state = MeetingState::Running;
        tracing::debug!(remaining = self.current_time_remaining, "meeting resumed");
        Some(Event::MeetingResumed {
            speaker_index: self.current_speaker_index,
            remaining_secs: self.current_time_remaining,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            MeetingState::Running => self.pause(),
            MeetingState::Paused => self.resume(),
            _ => None,
        }
    }

    /// Hand the floor to the next speaker regardless of time left.
    ///
    /// A skip issued while paused resumes the meeting for the new speaker.
    pub fn skip(&mut self) -> Option<Event> {
        if !self.is_active() {
            tracing::trace!(state = ?self.state, "skip ignored");
            return None;
        }
        Some(self.advance(AdvanceReason::Skipped))
    }

    /// Discard the meeting and return to idle. No-op when already idle.
    pub fn end(&mut self) -> Option<Event> {
        if self.state == MeetingState::Idle {
            return None;
        }
        let spoken = self.spoken_count();
        *self = Self::default();
        tracing::debug!(spoken, "meeting ended");
        Some(Event::MeetingEnded { spoken, at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn spoken_count(&self) -> usize {
        self.participants.iter().filter(|p| p.has_spoken()).count()
    }

    fn advance(&mut self, reason: AdvanceReason) -> Event {
        let from = self.current_speaker_index;
        if let Some(current) = self.participants.get_mut(from) {
            current.status = ParticipantStatus::Spoken;
        }

        let next = from + 1;
        if next < self.participants.len() {
            self.current_speaker_index = next;
            self.participants[next].status = ParticipantStatus::Speaking;
            self.current_time_remaining = self.time_per_speaker;
            self.state = MeetingState::Running;
            tracing::debug!(from, to = next, ?reason, "speaker advanced");
            Event::SpeakerAdvanced {
                from_index: from,
                to_index: next,
                speaker: self.participants[next].name.clone(),
                reason,
                at: Utc::now(),
            }
        } else {
            self.current_time_remaining = 0;
            self.state = MeetingState::Finished;
            tracing::debug!(participants = self.participants.len(), ?reason, "meeting finished");
            Event::MeetingFinished {
                participants: self.participants.len(),
                reason,
                at: Utc::now(),
            }
        }
    }
}
