use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::meeting::{MeetingState, Participant};

/// Why the floor moved to the next speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceReason {
    TimeUp,
    Skipped,
}

/// Every state change in a meeting produces an Event.
/// Hosts render from them; `StateSnapshot` carries everything a view needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    MeetingStarted {
        participants: usize,
        time_per_speaker_secs: u64,
        first_speaker: String,
        at: DateTime<Utc>,
    },
    MeetingPaused {
        speaker_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    MeetingResumed {
        speaker_index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SpeakerAdvanced {
        from_index: usize,
        to_index: usize,
        speaker: String,
        reason: AdvanceReason,
        at: DateTime<Utc>,
    },
    /// The last speaker's turn is over.
    MeetingFinished {
        participants: usize,
        reason: AdvanceReason,
        at: DateTime<Utc>,
    },
    /// The meeting was torn down and the session is idle again.
    MeetingEnded {
        spoken: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: MeetingState,
        participants: Vec<Participant>,
        current_speaker_index: usize,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::MeetingStarted { .. } => "meeting_started",
            Event::MeetingPaused { .. } => "meeting_paused",
            Event::MeetingResumed { .. } => "meeting_resumed",
            Event::SpeakerAdvanced { .. } => "speaker_advanced",
            Event::MeetingFinished { .. } => "meeting_finished",
            Event::MeetingEnded { .. } => "meeting_ended",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }

}
