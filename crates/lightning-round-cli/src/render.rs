//! Terminal rendering of a meeting session.

use lightning_round_core::storage::DisplayConfig;
use lightning_round_core::{AdvanceReason, Event, MeetingState, ParticipantStatus, Session};

/// `MM:SS`, minutes and seconds zero-padded to two digits.
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Colour band of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Normal,
    Amber,
    Critical,
    /// Time is up, or none was allocated.
    Neutral,
}

impl TimerPhase {
    pub fn of(remaining: u64, total: u64, display: &DisplayConfig) -> Self {
        if total == 0 || remaining == 0 {
            TimerPhase::Neutral
        } else if remaining <= display.critical_secs {
            TimerPhase::Critical
        } else if remaining as f64 <= total as f64 * display.amber_ratio {
            TimerPhase::Amber
        } else {
            TimerPhase::Normal
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            TimerPhase::Normal => "\x1b[32m",
            TimerPhase::Amber => "\x1b[33m",
            TimerPhase::Critical => "\x1b[31m",
            TimerPhase::Neutral => "\x1b[90m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// One-line status redrawn on every tick.
pub fn status_line(session: &Session, display: &DisplayConfig, color: bool) -> String {
    let Some(speaker) = session.current_speaker() else {
        return format!("[{}]", state_label(session.state()));
    };

    let clock = format_clock(session.current_time_remaining());
    let clock = if color {
        let phase = TimerPhase::of(
            session.current_time_remaining(),
            session.time_per_speaker(),
            display,
        );
        format!("{}{clock}{RESET}", phase.ansi())
    } else {
        clock
    };

    let mut line = format!(
        "[{}] {} {} / {}",
        state_label(session.state()),
        speaker.name,
        clock,
        format_clock(session.time_per_speaker()),
    );
    if display.show_next_speaker {
        match session.next_speaker() {
            Some(next) => line.push_str(&format!("  next: {}", next.name)),
            None => line.push_str("  last speaker"),
        }
    }
    line
}

/// Full participant list with turn markers.
pub fn board(session: &Session) -> String {
    session
        .participants()
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let marker = match p.status {
                ParticipantStatus::Speaking => ">",
                ParticipantStatus::Spoken => "x",
                ParticipantStatus::Pending => " ",
            };
            format!(" {marker} {:>2}. {}", index + 1, p.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable line for an event, if it deserves one.
pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::MeetingStarted {
            participants,
            time_per_speaker_secs,
            first_speaker,
            ..
        } => Some(format!(
            "Meeting started: {participants} {}, {} each. {first_speaker} goes first.",
            if *participants == 1 { "person" } else { "people" },
            format_clock(*time_per_speaker_secs),
        )),
        Event::MeetingPaused { .. } => Some("Paused. Press Enter to resume.".into()),
        Event::MeetingResumed { .. } => Some("Resumed.".into()),
        Event::SpeakerAdvanced {
            speaker, reason, ..
        } => Some(match reason {
            AdvanceReason::TimeUp => format!("Time's up! Next: {speaker}"),
            AdvanceReason::Skipped => format!("Skipped. Next: {speaker}"),
        }),
        Event::MeetingFinished { .. } => Some(
            "Meeting finished! All participants have had their turn. [r] new round, [q] quit"
                .into(),
        ),
        Event::MeetingEnded { .. } => {
            Some("Meeting reset. [r] start a new round, [q] quit".into())
        }
        Event::StateSnapshot { .. } => None,
    }
}

pub const HELP: &str =
    "Keys: [Enter]/p pause-resume  s skip  e end  r new round  q quit  h help";

fn state_label(state: MeetingState) -> &'static str {
    match state {
        MeetingState::Idle => "IDLE",
        MeetingState::Running => "RUNNING",
        MeetingState::Paused => "PAUSED",
        MeetingState::Finished => "FINISHED",
    }
}
