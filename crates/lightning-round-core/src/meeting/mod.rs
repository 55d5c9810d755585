mod countdown;
mod participant;
mod runner;
mod scheduler;
mod session;

pub use countdown::{Countdown, Tick, TICK_PERIOD};
pub use participant::{Participant, ParticipantInput, ParticipantStatus};
pub use runner::MeetingRunner;
pub use scheduler::{
    preview_time_per_speaker, schedule, time_per_speaker, AllocationMode, MeetingPlan,
};
pub use session::{reduce, Command, MeetingState, Session};
