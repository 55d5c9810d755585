//! # Lightning Round Core Library
//!
//! This library provides the core logic for Lightning Round, a turn-based
//! meeting timer. It randomizes who speaks when, gives each speaker a fixed
//! slice of time and walks the meeting from one speaker to the next.
//!
//! ## Architecture
//!
//! - **Scheduler**: A pure function that shuffles the roster and computes the
//!   per-speaker duration
//! - **Session**: A state machine value (`Idle -> Running <-> Paused ->
//!   Finished`) advanced by one-second ticks and user commands, with a pure
//!   reducer for hosts that prefer `(Session, Command) -> Session`
//! - **Countdown**: An owned, cancellable one-second tick task
//! - **Storage**: TOML-based configuration for setup defaults
//!
//! ## Key Components
//!
//! - [`Session`]: Meeting state machine
//! - [`MeetingRunner`]: Session plus the countdown that drives it
//! - [`schedule`]: Turn-order scheduler
//! - [`Roster`]: Setup-time participant list
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod meeting;
pub mod roster;
pub mod storage;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{AdvanceReason, Event};
pub use meeting::{
    preview_time_per_speaker, reduce, schedule, time_per_speaker, AllocationMode, Command,
    Countdown, MeetingPlan, MeetingRunner, MeetingState, Participant, ParticipantInput,
    ParticipantStatus, Session, Tick, TICK_PERIOD,
};
pub use roster::Roster;
pub use storage::Config;
