//! Setup-time participant list.
//!
//! Collects names before a round starts. Entry accepts one name or several
//! separated by commas; blanks are dropped and a name already on the roster
//! is not added twice. The scheduler itself keeps duplicates, so callers
//! that bypass the roster may still pass repeated names.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::meeting::{preview_time_per_speaker, AllocationMode, ParticipantInput};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<ParticipantInput>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster seeded from the configured team list.
    pub fn from_team<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.push(name.as_ref(), false);
        }
        roster
    }

    /// Add every comma-separated name in `input` as a custom member.
    /// Returns how many were actually added.
    pub fn add(&mut self, input: &str) -> usize {
        split_names(input)
            .filter(|name| self.push(name, true))
            .count()
    }

    /// Remove every member called `name`. Returns true if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.name != name.trim());
        self.members.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[ParticipantInput] {
        &self.members
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Check that a meeting can start with `time_value` minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveTime`] or
    /// [`ValidationError::EmptyRoster`].
    pub fn validate(&self, time_value: u32) -> Result<(), ValidationError> {
        if time_value == 0 {
            return Err(ValidationError::NonPositiveTime(time_value));
        }
        if self.members.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        Ok(())
    }

    /// Seconds per person as shown before starting; 0 when not startable.
    pub fn preview_secs(&self, time_value: u32, mode: AllocationMode) -> u64 {
        preview_time_per_speaker(time_value, mode, self.members.len())
    }

    fn push(&mut self, name: &str, is_custom: bool) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.members.push(ParticipantInput {
            name: name.to_string(),
            is_custom,
        });
        true
    }
}

/// Split comma-separated input into trimmed, non-empty names.
pub fn split_names(input: &str) -> impl Iterator<Item = &str> {
    input.split(',').map(str::trim).filter(|s| !s.is_empty())
}
