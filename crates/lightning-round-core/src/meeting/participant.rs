use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Pending,
    Speaking,
    Spoken,
}

/// A roster entry before scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub name: String,
    /// Added by hand rather than taken from the configured team roster.
    #[serde(default)]
    pub is_custom: bool,
}

impl ParticipantInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_custom: false,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_custom: true,
        }
    }
}

/// A participant in a running meeting.
///
/// Created in a batch by the scheduler; only `status` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub status: ParticipantStatus,
    #[serde(default)]
    pub is_custom: bool,
}

impl Participant {
    pub fn is_speaking(&self) -> bool {
        self.status == ParticipantStatus::Speaking
    }

    pub fn has_spoken(&self) -> bool {
        self.status == ParticipantStatus::Spoken
    }
}
