//! Turn-order scheduling.
//!
//! Runs once per round: shuffles the roster, gives every entry a fresh id and
//! computes the fixed per-speaker duration. Nothing is retained between calls.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Builder;

use super::participant::{Participant, ParticipantInput, ParticipantStatus};
use crate::error::ValidationError;

/// How the time budget is turned into a per-speaker duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// The budget is the whole meeting, split evenly.
    #[default]
    TotalTime,
    /// The budget is what each person gets.
    PerMember,
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMode::TotalTime => f.write_str("total_time"),
            AllocationMode::PerMember => f.write_str("per_member"),
        }
    }
}

impl FromStr for AllocationMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "total" | "total_time" => Ok(AllocationMode::TotalTime),
            "per_member" | "per_person" | "each" => Ok(AllocationMode::PerMember),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected 'total' or 'per-member', got '{other}'"),
            }),
        }
    }
}

/// Output of [`schedule`]: the shuffled turn order and the per-turn duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingPlan {
    pub participants: Vec<Participant>,
    pub time_per_speaker_secs: u64,
}

impl MeetingPlan {
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Seconds the whole round takes if nobody is skipped.
    pub fn total_secs(&self) -> u64 {
        self.time_per_speaker_secs
            .saturating_mul(self.participants.len() as u64)
    }
}

/// Seconds each speaker gets for `time_value` minutes split over `count` people.
///
/// Never returns 0 for a positive budget.
pub fn time_per_speaker(time_value: u32, mode: AllocationMode, count: usize) -> u64 {
    let budget_secs = u64::from(time_value).saturating_mul(60);
    let secs = match mode {
        AllocationMode::TotalTime => budget_secs / count.max(1) as u64,
        AllocationMode::PerMember => budget_secs,
    };
    if secs < 1 && time_value > 0 {
        1
    } else {
        secs
    }
}

/// Per-speaker duration as previewed during setup: 0 while the inputs are
/// not yet startable.
///
/// Plain floor of the budget, without the 1-second minimum of
/// [`time_per_speaker`]: 1 minute over 100 people previews as 0 even though
/// the scheduled turns get 1 second each.
pub fn preview_time_per_speaker(time_value: u32, mode: AllocationMode, count: usize) -> u64 {
    if time_value == 0 || count == 0 {
        return 0;
    }
    let budget_secs = u64::from(time_value).saturating_mul(60);
    match mode {
        AllocationMode::TotalTime => budget_secs / count as u64,
        AllocationMode::PerMember => budget_secs,
    }
}

/// Shuffle `names` into a turn order and allocate speaking time.
///
/// Duplicate names are kept; each entry becomes its own participant. The
/// first participant in the returned order is already `Speaking`.
///
/// # Errors
///
/// Returns a [`ValidationError`] for an empty roster, a zero time budget or a
/// blank name.
pub fn schedule<I, P, R>(
    names: I,
    time_value: u32,
    mode: AllocationMode,
    rng: &mut R,
) -> Result<MeetingPlan, ValidationError>
where
    I: IntoIterator<Item = P>,
    P: Into<ParticipantInput>,
    R: Rng + ?Sized,
{
    let mut inputs: Vec<ParticipantInput> = names.into_iter().map(Into::into).collect();
    if inputs.is_empty() {
        return Err(ValidationError::EmptyRoster);
    }
    if time_value == 0 {
        return Err(ValidationError::NonPositiveTime(time_value));
    }
    if let Some(blank) = inputs.iter().position(|p| p.name.trim().is_empty()) {
        return Err(ValidationError::InvalidValue {
            field: "name".into(),
            message: format!("entry {blank} is blank"),
        });
    }

    // Fisher-Yates from the last index down, swapping with [0, i].
    inputs.shuffle(rng);

    let participants: Vec<Participant> = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| Participant {
            id: Builder::from_random_bytes(rng.gen()).into_uuid(),
            name: input.name,
            status: if index == 0 {
                ParticipantStatus::Speaking
            } else {
                ParticipantStatus::Pending
            },
            is_custom: input.is_custom,
        })
        .collect();

    let time_per_speaker_secs = time_per_speaker(time_value, mode, participants.len());
    tracing::debug!(
        participants = participants.len(),
        time_per_speaker_secs,
        %mode,
        "scheduled meeting"
    );

    Ok(MeetingPlan {
        participants,
        time_per_speaker_secs,
    })
}

impl From<&str> for ParticipantInput {
    fn from(name: &str) -> Self {
        ParticipantInput::new(name)
    }
}

impl From<String> for ParticipantInput {
    fn from(name: String) -> Self {
        ParticipantInput::new(name)
    }
}

impl From<&String> for ParticipantInput {
    fn from(name: &String) -> Self {
        ParticipantInput::new(name.as_str())
    }
}

impl From<&ParticipantInput> for ParticipantInput {
    fn from(input: &ParticipantInput) -> Self {
        input.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> Mcg128Xsl64 {
        Mcg128Xsl64::seed_from_u64(seed)
    }

    #[test]
    fn total_time_splits_evenly() {
        assert_eq!(time_per_speaker(30, AllocationMode::TotalTime, 3), 600);
        assert_eq!(time_per_speaker(10, AllocationMode::TotalTime, 7), 85);
    }

    #[test]
    fn per_member_ignores_count() {
        for count in [1, 2, 9, 250] {
            assert_eq!(time_per_speaker(2, AllocationMode::PerMember, count), 120);
        }
    }

    #[test]
    fn tiny_budget_clamps_to_one_second() {
        assert_eq!(time_per_speaker(1, AllocationMode::TotalTime, 100), 1);
        assert_eq!(time_per_speaker(1, AllocationMode::TotalTime, 10_000), 1);
    }

    #[test]
    fn preview_is_zero_until_startable() {
        assert_eq!(preview_time_per_speaker(0, AllocationMode::TotalTime, 3), 0);
        assert_eq!(preview_time_per_speaker(30, AllocationMode::TotalTime, 0), 0);
        assert_eq!(preview_time_per_speaker(30, AllocationMode::TotalTime, 3), 600);
    }

    #[test]
    fn preview_floors_without_the_one_second_minimum() {
        assert_eq!(preview_time_per_speaker(1, AllocationMode::TotalTime, 100), 0);
        assert_eq!(time_per_speaker(1, AllocationMode::TotalTime, 100), 1);
        assert_eq!(preview_time_per_speaker(1, AllocationMode::TotalTime, 60), 1);
        assert_eq!(preview_time_per_speaker(1, AllocationMode::PerMember, 100), 60);
    }

    #[test]
    fn schedule_rejects_bad_input() {
        let mut rng = seeded(1);
        let empty: [&str; 0] = [];
        assert_eq!(
            schedule(empty, 30, AllocationMode::TotalTime, &mut rng),
            Err(ValidationError::EmptyRoster)
        );
        assert_eq!(
            schedule(["a"], 0, AllocationMode::TotalTime, &mut rng),
            Err(ValidationError::NonPositiveTime(0))
        );
        assert!(matches!(
            schedule(["a", "  "], 5, AllocationMode::PerMember, &mut rng),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn schedule_keeps_duplicates_as_distinct_participants() {
        let plan = schedule(["Sam", "Sam", "Ada"], 3, AllocationMode::TotalTime, &mut seeded(7))
            .unwrap();
        assert_eq!(plan.participants.iter().filter(|p| p.name == "Sam").count(), 2);
        let ids: HashSet<_> = plan.participants.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(plan.time_per_speaker_secs, 60);
    }

    #[test]
    fn same_seed_same_order() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let first = schedule(names, 5, AllocationMode::PerMember, &mut seeded(42)).unwrap();
        let again = schedule(names, 5, AllocationMode::PerMember, &mut seeded(42)).unwrap();
        let order = |p: &MeetingPlan| p.participants.iter().map(|x| x.name.clone()).collect::<Vec<_>>();
        assert_eq!(order(&first), order(&again));
    }

    #[test]
    fn every_position_is_reachable() {
        // Each of 4 names should land in front at least once over many shuffles.
        let names = ["a", "b", "c", "d"];
        let mut rng = seeded(3);
        let mut leaders = HashSet::new();
        for _ in 0..200 {
            let plan = schedule(names, 4, AllocationMode::TotalTime, &mut rng).unwrap();
            leaders.insert(plan.participants[0].name.clone());
        }
        assert_eq!(leaders.len(), 4);
    }

    #[test]
    fn custom_flag_is_carried() {
        let inputs = vec![ParticipantInput::custom("Guest"), ParticipantInput::new("Kim")];
        let plan = schedule(&inputs, 2, AllocationMode::PerMember, &mut seeded(0)).unwrap();
        let guest = plan.participants.iter().find(|p| p.name == "Guest").unwrap();
        assert!(guest.is_custom);
        assert_eq!(plan.total_secs(), 240);
    }

    #[test]
    fn mode_parses_cli_spellings() {
        assert_eq!("total".parse::<AllocationMode>().unwrap(), AllocationMode::TotalTime);
        assert_eq!("per-member".parse::<AllocationMode>().unwrap(), AllocationMode::PerMember);
        assert_eq!("PER_MEMBER".parse::<AllocationMode>().unwrap(), AllocationMode::PerMember);
        assert!("hourly".parse::<AllocationMode>().is_err());
    }

    proptest! {
        #[test]
        fn schedule_is_a_permutation(
            names in prop::collection::vec("[a-z]{1,6}", 1..30),
            seed in any::<u64>(),
        ) {
            let plan = schedule(&names, 15, AllocationMode::TotalTime, &mut seeded(seed)).unwrap();

            let mut got: Vec<String> = plan.participants.iter().map(|p| p.name.clone()).collect();
            let mut want = names.clone();
            got.sort();
            want.sort();
            prop_assert_eq!(got, want);

            let speaking = plan.participants.iter().filter(|p| p.is_speaking()).count();
            let pending = plan
                .participants
                .iter()
                .filter(|p| p.status == ParticipantStatus::Pending)
                .count();
            prop_assert_eq!(speaking, 1);
            prop_assert_eq!(pending, names.len() - 1);
            prop_assert!(plan.participants[0].is_speaking());
        }
    }
}
