//! Meeting setup shared by `run` and `plan`.

use anyhow::Result;
use clap::Args;
use lightning_round_core::{schedule, AllocationMode, Config, MeetingPlan, Roster};
use rand::{RngCore, SeedableRng};
use rand_pcg::Mcg128Xsl64;

#[derive(Args, Debug, Clone)]
pub struct SetupArgs {
    /// Participant names; each argument may hold several, comma-separated
    pub names: Vec<String>,
    /// Allocation mode: "total" splits the time, "per-member" gives it to each person
    #[arg(short, long)]
    pub mode: Option<AllocationMode>,
    /// Minutes for the whole meeting or for each person, depending on the mode
    #[arg(short = 't', long)]
    pub minutes: Option<u32>,
    /// Leave out the team roster from the config file
    #[arg(long)]
    pub no_team: bool,
    /// Seed the shuffle for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Validated setup ready to be scheduled, possibly more than once.
#[derive(Debug, Clone)]
pub struct Setup {
    pub roster: Roster,
    pub mode: AllocationMode,
    pub minutes: u32,
    rng: Option<Mcg128Xsl64>,
}

impl SetupArgs {
    pub fn resolve(&self, config: &Config) -> Result<Setup> {
        let mut roster = if self.no_team {
            Roster::new()
        } else {
            Roster::from_team(&config.meeting.roster)
        };
        for entry in &self.names {
            roster.add(entry);
        }

        let minutes = self.minutes.unwrap_or(config.meeting.default_minutes);
        let mode = self.mode.unwrap_or(config.meeting.default_mode);
        roster.validate(minutes)?;

        Ok(Setup {
            roster,
            mode,
            minutes,
            rng: self.seed.map(Mcg128Xsl64::seed_from_u64),
        })
    }
}

impl Setup {
    /// Shuffle the roster into a new plan.
    pub fn plan(&mut self) -> Result<MeetingPlan> {
        let mut thread_rng = rand::thread_rng();
        let rng: &mut dyn RngCore = match self.rng.as_mut() {
            Some(seeded) => seeded,
            None => &mut thread_rng,
        };
        let plan = schedule(self.roster.members(), self.minutes, self.mode, rng)?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(names: &[&str]) -> SetupArgs {
        SetupArgs {
            names: names.iter().map(|s| s.to_string()).collect(),
            mode: None,
            minutes: None,
            no_team: false,
            seed: Some(5),
        }
    }

    #[test]
    fn resolve_merges_team_and_arguments() {
        let mut config = Config::default();
        config.meeting.roster = vec!["Ada".into(), "Grace".into()];
        let setup = args(&["Linus, Ada", "Ken"]).resolve(&config).unwrap();
        let names: Vec<_> = setup.roster.names().collect();
        assert_eq!(names, vec!["Ada", "Grace", "Linus", "Ken"]);
        assert_eq!(setup.minutes, 30);
        assert_eq!(setup.mode, AllocationMode::TotalTime);
    }

    #[test]
    fn resolve_rejects_empty_roster() {
        let mut config = Config::default();
        config.meeting.roster = vec!["Ada".into()];
        let mut no_team = args(&[]);
        no_team.no_team = true;
        assert!(no_team.resolve(&config).is_err());
    }

    #[test]
    fn seeded_plans_repeat_across_setups() {
        let config = Config::default();
        let order = |setup: &mut Setup| {
            setup
                .plan()
                .unwrap()
                .participants
                .into_iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
        };
        let mut a = args(&["a, b, c, d, e"]).resolve(&config).unwrap();
        let mut b = args(&["a, b, c, d, e"]).resolve(&config).unwrap();
        assert_eq!(order(&mut a), order(&mut b));
    }
}
