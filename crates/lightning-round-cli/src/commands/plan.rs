use anyhow::Result;
use clap::Args;
use lightning_round_core::Config;

use super::setup::SetupArgs;
use crate::render::format_clock;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let config = Config::load()?;
    let mut setup = args.setup.resolve(&config)?;
    let plan = setup.plan()?;

    if args.json {
        let out = serde_json::json!({
            "mode": setup.mode,
            "minutes": setup.minutes,
            "time_per_speaker_secs": plan.time_per_speaker_secs,
            "total_secs": plan.total_secs(),
            "participants": plan.participants,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {}, {} each ({} total)",
        plan.len(),
        if plan.len() == 1 { "person" } else { "people" },
        format_clock(plan.time_per_speaker_secs),
        format_clock(plan.total_secs()),
    );
    for (index, participant) in plan.participants.iter().enumerate() {
        println!("{:>3}. {}", index + 1, participant.name);
    }
    Ok(())
}
