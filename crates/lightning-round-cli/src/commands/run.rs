//! Interactive meeting host.
//!
//! Reads one command per line from stdin while the countdown runs. An empty
//! line stands in for the pause key. Closing stdin ends the meeting.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use clap::Args;
use lightning_round_core::storage::DisplayConfig;
use lightning_round_core::{Command, Config, Event, MeetingRunner, MeetingState};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::setup::{Setup, SetupArgs};
use crate::render;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
}

/// A line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Toggle,
    Skip,
    End,
    NewRound,
    Quit,
    Help,
    Unknown,
}

impl Key {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "pause" | "resume" => Key::Toggle,
            "s" | "skip" | "n" | "next" => Key::Skip,
            "e" | "end" | "reset" => Key::End,
            "r" | "restart" | "new" => Key::NewRound,
            "q" | "quit" | "exit" => Key::Quit,
            "h" | "help" | "?" => Key::Help,
            _ => Key::Unknown,
        }
    }
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = Config::load()?;
    let setup = args.setup.resolve(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(host(setup, config.display));
    // A blocking stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    result
}

struct Screen {
    display: DisplayConfig,
    color: bool,
    /// A status line is drawn without a trailing newline.
    dirty_line: bool,
}

impl Screen {
    fn status(&mut self, runner: &MeetingRunner) -> Result<()> {
        let line = render::status_line(runner.session(), &self.display, self.color);
        let mut out = std::io::stdout().lock();
        if self.color {
            write!(out, "\r\x1b[2K{line}")?;
            self.dirty_line = true;
        } else {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        if self.dirty_line {
            writeln!(out)?;
            self.dirty_line = false;
        }
        writeln!(out, "{text}")?;
        Ok(())
    }

    fn event(&mut self, runner: &MeetingRunner, event: &Event) -> Result<()> {
        tracing::info!(event = event.kind(), state = ?runner.session().state(), "meeting event");
        if let Some(text) = render::describe(event) {
            self.message(&text)?;
        }
        if runner.session().is_active() {
            self.message(&render::board(runner.session()))?;
        }
        Ok(())
    }
}

async fn host(mut setup: Setup, display: DisplayConfig) -> Result<()> {
    let mut screen = Screen {
        display,
        color: std::io::stdout().is_terminal(),
        dirty_line: false,
    };
    let mut runner = MeetingRunner::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    screen.message(render::HELP)?;
    start_round(&mut runner, &mut setup, &mut screen)?;

    loop {
        tokio::select! {
            event = runner.next_tick() => {
                match event {
                    Some(event) => screen.event(&runner, &event)?,
                    None => screen.status(&runner)?,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match Key::parse(&line) {
                    Key::Toggle => dispatch(&mut runner, &mut screen, Command::Toggle)?,
                    Key::Skip => dispatch(&mut runner, &mut screen, Command::Skip)?,
                    Key::End => dispatch(&mut runner, &mut screen, Command::End)?,
                    Key::NewRound => match runner.session().state() {
                        MeetingState::Idle | MeetingState::Finished => {
                            runner.dispatch(Command::End);
                            start_round(&mut runner, &mut setup, &mut screen)?;
                        }
                        _ => screen.message("A round is in progress; [e] ends it first.")?,
                    },
                    Key::Quit => break,
                    Key::Help => screen.message(render::HELP)?,
                    Key::Unknown => screen.message(&format!("unknown command '{}'", line.trim()))?,
                }
            }
        }
    }

    if let Some(event) = runner.dispatch(Command::End) {
        tracing::info!(event = event.kind(), "meeting torn down on exit");
    }
    screen.message("Bye.")?;
    Ok(())
}

fn start_round(runner: &mut MeetingRunner, setup: &mut Setup, screen: &mut Screen) -> Result<()> {
    let plan = setup.plan()?;
    dispatch(runner, screen, Command::Start(plan))
}

fn dispatch(runner: &mut MeetingRunner, screen: &mut Screen, command: Command) -> Result<()> {
    match runner.dispatch(command) {
        Some(event) => {
            screen.event(runner, &event)?;
            if runner.session().is_active() {
                screen.status(runner)?;
            }
        }
        None => tracing::debug!(state = ?runner.session().state(), "command ignored"),
    }
    Ok(())
}
