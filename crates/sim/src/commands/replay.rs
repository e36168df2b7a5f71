//! Replay a scenario file and report each step.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use battler_core::{GameEnv, GameResult, GameStatus, PcgRng};
use battler_sim::{Scenario, Step};
use clap::Parser;
use console::style;

/// Replay a RON scenario with a seeded RNG
#[derive(Parser)]
pub struct Replay {
    /// Scenario file to replay
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Override the scenario's RNG seed
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Content directory (defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the full replay as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Stop at the first rejected command and exit with an error
    #[arg(long)]
    strict: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let scenario = Scenario::load(&self.scenario)?;
        let factory = super::content(self.data_dir);
        let config = scenario.configure(factory.load_config()?);
        let catalog = factory.load_catalog(&config)?;
        let mut state = scenario
            .build_board(&config, &catalog)
            .with_context(|| format!("cannot build board for {}", self.scenario.display()))?;

        let seed = self.seed.unwrap_or(scenario.seed);
        let mut rng = PcgRng::seed_from_u64(seed);
        let env = GameEnv::with_catalog(&catalog, &config);
        let replay = battler_sim::replay(
            &mut state,
            env,
            &mut rng,
            seed,
            &scenario.actions,
            self.strict,
        );

        if self.json {
            let json =
                serde_json::to_string_pretty(&replay).context("failed to serialize replay")?;
            println!("{json}");
        } else {
            print_summary(&scenario, &replay);
        }

        if self.strict
            && let Some(Step::Rejected { index, message, .. }) =
                replay.steps.iter().find(|step| !step.is_accepted())
        {
            bail!("command {index} rejected: {message}");
        }
        Ok(())
    }
}

fn print_summary(scenario: &Scenario, replay: &battler_sim::Replay) {
    let title = if scenario.name.is_empty() {
        "scenario"
    } else {
        scenario.name.as_str()
    };
    println!("{} {}", style("Scenario:").bold().cyan(), title);
    println!("{} {}", style("Seed:").bold().cyan(), replay.seed);
    println!();

    for step in &replay.steps {
        match step {
            Step::Accepted { index, outcome } => {
                println!(
                    "{} round {} {} {}",
                    style(format!("[{index:>3}]")).green(),
                    outcome.round,
                    outcome.acting_side,
                    style(outcome.kind).bold()
                );
                for event in &outcome.events {
                    println!("        {event:?}");
                }
            }
            Step::Rejected {
                index,
                command,
                code,
                message,
            } => {
                println!(
                    "{} {} {} at {}: {} ({})",
                    style(format!("[{index:>3}]")).red(),
                    command.acting_side,
                    style(command.kind).bold(),
                    command.caster,
                    message,
                    style(code).dim()
                );
            }
        }
    }

    println!();
    let status = match replay.status {
        GameStatus::InProgress => style("in progress".to_owned()).yellow(),
        GameStatus::Finished(GameResult::Winner(side)) => style(format!("{side} wins")).green(),
        GameStatus::Finished(GameResult::Draw) => style("draw".to_owned()).yellow(),
    };
    let label = |text: &'static str| style(text).bold().cyan();
    println!("{} {}", label("Status:"), status);
    println!("{} {}", label("Round:"), replay.final_round);
    println!("{} {}", label("State root:"), replay.state_root);
}
