mod cli;
mod config;
mod error;
mod play;
mod report;
mod scenarios;
mod scoring;
mod session;
mod tracing_init;
mod types;

use crate::error::QuizError;
use crate::types::scenario::{Action, Decision};
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INSUFFICIENT_DATA: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn ensure_dir(path: &Path) -> Result<(), QuizError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(QuizError::PathNotFound(path.display().to_string()))
    }
}

fn run() -> Result<i32, QuizError> {
    let cli = cli::Cli::parse();
    tracing_init::init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            ensure_dir(&cmd.source.config_dir)?;
            let loaded = config::load_config(&cmd.source.config_dir)?;
            let table = scenarios::load_table(cmd.source.scenarios.as_deref())?;
            let decisions = cmd
                .decisions
                .iter()
                .map(|raw| raw.parse::<Decision>())
                .collect::<Result<Vec<_>, _>>()?;
            tracing::info!(
                scenarios = table.len(),
                decisions = decisions.len(),
                "scoring decisions"
            );

            let summary =
                scoring::compute_results(table.scenarios(), &decisions, &loaded.scoring);
            let quiz_report = report::QuizReport::new(summary, table.fingerprint()?, table.len());
            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Share => report::OutputFormat::Share,
            };
            let rendered = report::render(&quiz_report, output_format, &loaded)?;
            println!("{rendered}");

            if quiz_report.summary.insufficient_data {
                eprintln!("warning: no answered scenarios; answer more to get a moderation style");
                Ok(exit_code::INSUFFICIENT_DATA)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Play(cmd) => {
            ensure_dir(&cmd.source.config_dir)?;
            let loaded = config::load_config(&cmd.source.config_dir)?;
            let table = scenarios::load_table(cmd.source.scenarios.as_deref())?;
            tracing::info!(scenarios = table.len(), "starting play session");

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let finished = play::run(&table, &loaded, &mut stdin.lock(), &mut stdout.lock())?;
            if finished.is_none() {
                println!("bye");
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Validate(cmd) => {
            ensure_dir(&cmd.source.config_dir)?;
            let loaded = config::load_config(&cmd.source.config_dir)?;
            let table = scenarios::load_table(cmd.source.scenarios.as_deref())?;

            println!("scenarios: {}", table.len());
            println!("style bands: {}", loaded.scoring.styles.len());
            println!("accuracy tiers: {}", loaded.scoring.accuracy.len());
            println!("actions: {}", Action::ALL.len());
            let distribution = Action::ALL
                .iter()
                .map(|action| {
                    let count = table
                        .scenarios()
                        .iter()
                        .filter(|scenario| scenario.result.real_moderator_action == *action)
                        .count();
                    format!("{}={count}", action.id())
                })
                .collect::<Vec<_>>();
            println!("real actions: {}", distribution.join(" "));
            println!("fingerprint: {}", table.fingerprint()?);
            println!("validate: ok");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Bands(cmd) => {
            ensure_dir(&cmd.config_dir)?;
            let loaded = config::load_config(&cmd.config_dir)?;

            println!("style bands (share of deletes):");
            for band in &loaded.scoring.styles {
                println!(
                    "- {:>3}-{:<3} {} ({})",
                    band.low, band.high, band.title, band.id
                );
            }
            println!("accuracy tiers (weighted match):");
            let accuracy = &loaded.scoring.accuracy;
            for (idx, band) in accuracy.iter().enumerate() {
                let high = accuracy
                    .get(idx + 1)
                    .map_or(100, |next| next.min.saturating_sub(1));
                println!("- {:>3}-{:<3} {}", band.min, high, band.tier);
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
