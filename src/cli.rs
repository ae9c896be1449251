use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "modquiz",
    version,
    about = "Moderation quiz: judge real forum comments and find out your moderation style"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a list of ID=ACTION decisions
    Score(ScoreCommand),
    /// Play the quiz interactively on stdin/stdout
    Play(PlayCommand),
    /// Check the scenario table and config, and print table statistics
    Validate(ValidateCommand),
    /// Print the configured style and accuracy bands
    Bands(BandsCommand),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Scenario table file (.toml/.json) or directory; defaults to the built-in table
    #[arg(long)]
    pub scenarios: Option<PathBuf>,
    /// Directory holding modquiz.toml and .modquiz/local.toml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Decisions as ID=ACTION, e.g. 3=delete
    pub decisions: Vec<String>,
}

#[derive(Args)]
pub struct PlayCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args)]
pub struct BandsCommand {
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Share,
}
