//! Lineup CLI - pick a starting eleven from a CSV of players
//!
//! Reads the player table, asks for a formation and a sort option (or
//! takes them from flags), then prints the selected team as a grid.

mod prompt;
mod table;
mod team_cmd;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use team_cmd::TeamArgs;

#[derive(Parser)]
#[command(name = "lineup")]
#[command(about = "Pick a starting eleven from a CSV of players")]
struct Cli {
    /// Random seed for reproducible random picks
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    team: TeamArgs,
}

fn main() {
    // Logs go to stderr so they never mix with the rendered table
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = team_cmd::run(cli.team, cli.seed) {
        eprintln!("{}", error_message(&err));
        std::process::exit(1);
    }
}

/// The message shown to the user: the error and its causes, no prefix
fn error_message(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}
