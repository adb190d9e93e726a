//! Team command - build a starting eleven from a player table
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_pool(), build_team(), report_team()
//! - Level 3: resolve_formation(), resolve_sort_choice()
//! - Level 4: file name checks, output formatting

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use lineup_core::{
    parse_formation, AgeDirection, LineupError, Orientation, PlayerPool, Quotas, Roster,
    RosterSelector, SortChoice, SortMode,
};

use crate::prompt::{self, Prompter};
use crate::table;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TeamArgs {
    /// Player table (CSV with Player, Position, Age and Skill columns)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Formation, e.g. 4-3-3 or 4-2-3-1 (prompted when omitted)
    #[arg(long)]
    pub formation: Option<String>,

    /// Sort option: 1 = skill, 2 = age, 3 = random (prompted when omitted)
    #[arg(long, value_name = "1|2|3")]
    pub sort: Option<SortChoice>,

    /// Orientation for 4-5 line formations: 1 = forward, 2 = midfielder
    #[arg(long, value_name = "1|2")]
    pub orientation: Option<Orientation>,

    /// Age direction when sorting by age: 1 = young, 2 = old
    #[arg(long, value_name = "1|2")]
    pub age: Option<AgeDirection>,

    /// Output the team as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run team command
///
/// 1. Load the player table
/// 2. Collect choices and select the team
/// 3. Print the team
pub fn run(args: TeamArgs, seed: Option<u64>) -> Result<()> {
    check_file_name(&args.file)?;

    let pool = load_pool(&args.file)?;

    let mut prompter = Prompter::stdio();
    let (formation, roster) = match build_team(&pool, &args, &mut prompter, seed) {
        Ok(team) => team,
        Err(e) => {
            // Errors start on a fresh line, not after the last prompt
            prompter.finish_line()?;
            return Err(explain(e));
        }
    };

    tracing::info!(
        "Selected {} players for {} ({:?})",
        roster.len(),
        formation,
        roster.mode()
    );

    report_team(&pool, &formation, &roster, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the player table, reporting a missing file plainly
fn load_pool(path: &Path) -> Result<PlayerPool> {
    match PlayerPool::load(path) {
        Ok(pool) => Ok(pool),
        Err(LineupError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            bail!("File '{}' not found.", path.display())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load players: {}", path.display())),
    }
}

/// Collect the remaining choices and select the team
///
/// Choices given as flags are used as-is; the rest are asked for.
fn build_team<'a, R: BufRead, W: Write>(
    pool: &'a PlayerPool,
    args: &TeamArgs,
    prompter: &mut Prompter<R, W>,
    seed: Option<u64>,
) -> lineup_core::Result<(String, Roster<'a>)> {
    let (formation, quotas) = resolve_formation(args, prompter)?;
    let choice = resolve_sort_choice(args, prompter)?;

    let mut age_resolver = || match args.age {
        Some(direction) => Ok(direction),
        None => prompter.ask_until_valid(prompt::AGE_PROMPT),
    };

    let mut selector = RosterSelector::seeded(seed);
    let roster = selector.select(pool.players(), &quotas, choice, &mut age_resolver)?;

    Ok((formation, roster))
}

/// Print the team as a grid or JSON
fn report_team(pool: &PlayerPool, formation: &str, roster: &Roster<'_>, args: &TeamArgs) -> Result<()> {
    if args.json {
        println!("{}", render_json(pool, formation, roster)?);
    } else {
        print!("{}", table::render_grid(pool.headers(), roster));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Formation from the flag or a single prompt; invalid input is not re-asked
fn resolve_formation<R: BufRead, W: Write>(
    args: &TeamArgs,
    prompter: &mut Prompter<R, W>,
) -> lineup_core::Result<(String, Quotas)> {
    let formation = match &args.formation {
        Some(f) => f.clone(),
        None => prompter.ask(prompt::FORMATION_PROMPT)?,
    };

    let mut orientation_resolver = || match args.orientation {
        Some(orientation) => Ok(orientation),
        None => prompter.ask_until_valid(prompt::ORIENTATION_PROMPT),
    };
    let quotas = parse_formation(&formation, &mut orientation_resolver)?;

    tracing::debug!("Formation {} -> quotas {:?}", formation, quotas.as_array());
    Ok((formation, quotas))
}

fn resolve_sort_choice<R: BufRead, W: Write>(
    args: &TeamArgs,
    prompter: &mut Prompter<R, W>,
) -> lineup_core::Result<SortChoice> {
    match args.sort {
        Some(choice) => Ok(choice),
        None => prompter.ask_until_valid(prompt::SORT_PROMPT),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Only `.csv` files are accepted
fn check_file_name(path: &Path) -> Result<()> {
    let is_csv = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.ends_with(".csv"));

    if !is_csv {
        bail!("Only one argument with csv format file names are accepted.");
    }
    Ok(())
}

/// Turn closed input into a plain exit message
fn explain(err: LineupError) -> anyhow::Error {
    if prompt::is_end_of_input(&err) {
        anyhow!("Program exit.")
    } else {
        err.into()
    }
}

fn render_json(pool: &PlayerPool, formation: &str, roster: &Roster<'_>) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        formation: String,
        sort: SortMode,
        players: serde_json::Value,
    }

    let output = JsonOutput {
        formation: formation.to_string(),
        sort: roster.mode(),
        players: table::players_json(pool.headers(), roster),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

// ============================================================================
// TESTS
// ============================================================================
