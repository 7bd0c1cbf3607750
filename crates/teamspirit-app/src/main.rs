//! Command-line interface for the TeamSpirit roster tools.
//!
//! This binary wires the engines to the terminal: it loads a roster file,
//! runs prize draws (with the slot-machine reveal) or group generation,
//! and renders the results as text or CSV.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `teamspirit.yaml` (defaults when absent)
//! 3. Initialize structured logging (tracing; `RUST_LOG` overrides the
//!    configured level)
//! 4. Dispatch the subcommand

mod demo;
mod error;
mod export;
mod ingest;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use teamspirit_core::config::AppConfig;
use teamspirit_core::draw::{self, DrawHistory};
use teamspirit_core::grouping;
use teamspirit_core::roster::Roster;
use teamspirit_core::spin::{SpinMachine, SpinObserver, run_spin};
use teamspirit_types::Participant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "teamspirit")]
#[command(about = "Prize draws and random team grouping for workplace events", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "teamspirit.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Draw one or more winners from a roster file.
    Draw {
        /// Roster file: plain text or delimited, one participant per line.
        #[arg(short, long)]
        roster: PathBuf,

        /// Number of winners to draw.
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Keep past winners in the candidate pool.
        #[arg(long)]
        allow_repeats: bool,

        /// Skip the reveal animation and commit instantly.
        #[arg(long)]
        no_spin: bool,

        /// Also write the winner history as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Partition a roster file into random groups.
    Group {
        /// Roster file: plain text or delimited, one participant per line.
        #[arg(short, long)]
        roster: PathBuf,

        /// People per group (defaults to the configured size).
        #[arg(short, long)]
        size: Option<usize>,

        /// Also write the result as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print a generated demo roster, one name per line.
    Demo {
        /// Number of names (defaults to the configured count).
        #[arg(short, long)]
        count: Option<usize>,
    },
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or the subcommand itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Load configuration first so its level can seed the log filter.
    let config = load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(config = %cli.config.display(), "teamspirit starting");

    match cli.command {
        Command::Draw {
            roster,
            count,
            allow_repeats,
            no_spin,
            csv,
        } => run_draw(&config, &roster, count, allow_repeats, no_spin, csv.as_deref()).await,
        Command::Group { roster, size, csv } => {
            run_group(&config, &roster, size, csv.as_deref())
        }
        Command::Demo { count } => {
            run_demo(&config, count);
            Ok(())
        }
    }
}

/// Load the configuration file, falling back to defaults when it does not
/// exist.
fn load_config(path: &Path) -> Result<AppConfig, AppError> {
    if path.exists() {
        let config = AppConfig::from_file(path)?;
        Ok(config)
    } else {
        Ok(AppConfig::default())
    }
}

/// Read and parse a roster file, flagging duplicate names.
fn load_roster(path: &Path) -> Result<Roster, AppError> {
    let contents = std::fs::read_to_string(path)?;
    let roster = Roster::from_participants(ingest::parse_roster(&contents))?;

    if roster.has_duplicate_names() {
        let duplicates: Vec<String> = roster
            .name_counts()
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(name, _)| name)
            .collect();
        warn!(
            duplicates = duplicates.join(", "),
            "Roster contains duplicate names; draws and grouping treat them as distinct participants"
        );
    }

    info!(
        participants = roster.len(),
        path = %path.display(),
        "Roster loaded"
    );
    Ok(roster)
}

/// Prints the cycling reveal to the terminal, overwriting in place.
struct TerminalReveal;

impl SpinObserver for TerminalReveal {
    fn on_cycle(&mut self, display: &Participant, _tick: u32) {
        print!("\r  {:<40}", display.name);
        let _ = std::io::stdout().flush();
    }

    fn on_commit(&mut self, winner: &Participant) {
        println!("\r* {:<40}", winner.name);
    }
}

/// Run `count` sequential draws, then print the winner history.
async fn run_draw(
    config: &AppConfig,
    roster_path: &Path,
    count: usize,
    allow_repeats_flag: bool,
    no_spin: bool,
    csv: Option<&Path>,
) -> Result<(), AppError> {
    let roster = load_roster(roster_path)?;
    if roster.is_empty() {
        println!("No participants found in {}.", roster_path.display());
        return Ok(());
    }

    let allow_repeats = allow_repeats_flag || config.draw.allow_repeats;
    let mut history = DrawHistory::new();
    let mut machine = SpinMachine::new(config.draw.spin.clone());
    let mut rng = rand::rng();

    for _ in 0..count {
        // Derived fresh each draw: the history grew since the last one.
        let eligible = draw::compute_eligible(roster.participants(), &history, allow_repeats);
        if eligible.is_empty() {
            println!("Every participant has already won; no draws remaining.");
            break;
        }
        info!(candidates = eligible.len(), "Starting draw");

        let winner = if no_spin {
            let winner = draw::draw(&mut rng, &eligible)?;
            println!("* {}", winner.name);
            winner
        } else {
            let mut reveal = TerminalReveal;
            run_spin(&mut machine, &mut rng, &eligible, &mut reveal).await?
        };

        history.record_winner(winner);
    }

    if history.len() > 1 {
        println!("\nWinners (most recent first):");
        for (index, record) in history.records().iter().enumerate() {
            let number = history.len().saturating_sub(index);
            println!(
                "  {number}. {} ({})",
                record.winner.name,
                record.timestamp.format("%H:%M:%S UTC")
            );
        }
    }

    if let Some(path) = csv {
        std::fs::write(path, export::history_to_csv(&history))?;
        info!(path = %path.display(), "Winner history written");
    }

    Ok(())
}

/// Generate one random partition and print it.
fn run_group(
    config: &AppConfig,
    roster_path: &Path,
    size: Option<usize>,
    csv: Option<&Path>,
) -> Result<(), AppError> {
    let roster = load_roster(roster_path)?;
    if roster.is_empty() {
        println!("No participants found in {}.", roster_path.display());
        return Ok(());
    }

    let group_size = size.unwrap_or(config.grouping.default_group_size);
    info!(
        participants = roster.len(),
        group_size,
        expected_groups = grouping::expected_group_count(roster.len(), group_size),
        "Generating groups"
    );

    let groups = grouping::generate(&mut rand::rng(), roster.participants(), group_size)?;
    println!("{}", export::groups_to_text(&groups));

    if let Some(path) = csv {
        std::fs::write(path, export::groups_to_csv(&groups))?;
        info!(path = %path.display(), "Grouping result written");
    }

    Ok(())
}

/// Print a demo roster, one name per line (pipeable back into `--roster`).
fn run_demo(config: &AppConfig, count: Option<usize>) {
    let count = count.unwrap_or(config.demo.count);
    for participant in demo::generate_demo_roster(&mut rand::rng(), count) {
        println!("{}", participant.name);
    }
}
