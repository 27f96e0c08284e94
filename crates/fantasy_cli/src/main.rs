//! Fantasy League CLI
//!
//! Validates selections, scores rosters and gameweeks, and inspects transfer
//! state stored in a league snapshot.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use fantasy_core::store::snapshot::read_snapshot;
#[cfg(feature = "cli")]
use fantasy_core::store::LeagueData;
#[cfg(feature = "cli")]
use fantasy_core::{
    FantasyService, MemoryStore, Player, PlayerId, PlayerMeta, Roster, RosterSelection,
    RosterValidator, RulesConfig, ScoringEngine, StatLine,
};
#[cfg(feature = "cli")]
use std::collections::HashMap;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use std::sync::Arc;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fantasy")]
#[command(about = "League roster rules, scoring and transfers", long_about = None)]
struct Cli {
    /// Rules file (.json, .yaml). Falls back to FANTASY_RULES_PATH, then defaults.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a roster selection against the league rules
    Validate {
        /// Players JSON (array of players)
        #[arg(long)]
        players: PathBuf,

        /// Selection JSON (squad_ids, starting_ids, captain_id, vice_id)
        #[arg(long)]
        selection: PathBuf,
    },

    /// Score one roster against per-player stat lines
    Score {
        /// Roster JSON
        #[arg(long)]
        roster: PathBuf,

        /// Stats JSON (player id -> {points, did_play})
        #[arg(long)]
        stats: PathBuf,

        /// Players JSON (array of players)
        #[arg(long)]
        players: PathBuf,
    },

    /// Score every roster of a gameweek stored in a snapshot
    Gameweek {
        /// League snapshot file
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        gameweek: u32,

        /// Write weekly scores back to the snapshot
        #[arg(long, default_value = "false")]
        write: bool,
    },

    /// Show a manager's transfer allowance, cost and log
    Transfers {
        /// League snapshot file
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        manager: String,

        #[arg(long)]
        gameweek: u32,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let rules = load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Validate { players, selection } => {
            let players: Vec<Player> = read_json(&players)?;
            let selection: RosterSelection = read_json(&selection)?;
            let selection = selection.normalized();

            let by_id: HashMap<&str, &Player> =
                players.iter().map(|p| (p.id.as_str(), p)).collect();
            let squad = selection
                .squad_ids
                .iter()
                .map(|id| {
                    by_id
                        .get(id.as_str())
                        .map(|p| (*p).clone())
                        .with_context(|| format!("Unknown player: {}", id))
                })
                .collect::<Result<Vec<Player>>>()?;

            match RosterValidator::new(&rules).validate(
                &squad,
                &selection.starting_ids,
                selection.captain_id.as_deref(),
                selection.vice_id.as_deref(),
            ) {
                Ok(()) => println!("✅ Selection is valid"),
                Err(violation) => anyhow::bail!("❌ {}", violation),
            }
        }

        Commands::Score { roster, stats, players } => {
            let roster: Roster = read_json(&roster)?;
            let stats: HashMap<PlayerId, StatLine> = read_json(&stats)?;
            let players: Vec<Player> = read_json(&players)?;
            let meta: HashMap<PlayerId, PlayerMeta> =
                players.iter().map(|p| (p.id.clone(), p.meta())).collect();

            let breakdown = ScoringEngine::new(&rules).compute_score(&roster, &stats, &meta);
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }

        Commands::Gameweek { snapshot, gameweek, write } => {
            let service = if write {
                let store = MemoryStore::open(&snapshot)
                    .with_context(|| format!("Failed to open {}", snapshot.display()))?;
                FantasyService::new(Arc::new(store), rules)
            } else {
                read_only_service(&snapshot, rules)?
            };

            let scoring = service.score_gameweek(gameweek)?;
            println!("{}", serde_json::to_string_pretty(&scoring)?);
            if write {
                println!("\n✅ Weekly scores written to {}", snapshot.display());
            }
        }

        Commands::Transfers { snapshot, manager, gameweek } => {
            let service = read_only_service(&snapshot, rules)?;

            let summary = service.transfer_summary(&manager, gameweek)?;
            let log = service.transfers(&manager, gameweek)?;
            let report = serde_json::json!({ "summary": summary, "transfers": log });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_rules(path: Option<&Path>) -> Result<RulesConfig> {
    let rules = match path {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::from_env()?,
    };
    log::debug!(
        "Rules: squad {}, starting {}, transfer cost {}",
        rules.squad_size,
        rules.starting_size,
        rules.transfer_cost
    );
    Ok(rules)
}

#[cfg(feature = "cli")]
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Service over a copy of the snapshot. Nothing is written back.
#[cfg(feature = "cli")]
fn read_only_service(snapshot: &Path, rules: RulesConfig) -> Result<FantasyService> {
    let data: LeagueData = read_snapshot(snapshot)
        .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
    Ok(FantasyService::new(Arc::new(MemoryStore::with_data(data)), rules))
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("fantasy CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
