//! Headless round simulator (default binary).
//!
//! Plays rounds with a scripted player, records high scores in a JSON file
//! and prints one line per round. There is no rendering or input handling.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use flexi_logger::Logger;
use log::info;

use memory_match::core::{Hooks, PersistenceStore, RoundConfig, RoundController, RoundOutcome};
use memory_match::engine::{play_round, PlayerKind};
use memory_match::store::JsonFileStore;
use memory_match::types::{Difficulty, TICK_MS};

const MAX_TICKS: u32 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "memory-match", about = "Simulate memory card-matching rounds")]
struct Args {
    /// easy (4x3) or hard (5x4); overrides the config file
    #[arg(long)]
    difficulty: Option<String>,

    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Deck seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// perfect or forgetful
    #[arg(long, default_value = "perfect")]
    player: String,

    /// Chance (0-100) that a forgetful player remembers a card
    #[arg(long, default_value_t = 70)]
    recall_pct: u8,

    /// JSON round config
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file (defaults to ~/.config/memory-match/high_scores.json)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Disable audio cues
    #[arg(long, default_value_t = false)]
    no_sound: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(&args.log_level)?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let config = build_config(&args)?;
    let Some(kind) = PlayerKind::from_str(&args.player) else {
        bail!("unknown player {:?} (expected perfect or forgetful)", args.player);
    };

    let store = match &args.store {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default()?,
    };
    let scope = config.high_score_scope().to_string();
    let starting_high = store
        .get_high_score(&scope)
        .with_context(|| format!("reading {}", store.path().display()))?;
    info!("{scope} high score before play: {starting_high}");

    let mut controller = RoundController::new(config, Hooks::default().with_store(store));
    let mut player = kind.build(args.recall_pct, controller.session_seed());

    for round in 0..args.rounds {
        if round > 0 {
            controller.reset();
            player.forget();
        }
        let seed = controller.seed().unwrap_or_else(|| controller.session_seed());
        let outcome = play_round(&mut controller, player.as_mut(), TICK_MS, MAX_TICKS)
            .with_context(|| format!("round {} (seed {seed})", round + 1))?;
        println!("{}", summary_line(round + 1, seed, &outcome));
    }

    match controller.high_score() {
        Some(high) => println!("{scope} high score: {high}"),
        None => println!("{scope} high score: unavailable"),
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<RoundConfig> {
    let mut config = match &args.config {
        Some(path) => RoundConfig::load(path)?,
        None => RoundConfig::default(),
    };
    if let Some(name) = &args.difficulty {
        let Some(difficulty) = Difficulty::from_str(name) else {
            bail!("unknown difficulty {name:?} (expected easy or hard)");
        };
        config.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.no_sound {
        config.sound_enabled = false;
    }
    Ok(config)
}

fn summary_line(round: u32, seed: u64, outcome: &RoundOutcome) -> String {
    let stats = outcome.stats;
    let mut line = format!(
        "round {round} (seed {seed}): score {} | {} matches, {} mismatches, {} flips",
        outcome.final_score, stats.matches, stats.mismatches, stats.selections
    );
    if outcome.new_high_score {
        line.push_str(" | new high score");
    } else if !outcome.high_score_saved {
        line.push_str(" | high score not saved");
    }
    line
}
