//! Headless Battle Runner
//!
//! Runs AI vs AI battles and prints the outcome as JSON or text.

use std::path::PathBuf;

use clap::Parser;
use grid_tactics::battle::{run_until_player_turn, BattleState, DecisionPolicy};
use grid_tactics::core::{BattleConfig, Result, Team, TurnOrderPolicy};
use grid_tactics::roster::{create_game, GameSetup, Party};
use serde::Serialize;

/// Headless Battle Runner - AI vs AI battles on the 4x4 board
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run AI vs AI battles and report the outcome")]
struct Args {
    /// Player-side template ids, comma separated
    #[arg(long, value_delimiter = ',', default_value = "warrior,cleric")]
    player: Vec<String>,

    /// Enemy-side template ids, comma separated
    #[arg(long, value_delimiter = ',', default_value = "skeleton,skeleton")]
    enemy: Vec<String>,

    /// Battle config file (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for the decision policy (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Build the turn order from initiative instead of team blocks
    #[arg(long)]
    initiative: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print the battle log to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    outcome: String,
    rounds: u32,
    player_survivors: usize,
    enemy_survivors: usize,
    log_lines: usize,
    seed: u64,
}

impl BattleResult {
    fn from_state(state: &BattleState, seed: u64, opening_lines: usize) -> Self {
        let outcome = match (state.is_over(), state.winner()) {
            (true, Some(team)) => team.as_str().to_string(),
            (true, None) => "draw".to_string(),
            (false, _) => "undecided".to_string(),
        };
        Self {
            outcome,
            rounds: state.turn_order.round,
            player_survivors: state.living_count(Team::Player),
            enemy_survivors: state.living_count(Team::Enemy),
            log_lines: state.log.len().saturating_sub(opening_lines),
            seed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("grid_tactics=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.ai_seed = seed;
    }
    if args.initiative {
        config.turn_order = TurnOrderPolicy::Initiative;
    }

    let setup = GameSetup {
        player: Party::from_template_ids("player-party", "Player Team", &args.player)?,
        enemy: Party::from_template_ids("enemy-party", "Enemy Team", &args.enemy)?,
    };

    // Nobody is player-controlled, so the AI plays both sides
    let mut state = create_game(&setup, &config)?;
    state.player_controlled.clear();
    let opening_lines = state.log.len();

    let mut policy = DecisionPolicy::with_seed(config.ai_seed);
    let state = run_until_player_turn(&state, &mut policy, config.max_auto_turns)?;

    if args.verbose {
        for line in &state.log {
            eprintln!("  {}", line);
        }
        eprintln!();
    }

    let result = BattleResult::from_state(&state, config.ai_seed, opening_lines);
    match args.format.as_str() {
        "text" => {
            println!("Battle Result");
            println!("=============");
            println!("Outcome: {}", result.outcome);
            println!("Rounds: {}", result.rounds);
            println!("Log lines: {}", result.log_lines);
            println!(
                "Survivors: {} player, {} enemy",
                result.player_survivors, result.enemy_survivors
            );
            println!("Seed: {}", result.seed);
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
