//! Grid Tactics - Entry Point
//!
//! Plays a session in the terminal: the player steers their party one unit
//! at a time, the decision policy answers for the enemy side.

use std::io::{self, Write};
use std::path::Path;

use grid_tactics::battle::{valid_destinations, BattleState, GRID_COLS, GRID_ROWS};
use grid_tactics::core::error::Result;
use grid_tactics::core::{BattleConfig, GridPosition, UnitId};
use grid_tactics::roster::{all_templates, GameSetup, Party};
use grid_tactics::service::GameSession;
use grid_tactics::skills::get_skills;

const CONFIG_PATH: &str = "data/battle.toml";

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("grid_tactics=info")
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        BattleConfig::load(CONFIG_PATH)?
    } else {
        tracing::warn!("{} not found - using default settings", CONFIG_PATH);
        BattleConfig::default()
    };

    let mut session = GameSession::new(config)?;

    println!("\n=== GRID TACTICS ===");
    println!("Two parties, one 4x4 board. Last side standing wins.");
    print_help();

    let mut shown = 0;
    loop {
        let state = session.state().clone();
        shown = print_new_log(&state, shown);
        display_board(&state);

        if state.is_over() {
            println!("The battle is over. Type 'new' for another or 'quit' to leave.");
        } else if let Some(unit) = state.active_unit() {
            println!(
                "{} ({}) to act - HP {}/{}",
                unit.name, unit.id, unit.health, unit.max_health
            );
        }

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&verb, rest)) = words.split_first() else {
            continue;
        };

        let outcome = match verb {
            "quit" | "q" => break,
            "help" | "h" => {
                print_help();
                continue;
            }
            "skills" => {
                print_skills(&state);
                continue;
            }
            "templates" => {
                for t in all_templates() {
                    println!(
                        "  {:<12} HP {:>3}  POW {:>2}  MAG {:>2}  DEF {:>2}  INIT {:>2}",
                        t.id, t.max_health, t.power, t.magic, t.defense, t.initiative
                    );
                }
                continue;
            }
            "new" => {
                let setup = if !rest.is_empty() {
                    match parse_setup(rest) {
                        Ok(setup) => Some(setup),
                        Err(err) => {
                            println!("{}", err);
                            continue;
                        }
                    }
                } else {
                    None
                };
                let result = session.new_game(setup);
                if result.is_ok() {
                    shown = 0;
                }
                result
            }
            "move" => match parse_position(rest) {
                Some(position) => session.perform_named_action("move", Vec::new(), Some(position)),
                None => {
                    println!("Usage: move <row> <col>");
                    continue;
                }
            },
            skill => {
                let targets = rest.iter().map(|&id| UnitId::new(id)).collect();
                session.perform_named_action(skill, targets, None)
            }
        };

        if let Err(err) = outcome {
            println!("Rejected: {}", err);
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  <skill> [target ids]      - Use a skill, e.g. 'attack enemy-skeleton-0'");
    println!("  move <row> <col>          - Move to an empty cell on your side");
    println!("  skills                    - List the active unit's skills");
    println!("  templates                 - List character templates");
    println!("  new [a,b vs c,d]          - Start a new battle, optionally with custom parties");
    println!("  help / h                  - Show this help");
    println!("  quit / q                  - Exit the game");
    println!();
}

/// Print log lines not shown yet, returning the new count
fn print_new_log(state: &BattleState, shown: usize) -> usize {
    for line in state.log.iter().skip(shown) {
        println!("  {}", line);
    }
    state.log.len()
}

fn display_board(state: &BattleState) {
    println!();
    for row in 0..GRID_ROWS {
        let cells: Vec<String> = (0..GRID_COLS)
            .map(|col| match state.grid.unit_at(GridPosition::new(row, col)) {
                Some(unit) if unit.is_alive() => {
                    let name: String = unit.name.chars().take(8).collect();
                    format!("{:<8}{:>4}", name, unit.health)
                }
                Some(_) => format!("{:<12}", "(fallen)"),
                None => format!("{:<12}", "."),
            })
            .collect();
        println!("  {} | {}", cells[..GRID_COLS / 2].join(" "), cells[GRID_COLS / 2..].join(" "));
    }
    println!("  Round {}", state.turn_order.round);
    println!();
}

fn print_skills(state: &BattleState) {
    let Some(unit) = state.active_unit() else {
        return;
    };
    for skill in get_skills(&unit.skills) {
        println!("  {:<8} - {}", skill.id.as_str(), skill.description);
    }
    let open: Vec<String> = valid_destinations(state, &unit.id)
        .iter()
        .map(|p| format!("({}, {})", p.row, p.col))
        .collect();
    println!("  Open cells: {}", open.join(" "));
    let others: Vec<String> = state
        .grid
        .living_units()
        .filter(|u| u.id != unit.id)
        .map(|u| u.id.to_string())
        .collect();
    println!("  Units: {}", others.join(", "));
}

fn parse_position(args: &[&str]) -> Option<GridPosition> {
    match args {
        [row, col] => Some(GridPosition::new(row.parse().ok()?, col.parse().ok()?)),
        _ => None,
    }
}

/// `warrior,cleric vs skeleton,orc`
fn parse_setup(args: &[&str]) -> Result<GameSetup> {
    let joined = args.join(" ");
    let (player, enemy) = joined.split_once("vs").unwrap_or((joined.as_str(), ""));
    let ids = |side: &str| -> Vec<String> {
        side.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    };
    Ok(GameSetup {
        player: Party::from_template_ids("player-party", "Player Team", &ids(player))?,
        enemy: Party::from_template_ids("enemy-party", "Enemy Team", &ids(enemy))?,
    })
}
