//! Maze Chase native runner
//!
//! There is no input device here, so players are driven by the autopilot.
//! The round runs in real time on the fixed-step clock, or as fast as
//! possible with `--headless`.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use maze_chase::consts::*;
use maze_chase::sim::{CellKind, GameEvent, Snapshot, TickInput};
use maze_chase::{LayoutKind, Session, SessionCommand, SessionMode, Settings};

/// Maze Chase - a grid maze arcade game with four pursuers
#[derive(Parser, Debug)]
#[command(name = "maze-chase")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (JSON); flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of players (1 or 2)
    #[arg(short, long)]
    players: Option<usize>,

    /// Maze layout: classic or bonus
    #[arg(short, long)]
    layout: Option<LayoutKind>,

    /// Stop after this many ticks (default: one minute of play)
    #[arg(short, long, default_value_t = 60 * SIM_HZ as u64)]
    ticks: u64,

    /// Run without the real-time clock
    #[arg(long)]
    headless: bool,

    /// Print the final snapshot as JSON instead of a text board
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(players) = args.players {
        settings.players = players;
    }
    if let Some(layout) = args.layout {
        settings.layout = layout;
    }
    settings
        .validate()
        .context("Invalid settings after applying command-line flags")?;
    Ok(settings)
}

fn run(args: &Args) -> Result<()> {
    let settings = load_settings(args)?;
    log::info!(
        "Maze Chase starting: {} player(s), {} layout, seed {}",
        settings.players,
        settings.layout.as_str(),
        settings.seed
    );

    let start = if settings.players == 1 {
        SessionCommand::StartSinglePlayer
    } else {
        SessionCommand::StartTwoPlayer
    };
    let mut session = Session::new(settings);
    session.apply(start)?;

    let input = TickInput::demo();
    let mut ticks_run = 0u64;

    if args.headless {
        while ticks_run < args.ticks && session.mode() == SessionMode::Playing {
            report(&session.update(&input)?);
            ticks_run += 1;
        }
    } else {
        let mut accumulator = 0.0f32;
        let mut last = Instant::now();
        while ticks_run < args.ticks && session.mode() == SessionMode::Playing {
            let now = Instant::now();
            let dt = (now - last).as_secs_f32().min(0.1);
            last = now;
            accumulator += dt;

            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                report(&session.update(&input)?);
                accumulator -= SIM_DT;
                substeps += 1;
                ticks_run += 1;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    let round = session.round().context("Session ended without a round")?;
    let snapshot = Snapshot::capture(round);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", draw_board(&snapshot));
        let outcome = match session.mode() {
            SessionMode::GameOver { won: true, .. } => "cleared the maze",
            SessionMode::GameOver { won: false, .. } => "caught",
            _ => "out of time",
        };
        println!(
            "{} after {} ticks, total score {}",
            outcome,
            snapshot.tick,
            snapshot.total_score()
        );
    }
    Ok(())
}

fn report(events: &[GameEvent]) {
    for event in events {
        log::debug!("{:?}", event);
    }
}

/// Text rendering of a snapshot, one character per cell
fn draw_board(snapshot: &Snapshot) -> String {
    let mut rows: Vec<Vec<char>> = snapshot
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    CellKind::Empty => ' ',
                    CellKind::Wall => '#',
                    CellKind::Dot => '.',
                    CellKind::PowerPellet => 'o',
                    CellKind::Tunnel => '=',
                })
                .collect()
        })
        .collect();

    let mut put = |pos: glam::Vec2, ch: char| {
        let cell = maze_chase::round_cell(pos);
        let col = cell.x.rem_euclid(snapshot.width) as usize;
        if let Some(slot) = rows.get_mut(cell.y as usize).and_then(|r| r.get_mut(col)) {
            *slot = ch;
        }
    };

    for ghost in snapshot.ghosts.iter().filter(|g| !g.eaten) {
        let ch = ghost.kind.as_str().chars().next().unwrap_or('g');
        let ch = if ghost.vulnerable { ch } else { ch.to_ascii_uppercase() };
        put(ghost.pos, ch);
    }
    for player in &snapshot.players {
        let ch = if player.alive {
            char::from_digit(player.slot as u32 + 1, 10).unwrap_or('P')
        } else {
            'x'
        };
        put(player.pos, ch);
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["maze-chase", "--seed", "7", "-p", "2", "-l", "bonus"]);
        let settings = load_settings(&args).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.players, 2);
        assert_eq!(settings.layout, LayoutKind::Bonus);
    }

    #[test]
    fn test_missing_settings_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let args = Args::parse_from(["maze-chase", "--settings", path.to_str().unwrap()]);

        let err = load_settings(&args).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to load settings"));
        assert!(message.contains("absent.json"));
    }

    #[test]
    fn test_bad_player_flag_is_rejected() {
        let args = Args::parse_from(["maze-chase", "--players", "3"]);
        let err = load_settings(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid settings"));
    }

    #[test]
    fn test_headless_run_finishes() {
        let args = Args::parse_from(["maze-chase", "--headless", "--ticks", "90"]);
        assert!(run(&args).is_ok());
    }
}
