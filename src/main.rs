//! SkySnake headless runner
//!
//! Plays the game in idle/demo mode at the fixed tick rate and prints the
//! final frame as JSON.
//!
//! Usage: `sky-snake [seed] [ticks]`

use std::process::ExitCode;

use sky_snake::FrameView;
use sky_snake::consts::TICKS_PER_SECOND;
use sky_snake::sim::{GamePhase, GameState, TickInput, tick};

/// Default run length: two minutes of game time
const DEFAULT_TICKS: u64 = 120 * TICKS_PER_SECOND as u64;

struct Args {
    seed: u64,
    ticks: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().map_err(|e| format!("invalid seed {s:?}: {e}"))?,
        None => rand::random(),
    };
    let ticks = match args.next() {
        Some(s) => s.parse().map_err(|e| format!("invalid tick count {s:?}: {e}"))?,
        None => DEFAULT_TICKS,
    };
    Ok(Args { seed, ticks })
}

/// Run the session. Won/Lost sessions restart until the tick budget is spent.
fn run(args: &Args) -> FrameView {
    log::info!("Seed: {}, ticks: {}", args.seed, args.ticks);
    let mut state = GameState::new(args.seed);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let restart = TickInput {
        restart: true,
        ..idle.clone()
    };

    let (mut wins, mut losses) = (0u32, 0u32);
    for _ in 0..args.ticks {
        let input = match state.phase {
            GamePhase::Won => {
                wins += 1;
                &restart
            }
            GamePhase::Lost => {
                losses += 1;
                &restart
            }
            _ => &idle,
        };
        tick(&mut state, input);
        if state.quit_requested {
            break;
        }
    }

    log::info!(
        "Ran {} ticks (seed {}): {} won, {} lost",
        state.time_ticks,
        args.seed,
        wins,
        losses
    );
    FrameView::capture(&state)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("SkySnake (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: sky-snake [seed] [ticks]");
            return ExitCode::from(2);
        }
    };

    let frame = match std::panic::catch_unwind(|| run(&args)) {
        Ok(frame) => frame,
        Err(_) => {
            log::error!("Simulation panicked (seed {})", args.seed);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&frame) {
        Ok(json) => {
            println!("{json}");
            log::info!("{}", frame.status_line());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize frame: {e}");
            ExitCode::FAILURE
        }
    }
}
