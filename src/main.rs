//! Jumpy - headless native runner
//!
//! Plays demo rounds with the autopilot and keeps the high score file up to
//! date. A renderer/input front end drives `sim::tick` the same way.
//!
//! Usage: `jumpy [tuning.json]`

use jumpy::consts::TICK_HZ;
use jumpy::sim::{GamePhase, GameState, TickInput, tick};
use jumpy::{HighScoreStore, Tuning, highscores};

/// Demo rounds per run
const ROUNDS: u32 = 3;
/// Safety cap on round length (five minutes of play)
const MAX_ROUND_TICKS: u64 = 5 * 60 * TICK_HZ as u64;

fn main() {
    env_logger::init();
    log::info!("Jumpy (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let mut high_scores = HighScoreStore::load(highscores::DEFAULT_PATH);
    println!("High Score: {}", high_scores.best());

    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for round in 1..=ROUNDS {
        let mut state = GameState::new(tuning.clone());
        while state.phase == GamePhase::Playing && state.time_ticks < MAX_ROUND_TICKS {
            tick(&mut state, &idle);
            if state.time_ticks % (10 * TICK_HZ as u64) == 0 {
                log::info!("Round {}: tick {}, score {}", round, state.time_ticks, state.score);
            }
        }

        let score = state.final_score().unwrap_or(state.score);
        if high_scores.record(score) {
            println!("Round {}: {} - New High Score!", round, score);
            if let Err(e) = high_scores.save() {
                log::warn!("{}", e);
            }
        } else {
            println!("Round {}: {} (High Score: {})", round, score, high_scores.best());
        }
    }
}
