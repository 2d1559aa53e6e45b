//! Temple Dash entry point
//!
//! Headless demo shell: runs the simulation with the autopilot enabled and
//! reports the run through logs and a final summary. Rendering frontends
//! embed the library and drive the same loop with real frame times.
//!
//! Usage: `temple-dash [seed] [max_ticks]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use temple_dash::consts::MAX_SUBSTEPS;
use temple_dash::highscores::HIGH_SCORE_FILE;
use temple_dash::sim::{GamePhase, GameState, RenderSnapshot, TickInput, tick};
use temple_dash::{FixedTimestep, GameConfig, HighScore};

fn main() {
    env_logger::init();
    log::info!("Temple Dash (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    let cfg = GameConfig::default();
    let score_path = Path::new(HIGH_SCORE_FILE);
    let mut high = HighScore::load(score_path);
    log::info!("seed {seed}, best so far {}", high.score);

    let mut state = GameState::new(seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut timestep = FixedTimestep::new(cfg.dt(), MAX_SUBSTEPS);

    // Headless: feed the accumulator synthetic frames of exactly one tick.
    // An interactive frontend feeds wall-clock frame times instead.
    let mut last_snapshot = None;
    while state.time_ticks < max_ticks {
        for _ in 0..timestep.advance(cfg.dt()) {
            tick(&mut state, &input, &cfg, cfg.dt());
            let snapshot = RenderSnapshot::capture(&mut state, &cfg);
            for event in &snapshot.events {
                log::debug!("tick {}: {event:?}", state.time_ticks);
            }
            last_snapshot = Some(snapshot);
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let score = state.stats.score();
    let is_best = high.record(score);
    if is_best {
        high.save(score_path);
    }

    match last_snapshot {
        Some(snapshot) => {
            println!(
                "run over: score {}, {} coins, {:.0}m, level {} ({})",
                snapshot.score,
                snapshot.coins,
                snapshot.distance / 10.0,
                snapshot.level,
                if snapshot.phase == GamePhase::GameOver {
                    "crashed"
                } else {
                    "tick budget reached"
                }
            );
            if is_best {
                println!("new high score!");
            }
        }
        None => println!("no ticks ran"),
    }
}
