//! Fixed timestep simulation tick
//!
//! One call advances the whole world by one step in a fixed order:
//! input, physics, spawning, collisions, score/difficulty, camera and
//! particles. Nothing suspends mid-tick; the frontend captures a
//! [`super::snapshot::RenderSnapshot`] after each call.

use glam::Vec3;

use super::collision::{self, CollisionOutcome, colors};
use super::difficulty;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind};
use crate::config::GameConfig;
use crate::consts::LANE_COUNT;

/// How far ahead the autopilot reacts to threats (world units)
const AUTOPILOT_REACTION: f32 = 120.0;

/// Discrete actions delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    Pause,
    Confirm,
}

/// Input commands for a single tick (deterministic)
///
/// One-shot flags are set from queued [`InputEvent`]s and cleared by the
/// frontend after each processed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub slide: bool,
    pub pause: bool,
    pub confirm: bool,
    /// Demo mode - the engine plays itself
    pub autopilot: bool,
}

impl TickInput {
    /// Register a queued input event for the next tick
    pub fn press(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeft => self.move_left = true,
            InputEvent::MoveRight => self.move_right = true,
            InputEvent::Jump => self.jump = true,
            InputEvent::Slide => self.slide = true,
            InputEvent::Pause => self.pause = true,
            InputEvent::Confirm => self.confirm = true,
        }
    }

    /// Clear one-shot flags after a processed tick (`autopilot` persists)
    pub fn clear_one_shot(&mut self) {
        let autopilot = self.autopilot;
        *self = Self {
            autopilot,
            ..Self::default()
        };
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, cfg: &GameConfig, dt: f32) {
    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.start_run(cfg);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.confirm {
                state.phase = GamePhase::Menu;
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::Running => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
    }

    state.time_ticks += 1;

    // Apply queued input
    if input.move_left {
        state.player.move_left();
    }
    if input.move_right {
        state.player.move_right();
    }
    let mut events = state.take_events();
    if input.jump {
        state.player.jump(cfg, &mut events);
    }
    if input.slide {
        state.player.slide(cfg, &mut events);
    }

    // Advance physics
    state
        .player
        .advance(dt, state.stats.speed_multiplier, cfg, &mut events);
    state.events = events;

    // Spawn ahead, cull behind
    spawn::spawn_tick(state, cfg);

    // Resolve collisions
    if collision::resolve(state, cfg) == CollisionOutcome::Blocked {
        crash(state);
    }

    // Score and difficulty
    state.stats.distance = state.player.depth;
    let level = difficulty::level_for_score(state.stats.score(), cfg.score_per_level, cfg.max_level);
    if level > state.stats.level {
        state.stats.level = level;
        state.stats.speed_multiplier = difficulty::speed_multiplier(level);
        log::info!(
            "difficulty level {} (x{:.1} speed)",
            level,
            state.stats.speed_multiplier
        );
    }

    // Camera and particles close the tick
    state.camera.follow(&state.player, cfg);
    advance_particles(state, dt);
}

/// Blocked collision without invulnerability: the run ends here
fn crash(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::Crash);
    state.camera.add_shake(10.0, 30);
    let pos = Vec3::new(
        state.player.lateral_x,
        state.player.height,
        state.player.depth,
    );
    state.burst_particles(pos, colors::RED, 20, 300.0, 60);
    log::info!(
        "game over at {:.0}m, {} coins",
        state.player.depth / 10.0,
        state.stats.coins
    );
}

fn advance_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        let vel = particle.vel;
        particle.pos += vel * dt;
        particle.ttl_ticks = particle.ttl_ticks.saturating_sub(1);
    }
    state.particles.retain(|p| p.ttl_ticks > 0);
}

/// Demo-mode AI: dodge the nearest threatening obstacle slice
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            input.confirm = true;
            return;
        }
        GamePhase::Paused => {
            input.pause = true;
            return;
        }
        GamePhase::Running => {}
    }

    let player = &state.player;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            o.lanes.contains(player.lane)
                && o.depth > player.depth
                && o.depth - player.depth < AUTOPILOT_REACTION
        })
        .min_by(|a, b| a.depth.total_cmp(&b.depth));

    let Some(threat) = threat else { return };

    match threat.kind {
        ObstacleKind::BarrierLow | ObstacleKind::Gap => input.jump = true,
        ObstacleKind::BarrierHigh => input.slide = true,
        ObstacleKind::Boulder => {
            // Sidestep toward the nearest lane that is clear in this slice
            let target = (0..LANE_COUNT)
                .filter(|&lane| lane_is_clear(&state.obstacles, lane, threat.depth))
                .min_by_key(|&lane| lane.abs_diff(player.lane));
            if let Some(target) = target {
                if target < player.lane {
                    input.move_left = true;
                } else if target > player.lane {
                    input.move_right = true;
                }
            }
        }
    }
}

fn lane_is_clear(obstacles: &[Obstacle], lane: u8, depth: f32) -> bool {
    !obstacles
        .iter()
        .any(|o| o.lanes.contains(lane) && (o.depth - depth).abs() < 30.0)
}
