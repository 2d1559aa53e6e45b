//! Procedural obstacle and collectible generation
//!
//! A spawn cursor runs a fixed lookahead ahead of the player. Each time the
//! player catches up to it, one pattern is sampled from a difficulty-weighted
//! table and the cursor advances by the level's spawn interval plus jitter.
//!
//! Every pattern is solvable by construction: at least one lane survives each
//! depth slice without requiring a jump and a slide at the same time. The
//! validator still runs on every placement and degrades to a single-lane
//! barrier if a pattern ever fails it.

use rand::Rng;

use super::difficulty;
use super::state::{Collectible, CollectibleKind, GameState, LaneSet, Obstacle, ObstacleKind};
use crate::config::GameConfig;
use crate::consts::LANE_COUNT;

/// Depth spacing between coins in a line cluster
const COIN_LINE_SPACING: f32 = 30.0;
/// Coins per line cluster
const COIN_LINE_LENGTH: u32 = 3;

/// Spawnable pattern shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    SingleBarrier,
    MultiBarrierCombo,
    Gap,
    BoulderLine,
    CollectibleCluster,
}

/// Difficulty-weighted pattern table
///
/// Multi-lane combos only appear from level 4; everything else is always
/// available.
fn pattern_weights(level: u8) -> [(Pattern, u32); 5] {
    [
        (Pattern::SingleBarrier, 30),
        (
            Pattern::MultiBarrierCombo,
            if level >= 4 { 10 + level as u32 } else { 0 },
        ),
        (Pattern::Gap, 12),
        (Pattern::BoulderLine, if level >= 2 { 10 } else { 4 }),
        (Pattern::CollectibleCluster, 25),
    ]
}

fn sample_pattern(state: &mut GameState, level: u8) -> Pattern {
    let weights = pattern_weights(level);
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = state.rng.random_range(0..total);
    for (pattern, weight) in weights {
        if roll < weight {
            return pattern;
        }
        roll -= weight;
    }
    Pattern::SingleBarrier
}

/// How an obstacle kind is survived while staying in its lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Avoidance {
    Jump,
    Slide,
    /// No vertical action helps; the lane must be vacated
    LaneOnly,
}

fn avoidance(kind: ObstacleKind) -> Avoidance {
    match kind {
        ObstacleKind::BarrierLow | ObstacleKind::Gap => Avoidance::Jump,
        ObstacleKind::BarrierHigh => Avoidance::Slide,
        ObstacleKind::Boulder => Avoidance::LaneOnly,
    }
}

/// True if a depth slice of obstacles leaves at least one traversable lane
///
/// A lane is traversable when every obstacle covering it is survivable with
/// one action: empty, all jumpable, or all slidable. A boulder or a
/// jump+slide conflict rules the lane out.
pub fn slice_is_solvable(slice: &[(ObstacleKind, LaneSet)]) -> bool {
    (0..LANE_COUNT).any(|lane| {
        let mut needs_jump = false;
        let mut needs_slide = false;
        for &(kind, lanes) in slice {
            if !lanes.contains(lane) {
                continue;
            }
            match avoidance(kind) {
                Avoidance::Jump => needs_jump = true,
                Avoidance::Slide => needs_slide = true,
                Avoidance::LaneOnly => return false,
            }
        }
        !(needs_jump && needs_slide)
    })
}

/// Generate ahead of the player and cull behind; called once per tick
pub fn spawn_tick(state: &mut GameState, cfg: &GameConfig) {
    let horizon = state.player.depth + cfg.spawn_lookahead;
    while state.next_spawn_depth <= horizon {
        let depth = state.next_spawn_depth;
        let level = state.stats.level;
        let pattern = sample_pattern(state, level);
        place_pattern(state, pattern, depth);

        let jitter = state.rng.random_range(0.0..cfg.spawn_jitter.max(1.0));
        state.next_spawn_depth += difficulty::spawn_interval(level) + jitter;
    }
    cull(state, cfg);
}

fn place_pattern(state: &mut GameState, pattern: Pattern, depth: f32) {
    match pattern {
        Pattern::SingleBarrier => {
            let slice = vec![(random_barrier(state), random_lane_set(state))];
            push_obstacle_slice(state, &slice, depth);
        }
        Pattern::MultiBarrierCombo => {
            let safe_lane = state.rng.random_range(0..LANE_COUNT);
            let mut slice = Vec::with_capacity(2);
            for lane in 0..LANE_COUNT {
                if lane != safe_lane {
                    slice.push((random_barrier(state), LaneSet::single(lane)));
                }
            }
            push_obstacle_slice(state, &slice, depth);
        }
        Pattern::Gap => {
            // Full-width chasm: lane switching cannot help, jumping always can
            let slice = vec![(ObstacleKind::Gap, LaneSet::ALL)];
            push_obstacle_slice(state, &slice, depth);
        }
        Pattern::BoulderLine => {
            let safe_lane = state.rng.random_range(0..LANE_COUNT);
            let mut slice = Vec::with_capacity(2);
            for lane in 0..LANE_COUNT {
                if lane != safe_lane {
                    slice.push((ObstacleKind::Boulder, LaneSet::single(lane)));
                }
            }
            push_obstacle_slice(state, &slice, depth);
        }
        Pattern::CollectibleCluster => place_collectibles(state, depth),
    }
}

fn random_barrier(state: &mut GameState) -> ObstacleKind {
    if state.rng.random_bool(0.5) {
        ObstacleKind::BarrierLow
    } else {
        ObstacleKind::BarrierHigh
    }
}

fn random_lane_set(state: &mut GameState) -> LaneSet {
    LaneSet::single(state.rng.random_range(0..LANE_COUNT))
}

/// Validate and push one depth slice of obstacles
fn push_obstacle_slice(state: &mut GameState, slice: &[(ObstacleKind, LaneSet)], depth: f32) {
    debug_assert!(slice_is_solvable(slice));
    if !slice_is_solvable(slice) {
        // Guaranteed-safe fallback: one low barrier in one lane
        log::warn!("unsolvable pattern sampled at depth {depth:.0}, degrading");
        let lanes = random_lane_set(state);
        push_obstacle(state, ObstacleKind::BarrierLow, lanes, depth);
        return;
    }
    for &(kind, lanes) in slice {
        push_obstacle(state, kind, lanes, depth);
    }
}

fn push_obstacle(state: &mut GameState, kind: ObstacleKind, lanes: LaneSet, depth: f32) {
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        lanes,
        depth,
        height_extent: kind.height_extent(),
    });
}

fn place_collectibles(state: &mut GameState, depth: f32) {
    let lane = state.rng.random_range(0..LANE_COUNT);
    if state.rng.random_bool(0.4) {
        // Line of coins down one lane
        for i in 0..COIN_LINE_LENGTH {
            push_collectible(
                state,
                CollectibleKind::Coin,
                lane,
                depth + i as f32 * COIN_LINE_SPACING,
            );
        }
    } else {
        // Coins are more common than gems and power-ups
        let kind = match state.rng.random_range(0..5) {
            0..3 => CollectibleKind::Coin,
            3 => CollectibleKind::Gem,
            _ => CollectibleKind::PowerUp,
        };
        push_collectible(state, kind, lane, depth);
    }
}

fn push_collectible(state: &mut GameState, kind: CollectibleKind, lane: u8, depth: f32) {
    let id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id,
        kind,
        lane,
        depth,
        height: kind.hover_height(),
        collected: false,
    });
}

/// Remove entities that have fallen behind the player by the culling margin
fn cull(state: &mut GameState, cfg: &GameConfig) {
    let floor = state.player.depth - cfg.cull_margin;
    state.obstacles.retain(|o| o.depth > floor);
    state.collectibles.retain(|c| c.depth > floor);
}
