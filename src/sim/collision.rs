//! Collision detection in lane-and-depth space
//!
//! The tricky part of a lane runner is not the geometry, it is the rules:
//! which vertical state survives which obstacle kind. Tests live at the
//! bottom and pin each rule down.

use glam::Vec3;

use super::player::{Player, VerticalState};
use super::state::{CollectibleKind, GameEvent, GameState, Obstacle, ObstacleKind};
use crate::config::GameConfig;
use crate::lane_center_x;

/// Outcome of one tick of collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing happened
    None,
    /// Player hit an obstacle without invulnerability; run is over
    Blocked,
    /// Player picked up a collectible (first kind this tick)
    Collected(CollectibleKind),
}

/// Whether the player's current pose survives an overlapping obstacle
///
/// Barrier-low wants the player above its extent, barrier-high wants a
/// slide, a gap wants the player airborne, a boulder accepts nothing.
fn is_avoided(obstacle: &Obstacle, player: &Player) -> bool {
    match obstacle.kind {
        ObstacleKind::BarrierLow => {
            player.vertical == VerticalState::Jumping && player.height > obstacle.height_extent
        }
        ObstacleKind::BarrierHigh => player.vertical == VerticalState::Sliding,
        ObstacleKind::Gap => player.vertical == VerticalState::Jumping,
        ObstacleKind::Boulder => false,
    }
}

/// Resolve all overlaps for the current tick
///
/// Obstacles are tested before collectibles; a blocked outcome returns
/// immediately and leaves the world untouched for the final frame.
/// Invulnerable pass-throughs consume the obstacle with a visual burst.
pub fn resolve(state: &mut GameState, cfg: &GameConfig) -> CollisionOutcome {
    let lane = state.player.lane;
    let depth = state.player.depth;
    let invulnerable = state.player.is_invulnerable();

    let mut passed: Vec<u32> = Vec::new();
    for obstacle in &state.obstacles {
        if !obstacle.lanes.contains(lane) {
            continue;
        }
        if (obstacle.depth - depth).abs() >= cfg.collision_window {
            continue;
        }
        if is_avoided(obstacle, &state.player) {
            continue;
        }
        if invulnerable {
            passed.push(obstacle.id);
        } else {
            return CollisionOutcome::Blocked;
        }
    }

    for id in &passed {
        if let Some(obstacle) = state.obstacles.iter().find(|o| o.id == *id) {
            let pos = Vec3::new(
                lane_center_x(lane, cfg.lane_width),
                obstacle.height_extent / 2.0,
                obstacle.depth,
            );
            state.burst_particles(pos, colors::SMASH, 6, 200.0, 30);
        }
    }
    state.obstacles.retain(|o| !passed.contains(&o.id));

    // Collectibles: any lane+depth overlap collects, vertical state ignored
    let mut outcome = CollisionOutcome::None;
    let mut picked: Vec<(CollectibleKind, f32, f32)> = Vec::new();
    for collectible in &mut state.collectibles {
        if collectible.collected || collectible.lane != lane {
            continue;
        }
        if (collectible.depth - depth).abs() >= cfg.pickup_window {
            continue;
        }
        collectible.collected = true;
        picked.push((collectible.kind, collectible.height, collectible.depth));
    }
    state.collectibles.retain(|c| !c.collected);

    for (kind, height, at_depth) in picked {
        apply_pickup(state, kind, height, at_depth, cfg);
        if outcome == CollisionOutcome::None {
            outcome = CollisionOutcome::Collected(kind);
        }
    }

    outcome
}

/// Renderer palette ids for burst colors
pub mod colors {
    pub const GOLD: u32 = 0;
    pub const BLUE: u32 = 1;
    pub const RED: u32 = 2;
    pub const SMASH: u32 = 3;
}

fn apply_pickup(
    state: &mut GameState,
    kind: CollectibleKind,
    height: f32,
    depth: f32,
    cfg: &GameConfig,
) {
    state.stats.bonus += kind.score_value();
    state.stats.coins += kind.coin_value();
    let pos = Vec3::new(lane_center_x(state.player.lane, cfg.lane_width), height, depth);
    match kind {
        CollectibleKind::Coin => {
            state.push_event(GameEvent::CollectCoin);
            state.burst_particles(pos, colors::GOLD, 5, 120.0, 30);
        }
        CollectibleKind::Gem => {
            state.push_event(GameEvent::CollectGem);
            state.burst_particles(pos, colors::BLUE, 8, 180.0, 40);
        }
        CollectibleKind::PowerUp => {
            state.player.grant_invulnerability(cfg);
            state.push_event(GameEvent::CollectPowerup);
            state.burst_particles(pos, colors::RED, 10, 240.0, 50);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, LaneSet};

    fn running_state(cfg: &GameConfig) -> GameState {
        let mut state = GameState::new(1);
        state.start_run(cfg);
        state
    }

    fn add_obstacle(state: &mut GameState, kind: ObstacleKind, lane: u8, depth: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind,
            lanes: LaneSet::single(lane),
            depth,
            height_extent: kind.height_extent(),
        });
    }

    fn add_collectible(state: &mut GameState, kind: CollectibleKind, lane: u8, depth: f32) {
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

    #[test]
    fn test_grounded_hits_low_barrier() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::BarrierLow, 1, 0.0);
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);
    }

    #[test]
    fn test_other_lane_is_safe() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::Boulder, 0, 0.0);
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);
    }

    #[test]
    fn test_jump_clears_low_barrier() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::BarrierLow, 1, 0.0);
        state.player.vertical = VerticalState::Jumping;
        state.player.height = 20.0;
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);
    }

    #[test]
    fn test_low_jump_still_hits_low_barrier() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::BarrierLow, 1, 0.0);
        state.player.vertical = VerticalState::Jumping;
        state.player.height = 5.0;
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);
    }

    #[test]
    fn test_slide_clears_high_barrier_jump_does_not() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::BarrierHigh, 1, 0.0);
        state.player.vertical = VerticalState::Sliding;
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);

        state.player.vertical = VerticalState::Jumping;
        state.player.height = 100.0;
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);
    }

    #[test]
    fn test_gap_requires_airborne() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Gap,
            lanes: LaneSet::ALL,
            depth: state.player.depth,
            height_extent: 0.0,
        });
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);

        state.player.vertical = VerticalState::Jumping;
        state.player.height = 1.0;
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);
    }

    #[test]
    fn test_boulder_blocks_all_vertical_states() {
        let cfg = GameConfig::default();
        for vertical in [
            VerticalState::Grounded,
            VerticalState::Jumping,
            VerticalState::Sliding,
        ] {
            let mut state = running_state(&cfg);
            add_obstacle(&mut state, ObstacleKind::Boulder, 1, 0.0);
            state.player.vertical = vertical;
            state.player.height = 100.0;
            assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);
        }
    }

    #[test]
    fn test_invulnerable_passes_through_obstacles() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::Boulder, 1, 0.0);
        state.player.grant_invulnerability(&cfg);
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);
        // Consumed with a visual burst, not left to re-fire
        assert!(state.obstacles.is_empty());
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_invulnerability_never_suppresses_pickup() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_collectible(&mut state, CollectibleKind::Coin, 1, 0.0);
        state.player.grant_invulnerability(&cfg);
        assert_eq!(
            resolve(&mut state, &cfg),
            CollisionOutcome::Collected(CollectibleKind::Coin)
        );
        assert_eq!(state.stats.coins, 1);
    }

    #[test]
    fn test_collect_is_idempotent() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_collectible(&mut state, CollectibleKind::Gem, 1, 0.0);
        assert_eq!(
            resolve(&mut state, &cfg),
            CollisionOutcome::Collected(CollectibleKind::Gem)
        );
        assert_eq!(state.stats.bonus, 50);
        assert_eq!(state.stats.coins, 5);
        assert!(state.collectibles.is_empty());

        // Second resolve finds nothing to collect twice
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::None);
        assert_eq!(state.stats.bonus, 50);
    }

    #[test]
    fn test_powerup_grants_invulnerability() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_collectible(&mut state, CollectibleKind::PowerUp, 1, 0.0);
        assert_eq!(
            resolve(&mut state, &cfg),
            CollisionOutcome::Collected(CollectibleKind::PowerUp)
        );
        assert!(state.player.is_invulnerable());
        assert_eq!(state.stats.bonus, 100);
        assert!(state.events.contains(&GameEvent::CollectPowerup));
    }

    #[test]
    fn test_blocked_takes_precedence_over_pickup() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_obstacle(&mut state, ObstacleKind::Boulder, 1, 0.0);
        add_collectible(&mut state, CollectibleKind::Coin, 1, 0.0);
        assert_eq!(resolve(&mut state, &cfg), CollisionOutcome::Blocked);
        assert_eq!(state.stats.coins, 0);
    }

    #[test]
    fn test_pickup_ignores_vertical_state() {
        let cfg = GameConfig::default();
        let mut state = running_state(&cfg);
        add_collectible(&mut state, CollectibleKind::Coin, 1, 0.0);
        state.player.vertical = VerticalState::Sliding;
        assert_eq!(
            resolve(&mut state, &cfg),
            CollisionOutcome::Collected(CollectibleKind::Coin)
        );
    }
}
