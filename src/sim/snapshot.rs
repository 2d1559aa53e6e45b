//! Render-ready snapshot emission
//!
//! The engine draws nothing. Once per tick the frontend captures a
//! [`RenderSnapshot`]: an immutable view with everything already projected
//! to screen space, plus the drained event queue for the audio collaborator.
//! The snapshot stays valid until the next tick completes; a concurrent
//! renderer should work from its own captured copy.

use super::player::VerticalState;
use super::project::{ScreenPoint, WorldPoint, project};
use super::state::{CollectibleKind, GameEvent, GamePhase, GameState, ObstacleKind};
use crate::config::GameConfig;
use crate::lane_center_x;

/// Projected player pose
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub point: ScreenPoint,
    pub lane: u8,
    pub vertical: VerticalState,
    pub animation_phase: u8,
    pub invulnerable: bool,
}

/// One projected obstacle sprite (one per occupied lane)
#[derive(Debug, Clone)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub lane: u8,
    pub point: ScreenPoint,
}

/// One projected collectible sprite
#[derive(Debug, Clone)]
pub struct CollectibleView {
    pub kind: CollectibleKind,
    pub lane: u8,
    pub point: ScreenPoint,
}

/// One projected particle
#[derive(Debug, Clone)]
pub struct ParticleView {
    pub point: ScreenPoint,
    pub color: u32,
    /// Remaining life fraction for fading
    pub alpha: f32,
}

/// Immutable per-tick view for the external renderer and audio collaborators
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub coins: u32,
    pub distance: f32,
    pub level: u8,
    pub speed_multiplier: f32,
    /// Screen-space camera shake offset for this tick
    pub shake: (f32, f32),
    /// Absent when clipped (should not happen with a trailing camera)
    pub player: Option<PlayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub collectibles: Vec<CollectibleView>,
    pub particles: Vec<ParticleView>,
    /// Events accumulated since the previous snapshot
    pub events: Vec<GameEvent>,
}

impl RenderSnapshot {
    /// Capture the post-tick state, draining pending events
    pub fn capture(state: &mut GameState, cfg: &GameConfig) -> Self {
        let camera = &state.camera;

        let player = project(
            WorldPoint {
                lateral: state.player.lateral_x,
                height: state.player.height,
                depth: state.player.depth,
            },
            camera,
            cfg,
        )
        .map(|point| PlayerView {
            point,
            lane: state.player.lane,
            vertical: state.player.vertical,
            animation_phase: state.player.animation_phase,
            invulnerable: state.player.is_invulnerable(),
        });

        let mut obstacles = Vec::new();
        for obstacle in &state.obstacles {
            for lane in 0..3 {
                if !obstacle.lanes.contains(lane) {
                    continue;
                }
                let world = WorldPoint {
                    lateral: lane_center_x(lane, cfg.lane_width),
                    height: obstacle.height_extent / 2.0,
                    depth: obstacle.depth,
                };
                if let Some(point) = project(world, camera, cfg) {
                    obstacles.push(ObstacleView {
                        kind: obstacle.kind,
                        lane,
                        point,
                    });
                }
            }
        }

        let mut collectibles = Vec::new();
        for collectible in &state.collectibles {
            let world = WorldPoint {
                lateral: lane_center_x(collectible.lane, cfg.lane_width),
                height: collectible.height,
                depth: collectible.depth,
            };
            if let Some(point) = project(world, camera, cfg) {
                collectibles.push(CollectibleView {
                    kind: collectible.kind,
                    lane: collectible.lane,
                    point,
                });
            }
        }

        let mut particles = Vec::new();
        for particle in &state.particles {
            let world = WorldPoint {
                lateral: particle.pos.x,
                height: particle.pos.y,
                depth: particle.pos.z,
            };
            if let Some(point) = project(world, camera, cfg) {
                particles.push(ParticleView {
                    point,
                    color: particle.color,
                    alpha: particle.alpha(),
                });
            }
        }

        Self {
            phase: state.phase,
            score: state.stats.score(),
            coins: state.stats.coins,
            distance: state.stats.distance,
            level: state.stats.level,
            speed_multiplier: state.stats.speed_multiplier,
            shake: state.camera.shake_offset(state.time_ticks),
            player,
            obstacles,
            collectibles,
            particles,
            events: state.take_events(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{LaneSet, Obstacle};

    #[test]
    fn test_capture_projects_player_and_drains_events() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(5);
        state.start_run(&cfg);
        state.push_event(GameEvent::Jump);

        let snapshot = RenderSnapshot::capture(&mut state, &cfg);
        assert!(snapshot.player.is_some());
        assert_eq!(snapshot.events, vec![GameEvent::Jump]);

        // Events are drained exactly once
        let again = RenderSnapshot::capture(&mut state, &cfg);
        assert!(again.events.is_empty());
    }

    #[test]
    fn test_far_entities_are_clipped() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(5);
        state.start_run(&cfg);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: crate::sim::state::ObstacleKind::Boulder,
            lanes: LaneSet::single(1),
            depth: state.player.depth + cfg.far_clip * 2.0,
            height_extent: 30.0,
        });
        let snapshot = RenderSnapshot::capture(&mut state, &cfg);
        assert!(snapshot.obstacles.is_empty());
    }

    #[test]
    fn test_full_width_obstacle_yields_three_sprites() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(5);
        state.start_run(&cfg);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: crate::sim::state::ObstacleKind::Gap,
            lanes: LaneSet::ALL,
            depth: state.player.depth + 300.0,
            height_extent: 0.0,
        });
        let snapshot = RenderSnapshot::capture(&mut state, &cfg);
        assert_eq!(snapshot.obstacles.len(), 3);
    }
}
