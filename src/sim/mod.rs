//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (entities are id- and depth-ordered)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod player;
pub mod project;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve};
pub use difficulty::{level_for_score, spawn_interval, speed_multiplier};
pub use player::{Player, VerticalState};
pub use project::{ScreenPoint, WorldPoint, project};
pub use snapshot::RenderSnapshot;
pub use spawn::spawn_tick;
pub use state::{
    Camera, Collectible, CollectibleKind, GameEvent, GamePhase, GameState, LaneSet, Obstacle,
    ObstacleKind, Particle, RunStats,
};
pub use tick::{InputEvent, TickInput, tick};
