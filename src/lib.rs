//! Temple Dash - a pseudo-3D lane-runner simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `config`: Data-driven tuning surface
//! - `highscores`: Single-value high-score persistence
//! - `timestep`: Fixed-timestep accumulator for frontends
//!
//! The engine never draws pixels or plays sounds. Each tick it produces a
//! [`sim::RenderSnapshot`] and a queue of [`sim::GameEvent`]s; rendering,
//! audio and input delivery are external collaborators.

pub mod config;
pub mod highscores;
pub mod sim;
pub mod timestep;

pub use config::GameConfig;
pub use highscores::HighScore;
pub use timestep::FixedTimestep;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the default tick rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of lanes on the path
    pub const LANE_COUNT: u8 = 3;
    /// Lateral spacing between lane centers (world units)
    pub const LANE_WIDTH: f32 = 60.0;

    /// Base forward speed (world units per second)
    pub const RUN_SPEED: f32 = 480.0;
    /// Initial upward velocity of a jump (world units per second)
    pub const JUMP_VELOCITY: f32 = 1080.0;
    /// Downward acceleration while airborne (world units per second squared)
    pub const GRAVITY: f32 = 4320.0;
    /// Slide duration in seconds
    pub const SLIDE_DURATION: f32 = 0.5;
    /// Invulnerability power-up duration in seconds
    pub const INVULNERABILITY_DURATION: f32 = 3.0;

    /// Spawn cursor lookahead ahead of the player (world units)
    pub const SPAWN_LOOKAHEAD: f32 = 400.0;
    /// Random extra spacing added after each spawned pattern
    pub const SPAWN_JITTER: f32 = 200.0;
    /// Entities farther than this behind the player are culled
    pub const CULL_MARGIN: f32 = 300.0;

    /// Half-window of depth overlap for obstacle collisions
    pub const COLLISION_WINDOW: f32 = 25.0;
    /// Half-window of depth overlap for collectible pickups
    pub const PICKUP_WINDOW: f32 = 20.0;

    /// Score needed per difficulty level
    pub const SCORE_PER_LEVEL: u64 = 500;
    /// Difficulty cap
    pub const MAX_LEVEL: u8 = 10;

    /// Perspective projection strength
    pub const FOV: f32 = 500.0;
    /// Points closer than this to the camera are not projected
    pub const NEAR_CLIP: f32 = 0.1;
    /// Points farther than this from the camera are not projected
    pub const FAR_CLIP: f32 = 2000.0;

    /// Camera trailing distance behind the player
    pub const CAMERA_DISTANCE: f32 = 200.0;
    /// Camera eye height above the path
    pub const CAMERA_HEIGHT: f32 = 50.0;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;
}

/// Lateral world-space center of a lane (lane 1 is the path center)
#[inline]
pub fn lane_center_x(lane: u8, lane_width: f32) -> f32 {
    (lane as f32 - 1.0) * lane_width
}

/// Deterministic noise in [0, 1) from a pair of integers
///
/// Used for cosmetic jitter (particles, camera shake) so visual effects
/// never draw from the gameplay RNG.
#[inline]
pub fn hash_noise(a: u32, b: u32) -> f32 {
    let hash = a.wrapping_mul(2654435761).wrapping_add(b.wrapping_mul(7919));
    (hash % 1000) as f32 / 1000.0
}
