//! Game configuration surface
//!
//! Everything a frontend can tune lives in one named-field struct. The
//! simulation reads only from here - no environment variables or CLI
//! parsing inside the engine.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning parameters for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // === Screen / projection ===
    /// Output surface width in pixels (projection target)
    pub screen_width: f32,
    /// Output surface height in pixels
    pub screen_height: f32,
    /// Perspective projection strength (screen offset = world offset * fov / depth)
    pub fov: f32,
    /// Near clip plane, relative to the camera
    pub near_clip: f32,
    /// Far clip plane; projected scale fades to zero here
    pub far_clip: f32,

    // === Timing ===
    /// Simulation tick rate in Hz
    pub tick_rate: f32,

    // === Path / player kinematics ===
    /// Lateral spacing between lane centers
    pub lane_width: f32,
    /// Base forward speed before the difficulty multiplier
    pub run_speed: f32,
    /// Initial vertical velocity of a jump
    pub jump_velocity: f32,
    /// Gravity applied while airborne
    pub gravity: f32,
    /// Slide duration in seconds
    pub slide_duration: f32,
    /// Power-up invulnerability duration in seconds
    pub invulnerability_duration: f32,

    // === Spawning ===
    /// How far ahead of the player the spawn cursor generates content
    pub spawn_lookahead: f32,
    /// Upper bound of the random extra spacing after each pattern
    pub spawn_jitter: f32,
    /// Distance behind the player beyond which entities are culled
    pub cull_margin: f32,

    // === Collisions ===
    /// Depth half-window for obstacle overlap
    pub collision_window: f32,
    /// Depth half-window for collectible pickup
    pub pickup_window: f32,

    // === Difficulty ===
    /// Score required per difficulty level
    pub score_per_level: u64,
    /// Difficulty level cap
    pub max_level: u8,

    // === Camera ===
    /// Trailing distance behind the player
    pub camera_distance: f32,
    /// Eye height above the path
    pub camera_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fov: FOV,
            near_clip: NEAR_CLIP,
            far_clip: FAR_CLIP,
            tick_rate: 60.0,
            lane_width: LANE_WIDTH,
            run_speed: RUN_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            slide_duration: SLIDE_DURATION,
            invulnerability_duration: INVULNERABILITY_DURATION,
            spawn_lookahead: SPAWN_LOOKAHEAD,
            spawn_jitter: SPAWN_JITTER,
            cull_margin: CULL_MARGIN,
            collision_window: COLLISION_WINDOW,
            pickup_window: PICKUP_WINDOW,
            score_per_level: SCORE_PER_LEVEL,
            max_level: MAX_LEVEL,
            camera_distance: CAMERA_DISTANCE,
            camera_height: CAMERA_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Duration of one simulation tick in seconds
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// A duration in seconds expressed as whole ticks (rounded)
    #[inline]
    pub fn ticks(&self, seconds: f32) -> u32 {
        (seconds * self.tick_rate).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dt() {
        let cfg = GameConfig::default();
        assert!((cfg.dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_tick_conversion() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.ticks(0.5), 30);
        assert_eq!(cfg.ticks(3.0), 180);
    }
}
