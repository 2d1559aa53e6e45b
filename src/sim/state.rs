//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. The
//! [`GameState`] is the single canonical container for a run; components
//! mutate it only through the tick-ordered entry points in [`super::tick`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::config::GameConfig;
use crate::hash_noise;

/// Current phase of the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting at the title screen for a confirm input
    Menu,
    /// Active gameplay
    Running,
    /// Tick advancement frozen
    Paused,
    /// Run ended on a blocked collision; terminal per run
    GameOver,
}

/// Discrete notifications for the external audio collaborator
///
/// Drained once per tick through the render snapshot; the engine itself
/// synthesizes no sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Slide,
    CollectCoin,
    CollectGem,
    CollectPowerup,
    Crash,
    /// Periodic footfall while grounded and running
    Footstep,
}

/// Set of lanes occupied by an obstacle (bit i = lane i)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaneSet(u8);

impl LaneSet {
    /// All three lanes
    pub const ALL: LaneSet = LaneSet(0b111);

    /// A single lane
    pub fn single(lane: u8) -> Self {
        LaneSet(1 << lane.min(2))
    }

    /// This set plus one more lane
    #[must_use]
    pub fn with(self, lane: u8) -> Self {
        LaneSet(self.0 | 1 << lane.min(2))
    }

    pub fn contains(self, lane: u8) -> bool {
        lane < 3 && self.0 & (1 << lane) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of occupied lanes
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Obstacle variants, closed so collision logic can match exhaustively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Knee-high wall; cleared by jumping over it or switching lane
    BarrierLow,
    /// Overhead beam; cleared by sliding under it or switching lane
    BarrierHigh,
    /// Chasm in the path; cleared only by being airborne
    Gap,
    /// Solid rock; no vertical action helps, the lane must be vacated
    Boulder,
}

impl ObstacleKind {
    /// Vertical extent used by collision and rendering
    pub fn height_extent(self) -> f32 {
        match self {
            ObstacleKind::BarrierLow => 15.0,
            ObstacleKind::BarrierHigh => 40.0,
            ObstacleKind::Gap => 0.0,
            ObstacleKind::Boulder => 30.0,
        }
    }
}

/// An obstacle on the path ahead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Lanes this obstacle blocks (one or more)
    pub lanes: LaneSet,
    pub depth: f32,
    pub height_extent: f32,
}

/// Collectible variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Gem,
    PowerUp,
}

impl CollectibleKind {
    /// Score awarded on pickup
    pub fn score_value(self) -> u64 {
        match self {
            CollectibleKind::Coin => 10,
            CollectibleKind::Gem => 50,
            CollectibleKind::PowerUp => 100,
        }
    }

    /// Coins awarded on pickup
    pub fn coin_value(self) -> u32 {
        match self {
            CollectibleKind::Coin => 1,
            CollectibleKind::Gem => 5,
            CollectibleKind::PowerUp => 0,
        }
    }

    /// Hover height above the path
    pub fn hover_height(self) -> f32 {
        match self {
            CollectibleKind::Coin => 10.0,
            _ => 20.0,
        }
    }
}

/// A collectible floating over the path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub lane: u8,
    pub depth: f32,
    pub height: f32,
    pub collected: bool,
}

/// A particle for visual effects (cosmetic, never gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Palette id for the renderer
    pub color: u32,
    pub ttl_ticks: u32,
    pub max_ttl_ticks: u32,
}

impl Particle {
    /// Remaining life fraction in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_ttl_ticks == 0 {
            0.0
        } else {
            self.ttl_ticks as f32 / self.max_ttl_ticks as f32
        }
    }
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 256;

/// Camera trailing the player with smoothing and impact shake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Eye depth along the path (behind the player)
    pub depth: f32,
    /// Smoothed lateral position
    pub lateral: f32,
    /// Eye height above the path
    pub height: f32,
    pub shake_magnitude: f32,
    pub shake_ticks: u32,
}

impl Camera {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            depth: -cfg.camera_distance,
            lateral: 0.0,
            height: cfg.camera_height,
            shake_magnitude: 0.0,
            shake_ticks: 0,
        }
    }

    /// Smoothed follow toward the player pose; called once per tick
    pub fn follow(&mut self, player: &Player, cfg: &GameConfig) {
        let target_depth = player.depth - cfg.camera_distance;
        let target_lateral = player.lateral_x * 0.3;
        self.depth += (target_depth - self.depth) * 0.1;
        self.lateral += (target_lateral - self.lateral) * 0.1;
        if self.shake_ticks > 0 {
            self.shake_ticks -= 1;
            if self.shake_ticks == 0 {
                self.shake_magnitude = 0.0;
            }
        }
    }

    pub fn add_shake(&mut self, magnitude: f32, ticks: u32) {
        self.shake_magnitude = self.shake_magnitude.max(magnitude);
        self.shake_ticks = self.shake_ticks.max(ticks);
    }

    /// Screen-space shake offset for the current tick
    ///
    /// Hash noise rather than the gameplay RNG: shaking the camera must not
    /// perturb the spawn sequence.
    pub fn shake_offset(&self, time_ticks: u64) -> (f32, f32) {
        if self.shake_ticks == 0 {
            return (0.0, 0.0);
        }
        let t = time_ticks as u32;
        let dx = (hash_noise(t, 17) - 0.5) * 2.0 * self.shake_magnitude;
        let dy = (hash_noise(t, 31) - 0.5) * 2.0 * self.shake_magnitude;
        (dx, dy)
    }
}

/// Score and pacing state for the current run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Distance traveled in world units
    pub distance: f32,
    /// Score earned from pickups (on top of the distance score)
    pub bonus: u64,
    pub coins: u32,
    /// Difficulty level, 1..=max; only ever ratchets up within a run
    pub level: u8,
    /// Forward-speed multiplier derived from the level
    pub speed_multiplier: f32,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            distance: 0.0,
            bonus: 0,
            coins: 0,
            level: 1,
            speed_multiplier: 1.0,
        }
    }
}

impl RunStats {
    /// Cumulative score: one point per ten units of distance, plus pickups.
    /// Monotonic non-decreasing over a run.
    pub fn score(&self) -> u64 {
        (self.distance / 10.0) as u64 + self.bonus
    }
}

/// Complete game state (deterministic, serializable)
///
/// Cosmetic vectors (`particles`) and the pending event queue are skipped
/// on serialization; everything else round-trips, including the RNG, so a
/// restored run continues identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; serialized with the state
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Ticks elapsed in the current run
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    /// Active obstacles, depth-sorted by construction
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles, depth-sorted by construction
    pub collectibles: Vec<Collectible>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub stats: RunStats,
    /// Depth at which the spawner places its next pattern
    pub next_spawn_depth: f32,
    /// Events pending for the audio collaborator, drained at snapshot time
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state at the menu, seeded for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            player: Player::new(),
            camera: Camera::new(&GameConfig::default()),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            stats: RunStats::default(),
            next_spawn_depth: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset run state and enter `Running`
    ///
    /// The RNG deliberately carries over from the previous run so restarts
    /// see fresh layouts; seed the state anew for an identical rerun.
    pub fn start_run(&mut self, cfg: &GameConfig) {
        self.player = Player::new();
        self.camera = Camera::new(cfg);
        self.obstacles.clear();
        self.collectibles.clear();
        self.particles.clear();
        self.events.clear();
        self.stats = RunStats::default();
        self.next_spawn_depth = self.player.depth + cfg.spawn_lookahead;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        log::info!("run started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending events (called by the snapshot)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push a particle, evicting the oldest when at capacity
    pub fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Spawn a burst of particles around a point
    ///
    /// Spread is deterministic hash noise keyed on the tick counter, so
    /// cosmetic bursts never touch the gameplay RNG.
    pub fn burst_particles(&mut self, pos: Vec3, color: u32, count: u32, spread: f32, ttl: u32) {
        let t = self.time_ticks as u32;
        for i in 0..count {
            let vel = Vec3::new(
                (hash_noise(t, i * 3) - 0.5) * 2.0 * spread,
                (hash_noise(t, i * 3 + 1) - 0.5) * 2.0 * spread,
                (hash_noise(t, i * 3 + 2) - 0.5) * spread,
            );
            self.push_particle(Particle {
                pos,
                vel,
                color,
                ttl_ticks: ttl,
                max_ttl_ticks: ttl,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_set() {
        let set = LaneSet::single(0).with(2);
        assert!(set.contains(0));
        assert!(!set.contains(1));
        assert!(set.contains(2));
        assert_eq!(set.count(), 2);
        assert_eq!(LaneSet::ALL.count(), 3);
        assert!(LaneSet::default().is_empty());
        assert!(!set.contains(7));
    }

    #[test]
    fn test_score_composition() {
        let mut stats = RunStats::default();
        stats.distance = 1234.0;
        stats.bonus = 50;
        assert_eq!(stats.score(), 173);
    }

    #[test]
    fn test_initial_state_is_menu() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.stats.level, 1);
    }

    #[test]
    fn test_start_run_resets_stats() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(42);
        state.start_run(&cfg);
        state.stats.distance = 999.0;
        state.stats.coins = 7;
        state.start_run(&cfg);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stats.coins, 0);
        assert_eq!(state.stats.score(), 0);
        assert!((state.next_spawn_depth - cfg.spawn_lookahead).abs() < 1e-3);
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1);
        for i in 0..MAX_PARTICLES + 10 {
            state.push_particle(Particle {
                pos: Vec3::ZERO,
                vel: Vec3::ZERO,
                color: i as u32,
                ttl_ticks: 10,
                max_ttl_ticks: 10,
            });
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }
}
