//! Player kinematics and input resolution
//!
//! Turns discrete input events into lane and vertical-state transitions and
//! integrates the jump arc. The run never stalls: depth advances every tick
//! regardless of vertical state.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::config::GameConfig;
use crate::{consts::LANE_COUNT, lane_center_x};

/// Ticks between footstep events while grounded
const FOOTSTEP_INTERVAL_TICKS: u32 = 20;
/// Ticks per run-cycle animation frame
const ANIMATION_INTERVAL_TICKS: u32 = 10;
/// Number of run-cycle animation frames
const ANIMATION_FRAMES: u8 = 4;

/// Vertical state machine; at most one state is ever active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalState {
    Grounded,
    Jumping,
    Sliding,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Lane index, always in 0..3
    pub lane: u8,
    pub vertical: VerticalState,
    /// Height above the path (jump arc)
    pub height: f32,
    pub vertical_vel: f32,
    /// Smoothed lateral position; visual only, collisions use `lane`
    pub lateral_x: f32,
    /// Distance traveled; monotonically increasing
    pub depth: f32,
    /// Remaining slide duration
    pub slide_ticks: u32,
    /// Remaining power-up invulnerability
    pub invulnerable_ticks: u32,
    /// Run-cycle frame for the renderer
    pub animation_phase: u8,
    animation_ticks: u32,
    footstep_ticks: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: 1,
            vertical: VerticalState::Grounded,
            height: 0.0,
            vertical_vel: 0.0,
            lateral_x: 0.0,
            depth: 0.0,
            slide_ticks: 0,
            invulnerable_ticks: 0,
            animation_phase: 0,
            animation_ticks: 0,
            footstep_ticks: FOOTSTEP_INTERVAL_TICKS,
        }
    }

    /// Shift one lane left; allowed mid-air and mid-slide
    pub fn move_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    /// Shift one lane right; allowed mid-air and mid-slide
    pub fn move_right(&mut self) {
        self.lane = (self.lane + 1).min(LANE_COUNT - 1);
    }

    /// Start a jump; only from the ground. A jump cannot interrupt a slide.
    pub fn jump(&mut self, cfg: &GameConfig, events: &mut Vec<GameEvent>) {
        if self.vertical == VerticalState::Grounded {
            self.vertical = VerticalState::Jumping;
            self.vertical_vel = cfg.jump_velocity;
            events.push(GameEvent::Jump);
        }
    }

    /// Start a slide; only from the ground, fixed duration, non-interruptible
    pub fn slide(&mut self, cfg: &GameConfig, events: &mut Vec<GameEvent>) {
        if self.vertical == VerticalState::Grounded {
            self.vertical = VerticalState::Sliding;
            self.slide_ticks = cfg.ticks(cfg.slide_duration);
            events.push(GameEvent::Slide);
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn grant_invulnerability(&mut self, cfg: &GameConfig) {
        self.invulnerable_ticks = cfg.ticks(cfg.invulnerability_duration);
    }

    /// Advance kinematics by one tick
    pub fn advance(
        &mut self,
        dt: f32,
        speed_multiplier: f32,
        cfg: &GameConfig,
        events: &mut Vec<GameEvent>,
    ) {
        self.depth += cfg.run_speed * speed_multiplier * dt;

        match self.vertical {
            VerticalState::Jumping => {
                self.height += self.vertical_vel * dt;
                self.vertical_vel -= cfg.gravity * dt;
                if self.height <= 0.0 && self.vertical_vel <= 0.0 {
                    self.height = 0.0;
                    self.vertical_vel = 0.0;
                    self.vertical = VerticalState::Grounded;
                }
            }
            VerticalState::Sliding => {
                self.slide_ticks = self.slide_ticks.saturating_sub(1);
                if self.slide_ticks == 0 {
                    self.vertical = VerticalState::Grounded;
                }
            }
            VerticalState::Grounded => {}
        }

        // Visual easing toward the lane center; lane changes themselves
        // take effect instantly for collision purposes
        let target = lane_center_x(self.lane, cfg.lane_width);
        self.lateral_x += (target - self.lateral_x) * 0.2;

        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);

        self.animation_ticks += 1;
        if self.animation_ticks >= ANIMATION_INTERVAL_TICKS {
            self.animation_ticks = 0;
            self.animation_phase = (self.animation_phase + 1) % ANIMATION_FRAMES;
        }

        if self.vertical == VerticalState::Grounded {
            self.footstep_ticks = self.footstep_ticks.saturating_sub(1);
            if self.footstep_ticks == 0 {
                events.push(GameEvent::Footstep);
                self.footstep_ticks = FOOTSTEP_INTERVAL_TICKS;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn advance_n(player: &mut Player, cfg: &GameConfig, n: u32) {
        let mut events = Vec::new();
        for _ in 0..n {
            player.advance(SIM_DT, 1.0, cfg, &mut events);
        }
    }

    #[test]
    fn test_lane_clamping() {
        let mut player = Player::new();
        assert_eq!(player.lane, 1);
        player.move_left();
        player.move_left();
        player.move_left();
        assert_eq!(player.lane, 0);
        player.move_right();
        player.move_right();
        player.move_right();
        assert_eq!(player.lane, 2);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        player.jump(&cfg, &mut events);
        assert_eq!(player.vertical, VerticalState::Jumping);
        assert_eq!(events, vec![GameEvent::Jump]);

        player.advance(SIM_DT, 1.0, &cfg, &mut events);
        assert!(player.height > 0.0);

        // Full arc: 2 * v0 / g = 0.5 s = 30 ticks
        advance_n(&mut player, &cfg, 40);
        assert_eq!(player.vertical, VerticalState::Grounded);
        assert_eq!(player.height, 0.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        player.jump(&cfg, &mut events);
        let vel = player.vertical_vel;
        player.advance(SIM_DT, 1.0, &cfg, &mut events);
        player.jump(&cfg, &mut events);
        assert!(player.vertical_vel < vel, "mid-air jump must not re-trigger");
    }

    #[test]
    fn test_slide_expires_and_is_not_interruptible() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        player.slide(&cfg, &mut events);
        assert_eq!(player.vertical, VerticalState::Sliding);

        // A jump input mid-slide is ignored
        player.jump(&cfg, &mut events);
        assert_eq!(player.vertical, VerticalState::Sliding);

        advance_n(&mut player, &cfg, cfg.ticks(cfg.slide_duration));
        assert_eq!(player.vertical, VerticalState::Grounded);
    }

    #[test]
    fn test_lane_change_mid_air() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        player.jump(&cfg, &mut events);
        player.advance(SIM_DT, 1.0, &cfg, &mut events);
        player.move_left();
        assert_eq!(player.lane, 0);
        assert_eq!(player.vertical, VerticalState::Jumping);
    }

    #[test]
    fn test_depth_always_advances() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        let mut prev = player.depth;
        player.slide(&cfg, &mut events);
        for _ in 0..60 {
            player.advance(SIM_DT, 1.3, &cfg, &mut events);
            assert!(player.depth > prev);
            prev = player.depth;
        }
    }

    #[test]
    fn test_invulnerability_countdown() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        player.grant_invulnerability(&cfg);
        let total = player.invulnerable_ticks;
        assert_eq!(total, 180);
        advance_n(&mut player, &cfg, total - 1);
        assert!(player.is_invulnerable());
        advance_n(&mut player, &cfg, 1);
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_footstep_cadence_only_grounded() {
        let cfg = GameConfig::default();
        let mut player = Player::new();
        let mut events = Vec::new();
        for _ in 0..60 {
            player.advance(SIM_DT, 1.0, &cfg, &mut events);
        }
        let grounded_steps = events.iter().filter(|e| **e == GameEvent::Footstep).count();
        assert_eq!(grounded_steps, 3);

        events.clear();
        player.jump(&cfg, &mut events);
        events.clear();
        for _ in 0..20 {
            player.advance(SIM_DT, 1.0, &cfg, &mut events);
        }
        // Airborne for 20 of the jump's 30 ticks: no footsteps yet
        assert!(!events.contains(&GameEvent::Footstep));
    }
}
