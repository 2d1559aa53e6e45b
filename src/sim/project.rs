//! Perspective projection from path space to screen space
//!
//! Pure functions of a world point and the camera; nothing here mutates
//! state. The external renderer positions and sizes its sprites from the
//! returned [`ScreenPoint`]s.

use super::state::Camera;
use crate::config::GameConfig;

/// A point in path space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    /// Lateral offset from the path center
    pub lateral: f32,
    /// Height above the path
    pub height: f32,
    /// Depth along the path
    pub depth: f32,
}

/// A projected point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    /// Screen y, growing downward
    pub y: f32,
    /// Sprite scale: maximal at the near clip, fading to 0 at the far clip
    pub scale: f32,
}

/// Project a world point against the camera
///
/// Returns `None` outside the (near, far) clip range. Horizontal and
/// vertical offsets shrink with depth by the same factor, giving the
/// parallax that sells the pseudo-3D look.
pub fn project(point: WorldPoint, camera: &Camera, cfg: &GameConfig) -> Option<ScreenPoint> {
    let rel_depth = point.depth - camera.depth;
    if rel_depth <= cfg.near_clip || rel_depth >= cfg.far_clip {
        return None;
    }

    let persp = cfg.fov / rel_depth;
    let x = cfg.screen_width / 2.0 + (point.lateral - camera.lateral) * persp;
    let y = cfg.screen_height / 2.0 - (point.height - camera.height) * persp;
    let scale = persp * (1.0 - rel_depth / cfg.far_clip);

    Some(ScreenPoint { x, y, scale })
}
