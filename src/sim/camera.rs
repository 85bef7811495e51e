//! Dead-zone follow camera
//!
//! The target only moves when the player leaves a rectangle centred on the
//! screen, and then only far enough to put the player back on its edge. The
//! camera position eases toward the target every step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera offset (world position of the screen's top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub pos: Vec2,
    pub target: Vec2,
    /// Half-extents of the dead zone, never negative
    pub dead_zone: Vec2,
    /// Set once the camera has snapped to the player
    #[serde(default)]
    pub bootstrapped: bool,
}

impl CameraState {
    pub fn new(dead_zone: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            dead_zone: dead_zone.max(Vec2::ZERO),
            bootstrapped: false,
        }
    }

    /// Snap straight to a player-centred view
    pub fn snap_to(&mut self, focus: Vec2, viewport: Vec2) {
        self.target = focus - viewport * 0.5;
        self.pos = self.target;
        self.bootstrapped = true;
    }

    /// Follow `focus` (player centre in world space) for one step
    pub fn update(&mut self, focus: Vec2, viewport: Vec2, lerp: f32) {
        if !self.bootstrapped {
            self.snap_to(focus, viewport);
            return;
        }

        let center = viewport * 0.5;
        let zone_min = center - self.dead_zone;
        let zone_max = center + self.dead_zone;
        let on_screen = focus - self.target;

        if on_screen.x < zone_min.x {
            self.target.x = focus.x - zone_min.x;
        } else if on_screen.x > zone_max.x {
            self.target.x = focus.x - zone_max.x;
        }

        if on_screen.y < zone_min.y {
            self.target.y = focus.y - zone_min.y;
        } else if on_screen.y > zone_max.y {
            self.target.y = focus.y - zone_max.y;
        }

        self.pos += (self.target - self.pos) * lerp;
    }

    /// Convert a world position to screen space
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}
