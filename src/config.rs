//! Engine tuning and effect preferences
//!
//! Every field has a default, so a host may pass a partial JSON object.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Effect quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EffectsQuality {
    Off,
    Low,
    #[default]
    Medium,
    High,
}

impl EffectsQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectsQuality::Off => "Off",
            EffectsQuality::Low => "Low",
            EffectsQuality::Medium => "Medium",
            EffectsQuality::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(EffectsQuality::Off),
            "low" => Some(EffectsQuality::Low),
            "medium" | "med" => Some(EffectsQuality::Medium),
            "high" => Some(EffectsQuality::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            EffectsQuality::Off => 0,
            EffectsQuality::Low => 16,
            EffectsQuality::Medium => 64,
            EffectsQuality::High => 256,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must lie in (0, 1), got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("dead zone must be non-negative, got ({x}, {y})")]
    DeadZone { x: f32, y: f32 },
}

/// Simulation tuning, settable at engine construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Physics (per step) ===
    pub gravity: f32,
    pub jump_power: f32,
    /// Kept for hosts still sending it; the integrator uses
    /// `acceleration` and `max_speed` instead.
    pub move_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Fraction of `acceleration` available while airborne
    pub air_control: f32,
    pub terminal_velocity: f32,
    pub double_jump_ratio: f32,
    pub ground_friction: f32,
    pub air_friction: f32,

    // === Viewport ===
    pub width: f32,
    pub height: f32,

    // === Camera ===
    pub camera_lerp: f32,
    /// Half-extents of the dead-zone rectangle
    pub dead_zone: Vec2,

    // === Gameplay ===
    pub portal_radius: f32,
    pub landing_threshold: f32,
    pub respawn: Vec2,

    // === Effects ===
    pub effects: EffectsQuality,
    /// Suppress the landing squash pulse
    pub reduced_motion: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            move_speed: MOVE_SPEED,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            air_control: AIR_CONTROL,
            terminal_velocity: TERMINAL_VELOCITY,
            double_jump_ratio: DOUBLE_JUMP_RATIO,
            ground_friction: GROUND_FRICTION,
            air_friction: AIR_FRICTION,

            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,

            camera_lerp: CAMERA_LERP,
            dead_zone: Vec2::new(DEAD_ZONE_X, DEAD_ZONE_Y),

            portal_radius: PORTAL_RADIUS,
            landing_threshold: LANDING_THRESHOLD,
            respawn: Vec2::new(RESPAWN_X, RESPAWN_Y),

            effects: EffectsQuality::Medium,
            reduced_motion: false,
        }
    }
}

impl EngineConfig {
    /// Default tuning for a viewport of the given size
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Viewport {
                width: self.width,
                height: self.height,
            });
        }

        for (name, value) in [
            ("max_speed", self.max_speed),
            ("terminal_velocity", self.terminal_velocity),
            ("portal_radius", self.portal_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if !(self.camera_lerp > 0.0 && self.camera_lerp < 1.0) {
            return Err(ConfigError::OutOfUnitRange {
                name: "camera_lerp",
                value: self.camera_lerp,
            });
        }

        if self.dead_zone.x < 0.0 || self.dead_zone.y < 0.0 {
            return Err(ConfigError::DeadZone {
                x: self.dead_zone.x,
                y: self.dead_zone.y,
            });
        }

        Ok(())
    }

    /// Viewport size as a vector
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        self.effects.max_particles()
    }

    /// Depth below which the player counts as fallen out of the world
    pub fn fall_limit(&self) -> f32 {
        self.height * 2.0
    }
}
