//! Cat Platformer - the 2D navigation game of a portfolio site
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, camera, portals)
//! - `input`: Held-key latch fed by keyboard and touch events
//! - `engine`: Fixed timestep driver owning one simulation instance
//! - `config`: Data-driven tuning loaded from JSON
//! - `platform`: Browser/headless host glue

pub mod config;
pub mod engine;
pub mod input;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, EffectsQuality, EngineConfig};
pub use engine::{Engine, FixedStep};
pub use input::{InputLatch, TouchButton};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; tuning values are per step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Physics defaults (units per step)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_POWER: f32 = 12.0;
    /// Legacy fixed walking speed, superseded by acceleration + max speed
    pub const MOVE_SPEED: f32 = 5.0;
    pub const MAX_SPEED: f32 = 8.0;
    pub const ACCELERATION: f32 = 0.5;
    pub const AIR_CONTROL: f32 = 0.3;
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    /// Double jump strength relative to a grounded jump
    pub const DOUBLE_JUMP_RATIO: f32 = 0.8;
    pub const GROUND_FRICTION: f32 = 0.85;
    pub const AIR_FRICTION: f32 = 0.98;

    /// Viewport defaults
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Camera smoothing factor per step
    pub const CAMERA_LERP: f32 = 0.08;
    /// Dead zone half-extents around screen centre
    pub const DEAD_ZONE_X: f32 = 120.0;
    pub const DEAD_ZONE_Y: f32 = 60.0;

    /// Landing feedback
    pub const LANDING_THRESHOLD: f32 = 5.0;
    pub const MAX_DUST_PER_LANDING: usize = 8;
    pub const SQUASH_DECAY: f32 = 0.8;
    pub const SQUASH_EPSILON: f32 = 0.01;
    /// Rebounds slower than this settle as a normal landing
    pub const MIN_REBOUND: f32 = 1.0;

    /// Portal activation distance
    pub const PORTAL_RADIUS: f32 = 50.0;

    /// Where the player reappears after falling out of the world
    pub const RESPAWN_X: f32 = 100.0;
    pub const RESPAWN_Y: f32 = 100.0;
}
