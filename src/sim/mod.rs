//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` = one step)
//! - Seeded RNG only
//! - Stable iteration order (object list order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod movement;
pub mod particles;
pub mod portal;
pub mod stage;
pub mod state;
pub mod tick;

pub use camera::CameraState;
pub use collision::{Aabb, CollisionResult, Contact, resolve_platform, resolve_platforms};
pub use stage::{StageBuilder, default_stage};
pub use state::{
    GameEvent, GameState, Hitbox, MotionState, ObjectKind, Particle, ParticleKind, PlayerState,
    SimObject, StageError,
};
pub use tick::{TickInput, tick};
