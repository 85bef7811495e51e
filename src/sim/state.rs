//! Game state and core simulation types
//!
//! Everything the renderer reads each frame lives here.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::camera::CameraState;
use super::collision::Aabb;
use crate::config::EngineConfig;

/// What a simulation object is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Player,
    Platform,
    /// Navigation hotspot leading to `destination` (a route such as "/blog")
    Portal { destination: String },
}

/// Collision box relative to an object's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset: Vec2,
    pub size: Vec2,
}

/// A simulated object. Position is the top-left corner, y grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimObject {
    pub id: String,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub kind: ObjectKind,
    /// Grounded friction override while standing on this platform
    #[serde(default)]
    pub friction: Option<f32>,
    /// Rebound coefficient for landings on this platform
    #[serde(default)]
    pub bounce: Option<f32>,
    /// Collision box narrower than the sprite
    #[serde(default)]
    pub hitbox: Option<Hitbox>,
}

impl SimObject {
    pub fn new(id: impl Into<String>, kind: ObjectKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id: id.into(),
            pos,
            size,
            vel: Vec2::ZERO,
            kind,
            friction: None,
            bounce: None,
            hitbox: None,
        }
    }

    pub fn player(id: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self::new(id, ObjectKind::Player, pos, size)
    }

    pub fn platform(id: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self::new(id, ObjectKind::Platform, pos, size)
    }

    pub fn portal(
        id: impl Into<String>,
        destination: impl Into<String>,
        pos: Vec2,
        size: Vec2,
    ) -> Self {
        let destination = destination.into();
        Self::new(id, ObjectKind::Portal { destination }, pos, size)
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = Some(bounce);
        self
    }

    pub fn with_hitbox(mut self, offset: Vec2, size: Vec2) -> Self {
        self.hitbox = Some(Hitbox { offset, size });
        self
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == ObjectKind::Player
    }

    #[inline]
    pub fn is_platform(&self) -> bool {
        self.kind == ObjectKind::Platform
    }

    /// Destination route if this is a portal
    pub fn destination(&self) -> Option<&str> {
        match &self.kind {
            ObjectKind::Portal { destination } => Some(destination),
            _ => None,
        }
    }

    /// Collision box at a given object position
    pub fn aabb_at(&self, pos: Vec2) -> Aabb {
        match self.hitbox {
            Some(hitbox) => Aabb::new(pos + hitbox.offset, hitbox.size),
            None => Aabb::new(pos, self.size),
        }
    }

    /// Collision box at the current position
    pub fn aabb(&self) -> Aabb {
        self.aabb_at(self.pos)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Coarse movement state derived from the player flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne { can_double_jump: bool },
}

/// Player flags, rebuilt each tick from input and collision results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub is_jumping: bool,
    pub is_grounded: bool,
    pub facing_right: bool,
    pub can_double_jump: bool,
    /// Visual squash pulse after a hard landing (0 = none)
    pub landing_squash: f32,
    /// Jump key state of the previous tick, so holding it doesn't re-jump
    #[serde(default)]
    pub jump_held: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_jumping: false,
            is_grounded: true,
            facing_right: true,
            can_double_jump: true,
            landing_squash: 0.0,
            jump_held: false,
        }
    }
}

impl PlayerState {
    pub fn motion(&self) -> MotionState {
        if self.is_grounded {
            MotionState::Grounded
        } else {
            MotionState::Airborne {
                can_double_jump: self.can_double_jump,
            }
        }
    }
}

/// Particle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Puff kicked up by a hard landing
    Dust,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, removed at 0
    pub life: f32,
    pub kind: ParticleKind,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    /// Top landing after being airborne
    Landed { impact: f32 },
    /// Fell out of the world and was moved to the respawn point
    Respawned,
    NearPortalChanged { portal_id: Option<String> },
    /// Router should open `destination`
    Navigate { portal_id: String, destination: String },
}

/// Rejected object layouts
#[derive(Debug, Error, PartialEq)]
pub enum StageError {
    #[error("duplicate object id `{0}`")]
    DuplicateId(String),

    #[error("stage has more than one player (`{first}` and `{second}`)")]
    MultiplePlayers { first: String, second: String },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next burst; each call yields a new stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,
    /// RNG state for particle spread
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Stage objects in stable iteration order
    pub objects: Vec<SimObject>,
    pub player: PlayerState,
    pub camera: CameraState,
    /// Portal the player currently stands next to
    pub near_portal: Option<String>,
    /// Friction override of the platform stood on last step
    #[serde(default)]
    pub surface_friction: Option<f32>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a simulation over the given objects.
    ///
    /// A stage without a player is accepted (ticks are no-ops), two players
    /// or a repeated id are not.
    pub fn new(config: EngineConfig, objects: Vec<SimObject>) -> Result<Self, StageError> {
        validate_objects(&objects)?;

        let camera = CameraState::new(config.dead_zone);
        Ok(Self {
            config,
            rng_state: RngState::new(0x00ca_7ca7),
            time_ticks: 0,
            objects,
            player: PlayerState::default(),
            camera,
            near_portal: None,
            surface_friction: None,
            particles: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Reseed particle randomness
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_state = RngState::new(seed);
        self
    }

    pub fn player_index(&self) -> Option<usize> {
        self.objects.iter().position(SimObject::is_player)
    }

    pub fn player_object(&self) -> Option<&SimObject> {
        self.objects.iter().find(|o| o.is_player())
    }

    pub fn object(&self, id: &str) -> Option<&SimObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut SimObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Take the events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Renderer-facing JSON snapshot including particles
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            objects: &'a [SimObject],
            player: &'a PlayerState,
            camera: &'a CameraState,
            particles: &'a [Particle],
            near_portal: Option<&'a str>,
        }

        serde_json::to_string(&Snapshot {
            objects: &self.objects,
            player: &self.player,
            camera: &self.camera,
            particles: &self.particles,
            near_portal: self.near_portal.as_deref(),
        })
    }
}

fn validate_objects(objects: &[SimObject]) -> Result<(), StageError> {
    let mut player: Option<&str> = None;
    for (i, object) in objects.iter().enumerate() {
        if objects[..i].iter().any(|o| o.id == object.id) {
            return Err(StageError::DuplicateId(object.id.clone()));
        }
        if object.is_player() {
            if let Some(first) = player {
                return Err(StageError::MultiplePlayers {
                    first: first.to_string(),
                    second: object.id.clone(),
                });
            }
            player = Some(&object.id);
        }
    }
    Ok(())
}
