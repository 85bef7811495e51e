//! Stage layouts
//!
//! The default stage is the portfolio's home level: a long ground strip,
//! three floating platforms and one portal per content page.

use glam::Vec2;

use super::state::{GameState, SimObject, StageError};
use crate::config::EngineConfig;

/// Width of the default stage
pub const STAGE_WIDTH: f32 = 1200.0;
/// Height of the default stage
pub const STAGE_HEIGHT: f32 = 400.0;
/// Player sprite size
pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 40.0);
/// Portal size
pub const PORTAL_SIZE: Vec2 = Vec2::new(50.0, 50.0);

/// Incremental stage construction
#[derive(Debug, Default)]
pub struct StageBuilder {
    objects: Vec<SimObject>,
}

impl StageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(mut self, pos: Vec2) -> Self {
        self.objects.push(SimObject::player("player", pos, PLAYER_SIZE));
        self
    }

    pub fn platform(mut self, id: &str, pos: Vec2, size: Vec2) -> Self {
        self.objects.push(SimObject::platform(id, pos, size));
        self
    }

    pub fn portal(mut self, id: &str, destination: &str, pos: Vec2) -> Self {
        self.objects
            .push(SimObject::portal(id, destination, pos, PORTAL_SIZE));
        self
    }

    /// Add a prepared object (custom friction, bounce or hitbox)
    pub fn object(mut self, object: SimObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn objects(&self) -> &[SimObject] {
        &self.objects
    }

    pub fn build(self, config: EngineConfig) -> Result<GameState, StageError> {
        log::info!("Building stage with {} objects", self.objects.len());
        GameState::new(config, self.objects)
    }
}

/// The home level
pub fn default_stage() -> StageBuilder {
    StageBuilder::new()
        .player(Vec2::new(100.0, 200.0))
        .platform("ground", Vec2::new(0.0, 350.0), Vec2::new(STAGE_WIDTH, 50.0))
        .platform("platform1", Vec2::new(300.0, 250.0), Vec2::new(150.0, 20.0))
        .platform("platform2", Vec2::new(550.0, 180.0), Vec2::new(150.0, 20.0))
        .platform("platform3", Vec2::new(800.0, 250.0), Vec2::new(150.0, 20.0))
        .portal("portal-projects", "/projects", Vec2::new(350.0, 200.0))
        .portal("portal-about", "/about", Vec2::new(600.0, 130.0))
        .portal("portal-blog", "/blog", Vec2::new(850.0, 200.0))
        .portal("portal-contact", "/contact", Vec2::new(1050.0, 300.0))
}
