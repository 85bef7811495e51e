//! Headless host: drives an engine from a scripted key sequence
//!
//! Used by the native binary and by tests that need a full engine run
//! without a browser.

use glam::Vec2;

use super::frame_navigation;
use crate::engine::Engine;
use crate::sim::GameEvent;

/// Hold `keys` for `frames` frames
#[derive(Debug, Clone)]
pub struct ScriptStep {
    pub frames: u32,
    pub keys: Vec<&'static str>,
}

impl ScriptStep {
    pub fn new(frames: u32, keys: &[&'static str]) -> Self {
        Self {
            frames,
            keys: keys.to_vec(),
        }
    }

    /// Frames with every key released
    pub fn idle(frames: u32) -> Self {
        Self::new(frames, &[])
    }
}

/// What happened during a scripted run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub frames: u32,
    pub ticks: u64,
    pub events: Vec<GameEvent>,
    pub final_pos: Option<Vec2>,
}

impl RunReport {
    /// Destinations the router would have been asked to open
    pub fn navigations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Navigate { destination, .. } => Some(destination.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Feeds an engine fixed-length frames, like a display at `frame_rate` Hz
#[derive(Debug)]
pub struct HeadlessRunner {
    engine: Engine,
    frame_dt: f32,
}

impl HeadlessRunner {
    pub fn new(engine: Engine, frame_rate: f32) -> Self {
        Self {
            engine,
            frame_dt: 1.0 / frame_rate,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Play the script; stops early once the engine is stopped
    pub fn run(&mut self, script: &[ScriptStep]) -> RunReport {
        let mut report = RunReport::default();

        for step in script {
            let latch = self.engine.latch_mut();
            latch.release_all();
            for key in &step.keys {
                latch.key_down(key);
            }

            for _ in 0..step.frames {
                if !self.engine.is_running() {
                    break;
                }
                let events = self.engine.advance(self.frame_dt);
                if let Some(destination) = frame_navigation(&events) {
                    log::info!("Router asked to open {}", destination);
                }
                report.events.extend(events);
                report.frames += 1;
            }
        }

        self.engine.latch_mut().release_all();
        report.ticks = self.engine.state().time_ticks;
        report.final_pos = self.engine.state().player_object().map(|p| p.pos);
        report
    }
}
