//! Engine: one simulation instance driven by real frame time
//!
//! Hosts call [`Engine::advance`] once per animation frame with the elapsed
//! wall time. The accumulator turns that into zero or more fixed steps, so
//! the game runs at the same speed on 60 Hz and 144 Hz displays.

use crate::config::EngineConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::InputLatch;
use crate::sim::{GameEvent, GameState, StageError, default_stage, tick};

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    pub step: f32,
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add frame time and return how many steps to run now
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        // NaN would poison the accumulator for good
        let elapsed = if elapsed.is_finite() { elapsed } else { 0.0 };
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we refused to simulate
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Fraction of a step left over (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Owns the simulation, its input latch and the step clock
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    latch: InputLatch,
    clock: FixedStep,
    running: bool,
}

impl Engine {
    /// Engine over the default home stage
    pub fn new(config: EngineConfig, latch: InputLatch) -> Result<Self, StageError> {
        let state = default_stage().build(config)?;
        Ok(Self::with_state(state, latch))
    }

    /// Engine over a prepared simulation
    pub fn with_state(state: GameState, latch: InputLatch) -> Self {
        log::info!(
            "Engine ready: {} objects, viewport {}x{}",
            state.objects.len(),
            state.config.width,
            state.config.height
        );
        Self {
            state,
            latch,
            clock: FixedStep::default(),
            running: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    /// Keyboard/touch callbacks write here between frames
    pub fn latch_mut(&mut self) -> &mut InputLatch {
        &mut self.latch
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run exactly one step regardless of elapsed time
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.running {
            let input = self.latch.snapshot();
            tick(&mut self.state, &input);
        }
        self.state.drain_events()
    }

    /// Feed one frame's elapsed seconds; runs 0..=`MAX_SUBSTEPS` steps
    pub fn advance(&mut self, elapsed: f32) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }

        let steps = self.clock.accumulate(elapsed);
        for _ in 0..steps {
            let input = self.latch.snapshot();
            tick(&mut self.state, &input);
        }
        self.state.drain_events()
    }

    /// Stop stepping; later `advance` calls do nothing
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Engine stopped after {} ticks", self.state.time_ticks);
        }
        self.running = false;
        self.clock.reset();
    }

    pub fn resume(&mut self) {
        self.running = true;
    }
}
