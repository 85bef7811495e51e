//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (animation frames vs a scripted clock)
//! - Input events (keyboard and touch buttons into the latch)
//! - Handing navigation requests to the router

use crate::sim::GameEvent;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessRunner, RunReport, ScriptStep};
#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

/// Destination to open after a frame. Held confirm raises one `Navigate`
/// per substep, but the router should only be asked once.
pub fn frame_navigation(events: &[GameEvent]) -> Option<&str> {
    events.iter().find_map(|event| match event {
        GameEvent::Navigate { destination, .. } => Some(destination.as_str()),
        _ => None,
    })
}
