//! Landing dust
//!
//! Purely visual; nothing in the simulation reads particles back.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind, RngState};
use crate::consts::MAX_DUST_PER_LANDING;

/// Life lost per step (a puff lasts half a second)
pub const DUST_DECAY: f32 = 1.0 / 30.0;
/// Downward pull on dust per step
pub const DUST_GRAVITY: f32 = 0.15;
/// Horizontal drag on dust per step
pub const DUST_DRAG: f32 = 0.92;

/// Number of puffs for a landing at `impact` speed
pub fn dust_count(impact: f32) -> usize {
    (impact.max(0.0) as usize).clamp(1, MAX_DUST_PER_LANDING)
}

/// Spawn dust at the player's feet, respecting the live particle cap
pub fn emit_dust(
    particles: &mut Vec<Particle>,
    rng_state: &mut RngState,
    feet: Vec2,
    impact: f32,
    max_particles: usize,
) -> usize {
    let room = max_particles.saturating_sub(particles.len());
    let count = dust_count(impact).min(room);
    if count == 0 {
        return 0;
    }

    let mut rng = rng_state.next_rng();
    let spread = impact * 0.25;
    for i in 0..count {
        // Alternate sides so the puff fans out both ways
        let side: f32 = if i % 2 == 0 { -1.0 } else { 1.0 };
        let vel = Vec2::new(
            side * rng.random_range(0.5f32..1.0) * spread,
            -rng.random_range(0.5f32..1.5),
        );
        particles.push(Particle {
            pos: feet + Vec2::new(rng.random_range(-6.0f32..6.0), 0.0),
            vel,
            life: 1.0,
            kind: ParticleKind::Dust,
        });
    }
    count
}

/// Age and move every particle, dropping the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.x *= DUST_DRAG;
        particle.vel.y += DUST_GRAVITY;
        particle.life -= DUST_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}
