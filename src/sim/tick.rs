//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use glam::Vec2;

use super::collision::resolve_platforms;
use super::movement::step_player;
use super::particles::{emit_dust, update_particles};
use super::portal::detect_portals;
use super::state::{GameEvent, GameState, PlayerState};
use crate::consts::{SQUASH_DECAY, SQUASH_EPSILON};

/// Input commands for a single tick (snapshot of the input latch)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Enter the portal the player stands next to
    pub confirm: bool,
}

/// Advance the game state by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    let Some(player_idx) = state.player_index() else {
        return;
    };
    let config = state.config;

    decay_squash(&mut state.player);

    // --- Physics ---
    let was_grounded = state.player.is_grounded;
    let ground_friction = state.surface_friction.unwrap_or(config.ground_friction);
    let prev_pos = step_player(
        &mut state.objects[player_idx],
        &mut state.player,
        input,
        &config,
        ground_friction,
        &mut state.events,
    );

    // --- Collisions ---
    let hit = resolve_platforms(&mut state.objects, player_idx, prev_pos);

    // --- Ground/air state ---
    state.player.is_grounded = hit.grounded;
    state.surface_friction = hit.ground_friction;
    if hit.grounded {
        state.player.can_double_jump = true;
        state.player.is_jumping = false;
        if !was_grounded {
            land(state, player_idx, hit.impact);
        }
    }

    // --- Out of world ---
    let player = &mut state.objects[player_idx];
    if player.pos.y > config.fall_limit() {
        log::info!(
            "Player fell out of the world at ({:.1}, {:.1}), respawning",
            player.pos.x,
            player.pos.y
        );
        player.pos = config.respawn;
        player.vel.y = 0.0;
        state.events.push(GameEvent::Respawned);
    }

    // --- Camera ---
    let focus = state.objects[player_idx].center();
    state
        .camera
        .update(focus, config.viewport(), config.camera_lerp);

    // --- Particles ---
    update_particles(&mut state.particles);

    // --- Portals ---
    detect_portals(
        &state.objects,
        &state.objects[player_idx],
        config.portal_radius,
        input.confirm,
        &mut state.near_portal,
        &mut state.events,
    );
}

/// Landing squash fades geometrically and snaps to zero
fn decay_squash(player: &mut PlayerState) {
    player.landing_squash *= SQUASH_DECAY;
    if player.landing_squash < SQUASH_EPSILON {
        player.landing_squash = 0.0;
    }
}

/// Airborne -> grounded transition with hard-landing feedback
fn land(state: &mut GameState, player_idx: usize, impact: f32) {
    let config = state.config;
    state.events.push(GameEvent::Landed { impact });

    if impact <= config.landing_threshold {
        return;
    }

    if !config.reduced_motion {
        state.player.landing_squash = (impact / config.terminal_velocity).min(1.0);
    }

    let player = &state.objects[player_idx];
    let aabb = player.aabb();
    let feet = Vec2::new((aabb.min.x + aabb.max.x) * 0.5, aabb.max.y);
    let spawned = emit_dust(
        &mut state.particles,
        &mut state.rng_state,
        feet,
        impact,
        config.max_particles(),
    );
    log::debug!("Hard landing at speed {:.1}, {} dust", impact, spawned);
}
