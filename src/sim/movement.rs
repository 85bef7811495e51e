//! Player integration: input acceleration, friction, jumps, gravity
//!
//! Explicit Euler, one step per call. All tuning values are per step.

use glam::Vec2;

use super::state::{GameEvent, PlayerState, SimObject};
use super::tick::TickInput;
use crate::config::EngineConfig;

/// Outcome of a jump request this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Grounded,
    Double,
}

/// Apply horizontal input or friction and clamp to `max_speed`.
///
/// `ground_friction` is the friction of the surface stood on last step.
pub fn apply_horizontal(
    player: &mut SimObject,
    flags: &mut PlayerState,
    input: &TickInput,
    config: &EngineConfig,
    ground_friction: f32,
) {
    let accel = if flags.is_grounded {
        config.acceleration
    } else {
        config.acceleration * config.air_control
    };

    if input.left {
        player.vel.x -= accel;
        flags.facing_right = false;
    } else if input.right {
        player.vel.x += accel;
        flags.facing_right = true;
    } else if flags.is_grounded {
        player.vel.x *= ground_friction;
    } else {
        player.vel.x *= config.air_friction;
    }

    player.vel.x = player.vel.x.clamp(-config.max_speed, config.max_speed);
}

/// Start a jump on a fresh press while grounded or with a double jump left
pub fn try_jump(
    player: &mut SimObject,
    flags: &mut PlayerState,
    input: &TickInput,
    config: &EngineConfig,
) -> Option<JumpKind> {
    let pressed = input.jump && !flags.jump_held;
    flags.jump_held = input.jump;

    if !pressed || !(flags.is_grounded || flags.can_double_jump) {
        return None;
    }

    let kind = if !flags.is_grounded {
        flags.can_double_jump = false;
        player.vel.y = -config.jump_power * config.double_jump_ratio;
        JumpKind::Double
    } else {
        player.vel.y = -config.jump_power;
        JumpKind::Grounded
    };

    flags.is_jumping = true;
    flags.is_grounded = false;
    Some(kind)
}

/// Gravity with terminal velocity clamp
pub fn apply_gravity(player: &mut SimObject, config: &EngineConfig) {
    player.vel.y = (player.vel.y + config.gravity).min(config.terminal_velocity);
}

/// Move by velocity, returning the position before the move
pub fn integrate(player: &mut SimObject) -> Vec2 {
    let prev = player.pos;
    player.pos += player.vel;
    prev
}

/// Full integrator pass for one step. Returns the previous position.
pub fn step_player(
    player: &mut SimObject,
    flags: &mut PlayerState,
    input: &TickInput,
    config: &EngineConfig,
    ground_friction: f32,
    events: &mut Vec<GameEvent>,
) -> Vec2 {
    apply_horizontal(player, flags, input, config, ground_friction);

    match try_jump(player, flags, input, config) {
        Some(JumpKind::Grounded) => events.push(GameEvent::Jumped),
        Some(JumpKind::Double) => {
            log::debug!("Double jump at ({:.1}, {:.1})", player.pos.x, player.pos.y);
            events.push(GameEvent::DoubleJumped);
        }
        None => {}
    }

    apply_gravity(player, config);
    integrate(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cat() -> SimObject {
        SimObject::player("player", Vec2::new(100.0, 200.0), Vec2::splat(40.0))
    }

    fn airborne() -> PlayerState {
        PlayerState {
            is_grounded: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_ground_acceleration_and_facing() {
        let config = EngineConfig::default();
        let mut player = cat();
        let mut flags = PlayerState::default();
        let input = TickInput {
            left: true,
            ..Default::default()
        };

        apply_horizontal(&mut player, &mut flags, &input, &config, config.ground_friction);
        assert_eq!(player.vel.x, -0.5);
        assert!(!flags.facing_right);
    }

    #[test]
    fn test_air_control_scales_acceleration() {
        let config = EngineConfig::default();
        let mut player = cat();
        let mut flags = airborne();
        let input = TickInput {
            right: true,
            ..Default::default()
        };

        apply_horizontal(&mut player, &mut flags, &input, &config, config.ground_friction);
        assert!((player.vel.x - 0.15).abs() < 1e-6);
        assert!(flags.facing_right);
    }

    #[test]
    fn test_left_wins_over_right() {
        let config = EngineConfig::default();
        let mut player = cat();
        let mut flags = PlayerState::default();
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };

        apply_horizontal(&mut player, &mut flags, &input, &config, config.ground_friction);
        assert!(player.vel.x < 0.0);
    }

    #[test]
    fn test_friction_ground_and_air() {
        let config = EngineConfig::default();
        let input = TickInput::default();

        let mut player = cat();
        player.vel.x = 4.0;
        apply_horizontal(&mut player, &mut PlayerState::default(), &input, &config, 0.85);
        assert!((player.vel.x - 3.4).abs() < 1e-6);

        let mut player = cat();
        player.vel.x = 4.0;
        apply_horizontal(&mut player, &mut airborne(), &input, &config, 0.85);
        assert!((player.vel.x - 3.92).abs() < 1e-6);
    }

    #[test]
    fn test_grounded_jump_then_double_jump() {
        let config = EngineConfig::default();
        let mut player = cat();
        let mut flags = PlayerState::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        assert_eq!(try_jump(&mut player, &mut flags, &jump, &config), Some(JumpKind::Grounded));
        assert_eq!(player.vel.y, -12.0);
        assert!(flags.is_jumping && !flags.is_grounded && flags.can_double_jump);

        // Holding the key does not fire again
        assert_eq!(try_jump(&mut player, &mut flags, &jump, &config), None);

        // Release and press again for the double jump
        try_jump(&mut player, &mut flags, &TickInput::default(), &config);
        assert_eq!(try_jump(&mut player, &mut flags, &jump, &config), Some(JumpKind::Double));
        assert!((player.vel.y - (-9.6)).abs() < 1e-5);
        assert!(!flags.can_double_jump);

        // No third jump
        try_jump(&mut player, &mut flags, &TickInput::default(), &config);
        assert_eq!(try_jump(&mut player, &mut flags, &jump, &config), None);
    }

    #[test]
    fn test_gravity_and_integration() {
        let config = EngineConfig::default();
        let mut player = cat();
        apply_gravity(&mut player, &config);
        let prev = integrate(&mut player);
        assert_eq!(prev, Vec2::new(100.0, 200.0));
        assert_eq!(player.pos.y, 200.5);
    }

    #[test]
    fn test_terminal_velocity() {
        let config = EngineConfig::default();
        let mut player = cat();
        player.vel.y = 14.8;
        apply_gravity(&mut player, &config);
        assert_eq!(player.vel.y, 15.0);
    }

    proptest! {
        #[test]
        fn prop_velocity_stays_clamped(
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            left in any::<bool>(),
            right in any::<bool>(),
            jump in any::<bool>(),
            grounded in any::<bool>(),
        ) {
            let config = EngineConfig::default();
            let mut player = cat();
            player.vel = Vec2::new(vx, vy);
            let mut flags = PlayerState { is_grounded: grounded, ..Default::default() };
            let input = TickInput { left, right, jump, confirm: false };
            let mut events = Vec::new();

            step_player(&mut player, &mut flags, &input, &config, config.ground_friction, &mut events);

            prop_assert!(player.vel.x.abs() <= config.max_speed);
            prop_assert!(player.vel.y <= config.terminal_velocity);
        }
    }
}
