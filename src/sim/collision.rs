//! Axis-aligned collision detection and response
//!
//! The player is pushed out of each platform along the axis of least
//! penetration. Platforms are handled one after another in object order; a
//! later correction may undo an earlier one when the player touches several
//! platforms at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::SimObject;
use crate::consts::MIN_REBOUND;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration extent along each axis (only meaningful when overlapping)
    pub fn overlap(&self, other: &Aabb) -> Vec2 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}

/// Which way the player was pushed out of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pushed left or right, horizontal velocity zeroed
    Side,
    /// Snapped onto the top surface
    Top,
    /// Snapped below the underside, upward motion stopped
    Bottom,
}

/// Summary of one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Resting on a platform top after this pass
    pub grounded: bool,
    /// Fastest downward speed among this pass's top contacts
    pub impact: f32,
    /// Friction override of the platform stood on
    pub ground_friction: Option<f32>,
    /// Player bounced off a platform top instead of settling
    pub rebounded: bool,
    pub hit_ceiling: bool,
    pub hit_wall: bool,
}

/// Resolve the player against one platform.
///
/// `prev_pos` is the player's position before this tick's integration.
pub fn resolve_platform(
    player: &mut SimObject,
    prev_pos: Vec2,
    platform: &SimObject,
) -> Option<Contact> {
    let player_box = player.aabb();
    let platform_box = platform.aabb();
    if !player_box.overlaps(&platform_box) {
        return None;
    }

    // Offset from object position to its collision box
    let box_offset = player_box.min - player.pos;
    let box_size = player_box.size();
    let overlap = player_box.overlap(&platform_box);

    if overlap.x < overlap.y {
        let prev_box = player.aabb_at(prev_pos);
        let prev_center = (prev_box.min.x + prev_box.max.x) * 0.5;
        let platform_center = (platform_box.min.x + platform_box.max.x) * 0.5;
        player.pos.x = if prev_center < platform_center {
            platform_box.min.x - box_size.x - box_offset.x
        } else {
            platform_box.max.x - box_offset.x
        };
        player.vel.x = 0.0;
        return Some(Contact::Side);
    }

    let prev_top = prev_pos.y + box_offset.y;
    if prev_top < platform_box.min.y {
        player.pos.y = platform_box.min.y - box_size.y - box_offset.y;
        Some(Contact::Top)
    } else {
        player.pos.y = platform_box.max.y - box_offset.y;
        if player.vel.y < 0.0 {
            player.vel.y = 0.0;
        }
        Some(Contact::Bottom)
    }
}

/// Resolve the player at `player_idx` against every platform in `objects`
pub fn resolve_platforms(
    objects: &mut [SimObject],
    player_idx: usize,
    prev_pos: Vec2,
) -> CollisionResult {
    let mut result = CollisionResult::default();
    let mut player = objects[player_idx].clone();

    for (idx, platform) in objects.iter().enumerate() {
        if idx == player_idx || !platform.is_platform() {
            continue;
        }

        let falling_speed = player.vel.y;
        match resolve_platform(&mut player, prev_pos, platform) {
            Some(Contact::Top) if falling_speed >= 0.0 => {
                let rebound = falling_speed * platform.bounce.unwrap_or(0.0);
                if rebound >= MIN_REBOUND {
                    player.vel.y = -rebound;
                    result.rebounded = true;
                    result.grounded = false;
                } else {
                    player.vel.y = 0.0;
                    result.grounded = true;
                    result.ground_friction = platform.friction;
                }
                // An earlier platform may already have zeroed vy this pass
                result.impact = result.impact.max(falling_speed);
            }
            // Rising through the top edge: keep momentum, stay airborne
            Some(Contact::Top) => {}
            Some(Contact::Bottom) => result.hit_ceiling = true,
            Some(Contact::Side) => result.hit_wall = true,
            None => {}
        }
    }

    objects[player_idx] = player;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(x: f32, y: f32) -> SimObject {
        SimObject::player("player", Vec2::new(x, y), Vec2::splat(40.0))
    }

    fn ground() -> SimObject {
        SimObject::platform("ground", Vec2::new(0.0, 350.0), Vec2::new(1200.0, 50.0))
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(5.0, 8.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert_eq!(a.overlap(&b), Vec2::new(5.0, 2.0));

        // Touching edges are not an overlap
        let c = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let mut objects = vec![cat(100.0, 317.5), ground()];
        objects[0].vel.y = 9.0;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 308.5));
        assert!(result.grounded);
        assert_eq!(result.impact, 9.0);
        assert_eq!(objects[0].pos.y, 310.0);
        assert_eq!(objects[0].vel.y, 0.0);
    }

    #[test]
    fn test_head_bump_stops_upward_motion() {
        let ledge = SimObject::platform("ledge", Vec2::new(0.0, 100.0), Vec2::new(400.0, 20.0));
        let mut objects = vec![cat(100.0, 115.0), ledge];
        objects[0].vel.y = -8.0;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 123.0));
        assert!(result.hit_ceiling);
        assert!(!result.grounded);
        assert_eq!(objects[0].pos.y, 120.0);
        assert_eq!(objects[0].vel.y, 0.0);
    }

    #[test]
    fn test_side_push_uses_previous_x() {
        let wall = SimObject::platform("wall", Vec2::new(200.0, 0.0), Vec2::new(20.0, 400.0));

        // Coming from the left
        let mut objects = vec![cat(165.0, 100.0), wall.clone()];
        objects[0].vel.x = 6.0;
        let result = resolve_platforms(&mut objects, 0, Vec2::new(159.0, 100.0));
        assert!(result.hit_wall);
        assert_eq!(objects[0].pos.x, 160.0);
        assert_eq!(objects[0].vel.x, 0.0);

        // Coming from the right
        let mut objects = vec![cat(215.0, 100.0), wall];
        objects[0].vel.x = -6.0;
        resolve_platforms(&mut objects, 0, Vec2::new(221.0, 100.0));
        assert_eq!(objects[0].pos.x, 220.0);
    }

    #[test]
    fn test_equal_overlap_resolves_vertically() {
        let block = SimObject::platform("block", Vec2::new(0.0, 0.0), Vec2::splat(40.0));
        let mut objects = vec![cat(30.0, 30.0), block];
        objects[0].vel.y = 2.0;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(30.0, 28.0));
        assert!(!result.hit_wall);
        assert!(result.hit_ceiling);
        assert_eq!(objects[0].pos, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_bouncy_platform_rebounds() {
        let pad = ground().with_bounce(0.5);
        let mut objects = vec![cat(100.0, 320.0), pad];
        objects[0].vel.y = 10.0;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 310.0));
        assert!(result.rebounded);
        assert!(!result.grounded);
        assert_eq!(objects[0].vel.y, -5.0);
    }

    #[test]
    fn test_soft_bounce_settles() {
        let pad = ground().with_bounce(0.1);
        let mut objects = vec![cat(100.0, 310.5), pad];
        objects[0].vel.y = 0.5;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 310.0));
        assert!(result.grounded);
        assert_eq!(objects[0].vel.y, 0.0);
    }

    #[test]
    fn test_hitbox_offset_respected() {
        let mut objects = vec![
            cat(100.0, 313.0).with_hitbox(Vec2::new(4.0, 10.0), Vec2::new(32.0, 30.0)),
            ground(),
        ];
        objects[0].vel.y = 6.0;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 304.0));
        assert!(result.grounded);
        // Box bottom (pos.y + 10 + 30) sits on the platform top
        assert_eq!(objects[0].pos.y, 310.0);
    }

    #[test]
    fn test_stepped_platforms_keep_landing_speed() {
        let low = SimObject::platform("low", Vec2::new(0.0, 350.0), Vec2::new(1200.0, 50.0));
        let high = SimObject::platform("high", Vec2::new(120.0, 340.0), Vec2::new(400.0, 50.0));
        let mut objects = vec![cat(100.0, 312.5), low, high];
        objects[0].vel.y = 12.5;

        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 300.0));
        assert!(result.grounded);
        assert_eq!(result.impact, 12.5);
        assert_eq!(objects[0].pos.y, 300.0);
        assert_eq!(objects[0].vel.y, 0.0);
    }

    #[test]
    fn test_resolution_follows_object_order() {
        // Wedged between a floor and a low ceiling: the later platform wins
        let floor = SimObject::platform("floor", Vec2::new(0.0, 350.0), Vec2::new(400.0, 50.0));
        let ceiling = SimObject::platform("ceiling", Vec2::new(0.0, 280.0), Vec2::new(400.0, 40.0));
        let prev_pos = Vec2::new(100.0, 308.0);

        let mut objects = vec![cat(100.0, 312.0), floor.clone(), ceiling.clone()];
        objects[0].vel.y = 4.0;
        let floor_first = resolve_platforms(&mut objects, 0, prev_pos);
        assert_eq!(objects[0].pos.y, 320.0);
        assert_eq!(objects[0].vel.y, 0.0);
        assert!(floor_first.grounded);
        assert!(floor_first.hit_ceiling);
        assert_eq!(floor_first.impact, 4.0);

        let mut objects = vec![cat(100.0, 312.0), ceiling, floor];
        objects[0].vel.y = 4.0;
        let ceiling_first = resolve_platforms(&mut objects, 0, prev_pos);
        assert_eq!(objects[0].pos.y, 310.0);
        assert_eq!(objects[0].vel.y, 0.0);
        assert!(ceiling_first.grounded);
        assert!(ceiling_first.hit_ceiling);
        assert_eq!(ceiling_first.impact, 4.0);
    }

    #[test]
    fn test_ignores_portals() {
        let portal = SimObject::portal("portal-blog", "/blog", Vec2::new(100.0, 300.0), Vec2::splat(50.0));
        let mut objects = vec![cat(100.0, 300.0), portal];
        let result = resolve_platforms(&mut objects, 0, Vec2::new(100.0, 300.0));
        assert_eq!(result, CollisionResult::default());
        assert_eq!(objects[0].pos, Vec2::new(100.0, 300.0));
    }
}
