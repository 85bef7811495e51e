//! Portal proximity and navigation
//!
//! Distance is measured between object positions (top-left corners). When
//! several portals are in range the last one in object order wins.

use super::state::{GameEvent, SimObject};

/// Index of the portal the player is near, if any
pub fn find_near_portal(objects: &[SimObject], player: &SimObject, radius: f32) -> Option<usize> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.destination().is_some())
        .filter(|(_, o)| player.pos.distance(o.pos) < radius)
        .map(|(idx, _)| idx)
        .last()
}

/// Update the near portal and emit proximity and navigation events.
///
/// Returns the navigation event raised this step, if any.
pub fn detect_portals(
    objects: &[SimObject],
    player: &SimObject,
    radius: f32,
    confirm: bool,
    near_portal: &mut Option<String>,
    events: &mut Vec<GameEvent>,
) -> Option<GameEvent> {
    let near = find_near_portal(objects, player, radius).map(|idx| &objects[idx]);

    let near_id = near.map(|p| p.id.clone());
    if *near_portal != near_id {
        log::debug!("Near portal: {:?}", near_id);
        *near_portal = near_id.clone();
        events.push(GameEvent::NearPortalChanged { portal_id: near_id });
    }

    let portal = near.filter(|_| confirm)?;
    let destination = portal.destination()?;
    log::info!("Entering portal {} -> {}", portal.id, destination);

    let event = GameEvent::Navigate {
        portal_id: portal.id.clone(),
        destination: destination.to_string(),
    };
    events.push(event.clone());
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn cat(x: f32, y: f32) -> SimObject {
        SimObject::player("player", Vec2::new(x, y), Vec2::splat(40.0))
    }

    fn portals() -> Vec<SimObject> {
        vec![
            SimObject::portal("portal-projects", "/projects", Vec2::new(350.0, 200.0), Vec2::splat(50.0)),
            SimObject::portal("portal-about", "/about", Vec2::new(380.0, 200.0), Vec2::splat(50.0)),
            SimObject::platform("ground", Vec2::new(0.0, 350.0), Vec2::new(1200.0, 50.0)),
        ]
    }

    #[test]
    fn test_out_of_range() {
        let objects = portals();
        assert_eq!(find_near_portal(&objects, &cat(100.0, 200.0), 50.0), None);
    }

    #[test]
    fn test_last_match_wins() {
        let objects = portals();
        // 10 from projects, 20 from about: both in range, about is later
        assert_eq!(find_near_portal(&objects, &cat(360.0, 200.0), 50.0), Some(1));
    }

    #[test]
    fn test_confirm_emits_single_navigation() {
        let objects = portals();
        let player = cat(320.0, 200.0); // 30 from projects, 60 from about
        let mut near = None;
        let mut events = Vec::new();

        let nav = detect_portals(&objects, &player, 50.0, true, &mut near, &mut events);
        assert_eq!(
            nav,
            Some(GameEvent::Navigate {
                portal_id: "portal-projects".into(),
                destination: "/projects".into()
            })
        );
        assert_eq!(near.as_deref(), Some("portal-projects"));
        let navigations = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Navigate { .. }))
            .count();
        assert_eq!(navigations, 1);
    }

    #[test]
    fn test_near_without_confirm_only_reports_proximity() {
        let objects = portals();
        let mut near = None;
        let mut events = Vec::new();

        let nav = detect_portals(&objects, &cat(320.0, 200.0), 50.0, false, &mut near, &mut events);
        assert!(nav.is_none());
        assert_eq!(
            events,
            vec![GameEvent::NearPortalChanged {
                portal_id: Some("portal-projects".into())
            }]
        );

        // Unchanged proximity raises nothing new
        events.clear();
        detect_portals(&objects, &cat(321.0, 200.0), 50.0, false, &mut near, &mut events);
        assert!(events.is_empty());

        // Walking away clears it
        detect_portals(&objects, &cat(100.0, 200.0), 50.0, false, &mut near, &mut events);
        assert_eq!(events, vec![GameEvent::NearPortalChanged { portal_id: None }]);
        assert!(near.is_none());
    }
}
