//! Sensor-overlap bookkeeping: which targets and balls are currently on a
//! scored platform.
//!
//! Rapier only emits `CollisionEvent::Started` for bodies that begin
//! intersecting a sensor *after* tracking begins, so the stacks that spawn
//! already resting on their platforms would never enter the set.  The seed
//! pass fixes that: on the first tick after physics has stepped, one static
//! intersection query per sensor adds every roster member already
//! overlapping, then the `seeded` flag retires the pass for the rest of the
//! level.  Set semantics make a same-tick seed plus live start event count
//! once.
//!
//! All sensors form one logical trigger region; membership is per body, not
//! per sensor.  The win/loss evaluator must run strictly after these systems
//! within a tick (see `session::SessionPlugin` for the explicit chain).

use crate::level::{PlatformSensor, ProjectileBall};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

/// The fixed set of target entities enumerated at level setup.  Never changes
/// size during a session.
#[derive(Resource, Debug, Default)]
pub struct TargetRoster(pub HashSet<Entity>);

/// Membership sets over the level's sensor region.
#[derive(Resource, Debug)]
pub struct OverlapTracker {
    /// Targets currently intersecting any sensor.  Empty ⇒ the player has
    /// cleared every platform.
    pub targets_on: HashSet<Entity>,
    /// Balls currently intersecting any sensor (spent balls included).
    pub balls_on: HashSet<Entity>,
    /// Set once the initial-overlap seed has run.
    pub seeded: bool,
    enabled: bool,
}

impl OverlapTracker {
    /// A fresh tracker.  Disabled trackers (levels without sensors) never
    /// seed and never accumulate membership.
    pub fn new(enabled: bool) -> Self {
        Self {
            targets_on: HashSet::new(),
            balls_on: HashSet::new(),
            seeded: false,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True once the tracker is both enabled and seeded; the evaluator only
    /// reads the sets after this point, otherwise the empty pre-seed target
    /// set would declare an instant win.
    pub fn is_ready(&self) -> bool {
        self.enabled && self.seeded
    }
}

impl Default for OverlapTracker {
    fn default() -> Self {
        Self::new(true)
    }
}

/// If exactly one side of a collision pair is a sensor, return the other side.
fn other_of_sensor(
    e1: Entity,
    e2: Entity,
    sensors: &Query<(), With<PlatformSensor>>,
) -> Option<Entity> {
    if sensors.contains(e1) {
        Some(e2)
    } else if sensors.contains(e2) {
        Some(e1)
    } else {
        None
    }
}

/// Incremental membership update from this tick's collision messages.
///
/// Bodies that are neither roster targets nor projectiles are ignored;
/// removal is symmetric over both sets.
pub fn overlap_tracker_system(
    mut collision_events: MessageReader<CollisionEvent>,
    sensors: Query<(), With<PlatformSensor>>,
    balls: Query<(), With<ProjectileBall>>,
    roster: Res<TargetRoster>,
    mut tracker: ResMut<OverlapTracker>,
) {
    if !tracker.is_enabled() {
        return;
    }
    for event in collision_events.read() {
        match event {
            CollisionEvent::Started(e1, e2, _) => {
                let Some(other) = other_of_sensor(*e1, *e2, &sensors) else {
                    continue;
                };
                if roster.0.contains(&other) {
                    tracker.targets_on.insert(other);
                }
                if balls.contains(other) {
                    tracker.balls_on.insert(other);
                }
            }
            CollisionEvent::Stopped(e1, e2, _) => {
                let Some(other) = other_of_sensor(*e1, *e2, &sensors) else {
                    continue;
                };
                tracker.targets_on.remove(&other);
                tracker.balls_on.remove(&other);
            }
        }
    }
}

/// Fold one sensor's static intersection pairs into the target set.
/// Only roster members count; the ball is seeded by live events if it ever
/// starts on a sensor.
fn seed_pairs<I>(
    sensor: Entity,
    pairs: I,
    roster: &HashSet<Entity>,
    targets_on: &mut HashSet<Entity>,
) where
    I: IntoIterator<Item = (Entity, Entity, bool)>,
{
    for (c1, c2, intersecting) in pairs {
        if !intersecting {
            continue;
        }
        let other = if c1 == sensor { c2 } else { c1 };
        if roster.contains(&other) {
            targets_on.insert(other);
        }
    }
}

/// One-shot initial-overlap seed.  Runs on the first tick where the physics
/// context is available, then never again for this session.
pub fn seed_overlap_system(
    rapier_context: ReadRapierContext,
    sensors: Query<Entity, With<PlatformSensor>>,
    roster: Res<TargetRoster>,
    mut tracker: ResMut<OverlapTracker>,
) {
    if !tracker.is_enabled() || tracker.seeded {
        return;
    }
    let Ok(rapier) = rapier_context.single() else {
        return;
    };
    let tracker = &mut *tracker;
    for sensor in sensors.iter() {
        seed_pairs(
            sensor,
            rapier.intersection_pairs_with(sensor),
            &roster.0,
            &mut tracker.targets_on,
        );
    }
    tracker.seeded = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn tracker_test_app() -> (App, Entity, Vec<Entity>, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<CollisionEvent>();
        app.add_systems(PostUpdate, overlap_tracker_system);

        let sensor = app.world_mut().spawn(PlatformSensor).id();
        let targets: Vec<Entity> = (0..3).map(|_| app.world_mut().spawn_empty().id()).collect();
        let ball = app.world_mut().spawn(ProjectileBall).id();

        app.insert_resource(TargetRoster(targets.iter().copied().collect()));
        app.insert_resource(OverlapTracker::new(true));
        (app, sensor, targets, ball)
    }

    fn started(app: &mut App, a: Entity, b: Entity) {
        app.world_mut()
            .write_message(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
    }

    fn stopped(app: &mut App, a: Entity, b: Entity) {
        app.world_mut()
            .write_message(CollisionEvent::Stopped(a, b, CollisionEventFlags::empty()));
    }

    #[test]
    fn membership_equals_unmatched_starts() {
        let (mut app, sensor, targets, _ball) = tracker_test_app();

        started(&mut app, sensor, targets[0]);
        started(&mut app, targets[1], sensor); // sensor on either side
        app.update();
        assert_eq!(app.world().resource::<OverlapTracker>().targets_on.len(), 2);

        stopped(&mut app, sensor, targets[0]);
        app.update();
        assert_eq!(app.world().resource::<OverlapTracker>().targets_on.len(), 1);

        stopped(&mut app, sensor, targets[1]);
        // A stop for a body that was never on the sensor must not underflow.
        stopped(&mut app, sensor, targets[2]);
        app.update();
        assert!(app.world().resource::<OverlapTracker>().targets_on.is_empty());
    }

    #[test]
    fn balls_and_targets_land_in_their_own_sets() {
        let (mut app, sensor, targets, ball) = tracker_test_app();

        started(&mut app, sensor, ball);
        started(&mut app, sensor, targets[0]);
        app.update();

        let tracker = app.world().resource::<OverlapTracker>();
        assert_eq!(tracker.balls_on.len(), 1);
        assert!(tracker.balls_on.contains(&ball));
        assert_eq!(tracker.targets_on.len(), 1);
        assert!(!tracker.targets_on.contains(&ball));
    }

    #[test]
    fn unrelated_bodies_are_ignored() {
        let (mut app, sensor, _targets, _ball) = tracker_test_app();
        let debris = app.world_mut().spawn_empty().id();

        started(&mut app, sensor, debris);
        // A pair with no sensor side at all is also irrelevant.
        let other = app.world_mut().spawn_empty().id();
        started(&mut app, debris, other);
        app.update();

        let tracker = app.world().resource::<OverlapTracker>();
        assert!(tracker.targets_on.is_empty());
        assert!(tracker.balls_on.is_empty());
    }

    #[test]
    fn disabled_tracker_accumulates_nothing() {
        let (mut app, sensor, targets, _ball) = tracker_test_app();
        app.insert_resource(OverlapTracker::new(false));

        started(&mut app, sensor, targets[0]);
        app.update();

        let tracker = app.world().resource::<OverlapTracker>();
        assert!(tracker.targets_on.is_empty());
        assert!(!tracker.is_ready());
    }

    #[test]
    fn seed_counts_only_intersecting_roster_members() {
        let mut world = World::new();
        let sensor = world.spawn_empty().id();
        let resting = world.spawn_empty().id();
        let separated = world.spawn_empty().id();
        let debris = world.spawn_empty().id();

        let roster: HashSet<Entity> = [resting, separated].into_iter().collect();
        let mut targets_on = HashSet::new();

        seed_pairs(
            sensor,
            vec![
                (sensor, resting, true),
                (separated, sensor, false),
                (sensor, debris, true),
            ],
            &roster,
            &mut targets_on,
        );

        assert_eq!(targets_on.len(), 1);
        assert!(targets_on.contains(&resting));
    }

    #[test]
    fn seed_and_live_event_in_the_same_tick_count_once() {
        let (mut app, sensor, targets, _ball) = tracker_test_app();

        // Simulate the seed having already added the target...
        app.world_mut()
            .resource_mut::<OverlapTracker>()
            .targets_on
            .insert(targets[0]);
        // ...while the same tick also delivers a live start event for it.
        started(&mut app, sensor, targets[0]);
        app.update();

        let tracker = app.world().resource::<OverlapTracker>();
        assert_eq!(tracker.targets_on.len(), 1);

        // A single stop then fully removes it.
        stopped(&mut app, sensor, targets[0]);
        app.update();
        assert!(app.world().resource::<OverlapTracker>().targets_on.is_empty());
    }
}
