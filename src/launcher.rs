//! Projectile launch control: grab, aim, release, respawn.
//!
//! ## Phases
//!
//! | Phase      | Meaning                                                  |
//! |------------|----------------------------------------------------------|
//! | `Resting`  | Ball idle on the tether, not grabbed                     |
//! | `Aiming`   | Player is dragging; position clamped to the pull limit   |
//! | `Launched` | Tether released; ball in free flight                     |
//!
//! The tether is a Rapier spring joint between the ball and a fixed anchor
//! body.  A launch ends when the spring has pulled the ball back inside a
//! per-axis window around the anchor; at that moment the joint is detached
//! (the spent ball flies free), a fresh ball is spawned on the tether, and
//! [`LiveBall`] is swapped.  Drag input that does not involve the live ball
//! is ignored.

use crate::config::GameConfig;
use crate::level::{LevelEntity, ProjectileBall};
use crate::shots::ShotBudget;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

// ── State ─────────────────────────────────────────────────────────────────────

/// Where the live ball is in its launch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchPhase {
    #[default]
    Resting,
    Aiming,
    Launched,
}

/// Launch state machine for the current session.
#[derive(Resource, Debug, Default)]
pub struct LaunchController {
    pub phase: LaunchPhase,
}

/// The single currently-launchable ball.  Spent balls stay in the world but
/// are no longer referenced here.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LiveBall(pub Entity);

/// The fixed body and world position the tether pulls toward.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SlingAnchor {
    pub entity: Entity,
    pub position: Vec2,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Clamp a drag position to at most `max_pull` from the anchor, preserving
/// the drag direction exactly.
pub fn clamp_pull(anchor: Vec2, desired: Vec2, max_pull: f32) -> Vec2 {
    let offset = desired - anchor;
    let dist = offset.length();
    if dist > max_pull {
        anchor + offset * (max_pull / dist)
    } else {
        desired
    }
}

/// Per-axis return window: the launched ball counts as "back at the anchor"
/// only when both coordinates are within the tolerance.
pub fn within_anchor_window(pos: Vec2, anchor: Vec2, tolerance: f32) -> bool {
    (pos.x - anchor.x).abs() < tolerance && (pos.y - anchor.y).abs() < tolerance
}

fn cursor_world_position(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Spawn a fresh ball at the anchor with the tether attached.  Used for the
/// initial ball at level setup and for every respawn afterwards.
pub fn spawn_ball(commands: &mut Commands, config: &GameConfig, anchor: &SlingAnchor) -> Entity {
    commands
        .spawn((
            ProjectileBall,
            RigidBody::Dynamic,
            Collider::ball(config.ball_radius),
            Restitution::coefficient(config.ball_restitution),
            Friction::coefficient(config.ball_friction),
            Damping {
                linear_damping: config.ball_linear_damping,
                angular_damping: 0.0,
            },
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(anchor.position.extend(0.2)),
            Visibility::default(),
            ImpulseJoint::new(
                anchor.entity,
                SpringJointBuilder::new(
                    config.sling_rest_length,
                    config.sling_stiffness,
                    config.sling_damping,
                ),
            ),
            LevelEntity,
        ))
        .id()
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Resting → Aiming when a left-press lands within the grab radius of the
/// live ball.  Presses anywhere else are ignored.
pub fn drag_begin_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    q_ball: Query<&Transform, With<ProjectileBall>>,
    live: Res<LiveBall>,
    config: Res<GameConfig>,
    mut controller: ResMut<LaunchController>,
) {
    if controller.phase != LaunchPhase::Resting || !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = cursor_world_position(window, camera, camera_transform) else {
        return;
    };
    let Ok(ball_transform) = q_ball.get(live.0) else {
        return;
    };

    if cursor.distance(ball_transform.translation.truncate()) <= config.grab_radius {
        controller.phase = LaunchPhase::Aiming;
    }
}

/// While aiming, pin the live ball to the cursor, clamped to `max_pull` from
/// the anchor, with zero velocity.  The clamp keeps the tether from being
/// stretched past its limit and the zeroed velocity keeps a stale impulse
/// from corrupting the launch.
pub fn aiming_clamp_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut q_ball: Query<(&mut Transform, &mut Velocity), With<ProjectileBall>>,
    live: Res<LiveBall>,
    anchor: Res<SlingAnchor>,
    config: Res<GameConfig>,
    controller: Res<LaunchController>,
) {
    if controller.phase != LaunchPhase::Aiming {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = cursor_world_position(window, camera, camera_transform) else {
        return;
    };
    let Ok((mut transform, mut velocity)) = q_ball.get_mut(live.0) else {
        return;
    };

    let clamped = clamp_pull(anchor.position, cursor, config.max_pull);
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
    *velocity = Velocity::zero();
}

/// Aiming → Launched on release.  With an exhausted budget the release is a
/// guarded no-op: no decrement, no launch flag, the ball just settles back.
pub fn launch_release_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<LaunchController>,
    mut budget: ResMut<ShotBudget>,
) {
    if controller.phase != LaunchPhase::Aiming || !buttons.just_released(MouseButton::Left) {
        return;
    }
    if budget.is_exhausted() {
        controller.phase = LaunchPhase::Resting;
        return;
    }
    budget.consume_one();
    controller.phase = LaunchPhase::Launched;
}

/// Launched → Resting once the tether has pulled the ball back inside the
/// anchor window: detach the joint so the spent ball flies free, spawn the
/// next ball on the tether, and swap [`LiveBall`].  With an exhausted budget
/// the respawn is suppressed and the spent ball is left in the world.
pub fn respawn_ball_system(
    mut commands: Commands,
    q_ball: Query<&Transform, With<ProjectileBall>>,
    mut controller: ResMut<LaunchController>,
    mut live: ResMut<LiveBall>,
    budget: Res<ShotBudget>,
    anchor: Res<SlingAnchor>,
    config: Res<GameConfig>,
) {
    if controller.phase != LaunchPhase::Launched {
        return;
    }
    if budget.is_exhausted() {
        controller.phase = LaunchPhase::Resting;
        return;
    }
    let Ok(transform) = q_ball.get(live.0) else {
        return;
    };
    if !within_anchor_window(
        transform.translation.truncate(),
        anchor.position,
        config.respawn_tolerance,
    ) {
        return;
    }

    commands.entity(live.0).remove::<ImpulseJoint>();
    live.0 = spawn_ball(&mut commands, &config, &anchor);
    controller.phase = LaunchPhase::Resting;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_the_limit_is_identity() {
        let anchor = Vec2::new(-340.0, -140.0);
        let desired = anchor + Vec2::new(50.0, -30.0);
        assert_eq!(clamp_pull(anchor, desired, 120.0), desired);
    }

    #[test]
    fn clamp_beyond_the_limit_lands_exactly_on_it() {
        let anchor = Vec2::new(-340.0, -140.0);
        for dir in [
            Vec2::new(1.0, 0.0),
            Vec2::new(-0.6, -0.8),
            Vec2::new(0.3, 0.95),
        ] {
            let desired = anchor + dir.normalize() * 500.0;
            let clamped = clamp_pull(anchor, desired, 120.0);
            assert!((clamped.distance(anchor) - 120.0).abs() < 1e-3);
            // Same direction as the drag.
            let along = (clamped - anchor).normalize().dot(dir.normalize());
            assert!(along > 0.9999);
        }
    }

    #[test]
    fn anchor_window_is_per_axis() {
        let anchor = Vec2::new(-340.0, -140.0);
        assert!(within_anchor_window(
            anchor + Vec2::new(19.0, -19.0),
            anchor,
            20.0
        ));
        // One near axis is not enough.
        assert!(!within_anchor_window(
            anchor + Vec2::new(5.0, 40.0),
            anchor,
            20.0
        ));
        assert!(!within_anchor_window(
            anchor + Vec2::new(40.0, 5.0),
            anchor,
            20.0
        ));
    }

    fn launcher_test_app(budget: ShotBudget, phase: LaunchPhase) -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(budget);
        app.insert_resource(LaunchController { phase });

        let anchor_entity = app
            .world_mut()
            .spawn(Transform::from_xyz(-340.0, -140.0, 0.0))
            .id();
        app.insert_resource(SlingAnchor {
            entity: anchor_entity,
            position: Vec2::new(-340.0, -140.0),
        });

        let ball = app
            .world_mut()
            .spawn((
                ProjectileBall,
                Transform::from_xyz(-335.0, -138.0, 0.2),
                ImpulseJoint::new(
                    anchor_entity,
                    SpringJointBuilder::new(0.0, 18.0, 0.6),
                ),
            ))
            .id();
        app.insert_resource(LiveBall(ball));
        (app, anchor_entity, ball)
    }

    #[test]
    fn returned_ball_is_replaced_and_freed_from_the_tether() {
        let (mut app, _anchor, old_ball) =
            launcher_test_app(ShotBudget::unlimited(), LaunchPhase::Launched);
        app.add_systems(Update, respawn_ball_system);

        app.update();

        let live = app.world().resource::<LiveBall>().0;
        assert_ne!(live, old_ball, "a fresh ball must take over as live");
        assert!(app.world().get::<ImpulseJoint>(old_ball).is_none());
        assert!(app.world().get::<ImpulseJoint>(live).is_some());
        assert!(app.world().get::<ProjectileBall>(live).is_some());
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Resting
        );
        // The spent ball stays in the world, still tagged as a projectile.
        assert!(app.world().get::<ProjectileBall>(old_ball).is_some());
    }

    #[test]
    fn respawn_is_suppressed_once_the_budget_is_spent() {
        let (mut app, _anchor, old_ball) =
            launcher_test_app(ShotBudget::limited(0), LaunchPhase::Launched);
        app.add_systems(Update, respawn_ball_system);

        app.update();

        assert_eq!(app.world().resource::<LiveBall>().0, old_ball);
        assert!(app.world().get::<ImpulseJoint>(old_ball).is_some());
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Resting
        );
    }

    #[test]
    fn ball_away_from_the_anchor_keeps_flying() {
        let (mut app, _anchor, old_ball) =
            launcher_test_app(ShotBudget::unlimited(), LaunchPhase::Launched);
        app.world_mut().get_mut::<Transform>(old_ball).unwrap().translation =
            Vec3::new(200.0, 90.0, 0.2);
        app.add_systems(Update, respawn_ball_system);

        app.update();

        assert_eq!(app.world().resource::<LiveBall>().0, old_ball);
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Launched
        );
    }

    #[test]
    fn release_consumes_one_shot_and_launches() {
        let (mut app, _anchor, _ball) =
            launcher_test_app(ShotBudget::limited(20), LaunchPhase::Aiming);
        let mut input = ButtonInput::<MouseButton>::default();
        input.press(MouseButton::Left);
        input.release(MouseButton::Left);
        app.insert_resource(input);
        app.add_systems(Update, launch_release_system);

        app.update();

        assert_eq!(
            app.world().resource::<ShotBudget>().remaining(),
            Some(19)
        );
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Launched
        );
    }

    #[test]
    fn three_shot_budget_respawns_twice_then_stops() {
        let (mut app, _anchor, first_ball) =
            launcher_test_app(ShotBudget::limited(3), LaunchPhase::Resting);
        app.insert_resource(ButtonInput::<MouseButton>::default());
        app.add_systems(Update, (launch_release_system, respawn_ball_system).chain());

        let mut lives = vec![first_ball];
        for expected_remaining in [2u32, 1, 0] {
            // Grab, then release over the anchor; the ball is already inside
            // the return window, so the respawn check fires the same tick.
            app.world_mut().resource_mut::<LaunchController>().phase = LaunchPhase::Aiming;
            {
                let mut input = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
                input.clear();
                input.press(MouseButton::Left);
                input.release(MouseButton::Left);
            }
            app.update();
            assert_eq!(
                app.world().resource::<ShotBudget>().remaining(),
                Some(expected_remaining)
            );
            lives.push(app.world().resource::<LiveBall>().0);
        }

        // Two respawns (shots 1 and 2), then the exhausted third shot leaves
        // the spent ball live.
        assert_ne!(lives[0], lives[1]);
        assert_ne!(lives[1], lives[2]);
        assert_eq!(lives[2], lives[3]);
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Resting
        );
    }

    #[test]
    fn release_with_spent_budget_is_ignored() {
        let (mut app, _anchor, _ball) =
            launcher_test_app(ShotBudget::limited(0), LaunchPhase::Aiming);
        let mut input = ButtonInput::<MouseButton>::default();
        input.press(MouseButton::Left);
        input.release(MouseButton::Left);
        app.insert_resource(input);
        app.add_systems(Update, launch_release_system);

        app.update();

        assert_eq!(app.world().resource::<ShotBudget>().remaining(), Some(0));
        assert_eq!(
            app.world().resource::<LaunchController>().phase,
            LaunchPhase::Resting
        );
    }
}
