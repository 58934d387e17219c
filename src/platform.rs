//! Hard-level platform oscillation.
//!
//! The oscillating platform carries its sensor strip and its target stack:
//! all three receive the identical horizontal delta every step, so their
//! relative geometry never drifts.  Motion is bounded: the candidate
//! position is clamped at the bounds and the direction flips there, never
//! inside the range.

use bevy::prelude::*;

/// Bounded one-dimensional oscillation state, attached to the platform body.
#[derive(Component, Debug)]
pub struct MovingPlatform {
    pub min_x: f32,
    pub max_x: f32,
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Direction sign, +1.0 or -1.0.
    pub dir: f32,
}

/// Attached to bodies that translate rigidly with a platform (its sensor and
/// its stack members).
#[derive(Component, Debug, Clone, Copy)]
pub struct PlatformRider(pub Entity);

/// One bounded step: returns the new position and (possibly flipped)
/// direction.  Clamps exactly to the violated bound.
pub fn advance(pos: f32, dir: f32, step: f32, min: f32, max: f32) -> (f32, f32) {
    let candidate = pos + dir * step;
    if candidate > max {
        (max, -1.0)
    } else if candidate < min {
        (min, 1.0)
    } else {
        (candidate, dir)
    }
}

/// Advance every oscillating platform and translate its riders by the same
/// delta.
pub fn platform_drive_system(
    time: Res<Time>,
    mut q_platforms: Query<(Entity, &mut Transform, &mut MovingPlatform), Without<PlatformRider>>,
    mut q_riders: Query<(&mut Transform, &PlatformRider), Without<MovingPlatform>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (entity, mut transform, mut platform) in q_platforms.iter_mut() {
        let (next, dir) = advance(
            transform.translation.x,
            platform.dir,
            platform.speed * dt,
            platform.min_x,
            platform.max_x,
        );
        let delta = next - transform.translation.x;
        platform.dir = dir;
        transform.translation.x = next;

        if delta != 0.0 {
            for (mut rider_transform, rider) in q_riders.iter_mut() {
                if rider.0 == entity {
                    rider_transform.translation.x += delta;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_stays_bounded_and_flips_only_at_bounds() {
        let (min, max) = (-90.0, 90.0);
        let mut pos = 40.0;
        let mut dir = 1.0;
        for _ in 0..1000 {
            let prev_dir = dir;
            let (next, next_dir) = advance(pos, dir, 7.3, min, max);
            assert!((min..=max).contains(&next));
            if next_dir != prev_dir {
                assert!(next == min || next == max, "flip away from a bound");
            }
            pos = next;
            dir = next_dir;
        }
    }

    #[test]
    fn oscillation_visits_both_bounds() {
        let (min, max) = (-10.0, 10.0);
        let mut pos = 0.0;
        let mut dir = 1.0;
        let (mut hit_min, mut hit_max) = (false, false);
        for _ in 0..100 {
            let (next, next_dir) = advance(pos, dir, 3.0, min, max);
            hit_min |= next == min;
            hit_max |= next == max;
            pos = next;
            dir = next_dir;
        }
        assert!(hit_min && hit_max);
    }

    #[test]
    fn riders_receive_exactly_the_platform_delta() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, platform_drive_system);

        let platform = app
            .world_mut()
            .spawn((
                Transform::from_xyz(85.0, 200.0, 0.0), // near max_x so a flip can occur
                MovingPlatform {
                    min_x: -90.0,
                    max_x: 90.0,
                    speed: 400.0,
                    dir: 1.0,
                },
            ))
            .id();
        let sensor = app
            .world_mut()
            .spawn((Transform::from_xyz(85.0, 216.0, 0.0), PlatformRider(platform)))
            .id();
        let block = app
            .world_mut()
            .spawn((Transform::from_xyz(70.0, 240.0, 0.0), PlatformRider(platform)))
            .id();
        // A bystander with no rider tag must not move.
        let bystander = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 0.0)).id();

        let x_of = |app: &mut App, e: Entity| app.world_mut().get::<Transform>(e).unwrap().translation.x;

        for _ in 0..20 {
            let before = (
                x_of(&mut app, platform),
                x_of(&mut app, sensor),
                x_of(&mut app, block),
            );
            app.update();
            let after = (
                x_of(&mut app, platform),
                x_of(&mut app, sensor),
                x_of(&mut app, block),
            );
            let platform_delta = after.0 - before.0;
            assert!((after.1 - before.1 - platform_delta).abs() < 1e-4);
            assert!((after.2 - before.2 - platform_delta).abs() < 1e-4);
            assert!((-90.0..=90.0).contains(&after.0));
        }

        // Relative geometry preserved across the whole run, flips included.
        assert!((x_of(&mut app, sensor) - x_of(&mut app, platform)).abs() < 1e-3);
        assert!((x_of(&mut app, block) - (x_of(&mut app, platform) - 15.0)).abs() < 1e-3);
        assert_eq!(x_of(&mut app, bystander), 0.0);
    }
}
