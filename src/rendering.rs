//! Rendering: camera, retained `Mesh2d` shapes for bodies, and the tether
//! line.
//!
//! Shapes are attached once, when a tagged body first appears, via
//! `Added<..>` queries; physics moves the entities, the GPU meshes follow
//! for free.  Sensors stay invisible on purpose.

use crate::config::GameConfig;
use crate::launcher::{LiveBall, SlingAnchor};
use crate::level::{Platform, ProjectileBall, TargetBlock};
use bevy::prelude::*;

/// Setup camera for 2D rendering.  The default `Camera2d` at the arena
/// resolution shows the whole play field.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Attach a filled rectangle to every newly spawned platform.
pub fn attach_platform_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &Platform), Added<Platform>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, platform) in query.iter() {
        let mesh = meshes.add(Rectangle::new(
            platform.half_extents.x * 2.0,
            platform.half_extents.y * 2.0,
        ));
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.42, 0.30, 0.18)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(mat)));
    }
}

/// Attach a filled octagon to every newly spawned target block.
pub fn attach_target_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &TargetBlock), Added<TargetBlock>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, block) in query.iter() {
        let mesh = meshes.add(RegularPolygon::new(block.radius, 8));
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.30, 0.62, 0.42)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(mat)));
    }
}

/// Attach a filled circle to every newly spawned ball (initial and respawns).
pub fn attach_ball_mesh_system(
    mut commands: Commands,
    query: Query<Entity, Added<ProjectileBall>>,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for entity in query.iter() {
        let mesh = meshes.add(Circle::new(config.ball_radius));
        let mat = materials.add(ColorMaterial::from_color(Color::srgb(0.82, 0.25, 0.22)));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(mat)));
    }
}

/// Draw the tether from the anchor to the live ball.  The joint stays
/// attached through the whole flight, so the line follows the ball until the
/// next respawn, same as the physical spring.
pub fn sling_tether_system(
    mut gizmos: Gizmos,
    anchor: Res<SlingAnchor>,
    live: Res<LiveBall>,
    q_ball: Query<&Transform, With<ProjectileBall>>,
) {
    let Ok(transform) = q_ball.get(live.0) else {
        return;
    };
    let ball_pos = transform.translation.truncate();
    gizmos.line_2d(anchor.position, ball_pos, Color::srgb(0.85, 0.75, 0.50));
    gizmos.circle_2d(anchor.position, 4.0, Color::srgb(0.85, 0.75, 0.50));
}
