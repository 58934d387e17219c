use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use std::env;

use slingshot::config::{self, GameConfig};
use slingshot::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use slingshot::level::{LevelId, SelectedLevel};
use slingshot::menu::{GameState, MenuPlugin};
use slingshot::rendering;
use slingshot::session::SessionPlugin;

/// Configure Rapier gravity downward; levels are authored y-up.
fn setup_physics_config(mut rapier: Query<&mut RapierConfiguration>, config: Res<GameConfig>) {
    for mut cfg in rapier.iter_mut() {
        cfg.gravity = Vec2::new(0.0, -config.gravity);
    }
}

fn main() {
    // SLINGSHOT_LEVEL=easy|medium|hard|main skips the menu for that level.
    let jump_level = env::var("SLINGSHOT_LEVEL")
        .ok()
        .and_then(|name| LevelId::parse(&name));

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Slingshot".into(),
            resolution: WindowResolution::new(ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.04, 0.05, 0.09)))
    // Insert GameConfig with compiled defaults; load_game_config will
    // overwrite it from assets/game.toml (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    // pixels_per_meter(1.0) keeps world units identical to level pixels, so
    // gravity and joint stiffness are tuned in the same scale the levels are
    // authored in.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins(MenuPlugin)
    .add_plugins(SessionPlugin)
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_game_config,
            rendering::setup_camera.after(config::load_game_config),
            setup_physics_config.after(config::load_game_config),
        ),
    );

    if let Some(level) = jump_level {
        app.insert_resource(SelectedLevel(level));
        app.insert_state(GameState::Playing);
        info!("starting directly in level {:?}", level);
    }

    app.run();
}
