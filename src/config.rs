//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.sling_stiffness`, `config.max_pull`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_max_pull, validate_sling_stiffness};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: f32,
    pub arena_height: f32,

    // ── Physics ───────────────────────────────────────────────────────────────
    pub gravity: f32,

    // ── Sling ─────────────────────────────────────────────────────────────────
    pub sling_stiffness: f32,
    pub sling_damping: f32,
    pub sling_rest_length: f32,

    // ── Launch control ────────────────────────────────────────────────────────
    pub max_pull: f32,
    pub grab_radius: f32,
    pub respawn_tolerance: f32,

    // ── Projectile ────────────────────────────────────────────────────────────
    pub ball_radius: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,
    pub ball_linear_damping: f32,

    // ── Targets ───────────────────────────────────────────────────────────────
    pub target_friction: f32,
    pub target_restitution: f32,

    // ── Sensors ───────────────────────────────────────────────────────────────
    pub sensor_height: f32,
    pub sensor_lift: f32,

    // ── Mobile platform ───────────────────────────────────────────────────────
    pub platform_speed: f32,
    pub platform_swing: f32,

    // ── Shot budgets ──────────────────────────────────────────────────────────
    pub easy_max_shots: u32,
    pub medium_max_shots: u32,

    // ── HUD ───────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            // Physics
            gravity: GRAVITY,
            // Sling
            sling_stiffness: SLING_STIFFNESS,
            sling_damping: SLING_DAMPING,
            sling_rest_length: SLING_REST_LENGTH,
            // Launch control
            max_pull: MAX_PULL,
            grab_radius: GRAB_RADIUS,
            respawn_tolerance: RESPAWN_TOLERANCE,
            // Projectile
            ball_radius: BALL_RADIUS,
            ball_restitution: BALL_RESTITUTION,
            ball_friction: BALL_FRICTION,
            ball_linear_damping: BALL_LINEAR_DAMPING,
            // Targets
            target_friction: TARGET_FRICTION,
            target_restitution: TARGET_RESTITUTION,
            // Sensors
            sensor_height: SENSOR_HEIGHT,
            sensor_lift: SENSOR_LIFT,
            // Mobile platform
            platform_speed: PLATFORM_SPEED,
            platform_swing: PLATFORM_SWING,
            // Shot budgets
            easy_max_shots: EASY_MAX_SHOTS,
            medium_max_shots: MEDIUM_MAX_SHOTS,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort startup.  A missing file is silently ignored (defaults are
/// already in place from `insert_resource`).  Values that fail range
/// validation are individually reverted to their defaults.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = sanitize(loaded);
                info!("loaded game config from {path}");
            }
            Err(e) => {
                warn!("failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present; defaults are already in place. Not an error.
            info!("no {path} found; using compiled defaults");
        }
    }
}

/// Revert any out-of-range values in a loaded config to the compiled default,
/// logging each rejection.
fn sanitize(mut loaded: GameConfig) -> GameConfig {
    if let Err(e) = validate_sling_stiffness(loaded.sling_stiffness) {
        warn!("{e}; reverting to default");
        loaded.sling_stiffness = SLING_STIFFNESS;
    }
    if let Err(e) = validate_max_pull(loaded.max_pull) {
        warn!("{e}; reverting to default");
        loaded.max_pull = MAX_PULL;
    }
    loaded
}
