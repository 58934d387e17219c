//! Session plugin: per-level construction/teardown and the ordered per-step
//! handler list.
//!
//! ## Ordering
//!
//! The original wiring relied on event-handler registration order; here the
//! order is explicit.  In `Update` (before the physics step): drag input and
//! the aiming clamp.  In `PostUpdate`, after Rapier's write-back, one chained
//! list per step:
//!
//! 1. `platform_drive_system` — move the oscillating platform group
//! 2. `respawn_ball_system` — return-to-anchor check, next ball
//! 3. `seed_overlap_system` — one-shot initial-overlap seed
//! 4. `overlap_tracker_system` — fold this step's collision messages
//! 5. `outcome_evaluator_system` — reads settled sets, win before loss
//!
//! The tracker therefore always reaches a stable set before the evaluator
//! reads it, per step, deterministically.

use crate::dialogs::DialogPlugin;
use crate::hud::{setup_shot_counter, shot_counter_display_system};
use crate::launcher::{
    aiming_clamp_system, drag_begin_system, launch_release_system, respawn_ball_system,
};
use crate::level::{spawn_level, teardown_level};
use crate::menu::GameState;
use crate::outcome::{outcome_evaluator_system, resume_physics};
use crate::platform::platform_drive_system;
use crate::rendering::{
    attach_ball_mesh_system, attach_platform_mesh_system, attach_target_mesh_system,
    sling_tether_system,
};
use crate::tracker::{overlap_tracker_system, seed_overlap_system};
use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;

/// Wires the whole play session: build/teardown at the `Playing` boundary,
/// input before the physics step, trackers and evaluator after it.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DialogPlugin)
            .add_systems(
                OnEnter(GameState::Playing),
                (resume_physics, teardown_level, spawn_level, setup_shot_counter).chain(),
            )
            // Returning to the menu also clears the last session's world.
            .add_systems(OnEnter(GameState::MainMenu), teardown_level)
            .add_systems(
                Update,
                (drag_begin_system, aiming_clamp_system, launch_release_system)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    sling_tether_system,
                    // Counter refresh lands in the same frame as the decrement.
                    shot_counter_display_system.after(launch_release_system),
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Mesh attachment watches Added<..> and is state-independent.
            .add_systems(
                Update,
                (
                    attach_platform_mesh_system,
                    attach_target_mesh_system,
                    attach_ball_mesh_system,
                ),
            )
            .add_systems(
                PostUpdate,
                (
                    platform_drive_system,
                    respawn_ball_system,
                    seed_overlap_system,
                    overlap_tracker_system,
                    outcome_evaluator_system,
                )
                    .chain()
                    .after(PhysicsSet::Writeback)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
