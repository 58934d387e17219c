//! Shots-remaining counter, floating beside the sling.
//!
//! Only budgeted levels get a counter; unlimited levels skip the spawn and
//! every later update is a no-op against the empty query.

use crate::config::GameConfig;
use crate::level::LevelEntity;
use crate::shots::ShotBudget;
use bevy::prelude::*;

/// Marker for the counter's root node.
#[derive(Component)]
pub struct ShotCounterDisplay;

/// Spawn the counter for the session that just started.  Runs after
/// `spawn_level`, so the fresh [`ShotBudget`] is already in place; tagged
/// [`LevelEntity`] so session teardown removes it with everything else.
pub fn setup_shot_counter(
    mut commands: Commands,
    budget: Res<ShotBudget>,
    config: Res<GameConfig>,
) {
    let Some(remaining) = budget.remaining() else {
        return;
    };
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(150.0),
                top: Val::Px(250.0),
                ..default()
            },
            ShotCounterDisplay,
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("Shots: {remaining}")),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Refresh the counter text whenever the budget changes.  The update happens
/// in the same frame as the decrement; with no counter spawned this is a
/// no-op rather than an error.
pub fn shot_counter_display_system(
    budget: Res<ShotBudget>,
    parent_query: Query<&Children, With<ShotCounterDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    if !budget.is_changed() {
        return;
    }
    let Some(remaining) = budget.remaining() else {
        return;
    };
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!("Shots: {remaining}"));
            }
        }
    }
}
