//! Level-select menu — `GameState` definition and `MenuPlugin`.
//!
//! ## States
//!
//! | State      | Description                                   |
//! |------------|-----------------------------------------------|
//! | `MainMenu` | Initial state; level-select screen shown      |
//! | `Playing`  | Session running; all game systems active      |
//! | `Won`      | World frozen under the winner dialog          |
//! | `Lost`     | World frozen under the out-of-shots dialog    |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System               | Schedule                | Purpose                      |
//! |----------------------|-------------------------|------------------------------|
//! | `setup_main_menu`    | `OnEnter(MainMenu)`     | Spawn level-select UI        |
//! | `cleanup_main_menu`  | `OnExit(MainMenu)`      | Despawn menu UI entities     |
//! | `menu_button_system` | `Update / in MainMenu`  | Handle level / quit clicks   |

use crate::level::{LevelId, SelectedLevel};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every session system in [`crate::session::SessionPlugin`] runs under
/// `.run_if(in_state(GameState::Playing))`, so gameplay is fully inactive
/// while a menu or dialog is displayed.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Level-select screen; shown on startup.
    #[default]
    MainMenu,
    /// Active session / gameplay.
    Playing,
    /// Session over: every platform cleared.
    Won,
    /// Session over: shot budget spent with targets still standing.
    Lost,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the level-select UI; entire tree is despawned on
/// `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags a level button with the level it starts.
#[derive(Component, Clone, Copy)]
pub struct LevelButton(pub LevelId);

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the menu UI setup/teardown, and the button handler.
///
/// Must be added before any plugin that calls
/// `.run_if(in_state(GameState::Playing))` so the state is registered first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<SelectedLevel>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GameState::MainMenu)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn level_bg() -> Color {
    Color::srgb(0.08, 0.26, 0.40)
}
fn level_border() -> Color {
    Color::srgb(0.18, 0.55, 0.78)
}
fn level_text() -> Color {
    Color::srgb(0.78, 0.93, 1.0)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}

// ── OnEnter(MainMenu): spawn UI ───────────────────────────────────────────────

/// Spawn the full-screen level-select overlay: title, one button per level,
/// and Quit.
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgb(0.02, 0.02, 0.05)),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("SLINGSHOT"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Clear every platform before your shots run out"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 44.0);

            for level in [LevelId::Main, LevelId::Easy, LevelId::Medium, LevelId::Hard] {
                root.spawn((
                    Button,
                    Node {
                        width: Val::Px(220.0),
                        height: Val::Px(50.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(level_bg()),
                    BorderColor::all(level_border()),
                    LevelButton(level),
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(level.title()),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(level_text()),
                    ));
                });

                spacer(root, 12.0);
            }

            spacer(root, 20.0);

            root.spawn((
                Button,
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(quit_bg()),
                BorderColor::all(quit_border()),
                MenuQuitButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("QUIT"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(quit_text()),
                ));
            });
        });
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnExit(MainMenu): despawn UI ──────────────────────────────────────────────

/// Recursively despawn all level-select entities.
pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (MainMenu only): button interaction ────────────────────────────────

/// Handle level and Quit button presses.
///
/// - A level button stores its level in [`SelectedLevel`] and transitions to
///   [`GameState::Playing`], which triggers the session spawn.
/// - **Quit** sends [`AppExit`] to gracefully shut down.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    level_query: Query<(&Interaction, &LevelButton, &Children), Changed<Interaction>>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut selected: ResMut<SelectedLevel>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    for (interaction, button, children) in level_query.iter() {
        match interaction {
            Interaction::Pressed => {
                selected.0 = button.0;
                next_state.set(GameState::Playing);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(level_text());
                    }
                }
            }
        }
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(bevy::app::AppExit::Success);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(quit_text());
                    }
                }
            }
        }
    }
}
