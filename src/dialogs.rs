//! Outcome dialogs: the winner and out-of-shots overlays shown over the
//! frozen world, with Play Again / Level Select / Quit.

use crate::menu::GameState;
use crate::outcome::freeze_physics;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the winner overlay; despawned on `OnExit(Won)`.
#[derive(Component)]
pub struct WinDialogRoot;

/// Root node of the out-of-shots overlay; despawned on `OnExit(Lost)`.
#[derive(Component)]
pub struct LostDialogRoot;

/// Tags the "Play Again" button in either dialog.
#[derive(Component)]
pub struct DialogPlayAgainButton;

/// Tags the "Level Select" button in either dialog.
#[derive(Component)]
pub struct DialogLevelSelectButton;

/// Tags the "Quit" button in either dialog.
#[derive(Component)]
pub struct DialogQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers both overlays and their shared button handler.  Entering either
/// terminal state also freezes the physics pipeline so the world holds still
/// under the dialog.
pub struct DialogPlugin;

impl Plugin for DialogPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Won), (freeze_physics, setup_win_dialog))
            .add_systems(OnExit(GameState::Won), cleanup_win_dialog)
            .add_systems(
                OnEnter(GameState::Lost),
                (freeze_physics, setup_lost_dialog),
            )
            .add_systems(OnExit(GameState::Lost), cleanup_lost_dialog)
            .add_systems(
                Update,
                dialog_button_system
                    .run_if(in_state(GameState::Won).or(in_state(GameState::Lost))),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn play_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
fn play_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
fn play_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
fn select_bg() -> Color {
    Color::srgb(0.08, 0.26, 0.40)
}
fn select_border() -> Color {
    Color::srgb(0.18, 0.55, 0.78)
}
fn select_text() -> Color {
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
fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}

// ── Overlay construction ──────────────────────────────────────────────────────

/// Spawn the winner overlay centred over the frozen world.
pub fn setup_win_dialog(mut commands: Commands) {
    spawn_dialog(
        &mut commands,
        WinDialogRoot,
        "YOU WIN!",
        Color::srgb(0.35, 1.0, 0.45),
        "Every platform cleared",
        Color::srgb(0.02, 0.06, 0.02),
        Color::srgb(0.15, 0.55, 0.20),
    );
}

/// Spawn the out-of-shots overlay centred over the frozen world.
pub fn setup_lost_dialog(mut commands: Commands) {
    spawn_dialog(
        &mut commands,
        LostDialogRoot,
        "OUT OF SHOTS",
        Color::srgb(1.0, 0.22, 0.22),
        "Targets are still standing",
        Color::srgb(0.06, 0.02, 0.02),
        Color::srgb(0.55, 0.10, 0.10),
    );
}

fn spawn_dialog(
    commands: &mut Commands,
    root: impl Component,
    title: &str,
    title_color: Color,
    subtitle: &str,
    card_bg: Color,
    card_border: Color,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            root,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(card_bg),
                    BorderColor::all(card_border),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(title_color),
                    ));

                    card.spawn((
                        Text::new(subtitle),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.55, 0.65)),
                    ));

                    dialog_button(card, "PLAY AGAIN", play_bg(), play_border(), play_text(), DialogPlayAgainButton);
                    dialog_button(card, "LEVEL SELECT", select_bg(), select_border(), select_text(), DialogLevelSelectButton);
                    dialog_button(card, "QUIT", quit_bg(), quit_border(), quit_text(), DialogQuitButton);

                    card.spawn((
                        Text::new("Press Enter to play again"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

fn dialog_button(
    card: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    tag: impl Component,
) {
    card.spawn((
        Button,
        Node {
            width: Val::Px(220.0),
            height: Val::Px(50.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(bg),
        BorderColor::all(border),
        tag,
    ))
    .with_children(|btn| {
        btn.spawn((
            Text::new(label),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(text),
        ));
    });
}

/// Recursively despawn the winner overlay.
pub fn cleanup_win_dialog(mut commands: Commands, query: Query<Entity, With<WinDialogRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Recursively despawn the out-of-shots overlay.
pub fn cleanup_lost_dialog(mut commands: Commands, query: Query<Entity, With<LostDialogRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (Won | Lost): button interaction ───────────────────────────────────

/// Handle Play Again / Level Select / Quit in either outcome dialog.
///
/// - **Play Again** (or Enter) replays the same level: back to `Playing`,
///   whose entry systems tear down and rebuild the session.
/// - **Level Select** returns to the main menu.
/// - **Quit** sends [`AppExit`].
#[allow(clippy::type_complexity)]
pub fn dialog_button_system(
    play_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<DialogPlayAgainButton>),
    >,
    select_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<DialogLevelSelectButton>),
    >,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<DialogQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    let wants_play_again = keys.just_pressed(KeyCode::Enter)
        || play_query.iter().any(|(i, _)| *i == Interaction::Pressed);
    if wants_play_again {
        next_state.set(GameState::Playing);
        return;
    }

    if select_query.iter().any(|(i, _)| *i == Interaction::Pressed) {
        next_state.set(GameState::MainMenu);
        return;
    }

    if quit_query.iter().any(|(i, _)| *i == Interaction::Pressed) {
        exit.write(bevy::app::AppExit::Success);
    }

    // Hover tint for all three button kinds.
    for (interaction, children, base) in play_query
        .iter()
        .map(|(i, c)| (i, c, play_text()))
        .chain(select_query.iter().map(|(i, c)| (i, c, select_text())))
        .chain(quit_query.iter().map(|(i, c)| (i, c, quit_text())))
    {
        let tint = match interaction {
            Interaction::Hovered => TextColor(Color::WHITE),
            Interaction::None => TextColor(base),
            Interaction::Pressed => continue,
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = tint;
            }
        }
    }
}
