//! Headless unit tests for the [`GameState`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no physics —
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`.
//! 2. A `NextState` request transitions from `MainMenu` → `Playing`.
//! 3. `Playing` reaches each terminal dialog state and back to `Playing`
//!    (the Play Again path).
//! 4. `insert_state` can force-start directly in `Playing` (the
//!    `SLINGSHOT_LEVEL` path in `main.rs`).

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use slingshot::menu::GameState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via
/// `init_state`.
///
/// `MinimalPlugins` provides the required scheduling infrastructure.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
/// No window or rendering is created.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `MainMenu`.
#[test]
fn default_state_is_main_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(current_state(&app), GameState::MainMenu);
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_main_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update(); // settle into MainMenu
    set_state(&mut app, GameState::Playing);
    assert_eq!(current_state(&app), GameState::Playing);
}

/// `Playing` state persists across additional frames — no accidental
/// reversion.
#[test]
fn playing_state_persists_across_frames() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(current_state(&app), GameState::Playing);
}

/// Each terminal dialog state is reachable from `Playing`, and Play Again
/// returns to `Playing`.
#[test]
fn playing_reaches_both_dialogs_and_replays() {
    for terminal in [GameState::Won, GameState::Lost] {
        let mut app = app_with_default_state();
        app.update();
        set_state(&mut app, GameState::Playing);
        set_state(&mut app, terminal.clone());
        assert_eq!(current_state(&app), terminal);

        // Play Again: straight back into a fresh session.
        set_state(&mut app, GameState::Playing);
        assert_eq!(current_state(&app), GameState::Playing);
    }
}

/// Level Select from a dialog returns to the menu.
#[test]
fn dialog_can_return_to_level_select() {
    let mut app = app_with_default_state();
    app.update();
    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::Won);
    set_state(&mut app, GameState::MainMenu);
    assert_eq!(current_state(&app), GameState::MainMenu);
}

/// `insert_state` can force the initial state to `Playing` directly, which
/// is the `SLINGSHOT_LEVEL` code path in `main.rs`.
#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();
    assert_eq!(current_state(&app), GameState::Playing);
}
