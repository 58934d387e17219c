//! Win/loss evaluation: a terminal two-outcome state machine read once per
//! simulation step, strictly after the overlap tracker has settled.
//!
//! Priority order is fixed: a terminal outcome short-circuits everything;
//! an empty target set wins; an exhausted budget loses.  Win is checked
//! first because the last shot fired might be the one that clears the last
//! target, and that tick must be a win, not a loss.

use crate::menu::GameState;
use crate::shots::ShotBudget;
use crate::tracker::OverlapTracker;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Outcome of the current session.  Monotonic: once terminal, never changes
/// until the session is rebuilt.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        self != Self::InProgress
    }
}

/// Per-step evaluation.  Ordered after the tracker systems (see
/// `session::SessionPlugin`), and inert until the tracker has seeded:
/// before that the empty target set is an artifact, not a cleared level.
pub fn outcome_evaluator_system(
    tracker: Res<OverlapTracker>,
    budget: Res<ShotBudget>,
    mut outcome: ResMut<GameOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if outcome.is_terminal() || !tracker.is_ready() {
        return;
    }
    if tracker.targets_on.is_empty() {
        *outcome = GameOutcome::Won;
        next_state.set(GameState::Won);
        return;
    }
    if budget.is_exhausted() {
        *outcome = GameOutcome::Lost;
        next_state.set(GameState::Lost);
    }
}

/// Stop the Rapier pipeline so the world freezes under the outcome dialog;
/// the analog of zeroing the original clock's time scale.
pub fn freeze_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

/// Re-enable the pipeline when a new session starts.
pub fn resume_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}
