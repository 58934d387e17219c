//! Game-specific error types.
//!
//! Gameplay failure modes (launching with an empty budget, dragging a body
//! that is not the live ball, overlap events for untracked bodies) are guarded
//! no-ops and never surface here.  This module covers the cases that do
//! warrant a value-level error: configuration validation.

use std::fmt;

/// Top-level error enum for the slingshot game.
#[derive(Debug)]
pub enum GameError {
    /// A tuning value is outside its safe operating range.
    /// Returned by validation helpers; rejected values revert to defaults.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `sling_stiffness` is not strictly positive.
///
/// A zero or negative spring never returns the ball to the anchor, which
/// deadlocks the launch cycle.
pub fn validate_sling_stiffness(value: f32) -> GameResult<()> {
    if value <= 0.0 {
        Err(GameError::UnsafeConstant {
            name: "sling_stiffness",
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `max_pull` is not strictly positive.
pub fn validate_max_pull(value: f32) -> GameResult<()> {
    if value <= 0.0 {
        Err(GameError::UnsafeConstant {
            name: "max_pull",
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_validation() {
        assert!(validate_sling_stiffness(18.0).is_ok());
        assert!(validate_max_pull(120.0).is_ok());
    }

    #[test]
    fn non_positive_values_are_rejected_with_context() {
        let err = validate_max_pull(-1.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("max_pull"));
        assert!(msg.contains("-1"));
    }
}
