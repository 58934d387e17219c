//! Centralised gameplay and physics constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! `GameConfig::default()` mirrors every constant in this file; an optional
//! `assets/game.toml` can override any subset at startup.

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Width of the play arena in world units (1 unit = 1 pixel at default zoom).
///
/// Level geometry is authored in a centered, y-up coordinate frame of this
/// size; the window is created at the same resolution so the whole arena is
/// visible without camera scaling.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Height of the play arena in world units.
pub const ARENA_HEIGHT: f32 = 720.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward gravity magnitude (u/s²).
///
/// With `pixels_per_meter(1.0)` the arena is scaled 1:1 to pixels, so
/// Earth-like gravity needs to be expressed in pixels. 980 makes a radius-20
/// ball fall convincingly across a 720-unit-tall arena.
/// Tested range: 600–1400. Lower values make shots float; higher values make
/// the sling feel weak unless `sling_stiffness` is raised to match.
pub const GRAVITY: f32 = 980.0;

// ── Sling ─────────────────────────────────────────────────────────────────────

/// Spring stiffness of the sling tether.
///
/// Strong enough to fling the ball across the arena yet soft enough that the
/// ball visibly swings back through the anchor before settling, so the
/// return-to-anchor respawn check can catch it.
/// Tested range: 8.0–40.0 at the default gravity.
pub const SLING_STIFFNESS: f32 = 18.0;

/// Spring damping of the sling tether.
///
/// Too low and the ball oscillates through the anchor window repeatedly;
/// too high and launches lose energy.
pub const SLING_DAMPING: f32 = 0.6;

/// Rest length of the sling spring. Zero: the spring always pulls the ball
/// toward the anchor point itself.
pub const SLING_REST_LENGTH: f32 = 0.0;

// ── Launch control ────────────────────────────────────────────────────────────

/// Maximum distance (u) the ball may be dragged from the anchor.
///
/// Dragging further clamps the ball to exactly this distance along the drag
/// direction and zeroes its velocity.
pub const MAX_PULL: f32 = 120.0;

/// Pick-up radius (u) around the live ball within which a left-press starts
/// an aim drag. Slightly larger than the ball so grabbing is forgiving.
pub const GRAB_RADIUS: f32 = 30.0;

/// Per-axis window (u) around the anchor inside which a launched ball counts
/// as having returned, triggering the respawn of the next projectile.
pub const RESPAWN_TOLERANCE: f32 = 20.0;

// ── Projectile ────────────────────────────────────────────────────────────────

/// Collider radius (u) of the player ball.
pub const BALL_RADIUS: f32 = 20.0;

/// Restitution of the player ball. Modest bounce so spent balls settle.
pub const BALL_RESTITUTION: f32 = 0.3;

/// Friction of the player ball against platforms and targets.
pub const BALL_FRICTION: f32 = 0.5;

/// Linear damping on the ball, standing in for air resistance.
pub const BALL_LINEAR_DAMPING: f32 = 0.05;

// ── Targets ───────────────────────────────────────────────────────────────────

/// Friction of target blocks. High enough that stacks stay stacked until hit.
pub const TARGET_FRICTION: f32 = 0.6;

/// Restitution of target blocks. Near-dead so knocked blocks don't trampoline
/// back onto the platform.
pub const TARGET_RESTITUTION: f32 = 0.05;

// ── Sensors ───────────────────────────────────────────────────────────────────

/// Height (u) of the invisible overlap strip above each scored platform.
pub const SENSOR_HEIGHT: f32 = 12.0;

/// Vertical offset (u) of the sensor's center above the platform's top
/// surface; half the sensor height, so the strip sits flush on the platform.
pub const SENSOR_LIFT: f32 = 6.0;

// ── Mobile platform (hard level) ──────────────────────────────────────────────

/// Horizontal speed (u/s) of the oscillating hard-level platform.
pub const PLATFORM_SPEED: f32 = 60.0;

/// Half-range (u) of the oscillation around the platform's spawn position.
pub const PLATFORM_SWING: f32 = 90.0;

// ── Shot budgets ──────────────────────────────────────────────────────────────

/// Shots available on the easy level.
pub const EASY_MAX_SHOTS: u32 = 20;

/// Shots available on the medium level.
pub const MEDIUM_MAX_SHOTS: u32 = 15;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size of the shots-remaining counter.
pub const HUD_FONT_SIZE: f32 = 28.0;
