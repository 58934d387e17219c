//! Level definitions and per-level world construction.
//!
//! A [`LevelSpec`] is pure data: anchor point, platforms, target stacks, and
//! the optional shot budget.  [`spawn_level`] turns the spec for the currently
//! selected level into entities and session resources; [`teardown_level`]
//! removes every entity the previous session created.  Together they form the
//! explicit construct/teardown boundary of a play session; replaying a level
//! rebuilds everything from the spec.
//!
//! Geometry is authored in a centered, y-up arena of
//! [`crate::constants::ARENA_WIDTH`] × [`crate::constants::ARENA_HEIGHT`]
//! units.  Each stack is sized so its bottom row rests on (or drops onto) its
//! platform's top surface.

use crate::config::GameConfig;
use crate::launcher::{spawn_ball, LaunchController, SlingAnchor};
use crate::outcome::GameOutcome;
use crate::platform::{MovingPlatform, PlatformRider};
use crate::shots::ShotBudget;
use crate::tracker::{OverlapTracker, TargetRoster};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

// ── Level identity ────────────────────────────────────────────────────────────

/// The four shipped levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelId {
    /// Sandbox: one platform, one big stack, no sensors, unlimited shots.
    Main,
    /// One scored platform, one stack, 20 shots.
    #[default]
    Easy,
    /// Two scored platforms, two stacks, 15 shots.
    Medium,
    /// Three scored platforms (one oscillating), three stacks, unlimited shots.
    Hard,
}

impl LevelId {
    /// Parse a level name as given on the command line / environment.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "main" => Some(Self::Main),
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Display title used by the level-select menu.
    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "MAIN",
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

/// Which level the next `Playing` session will build.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectedLevel(pub LevelId);

// ── Component markers ─────────────────────────────────────────────────────────

/// Every entity belonging to the current play session; despawned wholesale by
/// [`teardown_level`].
#[derive(Component)]
pub struct LevelEntity;

/// A static (or kinematic, when oscillating) platform body.
#[derive(Component)]
pub struct Platform {
    /// Collider half-extents, kept for mesh attachment.
    pub half_extents: Vec2,
}

/// Invisible overlap strip sitting on a scored platform's top surface.
#[derive(Component)]
pub struct PlatformSensor;

/// A destructible stack member; the win condition counts these.
#[derive(Component)]
pub struct TargetBlock {
    /// Circumradius of the octagonal collider, kept for mesh attachment.
    pub radius: f32,
}

/// The player's launchable ball.  Spent balls keep this marker so they remain
/// recognizable as projectiles by the overlap tracker.
#[derive(Component)]
pub struct ProjectileBall;

// ── Level specs ───────────────────────────────────────────────────────────────

/// One platform: position, size, whether it carries a win sensor, and whether
/// it oscillates horizontally.
pub struct PlatformSpec {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub scored: bool,
    pub oscillates: bool,
}

/// One grid stack of octagonal target blocks.  `origin` is the top-left
/// corner of the stack's bounding box; rows fill downward.
pub struct StackSpec {
    pub origin: Vec2,
    pub cols: u32,
    pub rows: u32,
    pub radius: f32,
    /// Index into the level's platform list when the stack rides an
    /// oscillating platform.
    pub rides_platform: Option<usize>,
}

/// Complete data for one level.
pub struct LevelSpec {
    pub id: LevelId,
    pub anchor: Vec2,
    pub shot_budget: Option<u32>,
    pub platforms: Vec<PlatformSpec>,
    pub stacks: Vec<StackSpec>,
}

impl LevelSpec {
    /// Build the spec for `id`.  Budgets come from the config so they stay
    /// tunable; geometry is fixed.
    pub fn for_level(id: LevelId, config: &GameConfig) -> Self {
        match id {
            LevelId::Main => Self {
                id,
                anchor: Vec2::new(-340.0, -140.0),
                shot_budget: None,
                platforms: vec![PlatformSpec {
                    center: Vec2::new(260.0, -80.0),
                    half_extents: Vec2::new(100.0, 7.5),
                    scored: false,
                    oscillates: false,
                }],
                stacks: vec![StackSpec {
                    origin: Vec2::new(260.0, 165.0),
                    cols: 4,
                    rows: 4,
                    radius: 30.0,
                    rides_platform: None,
                }],
            },
            LevelId::Easy => Self {
                id,
                anchor: Vec2::new(-340.0, -140.0),
                shot_budget: Some(config.easy_max_shots),
                platforms: vec![PlatformSpec {
                    center: Vec2::new(230.0, -80.0),
                    half_extents: Vec2::new(115.0, 10.0),
                    scored: true,
                    oscillates: false,
                }],
                stacks: vec![StackSpec {
                    origin: Vec2::new(160.0, 90.0),
                    cols: 4,
                    rows: 4,
                    radius: 20.0,
                    rides_platform: None,
                }],
            },
            LevelId::Medium => Self {
                id,
                anchor: Vec2::new(-340.0, -140.0),
                shot_budget: Some(config.medium_max_shots),
                platforms: vec![
                    PlatformSpec {
                        center: Vec2::new(230.0, -80.0),
                        half_extents: Vec2::new(115.0, 10.0),
                        scored: true,
                        oscillates: false,
                    },
                    PlatformSpec {
                        center: Vec2::new(235.0, 160.0),
                        half_extents: Vec2::new(60.0, 10.0),
                        scored: true,
                        oscillates: false,
                    },
                ],
                stacks: vec![
                    StackSpec {
                        origin: Vec2::new(160.0, 90.0),
                        cols: 4,
                        rows: 4,
                        radius: 20.0,
                        rides_platform: None,
                    },
                    StackSpec {
                        origin: Vec2::new(195.0, 240.0),
                        cols: 3,
                        rows: 3,
                        radius: 15.0,
                        rides_platform: None,
                    },
                ],
            },
            LevelId::Hard => Self {
                id,
                anchor: Vec2::new(-340.0, -140.0),
                shot_budget: None,
                platforms: vec![
                    PlatformSpec {
                        center: Vec2::new(250.0, -80.0),
                        half_extents: Vec2::new(115.0, 10.0),
                        scored: true,
                        oscillates: false,
                    },
                    PlatformSpec {
                        center: Vec2::new(-50.0, -140.0),
                        half_extents: Vec2::new(115.0, 10.0),
                        scored: true,
                        oscillates: false,
                    },
                    PlatformSpec {
                        center: Vec2::new(95.0, 200.0),
                        half_extents: Vec2::new(65.0, 10.0),
                        scored: true,
                        oscillates: true,
                    },
                ],
                stacks: vec![
                    StackSpec {
                        origin: Vec2::new(175.0, 90.0),
                        cols: 4,
                        rows: 4,
                        radius: 20.0,
                        rides_platform: None,
                    },
                    StackSpec {
                        origin: Vec2::new(-125.0, 90.0),
                        cols: 4,
                        rows: 4,
                        radius: 20.0,
                        rides_platform: None,
                    },
                    StackSpec {
                        origin: Vec2::new(60.0, 300.0),
                        cols: 2,
                        rows: 2,
                        radius: 18.0,
                        rides_platform: Some(2),
                    },
                ],
            },
        }
    }

    /// Whether this level has any win sensor at all.  Levels without one
    /// (main) never evaluate an outcome.
    pub fn has_sensors(&self) -> bool {
        self.platforms.iter().any(|p| p.scored)
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Body centers of a `cols` × `rows` grid of touching blocks of the given
/// circumradius.  `origin` is the top-left corner of the grid's bounding box;
/// rows fill downward (negative y).
pub fn stack_positions(origin: Vec2, cols: u32, rows: u32, radius: f32) -> Vec<Vec2> {
    let cell = radius * 2.0;
    let mut centers = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            centers.push(Vec2::new(
                origin.x + col as f32 * cell + radius,
                origin.y - row as f32 * cell - radius,
            ));
        }
    }
    centers
}

/// Vertices of a regular octagon with the given circumradius, rotated so a
/// flat side faces down (stacks rest on edges, not points).
pub fn octagon_vertices(radius: f32) -> Vec<Vec2> {
    use std::f32::consts::{FRAC_PI_8, TAU};
    (0..8)
        .map(|i| {
            let angle = i as f32 / 8.0 * TAU + FRAC_PI_8;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

// ── Session construction / teardown ───────────────────────────────────────────

/// Despawn every entity of the previous session.  Runs before [`spawn_level`]
/// on entry into `Playing` and again when returning to the menu.
pub fn teardown_level(mut commands: Commands, query: Query<Entity, With<LevelEntity>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Build the selected level: platforms, sensors, target stacks, sling anchor,
/// the first ball, and a fresh set of session resources.
pub fn spawn_level(mut commands: Commands, config: Res<GameConfig>, selected: Res<SelectedLevel>) {
    let spec = LevelSpec::for_level(selected.0, &config);

    // Platforms, each optionally carrying its sensor strip on top.
    let mut platform_entities = Vec::with_capacity(spec.platforms.len());
    for platform in &spec.platforms {
        let entity = spawn_platform(&mut commands, &config, platform);
        if platform.scored {
            let sensor = spawn_sensor(&mut commands, &config, platform);
            if platform.oscillates {
                commands.entity(sensor).insert(PlatformRider(entity));
            }
        }
        platform_entities.push(entity);
    }

    // Target stacks; the full roster is fixed here and never changes size.
    let mut roster = HashSet::new();
    for stack in &spec.stacks {
        let rider = stack
            .rides_platform
            .and_then(|idx| platform_entities.get(idx).copied());
        for center in stack_positions(stack.origin, stack.cols, stack.rows, stack.radius) {
            let block = spawn_target_block(&mut commands, &config, center, stack.radius);
            if let Some(platform_entity) = rider {
                commands.entity(block).insert(PlatformRider(platform_entity));
            }
            roster.insert(block);
        }
    }

    // Sling anchor: a fixed, collider-less body the tether pulls toward.
    let anchor_entity = commands
        .spawn((
            RigidBody::Fixed,
            Transform::from_translation(spec.anchor.extend(0.0)),
            LevelEntity,
        ))
        .id();
    let anchor = SlingAnchor {
        entity: anchor_entity,
        position: spec.anchor,
    };

    let ball = spawn_ball(&mut commands, &config, &anchor);

    // Fresh session resources; replaces whatever the previous session left.
    let target_count = roster.len();
    commands.insert_resource(TargetRoster(roster));
    commands.insert_resource(OverlapTracker::new(spec.has_sensors()));
    commands.insert_resource(match spec.shot_budget {
        Some(max) => ShotBudget::limited(max),
        None => ShotBudget::unlimited(),
    });
    commands.insert_resource(GameOutcome::default());
    commands.insert_resource(LaunchController::default());
    commands.insert_resource(anchor);
    commands.insert_resource(crate::launcher::LiveBall(ball));

    info!("level {:?} spawned: {} targets", spec.id, target_count);
}

fn spawn_platform(commands: &mut Commands, config: &GameConfig, spec: &PlatformSpec) -> Entity {
    let body = if spec.oscillates {
        RigidBody::KinematicPositionBased
    } else {
        RigidBody::Fixed
    };
    let entity = commands
        .spawn((
            Platform {
                half_extents: spec.half_extents,
            },
            body,
            Collider::cuboid(spec.half_extents.x, spec.half_extents.y),
            Friction::coefficient(config.target_friction),
            Transform::from_translation(spec.center.extend(0.0)),
            Visibility::default(),
            LevelEntity,
        ))
        .id();
    if spec.oscillates {
        commands.entity(entity).insert(MovingPlatform {
            min_x: spec.center.x - config.platform_swing,
            max_x: spec.center.x + config.platform_swing,
            speed: config.platform_speed,
            dir: 1.0,
        });
    }
    entity
}

fn spawn_sensor(commands: &mut Commands, config: &GameConfig, platform: &PlatformSpec) -> Entity {
    let center = Vec2::new(
        platform.center.x,
        platform.center.y + platform.half_extents.y + config.sensor_lift,
    );
    commands
        .spawn((
            PlatformSensor,
            RigidBody::Fixed,
            Collider::cuboid(platform.half_extents.x, config.sensor_height / 2.0),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(center.extend(0.0)),
            LevelEntity,
        ))
        .id()
}

fn spawn_target_block(
    commands: &mut Commands,
    config: &GameConfig,
    center: Vec2,
    radius: f32,
) -> Entity {
    let vertices = octagon_vertices(radius);
    let collider =
        Collider::convex_hull(&vertices).unwrap_or_else(|| Collider::ball(radius));
    commands
        .spawn((
            TargetBlock { radius },
            RigidBody::Dynamic,
            collider,
            Friction::coefficient(config.target_friction),
            Restitution::coefficient(config.target_restitution),
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
            Transform::from_translation(center.extend(0.1)),
            Visibility::default(),
            LevelEntity,
        ))
        .id()
}
