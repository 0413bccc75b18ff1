//! Tuning constants — map geometry, movement, combat, and behavior timing.
//!
//! Scene-structure knobs (map size, origin, spawn points) live in the engine
//! config; the values here are game rules shared by every frontend.

/// Default terrain grid side length.
pub const MAP_SIZE: i32 = 20;

/// Isometric tile footprint in screen units.
pub const TILE_WIDTH: f32 = 64.0;
pub const TILE_HEIGHT: f32 = 32.0;

/// World-space offset applied to every tile's iso anchor.
pub const ORIGIN_X: f32 = 400.0;
pub const ORIGIN_Y: f32 = 100.0;

/// Terrain draw probabilities (cumulative): water, then highland, rest floor.
pub const WATER_CHANCE: f32 = 0.15;
pub const HIGHLAND_CHANCE: f32 = 0.15;

/// Movement speeds in units per second.
pub const PLAYER_SPEED: f32 = 120.0;
pub const ENEMY_SPEED: f32 = 30.0;

/// A mover snaps onto its target once remaining distance drops below this.
/// Must stay below the per-tick displacement at typical frame rates
/// (player at 120 u/s covers ~4 units in a 33 ms tick).
pub const ARRIVAL_THRESHOLD: f32 = 5.0;

/// A click is resolved to a tile only if one lies within this distance.
pub const CLICK_THRESHOLD: f32 = 50.0;

/// Health and damage.
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const ENEMY_MAX_HEALTH: u32 = 50;
pub const PLAYER_DAMAGE: u32 = 25;
pub const ENEMY_DAMAGE: u32 = 10;

/// Combat ranges in world units.
pub const ATTACK_RANGE: f32 = 40.0;
pub const SIGHT_RANGE: f32 = 150.0;

/// Per-attacker cooldown between hits, in milliseconds.
pub const PLAYER_ATTACK_COOLDOWN_MS: f32 = 500.0;
pub const ENEMY_ATTACK_COOLDOWN_MS: f32 = 1000.0;

/// Delay between a hit landing and the defender's state committing
/// (death or recovery). Distinct from the attacker's cooldown.
pub const HIT_RESOLVE_DELAY_MS: f32 = 100.0;

/// Window after which an attacker may initiate again, regardless of how the
/// defender resolved.
pub const ATTACK_RESET_MS: f32 = 200.0;

/// Wander retarget timing, in milliseconds. First delay is drawn from the
/// initial range, every redraw from the steady range.
pub const WANDER_DELAY_INITIAL_MS: std::ops::Range<f32> = 1000.0..3000.0;
pub const WANDER_DELAY_MS: std::ops::Range<f32> = 2000.0..4000.0;

/// Wander targets are picked within this many cells of the current one,
/// per axis.
pub const WANDER_RADIUS: i32 = 2;

/// Default enemy population.
pub const ENEMY_COUNT: usize = 5;

/// Bounded attempts when placing an enemy on a walkable spawn cell.
pub const SPAWN_ATTEMPTS: u32 = 100;

/// Base added to an actor's world Y to produce its render depth.
pub const DEPTH_BASE: f32 = 100.0;
