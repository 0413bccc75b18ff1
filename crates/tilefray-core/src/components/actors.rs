//! Actor components: markers, position, motion, health, and combat state.

use serde::{Deserialize, Serialize};

use super::common::{GridPos, Vec2};

/// Marker component identifying the player entity
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;

/// Behavior state carried by each enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// True iff the player was within sight range on the last evaluation.
    pub chasing: bool,
    /// Time accumulated toward the next wander retarget.
    pub wander_timer_ms: f32,
    /// Current retarget interval; redrawn on every retarget.
    pub wander_delay_ms: f32,
}

impl Enemy {
    pub fn new(wander_delay_ms: f32) -> Self {
        Self {
            chasing: false,
            wander_timer_ms: 0.0,
            wander_delay_ms,
        }
    }
}

/// Where an actor is, in both spaces.
///
/// `grid` tracks `world` only at arrival - it is committed exclusively by
/// the movement system when a move completes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    pub world: Vec2,
    pub grid: GridPos,
}

/// A pending straight-line move. Present iff the actor is in motion;
/// inserting a new one replaces any prior target (no queued path).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Movement {
    pub destination: Vec2,
    pub target_grid: GridPos,
    /// Units per second.
    pub speed: f32,
}

/// Hit points. Integer, never below zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// Melee capability and its gating state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Melee {
    pub damage: u32,
    /// Remaining cooldown; an attack may start only at zero.
    pub cooldown_ms: f32,
    /// Value the cooldown resets to on a landed hit.
    pub cooldown_after_hit_ms: f32,
    /// True from the moment a hit lands until the attack-reset window fires.
    pub attacking: bool,
}

impl Melee {
    pub fn new(damage: u32, cooldown_after_hit_ms: f32) -> Self {
        Self {
            damage,
            cooldown_ms: 0.0,
            cooldown_after_hit_ms,
            attacking: false,
        }
    }
}

/// What the rendering collaborator should show for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    Normal,
    /// Hit landed, resolution pending.
    Flashed,
    Dead,
}

/// Render ordering hint, recomputed from world Y every tick.
/// Output for the renderer; never consumed by simulation systems.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Depth(pub f32);

/// Terminal marker. Actors carrying this are excluded from every system
/// query and from attack targeting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Dead;
