//! Melee combat arithmetic — gating, cooldown ticking, damage.
//!
//! The engine's combat system owns timers and entity state; the rules that
//! decide whether a swing may start and how numbers move live here.

use serde::{Deserialize, Serialize};

/// Result of asking an attacker to engage a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Damage applied; resolution timers scheduled.
    Hit,
    /// Defender farther than attack range.
    OutOfRange,
    /// Attacker mid-swing or still cooling down.
    NotReady,
}

/// An attacker may initiate only when idle and off cooldown.
pub fn can_initiate(attacking: bool, cooldown_ms: f32) -> bool {
    !attacking && cooldown_ms <= 0.0
}

/// Whether a defender at `dist` is close enough to hit.
pub fn in_range(dist: f32, range: f32) -> bool {
    dist < range
}

/// Tick a cooldown down by elapsed time. Only ticks while positive and
/// never goes below zero.
pub fn tick_cooldown(cooldown_ms: f32, delta_ms: f32) -> f32 {
    if cooldown_ms > 0.0 {
        (cooldown_ms - delta_ms).max(0.0)
    } else {
        cooldown_ms
    }
}

/// Apply a hit, saturating at zero health.
pub fn apply_hit(health: u32, damage: u32) -> u32 {
    health.saturating_sub(damage)
}

/// A defender whose health bottomed out dies when its hit resolves.
pub fn is_lethal(health: u32) -> bool {
    health == 0
}
