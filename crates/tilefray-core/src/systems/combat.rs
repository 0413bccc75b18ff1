//! Combat system - cooldown-gated melee with delayed hit resolution.
//!
//! A landed hit applies damage immediately but commits the defender's fate
//! (dead vs recovered) only after a fixed reaction window. The window is
//! tracked by one-shot timers keyed per actor-event, so several overlapping
//! attacks against different defenders stay independent. Timers are never
//! cancelled; a firing timer re-validates current actor state instead of
//! trusting what was true when it was scheduled.

use hecs::{Entity, World};
use log::{debug, info};
use tilefray_logic::combat::{self, AttackOutcome};
use tilefray_logic::constants;

use crate::components::{Dead, Health, Melee, Movement, Player, Position, VisualState};
use crate::engine::SimEvent;

/// A scheduled one-shot combat event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerKind {
    /// Commit the defender's post-hit state (death or recovery).
    ResolveHit { target: Entity },
    /// Clear the attacker's mid-swing flag.
    ResetAttack { attacker: Entity },
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    fires_at_ms: f64,
    kind: TimerKind,
}

/// Pending one-shot timers, drained once per tick.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn schedule(&mut self, fires_at_ms: f64, kind: TimerKind) {
        self.pending.push(Timer { fires_at_ms, kind });
    }

    /// Remove and return every timer due at `now_ms`, in schedule order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<TimerKind> {
        let mut due = Vec::new();
        self.pending.retain(|t| {
            if t.fires_at_ms <= now_ms {
                due.push(t.kind);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Ask `attacker` to swing at `defender`.
///
/// No-op (`NotReady`) while the attacker is mid-swing or cooling down;
/// `OutOfRange` beyond attack range. On a hit: damage lands immediately,
/// the defender flashes, a resolve timer is scheduled one reaction window
/// out, the attacker's cooldown resets to its fixed value, and a separate
/// reset timer re-arms the attacker independently of how the defender
/// resolves.
pub fn attempt_attack(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    now_ms: f64,
    attacker: Entity,
    defender: Entity,
) -> AttackOutcome {
    // Dead actors neither swing nor get hit.
    if world.satisfies::<&Dead>(attacker).unwrap_or(true)
        || world.satisfies::<&Dead>(defender).unwrap_or(true)
    {
        return AttackOutcome::NotReady;
    }

    {
        let melee = match world.get::<&Melee>(attacker) {
            Ok(m) => *m,
            Err(_) => return AttackOutcome::NotReady,
        };
        if !combat::can_initiate(melee.attacking, melee.cooldown_ms) {
            return AttackOutcome::NotReady;
        }
    }

    let dist = {
        let a = match world.get::<&Position>(attacker) {
            Ok(p) => p.world,
            Err(_) => return AttackOutcome::NotReady,
        };
        let d = match world.get::<&Position>(defender) {
            Ok(p) => p.world,
            Err(_) => return AttackOutcome::NotReady,
        };
        a.distance(&d)
    };
    if !combat::in_range(dist, constants::ATTACK_RANGE) {
        return AttackOutcome::OutOfRange;
    }

    let damage = {
        let Ok(mut melee) = world.get::<&mut Melee>(attacker) else {
            return AttackOutcome::NotReady;
        };
        melee.attacking = true;
        melee.cooldown_ms = melee.cooldown_after_hit_ms;
        melee.damage
    };

    if let Ok(mut health) = world.get::<&mut Health>(defender) {
        health.current = combat::apply_hit(health.current, damage);
    }
    if let Ok(mut visual) = world.get::<&mut VisualState>(defender) {
        *visual = VisualState::Flashed;
    }

    timers.schedule(
        now_ms + f64::from(constants::HIT_RESOLVE_DELAY_MS),
        TimerKind::ResolveHit { target: defender },
    );
    timers.schedule(
        now_ms + f64::from(constants::ATTACK_RESET_MS),
        TimerKind::ResetAttack { attacker },
    );

    let by_player = world.satisfies::<&Player>(attacker).unwrap_or(false);
    debug!(
        "hit: attacker={:?} defender={:?} damage={} dist={:.1}",
        attacker, defender, damage, dist
    );
    events.push(if by_player {
        SimEvent::PlayerHit { enemy: defender }
    } else {
        SimEvent::EnemyHit { enemy: attacker }
    });

    AttackOutcome::Hit
}

/// Fire every timer due at `now_ms`.
pub fn resolve_timers(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    now_ms: f64,
) {
    for kind in timers.drain_due(now_ms) {
        match kind {
            TimerKind::ResolveHit { target } => resolve_hit(world, events, target),
            TimerKind::ResetAttack { attacker } => {
                if let Ok(mut melee) = world.get::<&mut Melee>(attacker) {
                    melee.attacking = false;
                }
            }
        }
    }
}

/// Commit a defender's post-hit state once its reaction window elapses.
fn resolve_hit(world: &mut World, events: &mut Vec<SimEvent>, target: Entity) {
    // Re-validate: the target may have died to an earlier overlapping hit.
    if world.satisfies::<&Dead>(target).unwrap_or(true) {
        return;
    }
    let health = match world.get::<&Health>(target) {
        Ok(h) => h.current,
        Err(_) => return,
    };

    if combat::is_lethal(health) {
        if let Ok(mut visual) = world.get::<&mut VisualState>(target) {
            *visual = VisualState::Dead;
        }
        let _ = world.remove_one::<Movement>(target);
        let _ = world.insert_one(target, Dead);

        if world.satisfies::<&Player>(target).unwrap_or(false) {
            info!("player defeated");
            events.push(SimEvent::PlayerDefeated);
        } else {
            info!("enemy defeated: {:?}", target);
            events.push(SimEvent::EnemyDefeated { enemy: target });
        }
    } else if let Ok(mut visual) = world.get::<&mut VisualState>(target) {
        *visual = VisualState::Normal;
    }
}

/// Tick every live actor's attack cooldown down by elapsed time. Cooldowns
/// only tick while positive and clamp at zero.
pub fn cooldown_system(world: &mut World, delta_ms: f32) {
    for (_, melee) in world.query::<&mut Melee>().without::<&Dead>().iter() {
        melee.cooldown_ms = combat::tick_cooldown(melee.cooldown_ms, delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GridPos, Vec2};

    fn actor(world: &mut World, x: f32, health: u32, damage: u32, cooldown: f32) -> Entity {
        world.spawn((
            Position {
                world: Vec2::new(x, 0.0),
                grid: GridPos::new(0, 0),
            },
            Health::full(health),
            Melee::new(damage, cooldown),
            VisualState::Normal,
        ))
    }

    fn player_and_enemy(world: &mut World, gap: f32) -> (Entity, Entity) {
        let player = actor(world, 0.0, 100, 25, 500.0);
        world.insert_one(player, Player).unwrap();
        let enemy = actor(world, gap, 50, 10, 1000.0);
        (player, enemy)
    }

    #[test]
    fn out_of_range_is_a_noop() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 40.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        let outcome = attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy);

        assert_eq!(outcome, AttackOutcome::OutOfRange);
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 50);
        assert!(timers.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn hit_applies_damage_immediately_but_defers_the_commit() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 30.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        let outcome = attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy);
        assert_eq!(outcome, AttackOutcome::Hit);

        // Damage is instant, visual flashes, fate undecided.
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 25);
        assert_eq!(*world.get::<&VisualState>(enemy).unwrap(), VisualState::Flashed);
        assert!(!world.satisfies::<&Dead>(enemy).unwrap());
        assert_eq!(timers.len(), 2);

        // Attacker is gated.
        let melee = *world.get::<&Melee>(player).unwrap();
        assert!(melee.attacking);
        assert_eq!(melee.cooldown_ms, 500.0);

        // Reaction window elapses: non-lethal hit recovers.
        resolve_timers(&mut world, &mut timers, &mut events, 100.0);
        assert_eq!(*world.get::<&VisualState>(enemy).unwrap(), VisualState::Normal);
        assert!(!world.satisfies::<&Dead>(enemy).unwrap());
    }

    #[test]
    fn second_hit_kills_exactly_after_its_reaction_window() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 30.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        assert_eq!(
            attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy),
            AttackOutcome::Hit
        );
        resolve_timers(&mut world, &mut timers, &mut events, 250.0);

        // Cooldown still running at 250 ms.
        assert_eq!(
            attempt_attack(&mut world, &mut timers, &mut events, 250.0, player, enemy),
            AttackOutcome::NotReady
        );

        cooldown_system(&mut world, 500.0);
        assert_eq!(
            attempt_attack(&mut world, &mut timers, &mut events, 500.0, player, enemy),
            AttackOutcome::Hit
        );
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 0);

        // Alive and attackable-looking until the window elapses.
        assert!(!world.satisfies::<&Dead>(enemy).unwrap());
        resolve_timers(&mut world, &mut timers, &mut events, 599.0);
        assert!(!world.satisfies::<&Dead>(enemy).unwrap());

        resolve_timers(&mut world, &mut timers, &mut events, 600.0);
        assert!(world.satisfies::<&Dead>(enemy).unwrap());
        assert_eq!(*world.get::<&VisualState>(enemy).unwrap(), VisualState::Dead);
        assert!(events.contains(&SimEvent::EnemyDefeated { enemy }));
    }

    #[test]
    fn attack_reset_rearms_independently_of_cooldown() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 30.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy);
        resolve_timers(&mut world, &mut timers, &mut events, 200.0);

        let melee = *world.get::<&Melee>(player).unwrap();
        assert!(!melee.attacking);
        assert!(melee.cooldown_ms > 0.0);
    }

    #[test]
    fn dead_defenders_are_never_targetable() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 30.0);
        world.insert_one(enemy, Dead).unwrap();
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        let outcome = attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy);
        assert_eq!(outcome, AttackOutcome::NotReady);
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 50);
    }

    #[test]
    fn resolve_hit_revalidates_instead_of_trusting_captured_state() {
        let mut world = World::new();
        let (player, enemy) = player_and_enemy(&mut world, 30.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, enemy);
        // The enemy dies to something else before the window elapses.
        world.insert_one(enemy, Dead).unwrap();
        events.clear();

        resolve_timers(&mut world, &mut timers, &mut events, 100.0);

        // No second defeat, no visual churn.
        assert!(events.is_empty());
    }

    #[test]
    fn overlapping_windows_against_different_defenders_stay_independent() {
        let mut world = World::new();
        let (player, first) = player_and_enemy(&mut world, 30.0);
        let second = actor(&mut world, 20.0, 50, 10, 1000.0);
        let mut timers = TimerQueue::default();
        let mut events = Vec::new();

        attempt_attack(&mut world, &mut timers, &mut events, 0.0, player, first);
        // Re-arm, then hit the second enemy 300 ms later.
        resolve_timers(&mut world, &mut timers, &mut events, 300.0);
        cooldown_system(&mut world, 500.0);
        attempt_attack(&mut world, &mut timers, &mut events, 500.0, player, second);

        // Each defender resolves on its own clock.
        resolve_timers(&mut world, &mut timers, &mut events, 550.0);
        assert_eq!(*world.get::<&VisualState>(first).unwrap(), VisualState::Normal);
        assert_eq!(*world.get::<&VisualState>(second).unwrap(), VisualState::Flashed);

        resolve_timers(&mut world, &mut timers, &mut events, 600.0);
        assert_eq!(*world.get::<&VisualState>(second).unwrap(), VisualState::Normal);
    }
}
