//! Enemy behavior system - per-enemy Wander/Chase decision loop.
//!
//! The state is recomputed from distance-to-player every tick with no
//! hysteresis; flicker at the exact sight boundary is accepted behavior.

use hecs::{Entity, World};
use rand::Rng;
use tilefray_logic::{combat, constants, iso};

use crate::components::{Dead, Enemy, GridPos, Player, Position, Vec2};
use crate::engine::SimEvent;
use crate::map::TileMap;
use crate::systems::combat::{attempt_attack, TimerQueue};
use crate::systems::movement::begin_move;

/// Run one behavior step for every live enemy.
///
/// - **Chase** while the player is alive and within sight range: a fresh
///   move command toward the player's current position every tick, plus a
///   melee attempt once inside attack range.
/// - **Wander** otherwise: accumulate time and, each time the delay
///   elapses, pick a random nearby cell; unwalkable picks are skipped until
///   the next cycle.
pub fn enemy_behaviour_system(
    world: &mut World,
    map: &TileMap,
    timers: &mut TimerQueue,
    events: &mut Vec<SimEvent>,
    now_ms: f64,
    delta_ms: f32,
    rng: &mut impl Rng,
) {
    let player: Option<(Entity, Vec2, GridPos)> = world
        .query::<&Position>()
        .with::<&Player>()
        .without::<&Dead>()
        .iter()
        .next()
        .map(|(e, pos)| (e, pos.world, pos.grid));

    let enemies: Vec<(Entity, Vec2, GridPos)> = world
        .query::<&Position>()
        .with::<&Enemy>()
        .without::<&Dead>()
        .iter()
        .map(|(e, pos)| (e, pos.world, pos.grid))
        .collect();

    for (entity, world_pos, grid_pos) in enemies {
        let seen = player
            .filter(|(_, player_pos, _)| world_pos.distance(player_pos) < constants::SIGHT_RANGE);

        match seen {
            Some((player_entity, player_pos, player_grid)) => {
                if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                    enemy.chasing = true;
                }
                // Continuously re-targeted, not a one-shot move.
                begin_move(world, entity, player_pos, player_grid, constants::ENEMY_SPEED);

                let dist = world_pos.distance(&player_pos);
                if combat::in_range(dist, constants::ATTACK_RANGE) {
                    attempt_attack(world, timers, events, now_ms, entity, player_entity);
                }
            }
            None => {
                let retarget = {
                    let mut enemy = match world.get::<&mut Enemy>(entity) {
                        Ok(e) => e,
                        Err(_) => continue,
                    };
                    enemy.chasing = false;
                    enemy.wander_timer_ms += delta_ms;
                    if enemy.wander_timer_ms > enemy.wander_delay_ms {
                        enemy.wander_timer_ms = 0.0;
                        enemy.wander_delay_ms = rng.gen_range(constants::WANDER_DELAY_MS);
                        true
                    } else {
                        false
                    }
                };

                if retarget {
                    let target = GridPos::new(
                        iso::clamp_to_grid(
                            grid_pos.x
                                + rng.gen_range(-constants::WANDER_RADIUS..=constants::WANDER_RADIUS),
                            map.size(),
                        ),
                        iso::clamp_to_grid(
                            grid_pos.y
                                + rng.gen_range(-constants::WANDER_RADIUS..=constants::WANDER_RADIUS),
                            map.size(),
                        ),
                    );

                    // Unwalkable pick: wait out the next timer cycle, no retry.
                    if map.is_walkable(target) {
                        if let Some(center) = map.tile_center(target) {
                            begin_move(world, entity, center, target, constants::ENEMY_SPEED);
                        }
                    }
                }
            }
        }
    }
}
