//! Simulation engine - main entry point for running the simulation

use hecs::{Entity, World};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilefray_logic::constants;

use crate::components::*;
use crate::config::SimConfig;
use crate::map::TileMap;
use crate::systems::*;

/// Noteworthy happenings of a run, drained by the caller (UI text, sound,
/// scoring). Pure output; no system reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// The player landed a hit on an enemy.
    PlayerHit { enemy: Entity },
    /// An enemy landed a hit on the player.
    EnemyHit { enemy: Entity },
    /// An enemy's death committed after its reaction window.
    EnemyDefeated { enemy: Entity },
    /// The player's death committed after its reaction window.
    PlayerDefeated,
}

/// Main simulation engine
pub struct Simulation {
    /// ECS world containing all actors
    pub world: World,
    /// Immutable terrain grid
    pub map: TileMap,
    config: SimConfig,
    rng: StdRng,
    timers: TimerQueue,
    events: Vec<SimEvent>,
    /// Simulation clock in milliseconds since start
    now_ms: f64,
    player: Entity,
}

impl Simulation {
    /// Build a full scene: generate the map, place the player, scatter
    /// enemies on distinct walkable cells.
    pub fn new(config: SimConfig) -> Self {
        config.validate();

        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let map = TileMap::generate(&config, &mut rng);

        let spawn = config.player_spawn;
        let spawn_center = map
            .tile_center(spawn)
            .expect("player_spawn lies inside the grid");
        let player = world.spawn((
            Player,
            Position {
                world: spawn_center,
                grid: spawn,
            },
            Health::full(constants::PLAYER_MAX_HEALTH),
            Melee::new(constants::PLAYER_DAMAGE, constants::PLAYER_ATTACK_COOLDOWN_MS),
            VisualState::Normal,
            Depth::default(),
        ));

        let mut sim = Self {
            world,
            map,
            config,
            rng,
            timers: TimerQueue::default(),
            events: Vec::new(),
            now_ms: 0.0,
            player,
        };
        sim.spawn_enemies();
        sim
    }

    fn spawn_enemies(&mut self) {
        let size = self.map.size();
        let mut occupied = vec![self.config.player_spawn];

        for _ in 0..self.config.enemy_count {
            let mut placed = None;
            for _ in 0..constants::SPAWN_ATTEMPTS {
                let candidate = GridPos::new(
                    self.rng.gen_range(0..size),
                    self.rng.gen_range(0..size),
                );
                if self.map.is_walkable(candidate) && !occupied.contains(&candidate) {
                    placed = Some(candidate);
                    break;
                }
            }
            // A map can be too crowded or too wet; skip the enemy then.
            let Some(grid) = placed else { continue };
            let Some(center) = self.map.tile_center(grid) else {
                continue;
            };

            occupied.push(grid);
            let delay = self.rng.gen_range(constants::WANDER_DELAY_INITIAL_MS);
            self.world.spawn((
                Enemy::new(delay),
                Position {
                    world: center,
                    grid,
                },
                Health::full(constants::ENEMY_MAX_HEALTH),
                Melee::new(constants::ENEMY_DAMAGE, constants::ENEMY_ATTACK_COOLDOWN_MS),
                VisualState::Normal,
                Depth::default(),
            ));
        }
    }

    /// Feed one click from the input collaborator, in world coordinates.
    ///
    /// Returns whether a move was issued. Rejected when the player is dead
    /// or already moving, when no tile lies within the click threshold, or
    /// when the nearest tile is unwalkable.
    pub fn handle_click(&mut self, world_pos: Vec2) -> bool {
        if self.world.satisfies::<&Dead>(self.player).unwrap_or(true) {
            return false;
        }
        // One pending move at a time.
        if is_moving(&self.world, self.player) {
            return false;
        }

        let Some(grid) = self
            .map
            .nearest_walkable(world_pos, constants::CLICK_THRESHOLD)
        else {
            return false;
        };
        let Some(center) = self.map.tile_center(grid) else {
            return false;
        };

        debug!("click -> move to {:?}", grid);
        begin_move(
            &mut self.world,
            self.player,
            center,
            grid,
            constants::PLAYER_SPEED,
        );
        true
    }

    /// Advance the simulation by one frame.
    ///
    /// Fixed order: due timers fire, motion advances and commits arrivals,
    /// each live enemy runs its behavior step, cooldowns tick, the idle
    /// player auto-attacks, and render depths are recomputed.
    pub fn update(&mut self, delta_ms: f32) {
        self.now_ms += f64::from(delta_ms);

        resolve_timers(
            &mut self.world,
            &mut self.timers,
            &mut self.events,
            self.now_ms,
        );
        movement_system(&mut self.world, delta_ms);
        enemy_behaviour_system(
            &mut self.world,
            &self.map,
            &mut self.timers,
            &mut self.events,
            self.now_ms,
            delta_ms,
            &mut self.rng,
        );
        cooldown_system(&mut self.world, delta_ms);
        self.player_auto_attack();
        depth_system(&mut self.world);
    }

    /// The player has no manual attack trigger; standing still next to an
    /// enemy with a ready cooldown initiates the swing. The mid-swing flag
    /// plus the cooldown guarantee at most one hit per attack cycle even
    /// with several enemies in range.
    fn player_auto_attack(&mut self) {
        if self.world.satisfies::<&Dead>(self.player).unwrap_or(true) {
            return;
        }
        if is_moving(&self.world, self.player) {
            return;
        }
        {
            let Ok(melee) = self.world.get::<&Melee>(self.player) else {
                return;
            };
            if melee.attacking || melee.cooldown_ms > 0.0 {
                return;
            }
        }

        let targets: Vec<Entity> = self
            .world
            .query::<&Position>()
            .with::<&Enemy>()
            .without::<&Dead>()
            .iter()
            .map(|(e, _)| e)
            .collect();

        for enemy in targets {
            let outcome = attempt_attack(
                &mut self.world,
                &mut self.timers,
                &mut self.events,
                self.now_ms,
                self.player,
                enemy,
            );
            if outcome == tilefray_logic::combat::AttackOutcome::Hit {
                break;
            }
        }
    }

    // ── Accessors for collaborators and tests ───────────────────────────

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_player_moving(&self) -> bool {
        is_moving(&self.world, self.player)
    }

    pub fn player_health(&self) -> u32 {
        self.world
            .get::<&Health>(self.player)
            .map(|h| h.current)
            .unwrap_or(0)
    }

    /// Enemies still participating in the simulation.
    pub fn live_enemies(&self) -> Vec<Entity> {
        self.world
            .query::<&Enemy>()
            .without::<&Dead>()
            .iter()
            .map(|(e, _)| e)
            .collect()
    }

    /// Drain the event feed accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
