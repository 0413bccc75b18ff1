//! Scene configuration — structural knobs and the RNG seed.
//!
//! Game rules (speeds, ranges, cooldowns) are constants in
//! `tilefray_logic::constants`; this struct holds what varies per scene.

use serde::{Deserialize, Serialize};
use tilefray_logic::constants;

use crate::components::{GridPos, Vec2};

/// Everything needed to build one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Terrain grid side length (N for an N×N map).
    pub map_size: i32,
    /// Isometric tile footprint in world units.
    pub tile_width: f32,
    pub tile_height: f32,
    /// World-space offset added to every tile anchor.
    pub origin: Vec2,
    /// Player start cell. Must be in bounds.
    pub player_spawn: GridPos,
    /// How many enemies to place.
    pub enemy_count: usize,
    /// Seed for the engine's RNG; identical seeds reproduce identical runs.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_size: constants::MAP_SIZE,
            tile_width: constants::TILE_WIDTH,
            tile_height: constants::TILE_HEIGHT,
            origin: Vec2::new(constants::ORIGIN_X, constants::ORIGIN_Y),
            player_spawn: GridPos::new(10, 10),
            enemy_count: constants::ENEMY_COUNT,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Construction-time preconditions: a usable grid and an in-bounds spawn.
    pub fn validate(&self) {
        assert!(self.map_size >= 1, "map_size must be at least 1");
        assert!(
            (0..self.map_size).contains(&self.player_spawn.x)
                && (0..self.map_size).contains(&self.player_spawn.y),
            "player_spawn must lie inside the grid"
        );
    }
}
