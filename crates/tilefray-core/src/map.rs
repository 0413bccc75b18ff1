//! Terrain grid — generation, walkability, and iso-space lookups.
//!
//! The map is generated once at scene start and immutable afterwards. Tiles
//! are owned exclusively by the map and looked up by coordinate.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tilefray_logic::{constants, iso};

use crate::components::{GridPos, Vec2};
use crate::config::SimConfig;

/// Terrain kind of a single cell. Walkability and render color both derive
/// from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    Floor,
    Highland,
    Water,
}

impl Terrain {
    /// Water is never walkable; floor and highland always are.
    pub fn walkable(&self) -> bool {
        !matches!(self, Terrain::Water)
    }

    /// Render color for the rendering collaborator (0xRRGGBB).
    pub fn color(&self) -> u32 {
        match self {
            Terrain::Floor => 0x8b7355,
            Terrain::Highland => 0x4a7c4e,
            Terrain::Water => 0x4a90e2,
        }
    }
}

/// One cell of the terrain grid. Immutable after generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    pub grid: GridPos,
    /// Iso anchor (top vertex of the diamond), world origin included.
    pub iso: Vec2,
    pub terrain: Terrain,
}

impl Tile {
    pub fn walkable(&self) -> bool {
        self.terrain.walkable()
    }
}

/// N×N terrain grid with iso-space lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    size: i32,
    tile_height: f32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Generate a fresh map. Terrain is drawn per cell: 15% water, 15%
    /// highland, 70% floor. Deterministic for a seeded rng.
    pub fn generate(config: &SimConfig, rng: &mut impl Rng) -> Self {
        let size = config.map_size;
        let mut tiles = Vec::with_capacity((size * size) as usize);

        for y in 0..size {
            for x in 0..size {
                let roll: f32 = rng.gen();
                let terrain = if roll < constants::WATER_CHANCE {
                    Terrain::Water
                } else if roll < constants::WATER_CHANCE + constants::HIGHLAND_CHANCE {
                    Terrain::Highland
                } else {
                    Terrain::Floor
                };

                let (iso_x, iso_y) =
                    iso::cartesian_to_iso(x, y, config.tile_width, config.tile_height);
                tiles.push(Tile {
                    grid: GridPos::new(x, y),
                    iso: Vec2::new(iso_x + config.origin.x, iso_y + config.origin.y),
                    terrain,
                });
            }
        }

        Self {
            size,
            tile_height: config.tile_height,
            tiles,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Look up a tile by coordinate.
    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        if (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y) {
            self.tiles.get((pos.y * self.size + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.tile(pos).is_some_and(|t| t.walkable())
    }

    /// Movement target for a cell: the visual center of its diamond.
    pub fn tile_center(&self, pos: GridPos) -> Option<Vec2> {
        self.tile(pos).map(|t| {
            let (cx, cy) = iso::tile_center_offset(t.iso.x, t.iso.y, self.tile_height);
            Vec2::new(cx, cy)
        })
    }

    /// Resolve a world point (e.g. a click) to a cell.
    ///
    /// Scans all tiles row-major for the closest anchor within `max_dist`;
    /// ties keep the first encountered. Returns `None` when nothing is in
    /// range or when the closest qualifying tile is unwalkable — a farther
    /// walkable tile is never silently substituted.
    pub fn nearest_walkable(&self, world: Vec2, max_dist: f32) -> Option<GridPos> {
        let mut best: Option<&Tile> = None;
        let mut best_dist = f32::INFINITY;

        for tile in &self.tiles {
            let dist = world.distance(&tile.iso);
            if dist < best_dist && dist < max_dist {
                best_dist = dist;
                best = Some(tile);
            }
        }

        best.filter(|t| t.walkable()).map(|t| t.grid)
    }

    /// All tiles in row-major order, for the rendering collaborator.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Single-terrain map for deterministic tests.
    #[cfg(test)]
    pub(crate) fn uniform(config: &SimConfig, terrain: Terrain) -> Self {
        let size = config.map_size;
        let mut tiles = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let (iso_x, iso_y) =
                    iso::cartesian_to_iso(x, y, config.tile_width, config.tile_height);
                tiles.push(Tile {
                    grid: GridPos::new(x, y),
                    iso: Vec2::new(iso_x + config.origin.x, iso_y + config.origin.y),
                    terrain,
                });
            }
        }
        Self {
            size,
            tile_height: config.tile_height,
            tiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_map(seed: u64) -> TileMap {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        TileMap::generate(&config, &mut rng)
    }

    #[test]
    fn every_coordinate_has_exactly_one_tile() {
        let map = test_map(1);
        for y in 0..map.size() {
            for x in 0..map.size() {
                let tile = map.tile(GridPos::new(x, y)).unwrap();
                assert_eq!(tile.grid, GridPos::new(x, y));
            }
        }
        assert!(map.tile(GridPos::new(-1, 0)).is_none());
        assert!(map.tile(GridPos::new(0, 20)).is_none());
    }

    #[test]
    fn walkability_follows_terrain() {
        let map = test_map(2);
        for tile in map.tiles() {
            match tile.terrain {
                Terrain::Water => assert!(!tile.walkable()),
                Terrain::Floor | Terrain::Highland => assert!(tile.walkable()),
            }
        }
    }

    #[test]
    fn generation_is_reproducible_for_a_seed() {
        let a = test_map(42);
        let b = test_map(42);
        for (ta, tb) in a.tiles().zip(b.tiles()) {
            assert_eq!(ta.terrain, tb.terrain);
            assert_eq!(ta.iso, tb.iso);
        }
    }

    #[test]
    fn nearest_walkable_rejects_out_of_threshold_points() {
        let map = test_map(3);
        // Far off the map entirely.
        assert!(map
            .nearest_walkable(Vec2::new(-5000.0, -5000.0), 50.0)
            .is_none());
    }

    #[test]
    fn nearest_walkable_resolves_a_tile_anchor_to_itself() {
        let map = test_map(4);
        for tile in map.tiles().filter(|t| t.walkable()) {
            assert_eq!(map.nearest_walkable(tile.iso, 50.0), Some(tile.grid));
        }
    }

    #[test]
    fn nearest_walkable_never_substitutes_a_farther_tile_for_water() {
        // Find a seed-independent check: clicking exactly on a water anchor
        // must resolve to None, not to some walkable neighbor.
        let map = test_map(5);
        for tile in map.tiles().filter(|t| !t.walkable()) {
            assert_eq!(map.nearest_walkable(tile.iso, 50.0), None);
        }
    }

    #[test]
    fn tile_center_sits_half_a_tile_below_the_anchor() {
        let map = test_map(6);
        let tile = *map.tile(GridPos::new(10, 10)).unwrap();
        let center = map.tile_center(tile.grid).unwrap();
        assert_eq!(center.x, tile.iso.x);
        assert_eq!(center.y, tile.iso.y + 16.0);
    }
}
