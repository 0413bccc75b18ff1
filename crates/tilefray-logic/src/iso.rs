//! Cartesian ↔ isometric coordinate transforms.
//!
//! Grid cells live in cartesian (column, row) space; the world is rendered
//! in 2:1 isometric projection. All functions are pure and take the tile
//! footprint explicitly so the same math serves any tile size.

/// Project a grid coordinate onto the isometric plane.
///
/// Returns the tile's anchor (top vertex of the diamond), before any world
/// origin offset.
pub fn cartesian_to_iso(grid_x: i32, grid_y: i32, tile_w: f32, tile_h: f32) -> (f32, f32) {
    (
        (grid_x - grid_y) as f32 * (tile_w / 2.0),
        (grid_x + grid_y) as f32 * (tile_h / 2.0),
    )
}

/// Invert [`cartesian_to_iso`] for grid-aligned input.
///
/// Rounds to the nearest cell, so it also maps arbitrary iso points to the
/// cell whose anchor projects closest along both axes.
pub fn iso_to_cartesian(iso_x: f32, iso_y: f32, tile_w: f32, tile_h: f32) -> (i32, i32) {
    let a = iso_x / (tile_w / 2.0);
    let b = iso_y / (tile_h / 2.0);
    // a = x - y, b = x + y
    let x = (a + b) / 2.0;
    let y = (b - a) / 2.0;
    (x.round() as i32, y.round() as i32)
}

/// Visual center of a tile's diamond: the anchor shifted half a tile down.
/// Every movement command targets this point.
pub fn tile_center_offset(anchor_x: f32, anchor_y: f32, tile_h: f32) -> (f32, f32) {
    (anchor_x, anchor_y + tile_h / 2.0)
}

/// Euclidean distance between two world points.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Clamp a grid coordinate into `[0, size)`.
pub fn clamp_to_grid(v: i32, size: i32) -> i32 {
    v.clamp(0, size - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{TILE_HEIGHT, TILE_WIDTH};

    #[test]
    fn projects_known_points() {
        assert_eq!(cartesian_to_iso(0, 0, TILE_WIDTH, TILE_HEIGHT), (0.0, 0.0));
        assert_eq!(
            cartesian_to_iso(1, 0, TILE_WIDTH, TILE_HEIGHT),
            (32.0, 16.0)
        );
        assert_eq!(
            cartesian_to_iso(0, 1, TILE_WIDTH, TILE_HEIGHT),
            (-32.0, 16.0)
        );
        assert_eq!(
            cartesian_to_iso(10, 10, TILE_WIDTH, TILE_HEIGHT),
            (0.0, 320.0)
        );
    }

    #[test]
    fn projection_is_stable_across_calls() {
        for gx in 0..20 {
            for gy in 0..20 {
                let a = cartesian_to_iso(gx, gy, TILE_WIDTH, TILE_HEIGHT);
                let b = cartesian_to_iso(gx, gy, TILE_WIDTH, TILE_HEIGHT);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn iso_round_trips_for_grid_aligned_input() {
        for gx in 0..20 {
            for gy in 0..20 {
                let (ix, iy) = cartesian_to_iso(gx, gy, TILE_WIDTH, TILE_HEIGHT);
                assert_eq!(
                    iso_to_cartesian(ix, iy, TILE_WIDTH, TILE_HEIGHT),
                    (gx, gy)
                );
            }
        }
    }

    #[test]
    fn tile_center_is_half_height_below_anchor() {
        let (cx, cy) = tile_center_offset(100.0, 50.0, TILE_HEIGHT);
        assert_eq!(cx, 100.0);
        assert_eq!(cy, 66.0);
    }

    #[test]
    fn clamps_into_grid_bounds() {
        assert_eq!(clamp_to_grid(-3, 20), 0);
        assert_eq!(clamp_to_grid(7, 20), 7);
        assert_eq!(clamp_to_grid(25, 20), 19);
    }
}
