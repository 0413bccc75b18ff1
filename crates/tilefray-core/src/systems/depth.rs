//! Depth system - recomputes render ordering from world Y.

use hecs::World;
use tilefray_logic::constants;

use crate::components::{Dead, Depth, Position};

/// Recompute every live actor's depth from its current world Y. The value
/// is an output for the rendering collaborator; nothing in the simulation
/// reads it back.
pub fn depth_system(world: &mut World) {
    for (_, (pos, depth)) in world
        .query::<(&Position, &mut Depth)>()
        .without::<&Dead>()
        .iter()
    {
        depth.0 = constants::DEPTH_BASE + pos.world.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GridPos, Vec2};

    #[test]
    fn depth_tracks_world_y() {
        let mut world = World::new();
        let e = world.spawn((
            Position {
                world: Vec2::new(10.0, 250.0),
                grid: GridPos::new(0, 0),
            },
            Depth::default(),
        ));

        depth_system(&mut world);
        assert_eq!(world.get::<&Depth>(e).unwrap().0, 350.0);

        world.get::<&mut Position>(e).unwrap().world.y = 40.0;
        depth_system(&mut world);
        assert_eq!(world.get::<&Depth>(e).unwrap().0, 140.0);
    }
}
