//! Movement system - advances actors toward their pending targets.

use hecs::{Entity, World};
use tilefray_logic::constants;

use crate::components::{Dead, GridPos, Movement, Position, Vec2};

/// Point an actor at a target. Replaces any move already in flight — one
/// pending target per actor, no queued path.
pub fn begin_move(
    world: &mut World,
    entity: Entity,
    destination: Vec2,
    target_grid: GridPos,
    speed: f32,
) {
    let _ = world.insert_one(
        entity,
        Movement {
            destination,
            target_grid,
            speed,
        },
    );
}

/// Advance every live mover by `delta_ms` of straight-line, constant-speed
/// travel.
///
/// Arrival uses a threshold rather than exact equality since a discrete
/// step can overshoot: once the remaining distance drops below the
/// threshold (or this frame's step would cross it), the actor snaps exactly
/// onto the destination and its grid coordinate is committed. This is the
/// sole place `Position::grid` changes.
pub fn movement_system(world: &mut World, delta_ms: f32) {
    let mut arrivals: Vec<Entity> = Vec::new();

    for (entity, (pos, movement)) in world
        .query::<(&mut Position, &Movement)>()
        .without::<&Dead>()
        .iter()
    {
        let dist = pos.world.distance(&movement.destination);
        let step = movement.speed * delta_ms / 1000.0;

        if dist < constants::ARRIVAL_THRESHOLD || step >= dist {
            pos.world = movement.destination;
            pos.grid = movement.target_grid;
            arrivals.push(entity);
        } else {
            let dir = (movement.destination - pos.world).normalize();
            pos.world = pos.world + dir * step;
        }
    }

    // Clearing the pending target zeroes the actor's velocity.
    for entity in arrivals {
        let _ = world.remove_one::<Movement>(entity);
    }
}

/// Whether an actor currently has a move in flight.
pub fn is_moving(world: &World, entity: Entity) -> bool {
    world.satisfies::<&Movement>(entity).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_at(world: &mut World, x: f32, y: f32) -> Entity {
        world.spawn((Position {
            world: Vec2::new(x, y),
            grid: GridPos::new(0, 0),
        },))
    }

    #[test]
    fn advances_at_constant_speed() {
        let mut world = World::new();
        let e = spawn_at(&mut world, 0.0, 0.0);
        begin_move(&mut world, e, Vec2::new(100.0, 0.0), GridPos::new(3, 0), 120.0);

        movement_system(&mut world, 16.0);

        let pos = world.get::<&Position>(e).unwrap();
        // 120 u/s over 16 ms = 1.92 units.
        assert!((pos.world.x - 1.92).abs() < 1e-3);
        assert_eq!(pos.world.y, 0.0);
        // Grid commits only at arrival.
        assert_eq!(pos.grid, GridPos::new(0, 0));
    }

    #[test]
    fn arrival_snaps_and_commits_grid() {
        let mut world = World::new();
        let e = spawn_at(&mut world, 0.0, 0.0);
        begin_move(&mut world, e, Vec2::new(20.0, 0.0), GridPos::new(1, 0), 120.0);

        for _ in 0..20 {
            movement_system(&mut world, 16.0);
        }

        let pos = *world.get::<&Position>(e).unwrap();
        assert_eq!(pos.world, Vec2::new(20.0, 0.0));
        assert_eq!(pos.grid, GridPos::new(1, 0));
        assert!(!is_moving(&world, e));
    }

    #[test]
    fn zero_length_move_completes_on_first_tick() {
        let mut world = World::new();
        let e = spawn_at(&mut world, 50.0, 50.0);
        begin_move(&mut world, e, Vec2::new(50.0, 50.0), GridPos::new(2, 2), 120.0);

        movement_system(&mut world, 16.0);

        let pos = *world.get::<&Position>(e).unwrap();
        assert_eq!(pos.world, Vec2::new(50.0, 50.0));
        assert_eq!(pos.grid, GridPos::new(2, 2));
        assert!(!is_moving(&world, e));
    }

    #[test]
    fn new_command_replaces_pending_target() {
        let mut world = World::new();
        let e = spawn_at(&mut world, 0.0, 0.0);
        begin_move(&mut world, e, Vec2::new(100.0, 0.0), GridPos::new(3, 0), 120.0);
        begin_move(&mut world, e, Vec2::new(0.0, 100.0), GridPos::new(0, 3), 120.0);

        let movement = *world.get::<&Movement>(e).unwrap();
        assert_eq!(movement.destination, Vec2::new(0.0, 100.0));
        assert_eq!(movement.target_grid, GridPos::new(0, 3));
    }

    #[test]
    fn dead_actors_do_not_move() {
        let mut world = World::new();
        let e = spawn_at(&mut world, 0.0, 0.0);
        begin_move(&mut world, e, Vec2::new(100.0, 0.0), GridPos::new(3, 0), 120.0);
        world.insert_one(e, Dead).unwrap();

        movement_system(&mut world, 16.0);

        let pos = *world.get::<&Position>(e).unwrap();
        assert_eq!(pos.world, Vec2::ZERO);
    }
}
