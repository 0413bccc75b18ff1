//! Render snapshot - the engine's output surface for drawing collaborators.
//!
//! The simulation never draws. Each frame the renderer pulls a plain-data
//! view: actor positions, depths, and visual states, plus the immutable
//! tile layout with terrain colors.

use serde::Serialize;

use crate::components::{Dead, Depth, GridPos, Player, Position, Vec2, VisualState};
use crate::engine::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Per-actor render data. Dead actors are included with their terminal
/// visual state so the renderer can show the corpse or play a death effect.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActorView {
    pub id: u64,
    pub kind: ActorKind,
    pub position: Vec2,
    pub depth: f32,
    pub visual: VisualState,
}

/// Per-tile render data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TileView {
    pub grid: GridPos,
    pub iso: Vec2,
    pub color: u32,
}

/// One frame's worth of render input.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ms: f64,
    pub actors: Vec<ActorView>,
    pub tiles: Vec<TileView>,
}

impl Simulation {
    /// Assemble the current frame's render view.
    pub fn snapshot(&self) -> Snapshot {
        let mut actors = Vec::new();

        for (entity, (pos, depth, visual)) in self
            .world
            .query::<(&Position, &Depth, &VisualState)>()
            .iter()
        {
            let kind = if self.world.satisfies::<&Player>(entity).unwrap_or(false) {
                ActorKind::Player
            } else {
                ActorKind::Enemy
            };
            // Dead actors keep reporting their last committed state.
            let visual = if self.world.satisfies::<&Dead>(entity).unwrap_or(false) {
                VisualState::Dead
            } else {
                *visual
            };
            actors.push(ActorView {
                id: entity.to_bits().get(),
                kind,
                position: pos.world,
                depth: depth.0,
                visual,
            });
        }

        let tiles = self
            .map
            .tiles()
            .map(|t| TileView {
                grid: t.grid,
                iso: t.iso,
                color: t.terrain.color(),
            })
            .collect();

        Snapshot {
            time_ms: self.now_ms(),
            actors,
            tiles,
        }
    }
}
