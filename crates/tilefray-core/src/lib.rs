//! Tilefray Core - Isometric Grid Combat Simulation Engine
//!
//! A frame-driven simulation of a small isometric arena: a click-steered
//! player, wandering enemies that chase and punch when the player gets
//! close, and melee combat with delayed hit resolution.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via
//! `hecs`:
//! - **Entities**: the player and each enemy
//! - **Components**: pure data (Position, Movement, Health, Melee, ...)
//! - **Systems**: free functions that query and update components
//!
//! Rendering, input capture, and camera work are collaborators: the engine
//! consumes click points and produces positions, depths, and visual states.
//!
//! # Example
//!
//! ```rust,no_run
//! use tilefray_core::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default());
//!
//! // Click somewhere in the world
//! sim.handle_click(Vec2::new(432.0, 270.0));
//!
//! // Run the frame loop
//! loop {
//!     sim.update(16.0); // ~60 FPS, delta in milliseconds
//!     let _frame = sim.snapshot();
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod map;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use hecs::Entity;

    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{SimEvent, Simulation};
    pub use crate::map::{Terrain, Tile, TileMap};
}
