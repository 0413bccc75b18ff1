//! Systems - logic that operates on components

mod behaviour;
mod combat;
mod depth;
mod movement;

pub use behaviour::*;
pub use combat::*;
pub use depth::*;
pub use movement::*;
