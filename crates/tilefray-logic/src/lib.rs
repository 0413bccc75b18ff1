//! Pure simulation logic for Tilefray.
//!
//! This crate contains all game rules that are independent of any ECS,
//! engine, or runtime. Functions take plain data and return results, making
//! them unit-testable and portable across the native engine, headless test
//! harnesses, and any future frontend.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Tuning values — speeds, ranges, cooldowns, delays |
//! | [`iso`] | Cartesian ↔ isometric coordinate transforms |
//! | [`combat`] | Melee gating, cooldown ticking, damage arithmetic |

pub mod combat;
pub mod constants;
pub mod iso;
