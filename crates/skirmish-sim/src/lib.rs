//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs the combat systems at a fixed tick rate,
//! and produces TickSnapshots for presentation collaborators.

pub mod collision;
pub mod damage;
pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::{CombatEngine, SimConfig};
pub use skirmish_core as core;
