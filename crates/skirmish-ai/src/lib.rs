//! AI decision logic for the SKIRMISH combat simulation.
//!
//! Pure functions that compute target detection and engagement decisions
//! from plain data. No ECS dependency — the sim layer gathers world
//! state, calls these, and applies the results.

pub mod detection;
pub mod engagement;

#[cfg(test)]
mod tests;
