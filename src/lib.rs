//! Simulation core for a two-player 3D fighting game.
//!
//! - `core`: capsule geometry and scalar helpers
//! - `engine`: fixed-timestep stepper and input consumption
//! - `game`: characters, moves, hit resolution and round flow

pub mod core;
pub mod engine;
pub mod game;
