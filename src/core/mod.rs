// Core utilities shared by the simulation: numeric helpers and capsule geometry

pub mod capsule;
pub mod math;

pub use capsule::{capsule_distance, closest_points_segments, Capsule};
