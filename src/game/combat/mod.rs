// Combat resolution

pub mod hit_detection;

pub use hit_detection::{HitEvent, HitLedger, HitResolver};
