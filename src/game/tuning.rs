// Simulation tuning constants, overridable from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DataError;

/// Every numeric constant the simulation uses that is not per-archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Stage
    /// Characters are clamped to [-stage_half_width, stage_half_width] on x
    pub stage_half_width: f32,
    /// Distance from stage centre at which each player spawns
    pub spawn_offset: f32,

    // Locomotion
    /// Maximum acceleration toward the target walk speed (units/s²)
    pub walk_accel: f32,
    /// Deceleration opposing current velocity (units/s²)
    pub ground_friction: f32,
    /// Target walk speed is `walk * stats.speed * walk_speed_scale`
    pub walk_speed_scale: f32,
    /// Speeds at or below this count as standing still
    pub walk_threshold: f32,

    // Combat
    /// Knockback multiplier applied while blocking
    pub block_knockback_factor: f32,
    pub max_health: f32,

    // Hurt capsule
    pub hurt_base_height: f32,
    pub hurt_head_height: f32,
    pub hurt_radius: f32,

    // Rounds
    /// Round length in seconds
    pub round_time: f32,
    /// Round wins needed to take the match
    pub rounds_to_win: u32,
}

pub const DEFAULT_TUNING: Tuning = Tuning {
    stage_half_width: 6.5,
    spawn_offset: 2.0,

    walk_accel: 14.0,
    ground_friction: 22.0,
    walk_speed_scale: 4.0,
    walk_threshold: 0.01,

    block_knockback_factor: 0.35,
    max_health: 100.0,

    hurt_base_height: 0.2,
    hurt_head_height: 1.7,
    hurt_radius: 0.35,

    round_time: 99.0,
    rounds_to_win: 2,
};

impl Default for Tuning {
    fn default() -> Self {
        DEFAULT_TUNING
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let positive = [
            ("stage_half_width", self.stage_half_width),
            ("max_health", self.max_health),
            ("round_time", self.round_time),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(DataError::Invalid(format!("{name} must be positive")));
            }
        }

        let non_negative = [
            ("walk_accel", self.walk_accel),
            ("ground_friction", self.ground_friction),
            ("walk_speed_scale", self.walk_speed_scale),
            ("walk_threshold", self.walk_threshold),
            ("block_knockback_factor", self.block_knockback_factor),
            ("hurt_radius", self.hurt_radius),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(DataError::Invalid(format!("{name} must not be negative")));
            }
        }

        if self.spawn_offset.abs() > self.stage_half_width {
            return Err(DataError::Invalid(
                "spawn_offset lies outside the stage".to_string(),
            ));
        }
        if self.hurt_head_height < self.hurt_base_height {
            return Err(DataError::Invalid(
                "hurt_head_height is below hurt_base_height".to_string(),
            ));
        }
        if self.rounds_to_win == 0 {
            return Err(DataError::Invalid("rounds_to_win must be at least 1".to_string()));
        }
        Ok(())
    }
}
