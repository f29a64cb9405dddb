// Character stats and archetypes
//
// Archetypes only differ in data: stats plus a move catalog. Everything
// cosmetic (meshes, colours) belongs to the renderer.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::moves::{AttackWindow, MoveCatalog, MoveDefinition, MoveKind};
use crate::game::DataError;

/// Immutable per-archetype stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Walk speed factor, multiplied by the tuning's walk speed scale
    pub speed: f32,
    /// Reference punch damage (the move windows carry the applied value)
    pub punch_damage: f32,
    /// Reference kick damage (the move windows carry the applied value)
    pub kick_damage: f32,
    /// Fraction of incoming damage absorbed while blocking, in [0, 1]
    pub block_efficiency: f32,
    /// Knockback divisor, must be positive
    pub mass: f32,
}

impl Stats {
    pub fn validate(&self) -> Result<(), DataError> {
        if !(0.0..=1.0).contains(&self.block_efficiency) {
            return Err(DataError::Invalid(format!(
                "block_efficiency {} outside [0, 1]",
                self.block_efficiency
            )));
        }
        if self.mass <= 0.0 {
            return Err(DataError::Invalid(format!("mass {} must be positive", self.mass)));
        }
        if self.speed < 0.0 {
            return Err(DataError::Invalid(format!("speed {} is negative", self.speed)));
        }
        Ok(())
    }
}

/// A playable fighter: display name, stats and moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub stats: Stats,
    pub moves: MoveCatalog,
}

impl Archetype {
    /// Light and quick, with short punishing windows
    pub fn quetzal_knight() -> Self {
        Self {
            name: "Quetzal Knight".to_string(),
            stats: Stats {
                speed: 1.1,
                punch_damage: 8.0,
                kick_damage: 12.0,
                block_efficiency: 0.7,
                mass: 0.9,
            },
            moves: MoveCatalog {
                punch: MoveDefinition {
                    kind: MoveKind::Punch,
                    startup: 0.3,
                    recovery: 0.35,
                    windows: vec![AttackWindow {
                        start: 0.12,
                        end: 0.24,
                        radius: 0.3,
                        offset_start: Vec3::new(0.4, 1.5, 0.0),
                        offset_end: Vec3::new(1.1, 1.6, 0.0),
                        damage: 8.0,
                        knockback: 2.4,
                        stun: 0.3,
                    }],
                },
                kick: MoveDefinition {
                    kind: MoveKind::Kick,
                    startup: 0.45,
                    recovery: 0.5,
                    windows: vec![AttackWindow {
                        start: 0.2,
                        end: 0.4,
                        radius: 0.35,
                        offset_start: Vec3::new(0.4, 1.0, 0.0),
                        offset_end: Vec3::new(1.3, 1.0, 0.0),
                        damage: 12.0,
                        knockback: 3.6,
                        stun: 0.45,
                    }],
                },
            },
        }
    }

    /// Heavy hitter with longer reach and slower recovery
    pub fn jaguar_brawler() -> Self {
        Self {
            name: "Jaguar Brawler".to_string(),
            stats: Stats {
                speed: 0.9,
                punch_damage: 10.0,
                kick_damage: 16.0,
                block_efficiency: 0.6,
                mass: 1.1,
            },
            moves: MoveCatalog {
                punch: MoveDefinition {
                    kind: MoveKind::Punch,
                    startup: 0.32,
                    recovery: 0.4,
                    windows: vec![AttackWindow {
                        start: 0.18,
                        end: 0.32,
                        radius: 0.35,
                        offset_start: Vec3::new(0.35, 1.5, 0.0),
                        offset_end: Vec3::new(0.9, 1.45, 0.0),
                        damage: 10.0,
                        knockback: 3.2,
                        stun: 0.4,
                    }],
                },
                kick: MoveDefinition {
                    kind: MoveKind::Kick,
                    startup: 0.5,
                    recovery: 0.6,
                    windows: vec![AttackWindow {
                        start: 0.28,
                        end: 0.52,
                        radius: 0.4,
                        offset_start: Vec3::new(0.3, 0.9, 0.0),
                        offset_end: Vec3::new(1.5, 0.9, 0.0),
                        damage: 16.0,
                        knockback: 4.0,
                        stun: 0.55,
                    }],
                },
            },
        }
    }

    /// Parse and validate an archetype from JSON
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let archetype: Archetype = serde_json::from_str(json)?;
        archetype.validate()?;
        Ok(archetype)
    }

    /// Load and validate an archetype from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        self.stats.validate()?;
        self.moves.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_archetypes_are_valid() {
        assert!(Archetype::quetzal_knight().validate().is_ok());
        assert!(Archetype::jaguar_brawler().validate().is_ok());
    }

    #[test]
    fn test_builtin_move_timing() {
        let knight = Archetype::quetzal_knight();
        assert!((knight.moves.punch.total_duration() - 0.65).abs() < 1e-6);
        assert_eq!(knight.moves.punch.windows.len(), 1);

        let brawler = Archetype::jaguar_brawler();
        assert!((brawler.moves.kick.total_duration() - 1.1).abs() < 1e-6);
        assert_eq!(brawler.moves.get(MoveKind::Kick).kind, MoveKind::Kick);
    }

    #[test]
    fn test_json_roundtrip_preserves_archetype() {
        let brawler = Archetype::jaguar_brawler();
        let json = serde_json::to_string(&brawler).unwrap();
        let parsed = Archetype::from_json_str(&json).unwrap();
        assert_eq!(parsed, brawler);
    }

    #[test]
    fn test_json_rejects_invalid_stats() {
        let mut brawler = Archetype::jaguar_brawler();
        brawler.stats.mass = 0.0;
        let json = serde_json::to_string(&brawler).unwrap();
        assert!(matches!(
            Archetype::from_json_str(&json),
            Err(DataError::Invalid(_))
        ));
    }

    #[test]
    fn test_json_rejects_malformed() {
        assert!(matches!(
            Archetype::from_json_str("{ not json"),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_block_efficiency_range() {
        let mut stats = Archetype::quetzal_knight().stats;
        stats.block_efficiency = 1.5;
        assert!(stats.validate().is_err());
    }
}
