// Move definitions: timing and attack windows for punch and kick

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::CharacterState;
use crate::game::DataError;

/// The attack actions a character can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Punch,
    Kick,
}

impl MoveKind {
    /// State the character enters while performing this move
    pub fn state(&self) -> CharacterState {
        match self {
            Self::Punch => CharacterState::Punch,
            Self::Kick => CharacterState::Kick,
        }
    }
}

/// A time interval within a move during which a hit volume is active.
///
/// Offsets are relative to the owner's position and describe a character
/// facing +x; they are mirrored on x when the owner faces -x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackWindow {
    /// Seconds since move start when the window opens (inclusive)
    pub start: f32,
    /// Seconds since move start when the window closes (inclusive)
    pub end: f32,
    pub radius: f32,
    pub offset_start: Vec3,
    pub offset_end: Vec3,
    pub damage: f32,
    pub knockback: f32,
    /// Stun inflicted on the defender, in seconds
    pub stun: f32,
}

impl AttackWindow {
    pub fn contains(&self, t: f32) -> bool {
        t >= self.start && t <= self.end
    }

    fn overlaps(&self, other: &AttackWindow) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Timing and hit windows of one attack action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub kind: MoveKind,
    pub startup: f32,
    pub recovery: f32,
    #[serde(default)]
    pub windows: Vec<AttackWindow>,
}

impl MoveDefinition {
    /// Total time the character is busy with this move
    pub fn total_duration(&self) -> f32 {
        self.startup + self.recovery
    }

    /// Index of the window active at `t` seconds into the move.
    ///
    /// If windows overlap the first one in list order wins.
    pub fn active_window(&self, t: f32) -> Option<usize> {
        self.windows.iter().position(|window| window.contains(t))
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.startup < 0.0 || self.recovery < 0.0 || self.total_duration() <= 0.0 {
            return Err(DataError::Invalid(format!(
                "{:?}: startup and recovery must be non-negative with a positive sum",
                self.kind
            )));
        }

        for (index, window) in self.windows.iter().enumerate() {
            if window.start > window.end || window.start < 0.0 {
                return Err(DataError::Invalid(format!(
                    "{:?} window {}: interval [{}, {}] is invalid",
                    self.kind, index, window.start, window.end
                )));
            }
            if window.radius < 0.0 || window.stun < 0.0 {
                return Err(DataError::Invalid(format!(
                    "{:?} window {}: radius and stun must be non-negative",
                    self.kind, index
                )));
            }
        }

        for (i, a) in self.windows.iter().enumerate() {
            for (j, b) in self.windows.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(DataError::Invalid(format!(
                        "{:?}: windows {} and {} overlap",
                        self.kind, i, j
                    )));
                }
            }
        }

        Ok(())
    }
}

/// The moves available to one archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCatalog {
    pub punch: MoveDefinition,
    pub kick: MoveDefinition,
}

impl MoveCatalog {
    pub fn get(&self, kind: MoveKind) -> &MoveDefinition {
        match kind {
            MoveKind::Punch => &self.punch,
            MoveKind::Kick => &self.kick,
        }
    }

    pub fn validate(&self) -> Result<(), DataError> {
        for kind in [MoveKind::Punch, MoveKind::Kick] {
            let definition = self.get(kind);
            if definition.kind != kind {
                return Err(DataError::Invalid(format!(
                    "{:?} slot holds a {:?} move",
                    kind, definition.kind
                )));
            }
            definition.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f32, end: f32) -> AttackWindow {
        AttackWindow {
            start,
            end,
            radius: 0.3,
            offset_start: Vec3::new(0.4, 1.5, 0.0),
            offset_end: Vec3::new(1.1, 1.6, 0.0),
            damage: 8.0,
            knockback: 2.4,
            stun: 0.3,
        }
    }

    fn punch(windows: Vec<AttackWindow>) -> MoveDefinition {
        MoveDefinition {
            kind: MoveKind::Punch,
            startup: 0.3,
            recovery: 0.35,
            windows,
        }
    }

    #[test]
    fn test_total_duration() {
        assert!((punch(vec![]).total_duration() - 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let w = window(0.12, 0.24);
        assert!(w.contains(0.12));
        assert!(w.contains(0.24));
        assert!(!w.contains(0.11));
        assert!(!w.contains(0.25));
    }

    #[test]
    fn test_active_window_multi_hit() {
        let definition = punch(vec![window(0.1, 0.2), window(0.3, 0.4)]);
        assert_eq!(definition.active_window(0.05), None);
        assert_eq!(definition.active_window(0.15), Some(0));
        assert_eq!(definition.active_window(0.25), None);
        assert_eq!(definition.active_window(0.35), Some(1));
    }

    #[test]
    fn test_active_window_first_match_wins() {
        let definition = punch(vec![window(0.1, 0.3), window(0.2, 0.4)]);
        assert_eq!(definition.active_window(0.25), Some(0));
    }

    #[test]
    fn test_no_windows_never_active() {
        let definition = punch(vec![]);
        assert_eq!(definition.active_window(0.2), None);
        assert!(definition.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let definition = punch(vec![window(0.1, 0.3), window(0.2, 0.4)]);
        assert!(matches!(definition.validate(), Err(DataError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let definition = punch(vec![window(0.3, 0.1)]);
        assert!(definition.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let mut definition = punch(vec![]);
        definition.startup = 0.0;
        definition.recovery = 0.0;
        assert!(definition.validate().is_err());
    }

    #[test]
    fn test_catalog_slot_mismatch() {
        let catalog = MoveCatalog {
            punch: punch(vec![window(0.1, 0.2)]),
            kick: punch(vec![]),
        };
        assert!(catalog.validate().is_err());
    }
}
