// Player and action definitions

use serde::{Deserialize, Serialize};

/// One of the two combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Zero-based slot index
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

/// Represents all abstract actions an input source can emit.
///
/// Keyboard bindings and pose gestures both translate into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // Movement
    WalkLeft,
    WalkRight,
    Block,

    // Attacks
    Punch,
    Kick,

    // Meta actions
    PauseToggle,
}

impl Action {
    /// Attacks are one-shot requests queued on press
    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Punch | Self::Kick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_index() {
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
        assert_eq!(PlayerId::Two.opponent(), PlayerId::One);
    }

    #[test]
    fn test_attack_actions() {
        assert!(Action::Punch.is_attack());
        assert!(Action::Kick.is_attack());
        assert!(!Action::Block.is_attack());
        assert!(!Action::WalkLeft.is_attack());
    }
}
