// Character state machine

use serde::{Deserialize, Serialize};

use super::character::CharacterInput;

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterState {
    /// Standing still
    #[default]
    Idle,
    /// Moving along the stage axis
    Walk,
    /// Holding guard
    Block,
    /// Performing a punch move
    Punch,
    /// Performing a kick move
    Kick,
    /// Taking damage, no control
    Stun,
    /// Knocked out for the rest of the round
    Ko,
}

impl CharacterState {
    /// Check if the character is performing a move
    pub fn is_attacking(&self) -> bool {
        matches!(self, Self::Punch | Self::Kick)
    }

    /// Check if the character is in a state driven by locomotion
    pub fn is_locomotion(&self) -> bool {
        matches!(self, Self::Idle | Self::Walk)
    }

    /// Check if player input affects the character in this state
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Idle | Self::Walk | Self::Block)
    }

    /// Lowercase tag used by presentation collaborators to pick a pose
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Block => "block",
            Self::Punch => "punch",
            Self::Kick => "kick",
            Self::Stun => "stun",
            Self::Ko => "ko",
        }
    }
}

/// Tracks the active state, the time spent in it and the optional duration
/// after which it counts as finished.
///
/// The machine holds no transition rules; `Character` decides when to call
/// [`StateMachine::enter`].
#[derive(Debug, Clone)]
pub struct StateMachine {
    current: CharacterState,
    elapsed: f32,
    /// `None` means the state never finishes on its own
    duration: Option<f32>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            current: CharacterState::Idle,
            elapsed: 0.0,
            duration: None,
        }
    }

    /// Enter a state unconditionally, even the current one
    pub fn enter(&mut self, state: CharacterState, duration: Option<f32>) {
        self.current = state;
        self.elapsed = 0.0;
        self.duration = duration;
    }

    /// Accumulate time in the current state. `dt` must be non-negative.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current
    }

    /// Seconds since the current state was entered
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Whether the elapsed time has reached the assigned duration
    pub fn is_finished(&self) -> bool {
        match self.duration {
            Some(duration) => self.elapsed >= duration,
            None => false,
        }
    }

    /// Fraction of the duration consumed, in [0, 1]. Unbounded states report 0.
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.elapsed / duration).min(1.0),
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

/// Select idle/walk/block from the current velocity and input.
///
/// Only meaningful while the character is in a locomotion or block state;
/// any other state is returned unchanged. Block input takes priority over
/// movement.
pub fn locomotion_state(
    current: CharacterState,
    velocity_x: f32,
    input: &CharacterInput,
    walk_threshold: f32,
) -> CharacterState {
    if !current.accepts_input() {
        return current;
    }

    if input.block {
        CharacterState::Block
    } else if current == CharacterState::Block {
        CharacterState::Idle
    } else if velocity_x.abs() > walk_threshold {
        CharacterState::Walk
    } else {
        CharacterState::Idle
    }
}
