// Per-player input state management

use super::action::{Action, PlayerId};
use crate::game::characters::CharacterInput;

/// Accumulates press/release events for one player between simulation steps
/// and hands them to the simulation as a [`CharacterInput`].
///
/// Walking and blocking are held states; punch and kick are queued on press
/// and cleared by [`PlayerInput::consume`].
#[derive(Debug, Clone)]
pub struct PlayerInput {
    player_id: PlayerId,

    walk_left: bool,
    walk_right: bool,
    block: bool,

    punch_queued: bool,
    kick_queued: bool,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            walk_left: false,
            walk_right: false,
            block: false,
            punch_queued: false,
            kick_queued: false,
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        match action {
            Action::WalkLeft => self.walk_left = true,
            Action::WalkRight => self.walk_right = true,
            Action::Block => self.block = true,
            Action::Punch => self.punch_queued = true,
            Action::Kick => self.kick_queued = true,
            Action::PauseToggle => {}
        }
    }

    /// Register an action release. Releasing an attack never queues it.
    pub fn release(&mut self, action: Action) {
        match action {
            Action::WalkLeft => self.walk_left = false,
            Action::WalkRight => self.walk_right = false,
            Action::Block => self.block = false,
            Action::Punch | Action::Kick | Action::PauseToggle => {}
        }
    }

    /// Check if an action is held or queued
    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::WalkLeft => self.walk_left,
            Action::WalkRight => self.walk_right,
            Action::Block => self.block,
            Action::Punch => self.punch_queued,
            Action::Kick => self.kick_queued,
            Action::PauseToggle => false,
        }
    }

    /// Horizontal intent: -1, 0 or 1
    pub fn walk_direction(&self) -> i8 {
        i8::from(self.walk_right) - i8::from(self.walk_left)
    }

    /// Snapshot the input for one simulation step, clearing queued attacks
    pub fn consume(&mut self) -> CharacterInput {
        let input = CharacterInput {
            walk: self.walk_direction(),
            block: self.block,
            punch: self.punch_queued,
            kick: self.kick_queued,
        };
        self.punch_queued = false;
        self.kick_queued = false;
        input
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        *self = Self::new(self.player_id);
    }
}
