// Input manager - routes action events from any source to the two players

use log::info;

use super::action::{Action, PlayerId};
use super::player::PlayerInput;
use crate::game::characters::CharacterInput;

/// Main input manager that coordinates input for both players
#[derive(Debug)]
pub struct InputManager {
    /// Input state for each player, indexed by `PlayerId::index`
    players: [PlayerInput; 2],

    /// A pause toggle was pressed since the last `take_pause_toggle`
    pause_requested: bool,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            players: [PlayerInput::new(PlayerId::One), PlayerInput::new(PlayerId::Two)],
            pause_requested: false,
        }
    }

    /// Handle one action event from a keyboard, gesture or scripted source
    pub fn handle(&mut self, player: PlayerId, action: Action, pressed: bool) {
        if action == Action::PauseToggle {
            if pressed {
                self.pause_requested = !self.pause_requested;
                info!("Pause toggle requested by {:?}", player);
            }
            return;
        }

        let input = &mut self.players[player.index()];
        if pressed {
            input.press(action);
        } else {
            input.release(action);
        }
    }

    /// Consume one step's input for `player`
    pub fn consume(&mut self, player: PlayerId) -> CharacterInput {
        self.players[player.index()].consume()
    }

    /// Consume one step's input for both players, in slot order
    pub fn consume_all(&mut self) -> [CharacterInput; 2] {
        [self.consume(PlayerId::One), self.consume(PlayerId::Two)]
    }

    /// Returns true once per pending pause toggle
    pub fn take_pause_toggle(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    /// Get input state for a specific player
    pub fn player(&self, player: PlayerId) -> &PlayerInput {
        &self.players[player.index()]
    }

    /// Reset all player input states
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.pause_requested = false;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
