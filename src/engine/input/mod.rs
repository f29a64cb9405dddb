// Input handling system
//
// Turns abstract action events into per-step `CharacterInput` records. Where
// the events come from (keyboard, pose gestures, a script) is up to the
// caller; this module only defines the consumption contract.
//
// ## Architecture
//
// - `action`: Player identifiers and the abstract actions they can emit
// - `player`: Per-player held state and one-shot attack queue
// - `manager`: Routes events to players and tracks the pause toggle
//
// ## Usage Example
//
// ```rust
// use dueling_glyphs::engine::input::{Action, InputManager, PlayerId};
//
// let mut input_manager = InputManager::new();
//
// // Whenever an input source reports something
// input_manager.handle(PlayerId::One, Action::Punch, true);
//
// // Once per fixed simulation step
// let [p1, p2] = input_manager.consume_all();
// assert!(p1.punch);
// assert!(!p2.punch);
// ```

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, PlayerId};
pub use manager::InputManager;
pub use player::PlayerInput;
