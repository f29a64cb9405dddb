// Character system
//
// This module contains everything related to the combatants:
// - Character data structure, motion and hit handling
// - Stats and archetypes (data-only fighter definitions)
// - Move definitions with timed attack windows
// - State machine for character behavior

pub mod character;
pub mod moves;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use character::{AttackSignature, Character, CharacterId, CharacterInput, HitCapsule};
pub use moves::{AttackWindow, MoveCatalog, MoveDefinition, MoveKind};
pub use state::{locomotion_state, CharacterState, StateMachine};
pub use stats::{Archetype, Stats};
