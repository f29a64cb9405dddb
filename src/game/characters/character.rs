// Character entity: state machine, motion, health and active move

use std::sync::Arc;

use glam::Vec3;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::moves::MoveKind;
use super::state::{locomotion_state, CharacterState, StateMachine};
use super::stats::Archetype;
use crate::core::capsule::Capsule;
use crate::core::math::{clamp, sign_or_one};
use crate::game::tuning::Tuning;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Per-step input record for one character.
///
/// `punch` and `kick` are one-shot requests: the character clears them after
/// reading them once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInput {
    /// Horizontal intent, one of -1, 0, 1
    pub walk: i8,
    pub block: bool,
    pub punch: bool,
    pub kick: bool,
}

/// A capsule carrying a hit payload, built from an active attack window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCapsule {
    pub capsule: Capsule,
    pub damage: f32,
    pub knockback: f32,
    pub stun: f32,
}

/// Identity of one active window of one move instance.
///
/// `serial` increases every time a move starts, so two punches in a row never
/// share a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackSignature {
    pub kind: MoveKind,
    pub serial: u32,
    pub window: usize,
}

/// One combatant
#[derive(Debug, Clone)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Rounds won in the current match
    pub rounds_won: u32,

    archetype: Arc<Archetype>,
    tuning: Tuning,
    state_machine: StateMachine,

    // Motion
    position: Vec3,
    velocity: Vec3,
    /// 1.0 = facing +x, -1.0 = facing -x
    facing: f32,

    // Combat state
    health: f32,
    block_active: bool,
    current_move: Option<MoveKind>,
    window_index: Option<usize>,
    /// Seconds since the current move started
    move_elapsed: f32,
    move_serial: u32,

    input: CharacterInput,
}

impl Character {
    pub fn new(id: CharacterId, archetype: Arc<Archetype>, tuning: Tuning, position: Vec3) -> Self {
        Self {
            id,
            rounds_won: 0,
            health: tuning.max_health,
            archetype,
            tuning,
            state_machine: StateMachine::new(),
            position,
            velocity: Vec3::ZERO,
            facing: 1.0,
            block_active: false,
            current_move: None,
            window_index: None,
            move_elapsed: 0.0,
            move_serial: 0,
            input: CharacterInput::default(),
        }
    }

    /// Replace the input consumed by the next `update`
    pub fn set_input(&mut self, input: CharacterInput) {
        self.input = input;
    }

    /// Advance the character by one fixed step
    pub fn update(&mut self, dt: f32) {
        self.state_machine.advance(dt);

        match self.state_machine.state() {
            CharacterState::Idle | CharacterState::Walk => {
                self.update_locomotion(dt);
                if !self.block_active {
                    self.try_start_move();
                }
            }
            CharacterState::Block => self.update_block(dt),
            CharacterState::Punch | CharacterState::Kick => self.update_move(dt),
            CharacterState::Stun => {
                self.velocity = Vec3::ZERO;
                self.clear_move();
                if self.state_machine.is_finished() {
                    self.state_machine.enter(CharacterState::Idle, None);
                }
            }
            CharacterState::Ko => {
                self.velocity = Vec3::ZERO;
                self.clear_move();
            }
        }

        self.position += self.velocity * dt;
        let bound = self.tuning.stage_half_width;
        self.position.x = clamp(self.position.x, -bound, bound);

        // Attack requests are one-shot
        self.input.punch = false;
        self.input.kick = false;
    }

    fn update_locomotion(&mut self, dt: f32) {
        let walk = clamp(self.input.walk, -1, 1) as f32;
        let target = walk * self.archetype.stats.speed * self.tuning.walk_speed_scale;
        let max_delta = self.tuning.walk_accel * dt;
        self.velocity.x += clamp(target - self.velocity.x, -max_delta, max_delta);

        // Friction only brakes: no intent, or intent against the motion
        if walk == 0.0 || walk * self.velocity.x < 0.0 {
            self.apply_friction(dt);
        }
        if self.velocity.x.abs() <= self.tuning.walk_threshold {
            self.velocity.x = 0.0;
        }

        let current = self.state_machine.state();
        let next = locomotion_state(current, self.velocity.x, &self.input, self.tuning.walk_threshold);
        if next != current {
            self.state_machine.enter(next, None);
        }
        self.block_active = next == CharacterState::Block;
    }

    fn update_block(&mut self, dt: f32) {
        self.block_active = true;
        self.apply_friction(dt);

        let next = locomotion_state(
            CharacterState::Block,
            self.velocity.x,
            &self.input,
            self.tuning.walk_threshold,
        );
        if next != CharacterState::Block {
            self.state_machine.enter(next, None);
            self.block_active = false;
        }
    }

    fn apply_friction(&mut self, dt: f32) {
        let vx = self.velocity.x;
        let friction = vx.abs().min(self.tuning.ground_friction * dt);
        self.velocity.x -= vx.signum() * friction;
    }

    fn try_start_move(&mut self) {
        if self.input.punch {
            self.start_move(MoveKind::Punch);
        } else if self.input.kick {
            self.start_move(MoveKind::Kick);
        }
    }

    fn start_move(&mut self, kind: MoveKind) {
        let duration = self.archetype.moves.get(kind).total_duration();
        self.current_move = Some(kind);
        self.window_index = None;
        self.move_elapsed = 0.0;
        self.move_serial = self.move_serial.wrapping_add(1);
        self.state_machine.enter(kind.state(), Some(duration));
        trace!("character {} starts {:?} ({:.2}s)", self.id, kind, duration);
    }

    fn update_move(&mut self, dt: f32) {
        let Some(kind) = self.current_move else {
            self.state_machine.enter(CharacterState::Idle, None);
            return;
        };

        self.apply_friction(dt);
        self.move_elapsed += dt;
        self.window_index = self.archetype.moves.get(kind).active_window(self.move_elapsed);

        if self.state_machine.is_finished() {
            self.state_machine.enter(CharacterState::Idle, None);
            self.clear_move();
        }
    }

    fn clear_move(&mut self) {
        self.current_move = None;
        self.window_index = None;
        self.move_elapsed = 0.0;
    }

    /// Hit volumes of the active attack window, if any
    pub fn hitboxes(&self) -> Vec<HitCapsule> {
        let (Some(kind), Some(index)) = (self.current_move, self.window_index) else {
            return Vec::new();
        };
        let Some(window) = self.archetype.moves.get(kind).windows.get(index) else {
            return Vec::new();
        };

        let mirror = Vec3::new(self.facing, 1.0, 1.0);
        vec![HitCapsule {
            capsule: Capsule::new(
                self.position + window.offset_start * mirror,
                self.position + window.offset_end * mirror,
                window.radius,
            ),
            damage: window.damage,
            knockback: window.knockback,
            stun: window.stun,
        }]
    }

    /// Passive vulnerability volume, present in every state
    pub fn hurt_capsule(&self) -> Capsule {
        let Vec3 { x, z, .. } = self.position;
        Capsule::new(
            Vec3::new(x, self.tuning.hurt_base_height, z),
            Vec3::new(x, self.tuning.hurt_head_height, z),
            self.tuning.hurt_radius,
        )
    }

    /// Apply a landed hit. `direction` is the sign of the push along x.
    pub fn receive_hit(&mut self, hit: &HitCapsule, direction: f32) {
        let mut damage = hit.damage;
        let mut knockback = hit.knockback;
        if self.block_active {
            damage *= 1.0 - self.archetype.stats.block_efficiency;
            knockback *= self.tuning.block_knockback_factor;
        }

        self.health = clamp(self.health - damage, 0.0, self.tuning.max_health);
        self.block_active = false;

        if self.health <= 0.0 {
            self.state_machine.enter(CharacterState::Ko, None);
            self.velocity = Vec3::ZERO;
            debug!("character {} knocked out", self.id);
        } else {
            self.state_machine.enter(CharacterState::Stun, Some(hit.stun));
            self.velocity.x = knockback * direction / self.archetype.stats.mass;
        }
    }

    /// Identity of the currently active window, `None` when not hitting
    pub fn attack_signature(&self) -> Option<AttackSignature> {
        match (self.current_move, self.window_index) {
            (Some(kind), Some(window)) => Some(AttackSignature {
                kind,
                serial: self.move_serial,
                window,
            }),
            _ => None,
        }
    }

    /// Turn toward the sign of `direction`; zero faces +x
    pub fn face(&mut self, direction: f32) {
        self.facing = sign_or_one(direction);
    }

    /// Restore the round baseline at `position`. Round wins are kept.
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.state_machine.enter(CharacterState::Idle, None);
        self.health = self.tuning.max_health;
        self.block_active = false;
        self.clear_move();
        self.input = CharacterInput::default();
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.state_machine
    }

    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn is_blocking(&self) -> bool {
        self.block_active
    }

    pub fn is_ko(&self) -> bool {
        self.state_machine.state() == CharacterState::Ko
    }

    pub fn current_move(&self) -> Option<MoveKind> {
        self.current_move
    }

    pub fn window_index(&self) -> Option<usize> {
        self.window_index
    }

    /// Seconds since the current move started, 0 when idle
    pub fn move_elapsed(&self) -> f32 {
        self.move_elapsed
    }
}
