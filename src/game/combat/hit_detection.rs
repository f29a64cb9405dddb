// Hit resolution between an attacker and a defender

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::math::sign_or_one;
use crate::game::characters::{AttackSignature, Character, CharacterId};

/// A confirmed hit, reported once per credited attack window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub attacker: CharacterId,
    pub defender: CharacterId,
    /// Raw window damage, before any block reduction
    pub damage: f32,
}

/// Last credited signature per (attacker, defender) pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitLedger {
    entries: HashMap<CharacterId, HashMap<CharacterId, AttackSignature>>,
}

impl HitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attacker: CharacterId, defender: CharacterId) -> Option<AttackSignature> {
        self.entries
            .get(&attacker)
            .and_then(|targets| targets.get(&defender))
            .copied()
    }

    pub fn record(&mut self, attacker: CharacterId, defender: CharacterId, signature: AttackSignature) {
        self.entries.entry(attacker).or_default().insert(defender, signature);
    }

    /// Forget everything credited to `attacker`
    pub fn clear_attacker(&mut self, attacker: CharacterId) {
        self.entries.remove(&attacker);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}

/// Decides who hits whom, crediting each attack window at most once per
/// defender
#[derive(Debug, Default)]
pub struct HitResolver {
    ledger: HitLedger,
}

impl HitResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one ordered pair for the current step.
    ///
    /// On a landed hit the defender is mutated, `notify` is called and the
    /// event is returned. Only the first overlapping hitbox lands.
    pub fn resolve(
        &mut self,
        attacker: &Character,
        defender: &mut Character,
        mut notify: impl FnMut(HitEvent),
    ) -> Option<HitEvent> {
        let Some(signature) = attacker.attack_signature() else {
            self.ledger.clear_attacker(attacker.id);
            return None;
        };

        if self.ledger.get(attacker.id, defender.id) == Some(signature) {
            return None;
        }

        let hurt = defender.hurt_capsule();
        let hit = attacker
            .hitboxes()
            .into_iter()
            .find(|hitbox| hitbox.capsule.distance(&hurt) <= 0.0)?;

        self.ledger.record(attacker.id, defender.id, signature);
        let direction = sign_or_one(defender.position().x - attacker.position().x);
        defender.receive_hit(&hit, direction);

        let event = HitEvent {
            attacker: attacker.id,
            defender: defender.id,
            damage: hit.damage,
        };
        debug!(
            "{} hit {} for {:.1} ({:?} window {})",
            attacker.id, defender.id, hit.damage, signature.kind, signature.window
        );
        notify(event);
        Some(event)
    }

    /// Clear the whole ledger; required at every round boundary
    pub fn reset(&mut self) {
        self.ledger.clear();
    }

    pub fn ledger(&self) -> &HitLedger {
        &self.ledger
    }
}
