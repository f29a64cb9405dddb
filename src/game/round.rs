// Round and match orchestration for two combatants

use std::sync::Arc;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use super::characters::{Archetype, Character, CharacterId, CharacterInput};
use super::combat::{HitEvent, HitResolver};
use super::tuning::Tuning;
use crate::core::math::sign_or_one;
use crate::engine::input::PlayerId;

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Ko,
    TimeUp,
}

/// Outcomes reported by [`Match::step`], in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    Hit(HitEvent),
    /// `winner` is `None` for a draw
    RoundOver {
        winner: Option<PlayerId>,
        reason: RoundEnd,
    },
    MatchOver {
        winner: PlayerId,
    },
}

/// Two characters, the hit resolver and the round clock
#[derive(Debug)]
pub struct Match {
    players: [Character; 2],
    resolver: HitResolver,
    tuning: Tuning,
    /// Seconds left in the current round
    timer: f32,
    /// 1-based round counter, never reset
    round: u32,
}

impl Match {
    pub fn new(p1: Arc<Archetype>, p2: Arc<Archetype>, tuning: Tuning) -> Self {
        let players = [
            Character::new(Self::character_id(PlayerId::One), p1, tuning.clone(), Vec3::ZERO),
            Character::new(Self::character_id(PlayerId::Two), p2, tuning.clone(), Vec3::ZERO),
        ];
        let mut game = Self {
            players,
            resolver: HitResolver::new(),
            timer: tuning.round_time,
            tuning,
            round: 1,
        };
        game.reset_round();
        game
    }

    /// Character id used for a player slot
    pub fn character_id(player: PlayerId) -> CharacterId {
        player.index() as CharacterId + 1
    }

    fn player_for(id: CharacterId) -> PlayerId {
        if id == Self::character_id(PlayerId::One) {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    /// Run one fixed step
    pub fn step(&mut self, dt: f32, inputs: [CharacterInput; 2]) -> Vec<MatchEvent> {
        let mut events = Vec::new();

        self.timer = (self.timer - dt).max(0.0);
        if self.timer == 0.0 {
            let [p1, p2] = &self.players;
            let winner = if p1.health() > p2.health() {
                Some(PlayerId::One)
            } else if p2.health() > p1.health() {
                Some(PlayerId::Two)
            } else {
                None
            };
            self.finish_round(winner, RoundEnd::TimeUp, &mut events);
        }

        for (character, input) in self.players.iter_mut().zip(inputs) {
            character.set_input(input);
            character.update(dt);
        }

        let direction = sign_or_one(self.players[1].position().x - self.players[0].position().x);
        self.players[0].face(direction);
        self.players[1].face(-direction);

        // Both orderings, so trades in the same step both land
        for attacker in PlayerId::ALL {
            let (hitter, target) = pair_mut(&mut self.players, attacker);
            self.resolver
                .resolve(hitter, target, |event| events.push(MatchEvent::Hit(event)));
        }

        let ko = [self.players[0].is_ko(), self.players[1].is_ko()];
        if ko[0] || ko[1] {
            let winner = match ko {
                [true, true] => None,
                [true, false] => Some(PlayerId::Two),
                _ => Some(PlayerId::One),
            };
            self.finish_round(winner, RoundEnd::Ko, &mut events);
        }

        events
    }

    fn finish_round(&mut self, winner: Option<PlayerId>, reason: RoundEnd, events: &mut Vec<MatchEvent>) {
        info!("Round {} over ({:?}), winner: {:?}", self.round, reason, winner);
        events.push(MatchEvent::RoundOver { winner, reason });

        if let Some(winner) = winner {
            let character = &mut self.players[winner.index()];
            character.rounds_won += 1;
            if character.rounds_won >= self.tuning.rounds_to_win {
                info!("{:?} wins the match", winner);
                events.push(MatchEvent::MatchOver { winner });
                for player in &mut self.players {
                    player.rounds_won = 0;
                }
            }
        }

        self.round += 1;
        self.reset_round();
    }

    /// Put both characters back on their marks and clear the hit ledger
    pub fn reset_round(&mut self) {
        let offset = self.tuning.spawn_offset;
        self.players[0].reset(Vec3::new(-offset, 0.0, 0.0));
        self.players[1].reset(Vec3::new(offset, 0.0, 0.0));
        self.players[0].face(1.0);
        self.players[1].face(-1.0);
        self.resolver.reset();
        self.timer = self.tuning.round_time;
    }

    pub fn player(&self, player: PlayerId) -> &Character {
        &self.players[player.index()]
    }

    pub fn players(&self) -> &[Character; 2] {
        &self.players
    }

    /// Player slot of a character id reported in a [`HitEvent`]
    pub fn player_id(&self, id: CharacterId) -> PlayerId {
        Self::player_for(id)
    }

    pub fn rounds_won(&self, player: PlayerId) -> u32 {
        self.players[player.index()].rounds_won
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn resolver(&self) -> &HitResolver {
        &self.resolver
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

/// Split the player array into (attacker, defender)
fn pair_mut(players: &mut [Character; 2], attacker: PlayerId) -> (&Character, &mut Character) {
    let (first, second) = players.split_at_mut(1);
    match attacker {
        PlayerId::One => (&first[0], &mut second[0]),
        PlayerId::Two => (&second[0], &mut first[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capsule::Capsule;
    use crate::game::characters::{CharacterState, HitCapsule};

    const DT: f32 = 1.0 / 60.0;
    const IDLE: [CharacterInput; 2] = [
        CharacterInput {
            walk: 0,
            block: false,
            punch: false,
            kick: false,
        },
        CharacterInput {
            walk: 0,
            block: false,
            punch: false,
            kick: false,
        },
    ];

    fn knights(tuning: Tuning) -> Match {
        let knight = Arc::new(Archetype::quetzal_knight());
        Match::new(knight.clone(), knight, tuning)
    }

    fn punch() -> CharacterInput {
        CharacterInput {
            punch: true,
            ..Default::default()
        }
    }

    fn chip(damage: f32) -> HitCapsule {
        HitCapsule {
            capsule: Capsule::new(Vec3::ZERO, Vec3::ZERO, 0.0),
            damage,
            knockback: 0.0,
            stun: 0.0,
        }
    }

    fn place_close(game: &mut Match) {
        game.players[0].reset(Vec3::new(-0.4, 0.0, 0.0));
        game.players[1].reset(Vec3::new(0.4, 0.0, 0.0));
    }

    #[test]
    fn test_new_match_layout() {
        let game = knights(Tuning::default());
        let p1 = game.player(PlayerId::One);
        let p2 = game.player(PlayerId::Two);
        assert_eq!(p1.position().x, -2.0);
        assert_eq!(p2.position().x, 2.0);
        assert_eq!(p1.facing(), 1.0);
        assert_eq!(p2.facing(), -1.0);
        assert_eq!(game.timer(), 99.0);
        assert_eq!(game.round(), 1);
        assert_eq!(game.player_id(p2.id), PlayerId::Two);
    }

    #[test]
    fn test_idle_step_changes_nothing() {
        let mut game = knights(Tuning::default());
        let events = game.step(DT, IDLE);
        assert!(events.is_empty());
        assert_eq!(game.player(PlayerId::One).state(), CharacterState::Idle);
        assert!(game.timer() < 99.0);
    }

    #[test]
    fn test_out_of_range_punch_whiffs() {
        let mut game = knights(Tuning::default());
        let mut events = game.step(DT, [punch(), CharacterInput::default()]);
        for _ in 0..60 {
            events.extend(game.step(DT, IDLE));
        }
        assert!(events.is_empty());
        assert_eq!(game.player(PlayerId::Two).health(), 100.0);
    }

    #[test]
    fn test_close_punch_lands_once() {
        let mut game = knights(Tuning::default());
        place_close(&mut game);

        let mut events = game.step(DT, [punch(), CharacterInput::default()]);
        for _ in 0..60 {
            events.extend(game.step(DT, IDLE));
        }

        let hits: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                MatchEvent::Hit(hit) => Some(*hit),
                _ => None,
            })
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].attacker, 1);
        assert_eq!(hits[0].defender, 2);
        assert_eq!(game.player(PlayerId::Two).health(), 92.0);
    }

    #[test]
    fn test_mutual_trade_same_step() {
        let mut game = knights(Tuning::default());
        place_close(&mut game);

        let mut hits = 0;
        hits += game.step(DT, [punch(), punch()]).len();
        for _ in 0..30 {
            hits += game.step(DT, IDLE).len();
        }
        assert_eq!(hits, 2);
        assert_eq!(game.player(PlayerId::One).health(), 92.0);
        assert_eq!(game.player(PlayerId::Two).health(), 92.0);
    }

    #[test]
    fn test_ko_ends_round_and_resets() {
        let mut game = knights(Tuning::default());
        place_close(&mut game);
        game.players[1].receive_hit(&chip(95.0), 1.0);

        let mut events = game.step(DT, [punch(), CharacterInput::default()]);
        for _ in 0..30 {
            events.extend(game.step(DT, IDLE));
        }

        assert!(events.contains(&MatchEvent::RoundOver {
            winner: Some(PlayerId::One),
            reason: RoundEnd::Ko,
        }));
        assert_eq!(game.rounds_won(PlayerId::One), 1);
        assert_eq!(game.round(), 2);

        let p2 = game.player(PlayerId::Two);
        assert_eq!(p2.health(), 100.0);
        assert_eq!(p2.position().x, 2.0);
        assert_eq!(p2.state(), CharacterState::Idle);
        assert!(game.resolver().ledger().is_empty());
    }

    #[test]
    fn test_time_up_draw() {
        let tuning = Tuning {
            round_time: 1.0,
            ..Tuning::default()
        };
        let mut game = knights(tuning);
        let mut events = Vec::new();
        for _ in 0..61 {
            events.extend(game.step(DT, IDLE));
        }
        assert_eq!(
            events,
            vec![MatchEvent::RoundOver {
                winner: None,
                reason: RoundEnd::TimeUp,
            }]
        );
        assert_eq!(game.rounds_won(PlayerId::One), 0);
        assert_eq!(game.rounds_won(PlayerId::Two), 0);
        assert!(game.timer() > 0.9);
    }

    #[test]
    fn test_time_up_health_lead_wins() {
        let tuning = Tuning {
            round_time: 0.5,
            ..Tuning::default()
        };
        let mut game = knights(tuning);
        game.players[0].receive_hit(&chip(10.0), 1.0);

        let mut events = Vec::new();
        for _ in 0..40 {
            events.extend(game.step(DT, IDLE));
        }
        assert!(events.contains(&MatchEvent::RoundOver {
            winner: Some(PlayerId::Two),
            reason: RoundEnd::TimeUp,
        }));
        assert_eq!(game.rounds_won(PlayerId::Two), 1);
    }

    #[test]
    fn test_match_over_resets_tally() {
        let mut game = knights(Tuning::default());
        let mut events = Vec::new();
        game.finish_round(Some(PlayerId::Two), RoundEnd::Ko, &mut events);
        assert_eq!(game.rounds_won(PlayerId::Two), 1);

        game.finish_round(Some(PlayerId::Two), RoundEnd::Ko, &mut events);
        assert_eq!(
            events.last(),
            Some(&MatchEvent::MatchOver {
                winner: PlayerId::Two
            })
        );
        assert_eq!(game.rounds_won(PlayerId::One), 0);
        assert_eq!(game.rounds_won(PlayerId::Two), 0);
        assert_eq!(game.round(), 3);
    }

    #[test]
    fn test_characters_keep_facing_each_other() {
        let mut game = knights(Tuning::default());
        game.players[0].reset(Vec3::new(3.0, 0.0, 0.0));
        game.players[1].reset(Vec3::new(-3.0, 0.0, 0.0));
        game.step(DT, IDLE);
        assert_eq!(game.player(PlayerId::One).facing(), -1.0);
        assert_eq!(game.player(PlayerId::Two).facing(), 1.0);
    }
}
