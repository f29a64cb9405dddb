use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use dueling_glyphs::engine::game_loop::GameLoop;
use dueling_glyphs::engine::input::{Action, InputManager, PlayerId};
use dueling_glyphs::game::characters::Archetype;
use dueling_glyphs::game::{Match, MatchEvent, Tuning};

/// Frames in one cycle of the scripted bout
const SCRIPT_CYCLE: u64 = 240;

/// Hard stop for the demo (two minutes at 60 Hz)
const MAX_FRAMES: u64 = 60 * 120;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Dueling Glyphs (headless)...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            Tuning::load(&path).with_context(|| format!("failed to load tuning from {}", path))?
        }
        None => Tuning::default(),
    };

    let p1 = Arc::new(Archetype::quetzal_knight());
    let p2 = Arc::new(Archetype::jaguar_brawler());
    p1.validate().context("invalid Quetzal Knight data")?;
    p2.validate().context("invalid Jaguar Brawler data")?;
    info!("{} vs {}", p1.name, p2.name);

    let mut game = Match::new(p1, p2, tuning);
    let mut game_loop = GameLoop::new();
    let mut input_manager = InputManager::new();

    let mut hits = 0u32;
    let mut match_winner = None;

    for frame in 0..MAX_FRAMES {
        for (player, action, pressed) in scripted_actions(frame) {
            input_manager.handle(player, action, pressed);
        }
        if input_manager.take_pause_toggle() {
            game_loop.toggle_pause();
        }

        let steps = game_loop.advance(frame_time(frame));
        for _ in 0..steps {
            let inputs = input_manager.consume_all();
            for event in game.step(game_loop.fixed_timestep(), inputs) {
                match event {
                    MatchEvent::Hit(hit) => {
                        hits += 1;
                        let defender = game.player_id(hit.defender);
                        info!(
                            "{:?} hit {:?} for {:.1} ({:.1} left)",
                            game.player_id(hit.attacker),
                            defender,
                            hit.damage,
                            game.player(defender).health()
                        );
                    }
                    MatchEvent::RoundOver { winner, reason } => {
                        info!("Round over by {:?}, winner: {:?}", reason, winner);
                    }
                    MatchEvent::MatchOver { winner } => {
                        match_winner = Some(winner);
                    }
                }
            }
        }

        if match_winner.is_some() {
            break;
        }
    }

    match match_winner {
        Some(winner) => info!("{:?} takes the match", winner),
        None => warn!("No match winner within {} frames", MAX_FRAMES),
    }
    info!(
        "Frames: {}, steps: {}, hits: {}, rounds played: {}",
        game_loop.frame_count(),
        game_loop.update_count(),
        hits,
        game.round() - 1
    );

    Ok(())
}

/// Synthetic host frame times: mostly 60 Hz with jitter and the odd hitch
fn frame_time(frame: u64) -> Duration {
    match frame % 600 {
        599 => Duration::from_millis(250),
        n if n % 3 == 0 => Duration::from_micros(17_500),
        _ => Duration::from_micros(16_200),
    }
}

/// Input events for `frame`: both players close in, trade blows, and P2
/// blocks for part of each cycle. One pause toggle pair per cycle.
fn scripted_actions(frame: u64) -> Vec<(PlayerId, Action, bool)> {
    let mut actions = Vec::new();
    match frame % SCRIPT_CYCLE {
        0 => {
            actions.push((PlayerId::One, Action::WalkRight, true));
            actions.push((PlayerId::Two, Action::WalkLeft, true));
        }
        18 => {
            actions.push((PlayerId::One, Action::WalkRight, false));
            actions.push((PlayerId::Two, Action::WalkLeft, false));
        }
        40 | 80 | 120 | 200 => actions.push((PlayerId::One, Action::Punch, true)),
        60 | 160 => actions.push((PlayerId::One, Action::Kick, true)),
        50 | 100 | 180 => actions.push((PlayerId::Two, Action::Punch, true)),
        140 => actions.push((PlayerId::Two, Action::Block, true)),
        170 => actions.push((PlayerId::Two, Action::Block, false)),
        220 | 230 => actions.push((PlayerId::Two, Action::PauseToggle, true)),
        _ => {}
    }
    actions
}
