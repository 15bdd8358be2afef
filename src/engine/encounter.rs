//! Switching between exploration and battle.
//!
//! A living monster inside the trigger radius pulls the player into a
//! one-on-one battle. When the battle ends its result is written back to the
//! exploration state and further encounters are suppressed for a cooldown.

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::battle::{BattleCharacter, BattleResult, BattleState, BattleSystem};
use crate::config::{BattleConfig, EncounterConfig};
use crate::events::{EventQueue, GameEvent};
use crate::monsters::Monster;
use crate::systems::grant_exp;

use super::GameState;

/// Monster that should start a battle this step, if any
pub fn find_encounter(state: &GameState, config: &EncounterConfig) -> Option<Monster> {
    if !state.encounter_ready() {
        return None;
    }
    state
        .spawner
        .nearest_alive_within(state.player.position, config.trigger_radius)
}

/// Build a battle between the player and `monster`.
pub fn start_battle(
    state: &mut GameState,
    monster: &Monster,
    config: &BattleConfig,
    rng: StdRng,
    events: &mut EventQueue,
) -> BattleSystem {
    info!(monster = %monster.id(), kind = %monster.kind(), "Encounter");
    state.player.is_moving = false;
    events.push(GameEvent::BattleStarted {
        monster: monster.id(),
    });

    let players = vec![BattleCharacter::from_player(&state.player, config.starting_mp)];
    let enemies = vec![BattleCharacter::from_monster(monster, config.starting_mp)];
    BattleSystem::new(
        players,
        enemies,
        config.clone(),
        rng,
        Box::new(|battle: &BattleState| {
            debug!(
                round = battle.round,
                turn = ?battle.current_turn,
                phase = ?battle.turn_phase,
                "Battle state changed"
            );
        }),
    )
}

/// Write a finished battle back to exploration state.
pub fn apply_battle_result(
    state: &mut GameState,
    result: &BattleResult,
    cooldown: f32,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    if let Some(outcome) = result.players.iter().find(|p| p.id == state.player.id) {
        let player = &mut state.player;
        player.stats.hp = (outcome.hp as f32).clamp(0.0, player.stats.max_hp);
        if !outcome.is_alive {
            player.stats.hp = 0.0;
            player.is_alive = false;
            events.push(GameEvent::PlayerDied);
        }
    }

    if result.victory() {
        grant_exp(&mut state.player.stats, result.exp_reward, events);
        state.player.gold += result.gold_reward;
    }

    for outcome in &result.enemies {
        let Some(id) = outcome.monster_id else {
            continue;
        };
        if outcome.is_alive {
            state
                .spawner
                .with_monster_mut(id, |m| m.state.stats.hp = outcome.hp as f32);
        } else {
            state.spawner.with_monster_mut(id, |m| m.set_dead(events));
        }
    }

    state.encounter_ready_at = state.clock.time + cooldown;
    events.push(GameEvent::BattleEnded {
        victory: result.victory(),
    });
    info!(
        victory = result.victory(),
        rounds = result.rounds,
        exp = result.exp_reward,
        gold = result.gold_reward,
        "Returned to exploration"
    );
}
