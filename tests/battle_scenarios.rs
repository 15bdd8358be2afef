//! Battle resolver scenarios and the bounded log.

use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shanhai::battle::damage::{raw_damage, resolve_damage};
use shanhai::battle::{
    BattleCharacter, BattleLog, BattleState, BattleSystem, DamageRoll, Effectiveness, Side,
    TurnPhase,
};
use shanhai::components::Player;
use shanhai::config::BattleConfig;
use shanhai::monsters::{Monster, MonsterKind};

#[test]
fn test_base_damage_example() {
    let raw = raw_damage(10, 20.0, 10.0, 0.3);
    assert_eq!(raw, 27.0);

    let roll = |variance, critical| DamageRoll { variance, critical };
    assert_eq!(resolve_damage(raw, roll(1.0, false), Effectiveness::Normal, 1.5), 27);
    assert_eq!(resolve_damage(raw, roll(1.2, false), Effectiveness::Normal, 1.5), 32);
    assert_eq!(resolve_damage(raw, roll(1.2, true), Effectiveness::Normal, 1.5), 48);
    assert_eq!(resolve_damage(raw, roll(0.8, false), Effectiveness::Normal, 1.5), 21);
}

fn fixed_config() -> BattleConfig {
    BattleConfig {
        variance_min: 1.0,
        variance_max: 1.0,
        crit_chance: 0.0,
        ..BattleConfig::default()
    }
}

fn duel(config: BattleConfig) -> BattleSystem {
    let mut player = Player::new("hero", Vec2::ZERO);
    player.stats.attack = 20.0;
    player.stats.defense = 5.0;

    let mut monster = Monster::new(MonsterKind::Orc, Vec2::ZERO);
    monster.state.stats.hp = 50.0;
    monster.state.stats.max_hp = 50.0;
    monster.state.stats.defense = 10.0;

    BattleSystem::new(
        vec![BattleCharacter::from_player(&player, config.starting_mp)],
        vec![BattleCharacter::from_monster(&monster, config.starting_mp)],
        config,
        StdRng::seed_from_u64(21),
        Box::new(|_: &BattleState| {}),
    )
}

#[test]
fn test_basic_attack_then_delayed_enemy_turn() {
    let config = fixed_config();
    let delay = config.enemy_turn_delay;
    let mut battle = duel(config);
    let enemy_id = battle.state().enemies[0].id.clone();

    battle.select_character("player").unwrap();
    battle.select_skill("attack").unwrap();
    battle.select_target(&enemy_id).unwrap();

    assert_eq!(battle.state().enemies[0].current_hp, 23);
    assert_eq!(battle.state().damage_dealt, 27);
    assert_eq!(battle.state().current_turn, Side::Enemy);
    assert!(battle.enemy_turn_pending());

    // Nothing happens before the pacing delay has elapsed
    battle.update(delay * 0.5);
    assert_eq!(battle.state().players[0].current_hp, 100);

    battle.update(delay);
    let state = battle.state();
    assert!(state.players[0].current_hp < 100);
    assert_eq!(state.current_turn, Side::Player);
    assert_eq!(state.turn_phase, TurnPhase::Selecting);
    assert_eq!(state.round, 2);
}

#[test]
fn test_fight_to_victory_pays_rewards() {
    let mut battle = duel(fixed_config());
    let enemy_id = battle.state().enemies[0].id.clone();

    for _ in 0..20 {
        if battle.is_over() {
            break;
        }
        battle.select_character("player").unwrap();
        battle.select_skill("attack").unwrap();
        battle.select_target(&enemy_id).unwrap();
        battle.update(10.0);
    }

    let result = battle.result().unwrap();
    assert!(result.victory());
    assert_eq!(result.exp_reward, battle.state().enemies[0].stats.level * 25);
    assert_eq!(result.gold_reward, battle.state().enemies[0].stats.level * 10);
    assert!(!result.enemies[0].is_alive);
    assert!(!battle.enemy_turn_pending());
}

proptest! {
    #[test]
    fn log_never_exceeds_capacity(count in 0usize..300) {
        let mut log = BattleLog::new(50);
        for i in 0..count {
            log.push(format!("entry {i}"));
            prop_assert!(log.len() <= 50);
        }
        if count > 0 {
            let latest = format!("entry {}", count - 1);
            prop_assert_eq!(log.latest(), Some(latest.as_str()));
            let oldest = format!("entry {}", count.saturating_sub(50));
            prop_assert_eq!(log.iter().next(), Some(oldest.as_str()));
        }
    }
}
