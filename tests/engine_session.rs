//! Whole-session runs through the engine.

use glam::Vec2;

use shanhai::battle::{Side, TurnPhase};
use shanhai::{GameConfig, GameEngine, GameEvent, GameMode};

#[test]
fn test_headless_session_keeps_invariants() {
    let config = GameConfig::default();
    let max = config.spawner.max_monsters;
    let mut engine = GameEngine::new(config, 2024).unwrap();

    for frame in 0..60 * 120 {
        engine.set_movement_input(Vec2::new(1.0, if frame % 600 < 300 { 0.5 } else { -0.5 }));
        if let Some(battle) = engine.battle_mut() {
            let state = battle.state();
            if state.current_turn == Side::Player && state.turn_phase == TurnPhase::Selecting {
                let target = state.enemies[0].id.clone();
                battle.select_character("player").unwrap();
                battle.select_skill("attack").unwrap();
                battle.select_target(&target).unwrap();
            }
        }
        engine.frame(1.0 / 60.0);

        assert!(engine.state.spawner.alive_count() <= max);
        assert_eq!(engine.battle().is_some(), engine.mode == GameMode::Battle);
        let p = engine.state.player.position;
        assert!((0.0..=2000.0).contains(&p.x) && (0.0..=2000.0).contains(&p.y));
        if engine.mode == GameMode::GameOver {
            break;
        }
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let run = |seed| {
        let mut engine = GameEngine::new(GameConfig::default(), seed).unwrap();
        let mut kinds = Vec::new();
        for _ in 0..60 * 90 {
            engine.frame(1.0 / 60.0);
            for event in engine.drain_events() {
                if let GameEvent::MonsterSpawned { kind, position, .. } = event {
                    kinds.push((kind, position));
                }
            }
        }
        kinds
    };
    assert_eq!(run(8), run(8));
}
