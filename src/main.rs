//! Headless simulation run.
//!
//! Usage: `shanhai-sim [config.json] [seed]`
//!
//! A scripted player wanders the map and fights whatever it runs into,
//! choosing battle skills automatically. Set `RUST_LOG=debug` for per-step detail.

use std::error::Error;
use std::fs;

use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shanhai::battle::{BattleCharacter, BattleSystem, Side, TurnPhase};
use shanhai::{GameConfig, GameEngine, GameEvent, GameMode};

/// Simulated seconds before the run stops
const SIM_SECONDS: f32 = 600.0;
/// Real frame length fed to the engine
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Seconds between status reports
const REPORT_INTERVAL: f32 = 30.0;
/// Below this hp fraction the player heals instead of attacking
const HEAL_THRESHOLD: f32 = 0.4;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(42);

    puffin::set_scopes_on(std::env::var_os("SHANHAI_PROFILE").is_some());

    let mut engine = GameEngine::new(config, seed)?;
    info!("{}", engine.status_summary());

    let frames = (SIM_SECONDS / FRAME_TIME) as u32;
    let mut next_report = REPORT_INTERVAL;
    let mut victories = 0;

    for _ in 0..frames {
        puffin::GlobalProfiler::lock().new_frame();

        let t = engine.state.clock.time;
        engine.set_movement_input(Vec2::new((t * 0.15).cos(), (t * 0.1).sin()));
        if let Some(battle) = engine.battle_mut() {
            auto_battle(battle);
        }

        engine.frame(FRAME_TIME);

        for event in engine.drain_events() {
            match event {
                GameEvent::BattleEnded { victory: true } => victories += 1,
                GameEvent::LevelUp { new_level } => info!(new_level, "Player leveled up"),
                GameEvent::BossPhaseChanged { boss, phase } => info!(%boss, phase, "Boss phase"),
                _ => {}
            }
        }

        if engine.state.clock.time >= next_report {
            next_report += REPORT_INTERVAL;
            info!("{}", engine.status_summary());
        }
        if engine.mode == GameMode::GameOver {
            break;
        }
    }

    let player = &engine.state.player;
    info!(
        victories,
        level = player.stats.level,
        gold = player.gold,
        hp = player.stats.hp,
        alive = player.is_alive,
        "Simulation finished"
    );
    Ok(())
}

/// Take the player's turn if the battle is waiting for one.
fn auto_battle(battle: &mut BattleSystem) {
    let state = battle.state();
    if state.current_turn != Side::Player || state.turn_phase != TurnPhase::Selecting {
        return;
    }
    let Some(hero) = state.players.iter().find(|c| c.is_alive) else {
        return;
    };
    let Some(target) = state.enemies.iter().find(|c| c.is_alive) else {
        return;
    };
    let hero_id = hero.id.clone();
    let target_id = target.id.clone();
    let skill_id = choose_skill(hero);

    let chosen = battle
        .select_character(&hero_id)
        .and_then(|_| battle.select_skill(&skill_id))
        .or_else(|_| battle.select_skill("attack"))
        .and_then(|_| battle.select_target(&target_id));
    if let Err(err) = chosen {
        tracing::debug!(%err, "Auto battle move rejected");
    }
}

fn choose_skill(hero: &BattleCharacter) -> String {
    let ready = |id: &str| {
        hero.skill(id)
            .is_some_and(|s| s.current_cooldown == 0 && s.mana_cost <= hero.current_mp)
    };
    let hp_fraction = hero.current_hp as f32 / hero.max_hp().max(1) as f32;
    if hp_fraction < HEAL_THRESHOLD && ready("heal") {
        return "heal".to_string();
    }
    hero.skills
        .iter()
        .filter(|s| s.damage > 0 && ready(&s.id))
        .max_by_key(|s| s.damage)
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "attack".to_string())
}
