//! Spawner population and placement properties.

use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shanhai::components::Player;
use shanhai::config::SpawnerConfig;
use shanhai::constants::SPAWN_MIN_TARGET_DISTANCE;
use shanhai::spawning::MonsterSpawner;
use shanhai::{EventQueue, GameEvent};

fn busy_config(max_monsters: usize) -> SpawnerConfig {
    SpawnerConfig {
        max_monsters,
        spawn_interval: 0.5,
        ..SpawnerConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn population_never_exceeds_cap(
        seed in any::<u64>(),
        max_monsters in 1usize..12,
        lowered_cap in 1usize..6,
    ) {
        let mut spawner = MonsterSpawner::new(busy_config(max_monsters), StdRng::seed_from_u64(seed));
        let mut player = Player::new("hero", Vec2::new(1000.0, 1000.0));
        let mut events = EventQueue::new();
        prop_assert!(spawner.alive_count() <= max_monsters);

        let dt = 0.25;
        let mut cap = max_monsters;
        for tick in 1..=200 {
            if tick == 100 {
                cap = lowered_cap;
                spawner.update_config(busy_config(cap), &mut events);
                prop_assert!(spawner.alive_count() <= cap);
            }
            spawner.update(Some(&mut player), dt, tick as f32 * dt, &mut events);
            prop_assert!(spawner.alive_count() <= cap);
        }
    }

    #[test]
    fn spawns_avoid_safe_zone_and_target(
        seed in any::<u64>(),
        px in 0.0f32..2000.0,
        py in 0.0f32..2000.0,
    ) {
        let mut config = busy_config(10);
        config.initial_monsters.clear();
        let safe_zone = config.safe_zone;
        let mut spawner = MonsterSpawner::new(config, StdRng::seed_from_u64(seed));
        // A dead target stays put but still repels spawns
        let mut player = Player::new("hero", Vec2::new(px, py));
        player.is_alive = false;
        let mut events = EventQueue::new();

        for tick in 1..=20 {
            spawner.update(Some(&mut player), 0.5, tick as f32 * 0.5, &mut events);
            for event in events.drain() {
                if let GameEvent::MonsterSpawned { position, .. } = event {
                    prop_assert!(!safe_zone.contains(position));
                    prop_assert!(position.distance(player.position) >= SPAWN_MIN_TARGET_DISTANCE);
                }
            }
        }
    }
}

#[test]
fn test_failed_placement_waits_full_interval() {
    let mut config = SpawnerConfig {
        spawn_interval: 10.0,
        ..SpawnerConfig::default()
    };
    config.initial_monsters.clear();
    // A safe zone covering the whole map leaves nowhere to spawn
    config.safe_zone.radius = 5000.0;
    let mut spawner = MonsterSpawner::new(config, StdRng::seed_from_u64(5));
    let mut events = EventQueue::new();

    spawner.update(None, 0.1, 10.0, &mut events);
    assert_eq!(spawner.alive_count(), 0);
    assert!((spawner.time_until_next_spawn(10.0) - 10.0).abs() < 1e-4);
}

#[test]
fn test_initial_population_spawned() {
    let spawner = MonsterSpawner::new(SpawnerConfig::default(), StdRng::seed_from_u64(1));
    assert_eq!(spawner.alive_count(), 6);
    assert!(spawner.status_summary(0.0).starts_with("Monsters 6/10"));
}
