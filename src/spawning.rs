//! Monster factory and spawner.
//!
//! The factory turns type names into `Monster`s. The spawner owns the live
//! population in a `hecs::World`, ticks its AI, prunes the dead and tops the
//! population up on a fixed interval.

use std::collections::BTreeMap;

use glam::Vec2;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::ai;
use crate::components::Player;
use crate::config::{InitialMonster, SpawnerConfig};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::monsters::{Monster, MonsterId, MonsterKind};

// =============================================================================
// FACTORY
// =============================================================================

/// Create a monster by type name. Unknown names fall back to a slime.
pub fn create_monster(type_name: &str, position: Vec2) -> Monster {
    let kind = MonsterKind::from_name(type_name).unwrap_or_else(|| {
        warn!(type_name, "Unknown monster type, falling back to slime");
        MonsterKind::Slime
    });
    Monster::new(kind, position)
}

/// Uniform pick over the non-boss kinds not listed in `exclude`
pub fn create_random_monster(position: Vec2, exclude: &[MonsterKind], rng: &mut impl Rng) -> Monster {
    let candidates: Vec<MonsterKind> = MonsterKind::ALL
        .into_iter()
        .filter(|k| *k != MonsterKind::Boss && !exclude.contains(k))
        .collect();
    let kind = if candidates.is_empty() {
        MonsterKind::Slime
    } else {
        candidates[rng.gen_range(0..candidates.len())]
    };
    Monster::new(kind, position)
}

/// Pick a kind from the spawn weight table
pub fn weighted_kind(rng: &mut impl Rng) -> MonsterKind {
    let total: u32 = MonsterKind::ALL.iter().map(|k| k.def().spawn_weight).sum();
    if total == 0 {
        return MonsterKind::Slime;
    }
    let mut roll = rng.gen_range(0..total);
    for kind in MonsterKind::ALL {
        let weight = kind.def().spawn_weight;
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    MonsterKind::Slime
}

pub fn create_weighted_monster(position: Vec2, rng: &mut impl Rng) -> Monster {
    Monster::new(weighted_kind(rng), position)
}

pub fn create_monsters(list: &[InitialMonster]) -> Vec<Monster> {
    list.iter()
        .map(|entry| create_monster(&entry.kind, entry.position))
        .collect()
}

pub fn is_valid_type(type_name: &str) -> bool {
    MonsterKind::from_name(type_name).is_some()
}

pub fn available_types() -> Vec<&'static str> {
    MonsterKind::ALL.iter().map(|k| k.key()).collect()
}

// =============================================================================
// SPAWNER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    Initial,
    Periodic,
    Boss,
    Forced,
}

/// Spawn bookkeeping attached to every monster entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnInfo {
    pub spawned_at: f32,
    pub source: SpawnSource,
}

pub struct MonsterSpawner {
    world: World,
    config: SpawnerConfig,
    last_spawn_time: f32,
    rng: StdRng,
}

impl MonsterSpawner {
    /// Create a spawner and place the configured initial monsters.
    pub fn new(config: SpawnerConfig, rng: StdRng) -> Self {
        let mut spawner = Self {
            world: World::new(),
            config,
            last_spawn_time: 0.0,
            rng,
        };
        spawner.spawn_initial();
        spawner
    }

    fn spawn_initial(&mut self) {
        for monster in create_monsters(&self.config.initial_monsters) {
            if self.alive_count() >= self.config.max_monsters {
                break;
            }
            self.insert(monster, SpawnSource::Initial, 0.0);
        }
    }

    fn insert(&mut self, monster: Monster, source: SpawnSource, game_time: f32) -> MonsterId {
        let id = monster.id();
        info!(
            monster = %id,
            kind = %monster.kind(),
            x = monster.position().x,
            y = monster.position().y,
            ?source,
            "Monster spawned"
        );
        self.world.spawn((
            monster,
            SpawnInfo {
                spawned_at: game_time,
                source,
            },
        ));
        id
    }

    /// Tick every monster, prune the dead, then maybe spawn one more.
    pub fn update(
        &mut self,
        mut target: Option<&mut Player>,
        delta_time: f32,
        game_time: f32,
        events: &mut EventQueue,
    ) {
        puffin::profile_function!();

        {
            puffin::profile_scope!("monster_ai");
            for (_, monster) in self.world.query_mut::<&mut Monster>() {
                ai::update_monster(
                    monster,
                    target.as_deref_mut(),
                    delta_time,
                    game_time,
                    &mut self.rng,
                    events,
                );
            }
        }

        self.prune_dead(game_time, events);

        let interval_elapsed = game_time - self.last_spawn_time >= self.config.spawn_interval;
        if interval_elapsed && self.alive_count() < self.config.max_monsters {
            // A failed placement still waits out the full interval
            self.last_spawn_time = game_time;
            let target_pos = target.as_ref().map(|t| t.position);
            self.spawn_random(target_pos, game_time, events);
        }
    }

    fn prune_dead(&mut self, game_time: f32, events: &mut EventQueue) {
        let dead: Vec<(Entity, MonsterId, f32)> = self
            .world
            .query_mut::<(&Monster, &SpawnInfo)>()
            .into_iter()
            .filter(|(_, (m, _))| !m.is_alive())
            .map(|(e, (m, info))| (e, m.id(), info.spawned_at))
            .collect();

        for (entity, id, spawned_at) in dead {
            let _ = self.world.despawn(entity);
            debug!(monster = %id, lifetime = game_time - spawned_at, "Pruned dead monster");
            events.push(GameEvent::MonsterDespawned { monster: id });
        }
    }

    fn spawn_random(&mut self, target_pos: Option<Vec2>, game_time: f32, events: &mut EventQueue) -> Option<MonsterId> {
        let Some(position) = self.find_spawn_position(target_pos) else {
            debug!("No valid spawn position this interval");
            return None;
        };
        let monster = create_weighted_monster(position, &mut self.rng);
        Some(self.insert_with_event(monster, SpawnSource::Periodic, game_time, events))
    }

    fn insert_with_event(
        &mut self,
        monster: Monster,
        source: SpawnSource,
        game_time: f32,
        events: &mut EventQueue,
    ) -> MonsterId {
        events.push(GameEvent::MonsterSpawned {
            monster: monster.id(),
            kind: monster.kind(),
            position: monster.position(),
        });
        self.insert(monster, source, game_time)
    }

    /// Random position outside the safe zone and away from the target and
    /// other monsters, or `None` if every attempt was rejected.
    pub fn find_spawn_position(&mut self, target_pos: Option<Vec2>) -> Option<Vec2> {
        let occupied: Vec<Vec2> = self
            .world
            .query_mut::<&Monster>()
            .into_iter()
            .map(|(_, m)| m.position())
            .collect();
        let min = PLACEMENT_MARGIN;
        let max = WORLD_SIZE - PLACEMENT_MARGIN;

        for _ in 0..SPAWN_MAX_ATTEMPTS {
            let candidate = Vec2::new(self.rng.gen_range(min..=max), self.rng.gen_range(min..=max));
            if self.config.safe_zone.contains(candidate) {
                continue;
            }
            if target_pos.is_some_and(|t| t.distance(candidate) < SPAWN_MIN_TARGET_DISTANCE) {
                continue;
            }
            if occupied
                .iter()
                .any(|p| p.distance(candidate) < SPAWN_MIN_MONSTER_SPACING)
            {
                continue;
            }
            return Some(candidate);
        }
        None
    }

    /// Place a boss. Only the population cap applies.
    pub fn spawn_boss(&mut self, position: Vec2, game_time: f32, events: &mut EventQueue) -> Option<MonsterId> {
        if self.alive_count() >= self.config.max_monsters {
            warn!("Population cap reached, boss not spawned");
            return None;
        }
        let boss = Monster::new(MonsterKind::Boss, position);
        Some(self.insert_with_event(boss, SpawnSource::Boss, game_time, events))
    }

    /// Spawn a specific type, bypassing placement rules
    pub fn force_spawn(
        &mut self,
        type_name: &str,
        position: Vec2,
        game_time: f32,
        events: &mut EventQueue,
    ) -> Option<MonsterId> {
        if self.alive_count() >= self.config.max_monsters {
            return None;
        }
        let Some(kind) = MonsterKind::from_name(type_name) else {
            warn!(type_name, "Cannot force spawn unknown monster type");
            return None;
        };
        Some(self.insert_with_event(Monster::new(kind, position), SpawnSource::Forced, game_time, events))
    }

    /// Kill and remove every monster
    pub fn clear_all_monsters(&mut self, events: &mut EventQueue) {
        for (_, monster) in self.world.query_mut::<&mut Monster>() {
            monster.set_dead(events);
            events.push(GameEvent::MonsterDespawned { monster: monster.id() });
        }
        self.world.clear();
        info!("All monsters cleared");
    }

    /// Remove a monster without killing it
    pub fn remove_monster(&mut self, id: MonsterId, events: &mut EventQueue) -> bool {
        let Some(entity) = self.entity_of(id) else {
            return false;
        };
        let _ = self.world.despawn(entity);
        events.push(GameEvent::MonsterDespawned { monster: id });
        true
    }

    /// Clear everything and start over with the initial monsters
    pub fn reset(&mut self, events: &mut EventQueue) {
        self.clear_all_monsters(events);
        self.last_spawn_time = 0.0;
        self.spawn_initial();
    }

    /// Replace the configuration. If the new cap is below the live
    /// population, the newest monsters are despawned until it fits.
    pub fn update_config(&mut self, config: SpawnerConfig, events: &mut EventQueue) {
        self.config = config;

        let mut alive: Vec<(f32, MonsterId)> = self
            .world
            .query_mut::<(&Monster, &SpawnInfo)>()
            .into_iter()
            .filter(|(_, (m, _))| m.is_alive())
            .map(|(_, (m, info))| (info.spawned_at, m.id()))
            .collect();
        if alive.len() <= self.config.max_monsters {
            return;
        }

        alive.sort_by(|a, b| b.0.total_cmp(&a.0));
        let surplus = alive.len() - self.config.max_monsters;
        for (_, id) in alive.into_iter().take(surplus) {
            self.remove_monster(id, events);
        }
        info!(surplus, cap = self.config.max_monsters, "Despawned monsters over the new cap");
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    fn entity_of(&self, id: MonsterId) -> Option<Entity> {
        let mut query = self.world.query::<&Monster>();
        let found = query.iter().find(|(_, m)| m.id() == id).map(|(e, _)| e);
        found
    }

    /// Mutate one monster in place
    pub fn with_monster_mut<R>(&mut self, id: MonsterId, f: impl FnOnce(&mut Monster) -> R) -> Option<R> {
        self.world
            .query_mut::<&mut Monster>()
            .into_iter()
            .find(|(_, m)| m.id() == id)
            .map(|(_, m)| f(m))
    }

    /// Damage one monster through its species hooks. `None` if not found,
    /// otherwise whether this hit killed it.
    pub fn damage_monster(
        &mut self,
        id: MonsterId,
        amount: f32,
        game_time: f32,
        events: &mut EventQueue,
    ) -> Option<bool> {
        let rng = &mut self.rng;
        self.world
            .query_mut::<&mut Monster>()
            .into_iter()
            .find(|(_, m)| m.id() == id)
            .map(|(_, m)| m.take_damage(amount, game_time, rng, events))
    }

    // -------------------------------------------------------------------------
    // Read accessors (snapshots)
    // -------------------------------------------------------------------------

    pub fn alive_monsters(&self) -> Vec<Monster> {
        let mut query = self.world.query::<&Monster>();
        let monsters = query
            .iter()
            .filter(|(_, m)| m.is_alive())
            .map(|(_, m)| m.clone())
            .collect();
        monsters
    }

    pub fn monsters_by_type(&self, kind: MonsterKind) -> Vec<Monster> {
        self.alive_monsters()
            .into_iter()
            .filter(|m| m.kind() == kind)
            .collect()
    }

    pub fn find(&self, id: MonsterId) -> Option<Monster> {
        let mut query = self.world.query::<&Monster>();
        let found = query.iter().find(|(_, m)| m.id() == id).map(|(_, m)| m.clone());
        found
    }

    pub fn spawn_info(&self, id: MonsterId) -> Option<SpawnInfo> {
        let mut query = self.world.query::<(&Monster, &SpawnInfo)>();
        let found = query
            .iter()
            .find(|(_, (m, _))| m.id() == id)
            .map(|(_, (_, info))| *info);
        found
    }

    /// Closest living monster within `radius` of `position`
    pub fn nearest_alive_within(&self, position: Vec2, radius: f32) -> Option<Monster> {
        self.alive_monsters()
            .into_iter()
            .map(|m| (m.position().distance(position), m))
            .filter(|(d, _)| *d <= radius)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, m)| m)
    }

    pub fn alive_count(&self) -> usize {
        let mut query = self.world.query::<&Monster>();
        let count = query.iter().filter(|(_, m)| m.is_alive()).count();
        count
    }

    pub fn count_by_type(&self) -> BTreeMap<MonsterKind, usize> {
        let mut counts = BTreeMap::new();
        for monster in self.alive_monsters() {
            *counts.entry(monster.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Seconds of game time until the next periodic spawn attempt
    pub fn time_until_next_spawn(&self, game_time: f32) -> f32 {
        (self.last_spawn_time + self.config.spawn_interval - game_time).max(0.0)
    }

    pub fn status_summary(&self, game_time: f32) -> String {
        let by_type = self
            .count_by_type()
            .iter()
            .map(|(kind, n)| format!("{} {}", kind.display_name(), n))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Monsters {}/{} [{}] next spawn in {:.1}s",
            self.alive_count(),
            self.config.max_monsters,
            by_type,
            self.time_until_next_spawn(game_time)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spawner(config: SpawnerConfig) -> MonsterSpawner {
        MonsterSpawner::new(config, StdRng::seed_from_u64(42))
    }

    fn empty_config() -> SpawnerConfig {
        SpawnerConfig {
            initial_monsters: Vec::new(),
            ..SpawnerConfig::default()
        }
    }

    #[test]
    fn test_create_monster_fallback() {
        assert_eq!(create_monster("GOBLIN", Vec2::ZERO).kind(), MonsterKind::Goblin);
        assert_eq!(create_monster("dragon", Vec2::ZERO).kind(), MonsterKind::Slime);
        assert!(is_valid_type("Orc"));
        assert!(!is_valid_type("dragon"));
        assert_eq!(available_types(), vec!["slime", "goblin", "orc", "boss"]);
    }

    #[test]
    fn test_weighted_never_boss() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = BTreeMap::new();
        for _ in 0..900 {
            *seen.entry(weighted_kind(&mut rng)).or_insert(0) += 1;
        }
        assert!(!seen.contains_key(&MonsterKind::Boss));
        assert!(seen[&MonsterKind::Slime] > seen[&MonsterKind::Goblin]);
        assert!(seen[&MonsterKind::Goblin] > seen[&MonsterKind::Orc]);
    }

    #[test]
    fn test_random_respects_exclude() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let m = create_random_monster(Vec2::ZERO, &[MonsterKind::Slime], &mut rng);
            assert!(matches!(m.kind(), MonsterKind::Goblin | MonsterKind::Orc));
        }
    }

    #[test]
    fn test_initial_monsters() {
        let s = spawner(SpawnerConfig::default());
        assert_eq!(s.alive_count(), 6);
        let counts = s.count_by_type();
        assert_eq!(counts[&MonsterKind::Slime], 3);
        assert_eq!(counts[&MonsterKind::Goblin], 2);
        assert_eq!(counts[&MonsterKind::Orc], 1);
        assert_eq!(s.monsters_by_type(MonsterKind::Orc)[0].position(), Vec2::new(600.0, 800.0));
    }

    #[test]
    fn test_periodic_spawn_waits_for_interval() {
        let mut s = spawner(empty_config());
        let mut events = EventQueue::new();
        s.update(None, 0.1, 10.0, &mut events);
        assert_eq!(s.alive_count(), 0);
        s.update(None, 0.1, 30.0, &mut events);
        assert_eq!(s.alive_count(), 1);
        s.update(None, 0.1, 31.0, &mut events);
        assert_eq!(s.alive_count(), 1);
        assert!((s.time_until_next_spawn(31.0) - 29.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_position_rules() {
        let mut s = spawner(SpawnerConfig::default());
        let target = Vec2::new(300.0, 350.0);
        for _ in 0..50 {
            if let Some(p) = s.find_spawn_position(Some(target)) {
                assert!(!s.config().safe_zone.contains(p));
                assert!(p.distance(target) >= SPAWN_MIN_TARGET_DISTANCE);
                assert!(s
                    .alive_monsters()
                    .iter()
                    .all(|m| m.position().distance(p) >= SPAWN_MIN_MONSTER_SPACING));
            }
        }
    }

    #[test]
    fn test_dead_are_pruned() {
        let mut s = spawner(SpawnerConfig::default());
        let mut events = EventQueue::new();
        let victim = s.alive_monsters()[0].id();
        assert_eq!(s.damage_monster(victim, 1000.0, 1.0, &mut events), Some(true));
        assert_eq!(s.damage_monster(victim, 1000.0, 1.0, &mut events), Some(false));
        s.update(None, 0.1, 1.0, &mut events);
        assert_eq!(s.alive_count(), 5);
        assert!(s.find(victim).is_none());
        assert!(events.iter().any(|e| *e == GameEvent::MonsterDespawned { monster: victim }));
    }

    #[test]
    fn test_cap_blocks_manual_spawns() {
        let config = SpawnerConfig {
            max_monsters: 6,
            ..SpawnerConfig::default()
        };
        let mut s = spawner(config);
        let mut events = EventQueue::new();
        assert!(s.spawn_boss(Vec2::new(1000.0, 1000.0), 0.0, &mut events).is_none());
        assert!(s.force_spawn("orc", Vec2::new(100.0, 100.0), 0.0, &mut events).is_none());

        s.update_config(
            SpawnerConfig {
                max_monsters: 8,
                ..SpawnerConfig::default()
            },
            &mut events,
        );
        // Boss ignores the safe zone
        let boss = s.spawn_boss(Vec2::new(1000.0, 1000.0), 0.0, &mut events).unwrap();
        assert_eq!(s.find(boss).unwrap().kind(), MonsterKind::Boss);
        assert_eq!(s.spawn_info(boss).unwrap().source, SpawnSource::Boss);
        assert!(s.force_spawn("dragon", Vec2::new(100.0, 100.0), 0.0, &mut events).is_none());
        assert!(s.force_spawn("Goblin", Vec2::new(100.0, 100.0), 0.0, &mut events).is_some());
        assert_eq!(s.alive_count(), 8);
    }

    #[test]
    fn test_lower_cap_despawns_newest() {
        let mut s = spawner(empty_config());
        let mut events = EventQueue::new();
        let ids: Vec<MonsterId> = (1..=4)
            .map(|t| {
                s.force_spawn("slime", Vec2::new(100.0 * t as f32, 100.0), t as f32, &mut events)
                    .unwrap()
            })
            .collect();

        let mut events = EventQueue::new();
        s.update_config(
            SpawnerConfig {
                max_monsters: 2,
                ..empty_config()
            },
            &mut events,
        );
        assert_eq!(s.alive_count(), 2);
        assert!(s.find(ids[0]).is_some());
        assert!(s.find(ids[1]).is_some());
        assert!(s.find(ids[2]).is_none());
        assert!(s.find(ids[3]).is_none());
        let despawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::MonsterDespawned { .. }))
            .count();
        assert_eq!(despawned, 2);

        // Raising the cap never spawns or removes anything by itself
        s.update_config(empty_config(), &mut events);
        assert_eq!(s.alive_count(), 2);
    }

    #[test]
    fn test_clear_remove_reset() {
        let mut s = spawner(SpawnerConfig::default());
        let mut events = EventQueue::new();
        let id = s.alive_monsters()[0].id();
        assert!(s.remove_monster(id, &mut events));
        assert!(!s.remove_monster(id, &mut events));
        assert_eq!(s.alive_count(), 5);

        s.clear_all_monsters(&mut events);
        assert_eq!(s.alive_count(), 0);

        s.reset(&mut events);
        assert_eq!(s.alive_count(), 6);
    }

    #[test]
    fn test_nearest_alive_within() {
        let s = spawner(SpawnerConfig::default());
        let near = s.nearest_alive_within(Vec2::new(310.0, 300.0), 40.0).unwrap();
        assert_eq!(near.position(), Vec2::new(300.0, 300.0));
        assert!(s.nearest_alive_within(Vec2::new(1000.0, 1000.0), 40.0).is_none());
    }

    #[test]
    fn test_status_summary() {
        let s = spawner(SpawnerConfig::default());
        let text = s.status_summary(0.0);
        assert!(text.starts_with("Monsters 6/10"));
        assert!(text.contains("史莱姆 3"));
    }
}
