//! Session configuration.
//!
//! Everything here can be overridden from JSON; fixed world geometry lives in
//! `crate::constants`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation steps per second
    pub fps: u32,
    pub spawner: SpawnerConfig,
    pub battle: BattleConfig,
    pub encounter: EncounterConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            spawner: SpawnerConfig::default(),
            battle: BattleConfig::default(),
            encounter: EncounterConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(invalid("fps", "must be positive"));
        }
        self.spawner.validate()?;
        self.battle.validate()?;
        self.encounter.validate()
    }

    /// Length of one fixed simulation step in seconds
    pub fn step_seconds(&self) -> f32 {
        1.0 / self.fps as f32
    }
}

/// Circular region where nothing may spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
}

impl SafeZone {
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance(p) < self.radius
    }
}

/// A monster placed when the spawner starts. `kind` is a type name and is
/// resolved case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialMonster {
    pub kind: String,
    pub position: Vec2,
}

impl InitialMonster {
    pub fn new(kind: &str, x: f32, y: f32) -> Self {
        Self {
            kind: kind.to_string(),
            position: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub max_monsters: usize,
    /// Seconds of game time between periodic spawns
    pub spawn_interval: f32,
    pub safe_zone: SafeZone,
    pub initial_monsters: Vec<InitialMonster>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            max_monsters: 10,
            spawn_interval: 30.0,
            safe_zone: SafeZone {
                center: Vec2::new(1000.0, 1000.0),
                radius: 200.0,
            },
            initial_monsters: vec![
                InitialMonster::new("slime", 300.0, 300.0),
                InitialMonster::new("slime", 500.0, 400.0),
                InitialMonster::new("slime", 700.0, 300.0),
                InitialMonster::new("goblin", 400.0, 600.0),
                InitialMonster::new("goblin", 800.0, 500.0),
                InitialMonster::new("orc", 600.0, 800.0),
            ],
        }
    }
}

impl SpawnerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval >= 0.0) {
            return Err(invalid("spawner.spawn_interval", "must be non-negative"));
        }
        if !(self.safe_zone.radius >= 0.0) {
            return Err(invalid("spawner.safe_zone.radius", "must be non-negative"));
        }
        Ok(())
    }
}

/// Tuning for the turn-based resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub defense_factor: f32,
    pub variance_min: f32,
    pub variance_max: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub starting_mp: i32,
    /// Seconds between the player's action and the enemy team's response
    pub enemy_turn_delay: f32,
    pub log_capacity: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            defense_factor: BATTLE_DEFENSE_FACTOR,
            variance_min: BATTLE_DAMAGE_MIN_MULT,
            variance_max: BATTLE_DAMAGE_MAX_MULT,
            crit_chance: BATTLE_CRIT_CHANCE,
            crit_multiplier: BATTLE_CRIT_MULTIPLIER,
            starting_mp: BATTLE_STARTING_MP,
            enemy_turn_delay: BATTLE_ENEMY_TURN_DELAY,
            log_capacity: BATTLE_LOG_CAPACITY,
        }
    }
}

impl BattleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.variance_min > 0.0 && self.variance_min <= self.variance_max) {
            return Err(invalid(
                "battle.variance_min",
                format!(
                    "need 0 < min <= max, got {}..{}",
                    self.variance_min, self.variance_max
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(invalid("battle.crit_chance", "must be within 0..=1"));
        }
        if self.starting_mp < 0 {
            return Err(invalid("battle.starting_mp", "must be non-negative"));
        }
        if !(self.enemy_turn_delay >= 0.0) {
            return Err(invalid("battle.enemy_turn_delay", "must be non-negative"));
        }
        if self.log_capacity == 0 {
            return Err(invalid("battle.log_capacity", "must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// Distance at which a monster pulls the player into battle
    pub trigger_radius: f32,
    /// Game seconds after a battle before another can start
    pub cooldown: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            trigger_radius: ENCOUNTER_TRIGGER_RADIUS,
            cooldown: ENCOUNTER_COOLDOWN,
        }
    }
}

impl EncounterConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.trigger_radius >= 0.0) {
            return Err(invalid("encounter.trigger_radius", "must be non-negative"));
        }
        if !(self.cooldown >= 0.0) {
            return Err(invalid("encounter.cooldown", "must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
