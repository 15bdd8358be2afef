//! Shared data model: stats, facing, AI state, monster state and the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::battle::skills;
use crate::battle::Skill;
use crate::constants::*;
use crate::math;
use crate::monsters::{MonsterId, MonsterKind};

/// Facing, derived from the dominant movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Facing for a movement vector. Ties go to the vertical axis.
    pub fn from_vector(v: Vec2) -> Self {
        if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if v.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Monster behavioral mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AIState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Character stats shared by monsters and the player.
///
/// `hp` is kept within `0..=max_hp` by every mutator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub hp: f32,
    pub max_hp: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    pub level: u32,
    pub exp: u32,
}

impl CharacterStats {
    pub fn new(max_hp: f32, attack: f32, defense: f32, speed: f32, level: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
            speed,
            level,
            exp: 0,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }

    /// Subtract damage, flooring at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        before - self.hp
    }

    /// Restore hp, capped at max. Returns the hp actually gained.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0.0)).min(self.max_hp);
        self.hp - before
    }
}

/// Per-monster simulation state. Owned by the spawner's world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterState {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub stats: CharacterStats,
    pub direction: Direction,
    pub is_moving: bool,
    pub is_alive: bool,
    pub ai_state: AIState,
    pub patrol_target: Option<Vec2>,
    /// Game time before which the monster may not attack
    pub attack_cooldown: f32,
    pub last_attack_time: f32,
}

impl MonsterState {
    pub fn new(id: MonsterId, kind: MonsterKind, position: Vec2) -> Self {
        let def = kind.def();
        Self {
            id,
            kind,
            position,
            velocity: Vec2::ZERO,
            stats: CharacterStats::new(def.health, def.attack, def.defense, def.speed, def.level),
            direction: Direction::default(),
            is_moving: false,
            is_alive: true,
            ai_state: AIState::Idle,
            patrol_target: None,
            attack_cooldown: 0.0,
            last_attack_time: 0.0,
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.is_moving = false;
    }
}

/// The player character, which is also the monsters' target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Vec2,
    pub direction: Direction,
    pub is_moving: bool,
    pub stats: CharacterStats,
    pub skills: Vec<Skill>,
    pub gold: u32,
    pub is_alive: bool,
}

impl Player {
    pub fn new(name: &str, position: Vec2) -> Self {
        Self {
            id: "player".to_string(),
            name: name.to_string(),
            position,
            direction: Direction::default(),
            is_moving: false,
            stats: CharacterStats::new(
                PLAYER_STARTING_HEALTH,
                PLAYER_ATTACK,
                PLAYER_DEFENSE,
                PLAYER_SPEED,
                1,
            ),
            skills: skills::player_skills(),
            gold: 0,
            is_alive: true,
        }
    }

    /// Apply damage; the player dies at 0 hp. Returns the hp lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let lost = self.stats.take_damage(amount);
        if self.stats.hp <= 0.0 {
            self.is_alive = false;
        }
        lost
    }

    /// Push the player by `offset`, staying inside the map.
    pub fn knock_back(&mut self, offset: Vec2) {
        self.position = math::clamp_to_world(self.position + offset, 0.0);
    }

    /// Move along `input` (any length; normalized here) for `dt` seconds.
    pub fn move_by_input(&mut self, input: Vec2, dt: f32) {
        let dir = math::normalize(input);
        if dir == Vec2::ZERO || !self.is_alive {
            self.is_moving = false;
            return;
        }
        let step = dir * self.stats.speed * dt * MOVEMENT_TICK_RATE;
        self.position = math::clamp_to_world(self.position + step, 0.0);
        self.direction = Direction::from_vector(dir);
        self.is_moving = true;
    }
}
