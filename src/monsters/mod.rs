//! Monster species and their reactive behavior.
//!
//! Species data is declarative (`SpeciesDef` tables); the per-species hooks
//! (`on_damage`, `on_death`, special update) are dispatched by matching on
//! `Behavior`.

mod boss;
mod goblin;
mod orc;
mod slime;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{AIState, MonsterState, Player};
use crate::events::{EventQueue, GameEvent};

pub use boss::{phase_for_fraction, BossSkill, BossState, SkillCooldowns};
pub use goblin::GoblinState;
pub use orc::OrcState;

static NEXT_MONSTER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique monster identity, allocated from a process-wide counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u64);

impl MonsterId {
    pub fn next() -> Self {
        Self(NEXT_MONSTER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monster-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterKind {
    Slime,
    Goblin,
    Orc,
    Boss,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Slime,
        MonsterKind::Goblin,
        MonsterKind::Orc,
        MonsterKind::Boss,
    ];

    pub fn def(self) -> &'static SpeciesDef {
        match self {
            MonsterKind::Slime => &species::SLIME,
            MonsterKind::Goblin => &species::GOBLIN,
            MonsterKind::Orc => &species::ORC,
            MonsterKind::Boss => &species::BOSS,
        }
    }

    /// Case-insensitive lookup by type name ("slime", "Goblin", "ORC", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.def().key.eq_ignore_ascii_case(name))
    }

    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn display_name(self) -> &'static str {
        self.def().display_name
    }

    pub fn description(self) -> &'static str {
        self.def().description
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Definition of a monster species - everything needed to create one
#[derive(Debug, Clone)]
pub struct SpeciesDef {
    /// Type name used by the factory
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    pub level: u32,
    pub attack_range: f32,
    pub sight_range: f32,
    /// Seconds between basic attacks
    pub attack_cooldown: f32,
    /// Render radius hint
    pub size: f32,
    /// Relative weight in random spawning (0 = never)
    pub spawn_weight: u32,
    /// Colors for healthy / hurt / critical (boss: phase 1 / 2 / 3)
    pub colors: [&'static str; 3],
}

/// Predefined species
pub mod species {
    use super::SpeciesDef;
    use crate::constants::*;

    pub const SLIME: SpeciesDef = SpeciesDef {
        key: "slime",
        display_name: "史莱姆",
        description: "A weak gel creature that bounces away when struck.",
        health: SLIME_HEALTH,
        attack: SLIME_ATTACK,
        defense: SLIME_DEFENSE,
        speed: SLIME_SPEED,
        level: SLIME_LEVEL,
        attack_range: SLIME_ATTACK_RANGE,
        sight_range: SLIME_SIGHT_RADIUS,
        attack_cooldown: SLIME_ATTACK_COOLDOWN,
        size: SLIME_SIZE,
        spawn_weight: SLIME_SPAWN_WEIGHT,
        colors: ["#4CAF50", "#8BC34A", "#CDDC39"],
    };

    pub const GOBLIN: SpeciesDef = SpeciesDef {
        key: "goblin",
        display_name: "哥布林",
        description: "A quick raider that flies into a rage when badly hurt.",
        health: GOBLIN_HEALTH,
        attack: GOBLIN_ATTACK,
        defense: GOBLIN_DEFENSE,
        speed: GOBLIN_SPEED,
        level: GOBLIN_LEVEL,
        attack_range: GOBLIN_ATTACK_RANGE,
        sight_range: GOBLIN_SIGHT_RADIUS,
        attack_cooldown: GOBLIN_ATTACK_COOLDOWN,
        size: GOBLIN_SIZE,
        spawn_weight: GOBLIN_SPAWN_WEIGHT,
        colors: ["#8D6E63", "#A1887F", "#BCAAA4"],
    };

    pub const ORC: SpeciesDef = SpeciesDef {
        key: "orc",
        display_name: "兽人",
        description: "A heavy brute that winds up a crushing blow when cornered.",
        health: ORC_HEALTH,
        attack: ORC_ATTACK,
        defense: ORC_DEFENSE,
        speed: ORC_SPEED,
        level: ORC_LEVEL,
        attack_range: ORC_ATTACK_RANGE,
        sight_range: ORC_SIGHT_RADIUS,
        attack_cooldown: ORC_ATTACK_COOLDOWN,
        size: ORC_SIZE,
        spawn_weight: ORC_SPAWN_WEIGHT,
        colors: ["#D32F2F", "#F44336", "#FFCDD2"],
    };

    pub const BOSS: SpeciesDef = SpeciesDef {
        key: "boss",
        display_name: "Boss",
        description: "A three-phase overlord that summons minions, calls meteors and heals.",
        health: BOSS_HEALTH,
        attack: BOSS_ATTACK,
        defense: BOSS_DEFENSE,
        speed: BOSS_SPEED,
        level: BOSS_LEVEL,
        attack_range: BOSS_ATTACK_RANGE,
        sight_range: BOSS_SIGHT_RADIUS,
        attack_cooldown: BOSS_ATTACK_COOLDOWN,
        size: BOSS_SIZE,
        spawn_weight: BOSS_SPAWN_WEIGHT,
        colors: ["#4A148C", "#6A1B9A", "#8E24AA"],
    };
}

/// Species-specific state carried next to the shared `MonsterState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Slime,
    Goblin(GoblinState),
    Orc(OrcState),
    Boss(BossState),
}

impl Behavior {
    fn fresh(kind: MonsterKind) -> Self {
        match kind {
            MonsterKind::Slime => Behavior::Slime,
            MonsterKind::Goblin => Behavior::Goblin(GoblinState::default()),
            MonsterKind::Orc => Behavior::Orc(OrcState::default()),
            MonsterKind::Boss => Behavior::Boss(BossState::default()),
        }
    }
}

/// A live monster: shared simulation state plus species behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub state: MonsterState,
    pub behavior: Behavior,
}

impl Monster {
    pub fn new(kind: MonsterKind, position: Vec2) -> Self {
        Self::with_id(MonsterId::next(), kind, position)
    }

    pub fn with_id(id: MonsterId, kind: MonsterKind, position: Vec2) -> Self {
        Self {
            state: MonsterState::new(id, kind, position),
            behavior: Behavior::fresh(kind),
        }
    }

    pub fn id(&self) -> MonsterId {
        self.state.id
    }

    pub fn kind(&self) -> MonsterKind {
        self.state.kind
    }

    pub fn def(&self) -> &'static SpeciesDef {
        self.state.kind.def()
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive
    }

    pub fn health_fraction(&self) -> f32 {
        self.state.stats.health_fraction()
    }

    pub fn attack_range(&self) -> f32 {
        self.def().attack_range
    }

    pub fn sight_range(&self) -> f32 {
        self.def().sight_range
    }

    pub fn size(&self) -> f32 {
        self.def().size
    }

    /// Rendering hint: species color by health band, or by phase for the boss
    pub fn color(&self) -> &'static str {
        let colors = &self.def().colors;
        if let Behavior::Boss(boss) = &self.behavior {
            let idx = usize::from(boss.phase.clamp(1, 3) - 1);
            return colors[idx];
        }
        let fraction = self.health_fraction();
        if fraction > 0.6 {
            colors[0]
        } else if fraction > 0.3 {
            colors[1]
        } else {
            colors[2]
        }
    }

    /// Boss phase (1-3); `None` for other species
    pub fn phase(&self) -> Option<u8> {
        match &self.behavior {
            Behavior::Boss(boss) => Some(boss.phase),
            _ => None,
        }
    }

    /// Minions owned by a boss (empty for other species)
    pub fn minions(&self) -> &[Monster] {
        match &self.behavior {
            Behavior::Boss(boss) => &boss.minions,
            _ => &[],
        }
    }

    /// Apply damage and run the species reaction. Returns true only on the
    /// call that killed the monster; damage to a dead monster is ignored.
    pub fn take_damage(
        &mut self,
        amount: f32,
        game_time: f32,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) -> bool {
        if !self.state.is_alive {
            return false;
        }
        let lost = self.state.stats.take_damage(amount);
        events.push(GameEvent::MonsterDamaged {
            monster: self.state.id,
            amount: lost,
            remaining: self.state.stats.hp,
        });

        if self.state.stats.hp <= 0.0 {
            self.die(events);
            return true;
        }

        let Monster { state, behavior } = self;
        match behavior {
            Behavior::Slime => slime::on_damage(state, rng),
            Behavior::Goblin(_) => {}
            Behavior::Orc(orc) => orc::on_damage(state, orc, events),
            Behavior::Boss(boss) => boss::on_damage(state, boss, game_time, rng, events),
        }
        false
    }

    /// Restore hp, capped at max. Returns hp gained.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.state.is_alive {
            return 0.0;
        }
        self.state.stats.heal(amount)
    }

    /// Kill the monster outright. Returns false if it was already dead.
    pub fn set_dead(&mut self, events: &mut EventQueue) -> bool {
        if !self.state.is_alive {
            return false;
        }
        self.state.stats.hp = 0.0;
        self.die(events);
        true
    }

    /// Mark dead if hp has run out by some path other than `take_damage`.
    pub(crate) fn check_death(&mut self, events: &mut EventQueue) {
        if self.state.is_alive && self.state.stats.hp <= 0.0 {
            self.die(events);
        }
    }

    fn die(&mut self, events: &mut EventQueue) {
        if !self.state.is_alive {
            return;
        }
        self.state.is_alive = false;
        self.state.stats.hp = 0.0;
        self.state.stop();
        info!(
            monster = %self.state.id,
            kind = %self.state.kind,
            "Monster died"
        );
        events.push(GameEvent::MonsterDied {
            monster: self.state.id,
            kind: self.state.kind,
            position: self.state.position,
        });
        if let Behavior::Boss(boss) = &mut self.behavior {
            boss::on_death(boss, events);
        }
    }

    /// Back to full health and idle at the current position
    pub fn reset(&mut self) {
        let kind = self.state.kind;
        let position = self.state.position;
        self.state = MonsterState::new(self.state.id, kind, position);
        self.behavior = Behavior::fresh(kind);
    }

    /// Boss self-heal (+40 hp, restarts its cooldown). No-op for other species.
    pub fn boss_heal(&mut self, events: &mut EventQueue) -> bool {
        let Monster { state, behavior } = self;
        match behavior {
            Behavior::Boss(boss) if state.is_alive => {
                boss::heal(state, boss, events);
                true
            }
            _ => false,
        }
    }

    /// Per-tick species behavior, run after the shared AI step
    pub(crate) fn update_special(
        &mut self,
        target: Option<&mut Player>,
        delta_time: f32,
        game_time: f32,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) {
        let Monster { state, behavior } = self;
        match behavior {
            Behavior::Slime => {}
            Behavior::Goblin(goblin) => goblin::update(state, goblin, events),
            Behavior::Orc(orc) => orc::update(state, orc, target, delta_time, game_time, events),
            Behavior::Boss(boss) => {
                boss::update(state, boss, target, delta_time, game_time, rng, events)
            }
        }
    }

    /// One-line status text
    pub fn describe(&self) -> String {
        let stats = &self.state.stats;
        let mut text = format!(
            "{} Lv.{} HP {:.0}/{:.0} ATK {:.0} DEF {:.0} [{}]",
            self.kind().display_name(),
            stats.level,
            stats.hp,
            stats.max_hp,
            stats.attack,
            stats.defense,
            match (self.state.is_alive, self.state.ai_state) {
                (false, _) => "dead",
                (true, AIState::Idle) => "idle",
                (true, AIState::Chasing) => "chasing",
                (true, AIState::Attacking) => "attacking",
            }
        );
        if let Behavior::Boss(boss) = &self.behavior {
            text.push_str(&format!(
                " phase {} minions {}",
                boss.phase,
                boss.minions.iter().filter(|m| m.is_alive()).count()
            ));
        }
        text
    }
}
