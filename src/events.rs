//! Game event system for decoupled communication between systems.
//!
//! The AI, spawner and battle layers emit events; the presentation layer
//! (rendering, audio, UI) drains them once per frame.

use glam::Vec2;

use crate::components::AIState;
use crate::monsters::{BossSkill, MonsterId, MonsterKind};

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A monster's AI state changed
    AIStateChanged {
        monster: MonsterId,
        from: AIState,
        to: AIState,
    },
    /// A monster hit the player
    MonsterAttacked {
        monster: MonsterId,
        target_pos: Vec2,
        damage: f32,
    },
    /// A monster took damage
    MonsterDamaged {
        monster: MonsterId,
        amount: f32,
        remaining: f32,
    },
    /// A monster died
    MonsterDied {
        monster: MonsterId,
        kind: MonsterKind,
        position: Vec2,
    },
    MonsterSpawned {
        monster: MonsterId,
        kind: MonsterKind,
        position: Vec2,
    },
    /// A monster left the spawner's collection
    MonsterDespawned { monster: MonsterId },
    /// A goblin entered or left rage
    GoblinRage { monster: MonsterId, active: bool },
    /// An orc armed its heavy attack
    OrcCharging { monster: MonsterId },
    BossPhaseChanged { boss: MonsterId, phase: u8 },
    BossSkillUsed { boss: MonsterId, skill: BossSkill },
    PlayerDied,
    BattleStarted { monster: MonsterId },
    BattleEnded { victory: bool },
    /// Player leveled up
    LevelUp { new_level: u32 },
}

/// Simple event queue - events are pushed during update, processed at end of frame
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
