//! Battle data model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::log::BattleLog;
use super::skills;
use crate::components::{CharacterStats, Player};
use crate::constants::STATUS_EFFECT_DEFAULT_DURATION;
use crate::monsters::{Monster, MonsterId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillType {
    Attack,
    Special,
    Heal,
    Buff,
    Debuff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Damage,
    Heal,
    Buff,
    Debuff,
}

/// Who an effect lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    Caster,
    Target,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEffect {
    pub kind: EffectKind,
    /// Heal amount or stat modifier; unused for damage
    pub value: i32,
    /// Turns, for buffs and debuffs
    pub duration: Option<u32>,
    pub target: EffectTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub damage: i32,
    pub mana_cost: i32,
    /// Rounds the skill is locked after use
    pub cooldown: u32,
    pub current_cooldown: u32,
    pub skill_type: SkillType,
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    pub fn new(id: &str, name: &str, skill_type: SkillType, damage: i32, mana_cost: i32, cooldown: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            damage,
            mana_cost,
            cooldown,
            current_cooldown: 0,
            skill_type,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, kind: EffectKind, value: i32, duration: Option<u32>, target: EffectTarget) -> Self {
        self.effects.push(SkillEffect {
            kind,
            value,
            duration,
            target,
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Buff,
    Debuff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    pub kind: StatusKind,
    pub value: i32,
    pub duration: u32,
    /// Rounds left; removed at 0
    pub remaining_time: u32,
}

impl StatusEffect {
    pub fn from_skill(skill: &Skill, effect: &SkillEffect) -> Option<Self> {
        let kind = match effect.kind {
            EffectKind::Buff => StatusKind::Buff,
            EffectKind::Debuff => StatusKind::Debuff,
            EffectKind::Damage | EffectKind::Heal => return None,
        };
        let duration = effect.duration.unwrap_or(STATUS_EFFECT_DEFAULT_DURATION);
        Some(Self {
            id: skill.id.clone(),
            name: skill.name.clone(),
            kind,
            value: effect.value,
            duration,
            remaining_time: duration,
        })
    }
}

/// Combat-scoped projection of the player or a monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCharacter {
    pub id: String,
    pub name: String,
    pub side: Side,
    pub position: Vec2,
    pub stats: CharacterStats,
    pub skills: Vec<Skill>,
    pub current_hp: i32,
    pub current_mp: i32,
    pub status_effects: Vec<StatusEffect>,
    pub is_alive: bool,
    /// Exploration monster this enemy was drawn from
    pub monster_id: Option<MonsterId>,
}

impl BattleCharacter {
    pub fn from_player(player: &Player, starting_mp: i32) -> Self {
        let mut skills = player.skills.clone();
        for skill in &mut skills {
            skill.current_cooldown = 0;
        }
        let current_hp = player.stats.hp.round() as i32;
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            side: Side::Player,
            position: player.position,
            stats: player.stats,
            skills,
            current_hp,
            current_mp: starting_mp,
            status_effects: Vec::new(),
            is_alive: player.is_alive && current_hp > 0,
            monster_id: None,
        }
    }

    pub fn from_monster(monster: &Monster, starting_mp: i32) -> Self {
        let current_hp = monster.state.stats.hp.round() as i32;
        Self {
            id: monster.id().to_string(),
            name: monster.kind().display_name().to_string(),
            side: Side::Enemy,
            position: monster.position(),
            stats: monster.state.stats,
            skills: skills::enemy_skills(),
            current_hp,
            current_mp: starting_mp,
            status_effects: Vec::new(),
            is_alive: monster.is_alive() && current_hp > 0,
            monster_id: Some(monster.id()),
        }
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp.round() as i32
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    fn status_total(&self, kind: StatusKind) -> f32 {
        self.status_effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value as f32)
            .sum()
    }

    /// Attack including active buffs
    pub fn effective_attack(&self) -> f32 {
        self.stats.attack + self.status_total(StatusKind::Buff)
    }

    /// Defense after active debuffs, never negative
    pub fn effective_defense(&self) -> f32 {
        (self.stats.defense - self.status_total(StatusKind::Debuff)).max(0.0)
    }

    /// Returns hp lost. Dies at 0.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        if self.current_hp == 0 {
            self.is_alive = false;
        }
        before - self.current_hp
    }

    /// Returns hp gained, capped at max.
    pub fn apply_heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.max_hp());
        self.current_hp - before
    }

    /// Add a status effect, replacing any of the same kind
    pub fn add_status(&mut self, effect: StatusEffect) {
        self.status_effects.retain(|e| e.kind != effect.kind);
        self.status_effects.push(effect);
    }

    /// Count down status effects; returns names of the ones that expired
    pub fn tick_status_effects(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        for effect in &mut self.status_effects {
            effect.remaining_time = effect.remaining_time.saturating_sub(1);
            if effect.remaining_time == 0 {
                expired.push(effect.name.clone());
            }
        }
        self.status_effects.retain(|e| e.remaining_time > 0);
        expired
    }

    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.skills {
            skill.current_cooldown = skill.current_cooldown.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Selecting,
    Acting,
    Ended,
}

/// Aggregate root for one battle. Only the resolver mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub players: Vec<BattleCharacter>,
    pub enemies: Vec<BattleCharacter>,
    pub current_turn: Side,
    pub turn_phase: TurnPhase,
    pub selected_character: Option<String>,
    pub selected_skill: Option<String>,
    pub selected_target: Option<String>,
    pub battle_log: BattleLog,
    pub round: u32,
    pub winner: Option<Side>,
    /// Damage dealt by the player team
    pub damage_dealt: i32,
    /// Damage taken by the player team
    pub damage_taken: i32,
    pub exp_reward: u32,
    pub gold_reward: u32,
}

/// Final hp of one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantOutcome {
    pub id: String,
    pub monster_id: Option<MonsterId>,
    pub hp: i32,
    pub is_alive: bool,
}

impl From<&BattleCharacter> for CombatantOutcome {
    fn from(c: &BattleCharacter) -> Self {
        Self {
            id: c.id.clone(),
            monster_id: c.monster_id,
            hp: c.current_hp,
            is_alive: c.is_alive,
        }
    }
}

/// What the caller writes back to exploration state after a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Side,
    pub rounds: u32,
    pub players: Vec<CombatantOutcome>,
    pub enemies: Vec<CombatantOutcome>,
    pub exp_reward: u32,
    pub gold_reward: u32,
    pub damage_dealt: i32,
    pub damage_taken: i32,
}

impl BattleResult {
    pub fn victory(&self) -> bool {
        self.winner == Side::Player
    }
}
