use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Monster;
use crate::ai;
use crate::components::{MonsterState, Player};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::math;
use crate::spawning;
use crate::systems::combat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossSkill {
    Summon,
    Meteor,
    Rage,
    Heal,
    EnhancedAttack,
}

/// Countdown timers in seconds; a skill is ready at 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCooldowns {
    pub meteor: f32,
    pub summon: f32,
    pub rage: f32,
    pub heal: f32,
}

impl SkillCooldowns {
    fn tick(&mut self, dt: f32) {
        for cd in [&mut self.meteor, &mut self.summon, &mut self.rage, &mut self.heal] {
            *cd = (*cd - dt).max(0.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    /// 1-3, only ever escalates
    pub phase: u8,
    pub cooldowns: SkillCooldowns,
    /// Game time of the last summon, from any trigger
    pub last_summon_time: Option<f32>,
    pub raging: bool,
    pub minions: Vec<Monster>,
}

impl Default for BossState {
    fn default() -> Self {
        Self {
            phase: 1,
            cooldowns: SkillCooldowns::default(),
            last_summon_time: None,
            raging: false,
            minions: Vec::new(),
        }
    }
}

impl BossState {
    pub fn alive_minions(&self) -> usize {
        self.minions.iter().filter(|m| m.is_alive()).count()
    }
}

/// Phase for a health fraction. Thresholds are inclusive.
pub fn phase_for_fraction(fraction: f32) -> u8 {
    if fraction <= BOSS_PHASE_THREE_THRESHOLD {
        3
    } else if fraction <= BOSS_PHASE_TWO_THRESHOLD {
        2
    } else {
        1
    }
}

fn check_phase(state: &MonsterState, boss: &mut BossState, events: &mut EventQueue) {
    let phase = phase_for_fraction(state.stats.health_fraction());
    if phase <= boss.phase {
        return;
    }
    boss.phase = phase;
    info!(boss = %state.id, phase, "Boss phase change");
    events.push(GameEvent::BossPhaseChanged {
        boss: state.id,
        phase,
    });
}

pub(super) fn on_damage(
    state: &mut MonsterState,
    boss: &mut BossState,
    game_time: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    check_phase(state, boss, events);
    if rng.gen_bool(BOSS_SUMMON_ON_HIT_CHANCE) {
        summon_minions(state, boss, game_time, rng, events);
    }
}

pub(super) fn on_death(boss: &mut BossState, events: &mut EventQueue) {
    for minion in &mut boss.minions {
        minion.set_dead(events);
    }
}

pub(super) fn heal(state: &mut MonsterState, boss: &mut BossState, events: &mut EventQueue) {
    let healed = state.stats.heal(BOSS_HEAL_AMOUNT);
    boss.cooldowns.heal = BOSS_HEAL_COOLDOWN;
    info!(boss = %state.id, healed, "Boss heals");
    events.push(GameEvent::BossSkillUsed {
        boss: state.id,
        skill: BossSkill::Heal,
    });
}

/// Summon minions up to the cap. Rate limited by game time.
fn summon_minions(
    state: &MonsterState,
    boss: &mut BossState,
    game_time: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) -> bool {
    let alive = boss.alive_minions();
    if alive >= BOSS_MAX_MINIONS {
        return false;
    }
    if let Some(last) = boss.last_summon_time {
        if game_time - last < BOSS_SUMMON_RATE_LIMIT {
            return false;
        }
    }

    boss.minions.retain(|m| m.is_alive());
    for &offset in BOSS_MINION_OFFSETS.iter().take(BOSS_MAX_MINIONS - alive) {
        let position = math::clamp_to_world(state.position + Vec2::from(offset), MONSTER_MOVE_MARGIN);
        let minion = spawning::create_random_monster(position, &[], rng);
        events.push(GameEvent::MonsterSpawned {
            monster: minion.id(),
            kind: minion.kind(),
            position,
        });
        boss.minions.push(minion);
    }
    boss.last_summon_time = Some(game_time);
    info!(boss = %state.id, minions = boss.minions.len(), "Boss summons minions");
    events.push(GameEvent::BossSkillUsed {
        boss: state.id,
        skill: BossSkill::Summon,
    });
    true
}

fn cast_meteor(state: &MonsterState, boss: &mut BossState, target: &mut Player, events: &mut EventQueue) {
    let damage = combat::basic_damage(BOSS_METEOR_DAMAGE, target.stats.defense);
    combat::strike_player(state, target, damage, 0.0, events);
    boss.cooldowns.meteor = BOSS_METEOR_COOLDOWN;
    info!(boss = %state.id, damage, "Boss casts meteor");
    events.push(GameEvent::BossSkillUsed {
        boss: state.id,
        skill: BossSkill::Meteor,
    });
}

fn enter_rage(state: &mut MonsterState, boss: &mut BossState, events: &mut EventQueue) {
    let def = state.kind.def();
    state.stats.attack = def.attack * BOSS_RAGE_ATTACK_MULTIPLIER;
    state.stats.speed = def.speed * BOSS_RAGE_SPEED_MULTIPLIER;
    boss.raging = true;
    boss.cooldowns.rage = BOSS_RAGE_COOLDOWN;
    info!(boss = %state.id, "Boss enrages");
    events.push(GameEvent::BossSkillUsed {
        boss: state.id,
        skill: BossSkill::Rage,
    });
}

fn enhanced_attack(state: &mut MonsterState, target: &mut Player, game_time: f32, events: &mut EventQueue) {
    let damage = combat::basic_damage(
        state.stats.attack * BOSS_ENHANCED_ATTACK_MULTIPLIER,
        target.stats.defense,
    );
    combat::strike_player(state, target, damage, ATTACK_KNOCKBACK, events);
    state.attack_cooldown = game_time + BOSS_ENHANCED_ATTACK_COOLDOWN;
    state.last_attack_time = game_time;
    debug!(boss = %state.id, damage, "Boss enhanced attack");
    events.push(GameEvent::BossSkillUsed {
        boss: state.id,
        skill: BossSkill::EnhancedAttack,
    });
}

pub(super) fn update(
    state: &mut MonsterState,
    boss: &mut BossState,
    mut target: Option<&mut Player>,
    delta_time: f32,
    game_time: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    boss.cooldowns.tick(delta_time);
    check_phase(state, boss, events);

    for minion in &mut boss.minions {
        ai::update_monster(minion, target.as_deref_mut(), delta_time, game_time, rng, events);
    }
    boss.minions.retain(|m| m.is_alive());

    let Some(target) = target.filter(|t| t.is_alive) else {
        return;
    };
    let distance = state.position.distance(target.position);

    if boss.cooldowns.summon <= 0.0
        && distance < BOSS_SUMMON_RANGE
        && summon_minions(state, boss, game_time, rng, events)
    {
        boss.cooldowns.summon = BOSS_SUMMON_COOLDOWN;
    }
    if distance <= state.kind.def().attack_range && game_time >= state.attack_cooldown {
        enhanced_attack(state, target, game_time, events);
    }

    if boss.phase >= 2 {
        if boss.cooldowns.meteor <= 0.0 && distance < BOSS_METEOR_RANGE && target.is_alive {
            cast_meteor(state, boss, target, events);
        }
        if boss.cooldowns.rage <= 0.0 && state.stats.health_fraction() < BOSS_RAGE_THRESHOLD {
            enter_rage(state, boss, events);
        }
    }

    if boss.phase >= 3
        && boss.cooldowns.heal <= 0.0
        && state.stats.health_fraction() < BOSS_HEAL_THRESHOLD
    {
        heal(state, boss, events);
    }
}
