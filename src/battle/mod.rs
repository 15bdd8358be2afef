//! Turn-based battle resolver.
//!
//! The player team selects a character, a skill and a target; the action
//! resolves immediately. The enemy response is scheduled `enemy_turn_delay`
//! seconds of battle time later and runs from `update`, followed by the next
//! round. Every mutation is reported through the change callback.

pub mod damage;
pub mod log;
pub mod skills;
pub mod types;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::BattleConfig;
use crate::constants::{EXP_PER_ENEMY_LEVEL, GOLD_PER_ENEMY_LEVEL};
use crate::error::BattleError;
use crate::time_system::{GameClock, Scheduler};

pub use damage::{DamageRoll, Effectiveness};
pub use log::BattleLog;
pub use types::{
    BattleCharacter, BattleResult, BattleState, CombatantOutcome, EffectKind, EffectTarget, Side,
    Skill, SkillEffect, SkillType, StatusEffect, StatusKind, TurnPhase,
};

/// Receives a snapshot after every state change
pub type StateCallback = Box<dyn FnMut(&BattleState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BattleStep {
    EnemyTurn,
}

pub struct BattleSystem {
    state: BattleState,
    config: BattleConfig,
    clock: GameClock,
    scheduler: Scheduler<BattleStep>,
    rng: StdRng,
    on_change: StateCallback,
}

impl BattleSystem {
    pub fn new(
        players: Vec<BattleCharacter>,
        enemies: Vec<BattleCharacter>,
        config: BattleConfig,
        rng: StdRng,
        on_change: StateCallback,
    ) -> Self {
        let mut battle_log = BattleLog::new(config.log_capacity);
        let names: Vec<&str> = enemies.iter().map(|e| e.name.as_str()).collect();
        battle_log.push(format!("Battle begins against {}!", names.join(", ")));
        info!(players = players.len(), enemies = enemies.len(), "Battle started");

        let mut system = Self {
            state: BattleState {
                players,
                enemies,
                current_turn: Side::Player,
                turn_phase: TurnPhase::Selecting,
                selected_character: None,
                selected_skill: None,
                selected_target: None,
                battle_log,
                round: 1,
                winner: None,
                damage_dealt: 0,
                damage_taken: 0,
                exp_reward: 0,
                gold_reward: 0,
            },
            config,
            clock: GameClock::new(),
            scheduler: Scheduler::new(),
            rng,
            on_change,
        };
        system.check_battle_end();
        system.notify();
        system
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.turn_phase == TurnPhase::Ended
    }

    /// Whether the enemy response is waiting on the pacing delay
    pub fn enemy_turn_pending(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Battle time in seconds
    pub fn elapsed(&self) -> f32 {
        self.clock.time
    }

    fn notify(&mut self) {
        (self.on_change)(&self.state);
    }

    fn reject(&self, err: BattleError) -> Result<(), BattleError> {
        debug!(%err, "Battle input rejected");
        Err(err)
    }

    fn ensure_player_selecting(&self) -> Result<(), BattleError> {
        if self.is_over() {
            return self.reject(BattleError::BattleOver);
        }
        if self.state.current_turn != Side::Player {
            return self.reject(BattleError::NotPlayerTurn);
        }
        if self.state.turn_phase != TurnPhase::Selecting {
            return self.reject(BattleError::NotSelecting);
        }
        Ok(())
    }

    fn player_index(&self, id: &str) -> Option<usize> {
        self.state.players.iter().position(|c| c.id == id)
    }

    fn enemy_index(&self, id: &str) -> Option<usize> {
        self.state.enemies.iter().position(|c| c.id == id)
    }

    pub fn select_character(&mut self, id: &str) -> Result<(), BattleError> {
        self.ensure_player_selecting()?;
        let Some(idx) = self.player_index(id) else {
            return self.reject(BattleError::UnknownCharacter(id.to_string()));
        };
        if !self.state.players[idx].is_alive {
            return self.reject(BattleError::CharacterDown(id.to_string()));
        }

        self.state.selected_character = Some(id.to_string());
        self.state.selected_skill = None;
        self.state.selected_target = None;
        self.notify();
        Ok(())
    }

    pub fn select_skill(&mut self, id: &str) -> Result<(), BattleError> {
        self.ensure_player_selecting()?;
        let Some(caster_idx) = self
            .state
            .selected_character
            .as_deref()
            .and_then(|c| self.player_index(c))
        else {
            return self.reject(BattleError::NoCharacterSelected);
        };

        let caster = &self.state.players[caster_idx];
        let Some(skill) = caster.skill(id) else {
            return self.reject(BattleError::UnknownSkill(id.to_string()));
        };
        if caster.current_mp < skill.mana_cost {
            let err = BattleError::InsufficientMp {
                needed: skill.mana_cost,
                available: caster.current_mp,
            };
            self.state.battle_log.push("MP insufficient");
            self.notify();
            return self.reject(err);
        }
        if skill.current_cooldown > 0 {
            let err = BattleError::SkillOnCooldown {
                skill: skill.name.clone(),
                remaining: skill.current_cooldown,
            };
            return self.reject(err);
        }

        self.state.selected_skill = Some(id.to_string());
        self.state.selected_target = None;
        self.notify();
        Ok(())
    }

    /// Choose a target and resolve the selected action
    pub fn select_target(&mut self, id: &str) -> Result<(), BattleError> {
        self.ensure_player_selecting()?;
        if self.state.selected_character.is_none() {
            return self.reject(BattleError::NoCharacterSelected);
        }
        if self.state.selected_skill.is_none() {
            return self.reject(BattleError::NoSkillSelected);
        }
        match self.enemy_index(id) {
            Some(idx) if self.state.enemies[idx].is_alive => {}
            _ => return self.reject(BattleError::InvalidTarget(id.to_string())),
        }

        self.state.selected_target = Some(id.to_string());
        self.execute_action();
        Ok(())
    }

    fn execute_action(&mut self) {
        puffin::profile_function!();

        let (Some(caster_idx), Some(skill_id), Some(target_idx)) = (
            self.state.selected_character.as_deref().and_then(|c| self.player_index(c)),
            self.state.selected_skill.clone(),
            self.state.selected_target.as_deref().and_then(|t| self.enemy_index(t)),
        ) else {
            return;
        };
        let Some(skill) = self.state.players[caster_idx].skill(&skill_id).cloned() else {
            return;
        };

        self.state.turn_phase = TurnPhase::Acting;
        let caster_name = self.state.players[caster_idx].name.clone();
        let caster_attack = self.state.players[caster_idx].effective_attack();

        for effect in &skill.effects {
            match effect.kind {
                EffectKind::Damage => {
                    self.apply_skill_damage(&skill, &caster_name, caster_attack, target_idx)
                }
                EffectKind::Heal => {
                    let amount = damage::heal_amount(effect.value, caster_attack);
                    let recipient = self.recipient(effect.target, caster_idx, target_idx);
                    let healed = recipient.apply_heal(amount);
                    let line = format!("{} uses {} and restores {} HP to {}", caster_name, skill.name, healed, recipient.name);
                    self.state.battle_log.push(line);
                }
                EffectKind::Buff | EffectKind::Debuff => {
                    let Some(status) = StatusEffect::from_skill(&skill, effect) else {
                        continue;
                    };
                    let recipient = self.recipient(effect.target, caster_idx, target_idx);
                    let line = format!(
                        "{} is affected by {} ({} turns)",
                        recipient.name, status.name, status.duration
                    );
                    recipient.add_status(status);
                    self.state.battle_log.push(line);
                }
            }
        }

        let caster = &mut self.state.players[caster_idx];
        caster.current_mp = (caster.current_mp - skill.mana_cost).max(0);
        if let Some(s) = caster.skills.iter_mut().find(|s| s.id == skill.id) {
            s.current_cooldown = skill.cooldown;
        }

        self.state.selected_character = None;
        self.state.selected_skill = None;
        self.state.selected_target = None;

        if !self.check_battle_end() {
            self.state.current_turn = Side::Enemy;
            self.scheduler
                .schedule(self.clock.time + self.config.enemy_turn_delay, BattleStep::EnemyTurn);
        }
        self.notify();
    }

    fn recipient(&mut self, target: EffectTarget, caster_idx: usize, target_idx: usize) -> &mut BattleCharacter {
        match target {
            EffectTarget::Caster => &mut self.state.players[caster_idx],
            EffectTarget::Target => &mut self.state.enemies[target_idx],
        }
    }

    fn apply_skill_damage(&mut self, skill: &Skill, caster_name: &str, attack: f32, target_idx: usize) {
        let defense = self.state.enemies[target_idx].effective_defense();
        let raw = damage::raw_damage(skill.damage, attack, defense, self.config.defense_factor);
        let roll = DamageRoll::roll(&self.config, &mut self.rng);
        let effectiveness = Effectiveness::of(skill.skill_type, defense);
        let amount = damage::resolve_damage(raw, roll, effectiveness, self.config.crit_multiplier);

        let target = &mut self.state.enemies[target_idx];
        let dealt = target.apply_damage(amount);
        self.state.damage_dealt += dealt;

        let mut line = format!("{} uses {} on {} for {} damage", caster_name, skill.name, target.name, amount);
        if roll.critical {
            line.push_str(" (critical!)");
        }
        match effectiveness {
            Effectiveness::Effective => line.push_str(" (super effective)"),
            Effectiveness::Resisted => line.push_str(" (resisted)"),
            Effectiveness::Normal => {}
        }
        let defeated = (!target.is_alive).then(|| format!("{} is defeated", target.name));
        self.state.battle_log.push(line);
        if let Some(defeated) = defeated {
            self.state.battle_log.push(defeated);
        }
    }

    /// Advance battle time and run any due continuations.
    pub fn update(&mut self, delta_time: f32) {
        puffin::profile_function!();
        self.clock.advance(delta_time);
        while let Some((_, step)) = self.scheduler.pop_due(self.clock.time) {
            match step {
                BattleStep::EnemyTurn => self.run_enemy_turn(),
            }
        }
    }

    fn run_enemy_turn(&mut self) {
        if self.is_over() {
            return;
        }
        self.state.turn_phase = TurnPhase::Acting;

        for enemy_idx in 0..self.state.enemies.len() {
            if !self.state.enemies[enemy_idx].is_alive {
                continue;
            }
            let alive: Vec<usize> = (0..self.state.players.len())
                .filter(|&i| self.state.players[i].is_alive)
                .collect();
            if alive.is_empty() {
                break;
            }
            let player_idx = alive[self.rng.gen_range(0..alive.len())];

            let variance = damage::roll_variance(&self.config, &mut self.rng);
            let amount = damage::enemy_attack_damage(
                self.state.enemies[enemy_idx].effective_attack(),
                self.state.players[player_idx].effective_defense(),
                variance,
                self.config.defense_factor,
            );
            let enemy_name = self.state.enemies[enemy_idx].name.clone();
            let target = &mut self.state.players[player_idx];
            let taken = target.apply_damage(amount);
            self.state.damage_taken += taken;

            let line = format!("{} attacks {} for {} damage", enemy_name, target.name, amount);
            let defeated = (!target.is_alive).then(|| format!("{} has fallen", target.name));
            self.state.battle_log.push(line);
            if let Some(defeated) = defeated {
                self.state.battle_log.push(defeated);
            }
        }

        if !self.check_battle_end() {
            self.start_new_round();
        }
        self.notify();
    }

    fn start_new_round(&mut self) {
        self.state.round += 1;
        let mut expired = Vec::new();
        for c in self.state.players.iter_mut().chain(self.state.enemies.iter_mut()) {
            for name in c.tick_status_effects() {
                expired.push(format!("{}'s {} wore off", c.name, name));
            }
            c.tick_cooldowns();
        }
        for line in expired {
            self.state.battle_log.push(line);
        }
        self.state
            .battle_log
            .push(format!("--- Round {} ---", self.state.round));
        self.state.current_turn = Side::Player;
        self.state.turn_phase = TurnPhase::Selecting;
        debug!(round = self.state.round, "New battle round");
    }

    /// Decide the winner if one side is wiped out. Returns true if the battle ended.
    fn check_battle_end(&mut self) -> bool {
        if self.state.winner.is_some() {
            return true;
        }
        let winner = if self.state.enemies.iter().all(|e| !e.is_alive) {
            Side::Player
        } else if self.state.players.iter().all(|p| !p.is_alive) {
            Side::Enemy
        } else {
            return false;
        };

        self.state.winner = Some(winner);
        self.state.turn_phase = TurnPhase::Ended;
        self.scheduler.clear();

        if winner == Side::Player {
            let levels: u32 = self.state.enemies.iter().map(|e| e.stats.level).sum();
            self.state.exp_reward = levels * EXP_PER_ENEMY_LEVEL;
            self.state.gold_reward = levels * GOLD_PER_ENEMY_LEVEL;
            let line = format!(
                "Victory! Gained {} exp and {} gold",
                self.state.exp_reward, self.state.gold_reward
            );
            self.state.battle_log.push(line);
        } else {
            self.state.battle_log.push("Defeat...");
        }
        info!(
            ?winner,
            rounds = self.state.round,
            dealt = self.state.damage_dealt,
            taken = self.state.damage_taken,
            "Battle ended"
        );
        true
    }

    /// Outcome for the caller to apply, once the battle has ended
    pub fn result(&self) -> Option<BattleResult> {
        let winner = self.state.winner?;
        Some(BattleResult {
            winner,
            rounds: self.state.round,
            players: self.state.players.iter().map(CombatantOutcome::from).collect(),
            enemies: self.state.enemies.iter().map(CombatantOutcome::from).collect(),
            exp_reward: self.state.exp_reward,
            gold_reward: self.state.gold_reward,
            damage_dealt: self.state.damage_dealt,
            damage_taken: self.state.damage_taken,
        })
    }
}
