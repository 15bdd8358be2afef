//! Battle damage and healing formulas.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::SkillType;
use crate::config::BattleConfig;
use crate::constants::*;

/// The random part of a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub variance: f32,
    pub critical: bool,
}

impl DamageRoll {
    pub fn roll(config: &BattleConfig, rng: &mut impl Rng) -> Self {
        Self {
            variance: roll_variance(config, rng),
            critical: rng.gen::<f32>() < config.crit_chance,
        }
    }

    /// No variance, no crit
    pub fn neutral() -> Self {
        Self {
            variance: 1.0,
            critical: false,
        }
    }
}

pub fn roll_variance(config: &BattleConfig, rng: &mut impl Rng) -> f32 {
    if config.variance_max > config.variance_min {
        rng.gen_range(config.variance_min..=config.variance_max)
    } else {
        config.variance_min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    Normal,
    Effective,
    Resisted,
}

impl Effectiveness {
    pub fn of(skill_type: SkillType, defense: f32) -> Self {
        match skill_type {
            SkillType::Special if defense < EFFECTIVE_DEFENSE_BELOW => Effectiveness::Effective,
            SkillType::Attack if defense > RESISTED_DEFENSE_ABOVE => Effectiveness::Resisted,
            _ => Effectiveness::Normal,
        }
    }

    pub fn multiplier(self) -> f32 {
        match self {
            Effectiveness::Normal => 1.0,
            Effectiveness::Effective => EFFECTIVE_MULTIPLIER,
            Effectiveness::Resisted => RESISTED_MULTIPLIER,
        }
    }
}

/// Skill damage before variance, crit and effectiveness
pub fn raw_damage(skill_damage: i32, attack: f32, defense: f32, defense_factor: f32) -> f32 {
    skill_damage as f32 + attack - defense * defense_factor
}

pub fn resolve_damage(
    raw: f32,
    roll: DamageRoll,
    effectiveness: Effectiveness,
    crit_multiplier: f32,
) -> i32 {
    let mut damage = (raw * roll.variance).floor();
    if roll.critical {
        damage = (damage * crit_multiplier).floor();
    }
    damage = (damage * effectiveness.multiplier()).floor();
    (damage as i32).max(0)
}

/// Enemy-turn basic attack. Always at least 1.
pub fn enemy_attack_damage(attack: f32, defense: f32, variance: f32, defense_factor: f32) -> i32 {
    ((attack * variance - defense * defense_factor).floor() as i32).max(1)
}

/// Heals scale with the caster's attack
pub fn heal_amount(value: i32, attack: f32) -> i32 {
    (value as f32 * (1.0 + attack / 100.0)).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_raw_damage_example() {
        // skill 10, attacker atk 20, defender def 10
        assert_eq!(raw_damage(10, 20.0, 10.0, 0.3).floor(), 27.0);
    }

    #[test]
    fn test_resolve_neutral_and_crit() {
        let raw = raw_damage(10, 20.0, 10.0, 0.3);
        assert_eq!(resolve_damage(raw, DamageRoll::neutral(), Effectiveness::Normal, 1.5), 27);

        let high = DamageRoll {
            variance: 1.2,
            critical: true,
        };
        // floor(27 * 1.2) = 32, floor(32 * 1.5) = 48
        assert_eq!(resolve_damage(raw, high, Effectiveness::Normal, 1.5), 48);

        let low = DamageRoll {
            variance: 0.8,
            critical: false,
        };
        assert_eq!(resolve_damage(raw, low, Effectiveness::Normal, 1.5), 21);
    }

    #[test]
    fn test_effectiveness() {
        assert_eq!(Effectiveness::of(SkillType::Special, 3.0), Effectiveness::Effective);
        assert_eq!(Effectiveness::of(SkillType::Special, 10.0), Effectiveness::Normal);
        assert_eq!(Effectiveness::of(SkillType::Attack, 16.0), Effectiveness::Resisted);
        assert_eq!(Effectiveness::of(SkillType::Heal, 16.0), Effectiveness::Normal);
        assert_eq!(resolve_damage(20.0, DamageRoll::neutral(), Effectiveness::Resisted, 1.5), 14);
    }

    #[test]
    fn test_enemy_attack_minimum() {
        assert_eq!(enemy_attack_damage(8.0, 5.0, 1.0, 0.3), 6);
        assert_eq!(enemy_attack_damage(1.0, 50.0, 0.8, 0.3), 1);
    }

    #[test]
    fn test_heal_scaling() {
        assert_eq!(heal_amount(30, 15.0), 34);
        assert_eq!(heal_amount(30, 0.0), 30);
    }

    #[test]
    fn test_roll_within_band() {
        let config = BattleConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let roll = DamageRoll::roll(&config, &mut rng);
            assert!(roll.variance >= 0.8 && roll.variance <= 1.2);
        }
    }
}
