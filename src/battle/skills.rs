//! Skill catalog.

use tracing::warn;

use super::types::{EffectKind, EffectTarget, Skill, SkillType};

const PLAYER_SKILL_IDS: [&str; 5] = ["attack", "fireball", "heal", "power_up", "weaken"];

/// Look up a skill by id. Unknown ids fall back to the basic attack.
pub fn skill_by_id(id: &str) -> Skill {
    match id {
        "attack" => Skill::new("attack", "普通攻击", SkillType::Attack, 10, 0, 0).with_effect(
            EffectKind::Damage,
            0,
            None,
            EffectTarget::Target,
        ),
        "fireball" => Skill::new("fireball", "火球术", SkillType::Special, 25, 15, 2).with_effect(
            EffectKind::Damage,
            0,
            None,
            EffectTarget::Target,
        ),
        "heal" => Skill::new("heal", "治疗术", SkillType::Heal, 0, 20, 3).with_effect(
            EffectKind::Heal,
            30,
            None,
            EffectTarget::Caster,
        ),
        "power_up" => Skill::new("power_up", "力量祝福", SkillType::Buff, 0, 10, 4).with_effect(
            EffectKind::Buff,
            5,
            Some(3),
            EffectTarget::Caster,
        ),
        "weaken" => Skill::new("weaken", "虚弱诅咒", SkillType::Debuff, 5, 12, 3)
            .with_effect(EffectKind::Damage, 0, None, EffectTarget::Target)
            .with_effect(EffectKind::Debuff, 4, None, EffectTarget::Target),
        other => {
            warn!(skill = other, "Unknown skill, using basic attack");
            skill_by_id("attack")
        }
    }
}

pub fn player_skills() -> Vec<Skill> {
    PLAYER_SKILL_IDS.iter().map(|id| skill_by_id(id)).collect()
}

pub fn enemy_skills() -> Vec<Skill> {
    vec![skill_by_id("attack")]
}
