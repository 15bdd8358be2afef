//! Experience and leveling system.

use tracing::info;

use crate::components::CharacterStats;
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};

/// Exp needed to advance from `level` to the next
pub fn exp_for_level(level: u32) -> u32 {
    level * XP_PER_LEVEL_MULTIPLIER
}

/// Progress toward next level (0.0 to 1.0)
pub fn exp_progress(stats: &CharacterStats) -> f32 {
    (stats.exp as f32 / exp_for_level(stats.level) as f32).min(1.0)
}

/// Add exp and process every level-up it pays for. Returns levels gained.
pub fn grant_exp(stats: &mut CharacterStats, amount: u32, events: &mut EventQueue) -> u32 {
    stats.exp += amount;
    apply_level_ups(stats, events)
}

/// Each level: +10 max hp with a full heal, +2 attack, +1 defense.
pub fn apply_level_ups(stats: &mut CharacterStats, events: &mut EventQueue) -> u32 {
    let mut gained = 0;
    while stats.exp >= exp_for_level(stats.level) {
        stats.exp -= exp_for_level(stats.level);
        stats.level += 1;
        stats.max_hp += LEVEL_UP_MAX_HP;
        stats.hp = stats.max_hp;
        stats.attack += LEVEL_UP_ATTACK;
        stats.defense += LEVEL_UP_DEFENSE;
        gained += 1;
        info!(level = stats.level, "Level up");
        events.push(GameEvent::LevelUp {
            new_level: stats.level,
        });
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CharacterStats {
        CharacterStats::new(100.0, 15.0, 5.0, 3.0, 1)
    }

    #[test]
    fn test_exp_for_level() {
        assert_eq!(exp_for_level(1), XP_PER_LEVEL_MULTIPLIER);
        assert_eq!(exp_for_level(5), 5 * XP_PER_LEVEL_MULTIPLIER);
    }

    #[test]
    fn test_grant_exp_no_level_up() {
        let mut s = stats();
        let mut events = EventQueue::new();
        assert_eq!(grant_exp(&mut s, 10, &mut events), 0);
        assert_eq!(s.exp, 10);
        assert_eq!(s.level, 1);
        assert!(exp_progress(&s) > 0.0);
    }

    #[test]
    fn test_grant_exp_level_up_heals() {
        let mut s = stats();
        s.hp = 40.0;
        let mut events = EventQueue::new();
        assert_eq!(grant_exp(&mut s, 100, &mut events), 1);
        assert_eq!(s.level, 2);
        assert_eq!(s.exp, 0);
        assert_eq!(s.max_hp, 110.0);
        assert_eq!(s.hp, 110.0);
        assert_eq!(s.attack, 17.0);
        assert_eq!(s.defense, 6.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_grant_exp_multiple_level_ups() {
        let mut s = stats();
        let mut events = EventQueue::new();
        let needed = exp_for_level(1) + exp_for_level(2) + exp_for_level(3);
        assert_eq!(grant_exp(&mut s, needed + 5, &mut events), 3);
        assert_eq!(s.level, 4);
        assert_eq!(s.exp, 5);
    }
}
