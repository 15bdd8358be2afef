//! Exploration combat: monsters striking the player.

use tracing::{debug, info};

use crate::components::{MonsterState, Player};
use crate::events::{EventQueue, GameEvent};
use crate::math;

/// Damage after defense. Always at least 1.
pub fn basic_damage(attack: f32, defense: f32) -> f32 {
    (attack - defense).max(1.0)
}

/// Hit the player for `damage`, pushing them `knockback` units directly away
/// from the attacker. Returns the hp the player lost.
pub fn strike_player(
    attacker: &MonsterState,
    target: &mut Player,
    damage: f32,
    knockback: f32,
    events: &mut EventQueue,
) -> f32 {
    let was_alive = target.is_alive;
    let lost = target.take_damage(damage);

    if knockback > 0.0 {
        let dir = math::normalize(target.position - attacker.position);
        target.knock_back(dir * knockback);
    }

    debug!(
        monster = %attacker.id,
        damage = lost,
        hp = target.stats.hp,
        "Monster hit player"
    );
    events.push(GameEvent::MonsterAttacked {
        monster: attacker.id,
        target_pos: target.position,
        damage: lost,
    });

    if was_alive && !target.is_alive {
        info!(monster = %attacker.id, "Player was slain");
        events.push(GameEvent::PlayerDied);
    }
    lost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::{MonsterId, MonsterKind};
    use glam::Vec2;

    #[test]
    fn test_basic_damage_minimum() {
        assert_eq!(basic_damage(12.0, 5.0), 7.0);
        assert_eq!(basic_damage(4.0, 5.0), 1.0);
    }

    #[test]
    fn test_strike_knocks_back_and_kills() {
        let attacker = MonsterState::new(MonsterId(900), MonsterKind::Goblin, Vec2::new(100.0, 100.0));
        let mut player = Player::new("hero", Vec2::new(100.0, 130.0));
        player.stats.hp = 3.0;
        let mut events = EventQueue::new();

        let lost = strike_player(&attacker, &mut player, 10.0, 20.0, &mut events);
        assert_eq!(lost, 3.0);
        assert!(!player.is_alive);
        assert_eq!(player.position, Vec2::new(100.0, 150.0));
        assert!(events.iter().any(|e| *e == GameEvent::PlayerDied));
    }
}
