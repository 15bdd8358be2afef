use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::MonsterState;
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoblinState {
    pub raging: bool,
}

/// Rage below half health, calm down once healed past it.
pub(super) fn update(state: &mut MonsterState, goblin: &mut GoblinState, events: &mut EventQueue) {
    let should_rage = state.stats.health_fraction() < GOBLIN_RAGE_THRESHOLD;
    if should_rage == goblin.raging {
        return;
    }

    goblin.raging = should_rage;
    if should_rage {
        state.stats.attack = GOBLIN_RAGE_ATTACK;
        state.stats.speed = GOBLIN_RAGE_SPEED;
    } else {
        state.stats.attack = GOBLIN_ATTACK;
        state.stats.speed = GOBLIN_SPEED;
    }
    info!(monster = %state.id, active = should_rage, "Goblin rage");
    events.push(GameEvent::GoblinRage {
        monster: state.id,
        active: should_rage,
    });
}

#[cfg(test)]
mod tests {
    use super::super::{Behavior, Monster, MonsterKind};
    use super::*;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tick(goblin: &mut Monster, events: &mut EventQueue) {
        let mut rng = StdRng::seed_from_u64(1);
        goblin.update_special(None, 1.0 / 60.0, 0.0, &mut rng, events);
    }

    #[test]
    fn test_rage_applies_on_next_update() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut goblin = Monster::new(MonsterKind::Goblin, Vec2::new(500.0, 500.0));

        goblin.take_damage(20.0, 0.0, &mut rng, &mut events);
        tick(&mut goblin, &mut events);
        assert_eq!(goblin.state.stats.hp, 25.0);
        assert_eq!(goblin.state.stats.attack, GOBLIN_ATTACK);

        goblin.take_damage(5.0, 0.0, &mut rng, &mut events);
        // Not applied until the goblin updates
        assert_eq!(goblin.state.stats.attack, GOBLIN_ATTACK);
        tick(&mut goblin, &mut events);
        assert_eq!(goblin.state.stats.attack, 12.0);
        assert_eq!(goblin.state.stats.speed, 3.5);
        assert_eq!(goblin.behavior, Behavior::Goblin(GoblinState { raging: true }));
    }

    #[test]
    fn test_rage_reverts_after_heal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut goblin = Monster::new(MonsterKind::Goblin, Vec2::new(500.0, 500.0));
        goblin.take_damage(30.0, 0.0, &mut rng, &mut events);
        tick(&mut goblin, &mut events);
        assert_eq!(goblin.state.stats.attack, GOBLIN_RAGE_ATTACK);

        goblin.heal(30.0);
        tick(&mut goblin, &mut events);
        assert_eq!(goblin.state.stats.attack, GOBLIN_ATTACK);
        assert_eq!(goblin.state.stats.speed, GOBLIN_SPEED);
    }
}
