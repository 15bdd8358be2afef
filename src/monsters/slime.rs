use std::f32::consts::TAU;

use rand::Rng;

use crate::components::MonsterState;
use crate::constants::{MONSTER_MOVE_MARGIN, SLIME_BOUNCE_DISTANCE};
use crate::math;

/// Slimes bounce a short distance in a random direction when hit.
pub(super) fn on_damage(state: &mut MonsterState, rng: &mut impl Rng) {
    let bounce = math::from_angle(rng.gen_range(0.0..TAU)) * SLIME_BOUNCE_DISTANCE;
    state.position = math::clamp_to_world(state.position + bounce, MONSTER_MOVE_MARGIN);
}

#[cfg(test)]
mod tests {
    use super::super::{Monster, MonsterKind};
    use crate::events::EventQueue;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slime_bounces_when_hit() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut events = EventQueue::new();
        let start = Vec2::new(500.0, 500.0);
        let mut slime = Monster::new(MonsterKind::Slime, start);
        slime.take_damage(5.0, 0.0, &mut rng, &mut events);
        let moved = slime.position().distance(start);
        assert!((moved - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_slime_bounce_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut events = EventQueue::new();
        let mut slime = Monster::new(MonsterKind::Slime, Vec2::new(20.0, 20.0));
        for _ in 0..5 {
            slime.take_damage(1.0, 0.0, &mut rng, &mut events);
            let p = slime.position();
            assert!(p.x >= 20.0 && p.y >= 20.0);
        }
    }
}
