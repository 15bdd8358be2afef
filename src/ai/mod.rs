//! Monster AI: perception, decision and per-tick execution.
//!
//! Each tick a living monster first runs its species step
//! (`Monster::update_special`), then perceives its target, decides, executes
//! the decision, runs the state-transition table and integrates movement.
//! A species attack sets the shared attack cooldown, so it replaces the basic
//! attack for that tick.

pub mod decision;
pub mod perception;

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::components::{AIState, Direction, MonsterState, Player};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::math;
use crate::monsters::Monster;
use crate::systems::combat;

pub use decision::{make_decision, state_transition, weighted_priority, AIAction, AIDecision};
pub use perception::{is_target_in_attack_range, perceive, should_stop_chasing, AIPerception};

/// Advance one monster by one tick against an optional target.
pub fn update_monster(
    monster: &mut Monster,
    mut target: Option<&mut Player>,
    delta_time: f32,
    game_time: f32,
    rng: &mut impl Rng,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    if !monster.is_alive() {
        return;
    }

    monster.update_special(target.as_deref_mut(), delta_time, game_time, rng, events);

    let state = &mut monster.state;
    let perception = perceive(state, target.as_deref());
    let decision = make_decision(state, &perception, game_time, rng);

    match decision.action {
        AIAction::Move => execute_move(state, &decision, &perception, target.as_deref()),
        AIAction::Attack => execute_attack(state, target.as_deref_mut(), game_time, events),
        AIAction::Idle => state.stop(),
    }

    let next = state_transition(state.ai_state, decision.action);
    if next != state.ai_state {
        debug!(
            monster = %state.id,
            from = ?state.ai_state,
            to = ?next,
            "AI state changed"
        );
        events.push(GameEvent::AIStateChanged {
            monster: state.id,
            from: state.ai_state,
            to: next,
        });
        state.ai_state = next;
    }

    if state.is_moving {
        let step = state.velocity * delta_time * MOVEMENT_TICK_RATE;
        state.position = math::clamp_to_world(state.position + step, MONSTER_MOVE_MARGIN);
    }

    monster.check_death(events);
}

fn execute_move(
    state: &mut MonsterState,
    decision: &AIDecision,
    perception: &AIPerception,
    target: Option<&Player>,
) {
    let live_target = target
        .filter(|_| perception.target_tracked && state.ai_state == AIState::Chasing)
        .map(|t| t.position);

    let Some(destination) = live_target.or(decision.target).or(state.patrol_target) else {
        state.stop();
        return;
    };

    let dir = math::normalize(destination - state.position);
    if dir == Vec2::ZERO {
        state.stop();
        return;
    }
    state.velocity = dir * state.stats.speed;
    state.direction = Direction::from_vector(dir);
    state.is_moving = true;
}

fn execute_attack(
    state: &mut MonsterState,
    target: Option<&mut Player>,
    game_time: f32,
    events: &mut EventQueue,
) {
    state.stop();

    let Some(target) = target.filter(|t| t.is_alive) else {
        return;
    };
    if game_time < state.attack_cooldown {
        return;
    }
    if state.position.distance(target.position) > state.kind.def().attack_range {
        return;
    }

    let damage = combat::basic_damage(state.stats.attack, target.stats.defense);
    combat::strike_player(state, target, damage, ATTACK_KNOCKBACK, events);
    state.attack_cooldown = game_time + state.kind.def().attack_cooldown;
    state.last_attack_time = game_time;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monsters::{Behavior, MonsterKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dead_monster_skipped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut slime = Monster::new(MonsterKind::Slime, Vec2::new(500.0, 500.0));
        slime.set_dead(&mut events);
        let before = slime.clone();
        update_monster(&mut slime, None, DT, 0.0, &mut rng, &mut events);
        assert_eq!(slime, before);
    }

    #[test]
    fn test_spot_then_chase() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut goblin = Monster::new(MonsterKind::Goblin, Vec2::new(500.0, 500.0));
        let mut player = Player::new("hero", Vec2::new(600.0, 500.0));

        update_monster(&mut goblin, Some(&mut player), DT, 0.0, &mut rng, &mut events);
        assert_eq!(goblin.state.ai_state, AIState::Chasing);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::AIStateChanged { from: AIState::Idle, to: AIState::Chasing, .. }
        )));

        let x_before = goblin.position().x;
        update_monster(&mut goblin, Some(&mut player), DT, DT, &mut rng, &mut events);
        assert!(goblin.state.is_moving);
        assert_eq!(goblin.state.direction, Direction::Right);
        // speed 2.5 per 1/60 s
        assert!((goblin.position().x - x_before - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_attack_damage_cooldown_knockback() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut orc = Monster::new(MonsterKind::Orc, Vec2::new(500.0, 500.0));
        orc.state.ai_state = AIState::Chasing;
        let mut player = Player::new("hero", Vec2::new(500.0, 540.0));

        update_monster(&mut orc, Some(&mut player), DT, 10.0, &mut rng, &mut events);
        // 12 - 5
        assert_eq!(player.stats.hp, PLAYER_STARTING_HEALTH - 7.0);
        assert_eq!(player.position, Vec2::new(500.0, 560.0));
        assert_eq!(orc.state.attack_cooldown, 10.0 + ORC_ATTACK_COOLDOWN);
        assert_eq!(orc.state.last_attack_time, 10.0);
        assert_eq!(orc.state.ai_state, AIState::Attacking);
        assert!(!orc.state.is_moving);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut slime = Monster::new(MonsterKind::Slime, Vec2::new(500.0, 500.0));
        slime.state.ai_state = AIState::Chasing;
        slime.state.attack_cooldown = 20.0;
        let mut player = Player::new("hero", Vec2::new(520.0, 500.0));

        update_monster(&mut slime, Some(&mut player), DT, 10.0, &mut rng, &mut events);
        assert_eq!(player.stats.hp, PLAYER_STARTING_HEALTH);
    }

    #[test]
    fn test_monster_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut goblin = Monster::new(MonsterKind::Goblin, Vec2::new(100.0, 100.0));
        goblin.state.ai_state = AIState::Chasing;
        let mut player = Player::new("hero", Vec2::new(0.0, 0.0));
        for i in 0..30 {
            update_monster(&mut goblin, Some(&mut player), DT, i as f32 * DT, &mut rng, &mut events);
            let p = goblin.position();
            assert!(p.x >= MONSTER_MOVE_MARGIN && p.y >= MONSTER_MOVE_MARGIN);
        }
    }

    #[test]
    fn test_gives_up_chase_past_hysteresis() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut slime = Monster::new(MonsterKind::Slime, Vec2::new(500.0, 500.0));
        slime.state.ai_state = AIState::Chasing;

        let mut near = Player::new("hero", Vec2::new(590.0, 500.0));
        update_monster(&mut slime, Some(&mut near), DT, 0.0, &mut rng, &mut events);
        assert_eq!(slime.state.ai_state, AIState::Chasing);

        slime.state.position = Vec2::new(500.0, 500.0);
        let mut far = Player::new("hero", Vec2::new(600.0, 500.0));
        update_monster(&mut slime, Some(&mut far), DT, 0.0, &mut rng, &mut events);
        assert_eq!(slime.state.ai_state, AIState::Idle);
    }
    fn hits(events: &EventQueue) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::MonsterAttacked { .. }))
            .count()
    }

    #[test]
    fn test_orc_heavy_attack_replaces_basic_hit() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut orc = Monster::new(MonsterKind::Orc, Vec2::new(500.0, 500.0));
        orc.state.ai_state = AIState::Chasing;
        orc.state.stats.hp = 15.0;
        if let Behavior::Orc(state) = &mut orc.behavior {
            state.charging = true;
        }
        let mut player = Player::new("hero", Vec2::new(530.0, 500.0));

        update_monster(&mut orc, Some(&mut player), DT, 10.0, &mut rng, &mut events);

        // 12 * 1.5 - 5, and no basic hit on top
        assert_eq!(player.stats.hp, PLAYER_STARTING_HEALTH - 13.0);
        assert_eq!(hits(&events), 1);
        assert_eq!(orc.state.attack_cooldown, 10.0 + ORC_HEAVY_RECOVERY);
    }

    #[test]
    fn test_boss_enhanced_attack_preempts_basic_hit() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = EventQueue::new();
        let mut boss = Monster::new(MonsterKind::Boss, Vec2::new(1000.0, 1000.0));
        boss.state.ai_state = AIState::Chasing;
        if let Behavior::Boss(state) = &mut boss.behavior {
            state.cooldowns.summon = 100.0;
        }
        let mut player = Player::new("hero", Vec2::new(1050.0, 1000.0));

        update_monster(&mut boss, Some(&mut player), DT, 10.0, &mut rng, &mut events);

        // 20 * 1.2 - 5
        assert!((PLAYER_STARTING_HEALTH - player.stats.hp - 19.0).abs() < 1e-3);
        assert_eq!(hits(&events), 1);
        assert_eq!(boss.state.attack_cooldown, 10.0 + BOSS_ENHANCED_ATTACK_COOLDOWN);
    }
}
