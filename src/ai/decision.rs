//! Maps AI state and perception to an intended action.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::perception::{sensor_ranges, AIPerception};
use crate::components::{AIState, MonsterState};
use crate::constants::*;
use crate::math;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AIAction {
    Move,
    Attack,
    Idle,
}

/// Consumed by the orchestrator in the same tick it is made
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AIDecision {
    pub action: AIAction,
    /// Explicit destination; `None` means "wherever the target is"
    pub target: Option<Vec2>,
    pub priority: f32,
}

impl AIDecision {
    fn new(action: AIAction, target: Option<Vec2>, priority: f32) -> Self {
        Self {
            action,
            target,
            priority,
        }
    }
}

pub fn make_decision(
    monster: &mut MonsterState,
    perception: &AIPerception,
    game_time: f32,
    rng: &mut impl Rng,
) -> AIDecision {
    let (sight, attack_range) = sensor_ranges(monster);
    let can_strike = perception.target_tracked && perception.player_distance <= attack_range;

    match monster.ai_state {
        AIState::Idle => {
            if perception.player_in_range {
                AIDecision::new(AIAction::Move, None, PRIORITY_SPOTTED)
            } else {
                let patrol = patrol_target(monster, rng);
                AIDecision::new(AIAction::Move, Some(patrol), PRIORITY_PATROL)
            }
        }
        AIState::Chasing => {
            // The leash never cuts in before the hysteresis band does
            let leash = CHASE_LEASH_DISTANCE.max(sight * CHASE_HYSTERESIS);
            if can_strike {
                AIDecision::new(AIAction::Attack, None, PRIORITY_ATTACK)
            } else if !perception.target_tracked || perception.player_distance > leash {
                AIDecision::new(AIAction::Idle, None, PRIORITY_GIVE_UP)
            } else {
                AIDecision::new(AIAction::Move, None, PRIORITY_CHASE)
            }
        }
        AIState::Attacking => {
            if game_time < monster.attack_cooldown {
                if perception.target_tracked {
                    AIDecision::new(AIAction::Move, None, PRIORITY_COOLDOWN_FOLLOW)
                } else {
                    AIDecision::new(AIAction::Idle, None, PRIORITY_COOLDOWN_IDLE)
                }
            } else if can_strike {
                AIDecision::new(AIAction::Attack, None, PRIORITY_REATTACK)
            } else {
                AIDecision::new(AIAction::Move, None, PRIORITY_CHASE)
            }
        }
    }
}

/// Current patrol point, or a fresh one once the old one is reached.
pub fn patrol_target(monster: &mut MonsterState, rng: &mut impl Rng) -> Vec2 {
    if let Some(target) = monster.patrol_target {
        if monster.position.distance(target) > PATROL_ARRIVAL_DISTANCE {
            return target;
        }
    }
    let offset = math::from_angle(rng.gen_range(0.0..TAU)) * PATROL_RADIUS;
    let target = math::clamp_to_world(monster.position + offset, PLACEMENT_MARGIN);
    monster.patrol_target = Some(target);
    target
}

pub fn state_transition(_current: AIState, action: AIAction) -> AIState {
    match action {
        AIAction::Move => AIState::Chasing,
        AIAction::Attack => AIState::Attacking,
        AIAction::Idle => AIState::Idle,
    }
}

/// Scalar priority with caution and opportunity biases on attacks.
pub fn weighted_priority(decision: &AIDecision, monster: &MonsterState, distance: f32) -> f32 {
    let mut priority = decision.priority;
    if decision.action == AIAction::Attack {
        if monster.stats.health_fraction() < CAUTION_HEALTH_FRACTION {
            priority *= CAUTION_MULTIPLIER;
        }
        if distance < OPPORTUNITY_DISTANCE {
            priority *= OPPORTUNITY_MULTIPLIER;
        }
    }
    priority
}
