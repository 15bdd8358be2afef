//! What a monster can see of its target this tick.

use glam::Vec2;

use crate::components::{AIState, MonsterState, Player};
use crate::constants::CHASE_HYSTERESIS;

/// Transient per-tick perception result. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AIPerception {
    /// Target within sight range
    pub player_in_range: bool,
    /// Euclidean distance; infinite when there is no live target
    pub player_distance: f32,
    /// Target still held: in sight, or within the widened range while
    /// already chasing or attacking
    pub target_tracked: bool,
    pub obstacles: Vec<Vec2>,
    pub escape_route: Option<Vec2>,
}

impl AIPerception {
    pub fn nothing() -> Self {
        Self {
            player_in_range: false,
            player_distance: f32::INFINITY,
            target_tracked: false,
            obstacles: Vec::new(),
            escape_route: None,
        }
    }
}

/// (sight range, attack range) for the monster's species
pub fn sensor_ranges(monster: &MonsterState) -> (f32, f32) {
    let def = monster.kind.def();
    (def.sight_range, def.attack_range)
}

pub fn perceive(monster: &MonsterState, target: Option<&Player>) -> AIPerception {
    let Some(target) = target.filter(|t| t.is_alive) else {
        return AIPerception::nothing();
    };

    let (sight, _) = sensor_ranges(monster);
    let distance_sq = monster.position.distance_squared(target.position);
    let player_in_range = distance_sq <= sight * sight;
    // The range test stays squared; the root is still needed past sight range for the hysteresis band.
    let player_distance = distance_sq.sqrt();

    let engaged = matches!(monster.ai_state, AIState::Chasing | AIState::Attacking);
    let target_tracked =
        player_in_range || (engaged && player_distance <= sight * CHASE_HYSTERESIS);

    AIPerception {
        player_in_range,
        player_distance,
        target_tracked,
        obstacles: Vec::new(),
        escape_route: None,
    }
}

pub fn is_target_in_attack_range(monster: &MonsterState, target: Option<&Player>) -> bool {
    match target {
        Some(t) if t.is_alive => {
            let (_, attack) = sensor_ranges(monster);
            monster.position.distance(t.position) <= attack
        }
        _ => false,
    }
}

pub fn should_stop_chasing(monster: &MonsterState, target: Option<&Player>) -> bool {
    match target {
        Some(t) if t.is_alive => {
            let (sight, _) = sensor_ranges(monster);
            monster.position.distance(t.position) > sight * CHASE_HYSTERESIS
        }
        _ => true,
    }
}
