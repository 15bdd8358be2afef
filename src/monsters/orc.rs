use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{MonsterState, Player};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::systems::combat;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrcState {
    /// Seconds until another heavy attack may be armed
    pub heavy_cooldown: f32,
    /// A heavy attack is armed and fires on the next in-range tick
    pub charging: bool,
}

pub(super) fn on_damage(state: &mut MonsterState, orc: &mut OrcState, events: &mut EventQueue) {
    if orc.charging
        || orc.heavy_cooldown > 0.0
        || state.stats.health_fraction() >= ORC_HEAVY_THRESHOLD
    {
        return;
    }
    orc.charging = true;
    orc.heavy_cooldown = ORC_HEAVY_CHARGE_COOLDOWN;
    info!(monster = %state.id, "Orc charging heavy attack");
    events.push(GameEvent::OrcCharging { monster: state.id });
}

pub(super) fn update(
    state: &mut MonsterState,
    orc: &mut OrcState,
    target: Option<&mut Player>,
    delta_time: f32,
    game_time: f32,
    events: &mut EventQueue,
) {
    orc.heavy_cooldown = (orc.heavy_cooldown - delta_time).max(0.0);
    if !orc.charging {
        return;
    }
    let Some(target) = target.filter(|t| t.is_alive) else {
        return;
    };
    if state.position.distance(target.position) > state.kind.def().attack_range {
        return;
    }

    let damage = combat::basic_damage(
        state.stats.attack * ORC_HEAVY_DAMAGE_MULTIPLIER,
        target.stats.defense,
    );
    combat::strike_player(state, target, damage, ORC_HEAVY_KNOCKBACK, events);
    state.attack_cooldown = game_time + ORC_HEAVY_RECOVERY;
    state.last_attack_time = game_time;
    orc.charging = false;
}
