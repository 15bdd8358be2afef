//! Core gameplay constants (player stats, XP, encounters).

pub const PLAYER_STARTING_HEALTH: f32 = 100.0;
pub const PLAYER_ATTACK: f32 = 15.0;
pub const PLAYER_DEFENSE: f32 = 5.0;
pub const PLAYER_SPEED: f32 = 3.0;

/// Base XP formula multiplier (XP needed = level * this)
pub const XP_PER_LEVEL_MULTIPLIER: u32 = 100;
pub const LEVEL_UP_MAX_HP: f32 = 10.0;
pub const LEVEL_UP_ATTACK: f32 = 2.0;
pub const LEVEL_UP_DEFENSE: f32 = 1.0;

/// Monsters this close to the player start a battle
pub const ENCOUNTER_TRIGGER_RADIUS: f32 = 40.0;
/// Game seconds after a battle during which no new battle starts
pub const ENCOUNTER_COOLDOWN: f32 = 3.0;
