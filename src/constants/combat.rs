//! Battle resolver defaults.
//!
//! These seed `BattleConfig::default()`; sessions may override them.

/// Share of the defender's defense subtracted from raw damage
pub const BATTLE_DEFENSE_FACTOR: f32 = 0.3;
/// Minimum damage multiplier from the variance roll
pub const BATTLE_DAMAGE_MIN_MULT: f32 = 0.8;
/// Maximum damage multiplier from the variance roll
pub const BATTLE_DAMAGE_MAX_MULT: f32 = 1.2;
/// Chance for a player skill to crit (0.0 - 1.0)
pub const BATTLE_CRIT_CHANCE: f32 = 0.15;
/// Critical hit damage multiplier
pub const BATTLE_CRIT_MULTIPLIER: f32 = 1.5;
/// MP every combatant enters a battle with
pub const BATTLE_STARTING_MP: i32 = 50;
/// Presentation delay before the enemy team acts (seconds)
pub const BATTLE_ENEMY_TURN_DELAY: f32 = 1.5;
/// Oldest battle log entries are evicted past this length
pub const BATTLE_LOG_CAPACITY: usize = 50;
/// Turns a buff/debuff lasts when its skill doesn't say
pub const STATUS_EFFECT_DEFAULT_DURATION: u32 = 3;

pub const EFFECTIVE_MULTIPLIER: f32 = 1.5;
pub const RESISTED_MULTIPLIER: f32 = 0.7;
/// Special skills are effective against defense below this
pub const EFFECTIVE_DEFENSE_BELOW: f32 = 5.0;
/// Plain attacks are resisted by defense above this
pub const RESISTED_DEFENSE_ABOVE: f32 = 15.0;

/// Experience granted per level of each defeated enemy
pub const EXP_PER_ENEMY_LEVEL: u32 = 25;
/// Gold granted per level of each defeated enemy
pub const GOLD_PER_ENEMY_LEVEL: u32 = 10;
