//! Monster species stats and special-ability constants.

// SLIME
pub const SLIME_HEALTH: f32 = 25.0;
pub const SLIME_ATTACK: f32 = 4.0;
pub const SLIME_DEFENSE: f32 = 1.0;
pub const SLIME_SPEED: f32 = 1.8;
pub const SLIME_LEVEL: u32 = 1;
pub const SLIME_ATTACK_RANGE: f32 = 30.0;
pub const SLIME_SIGHT_RADIUS: f32 = 80.0;
/// Seconds between slime attacks
pub const SLIME_ATTACK_COOLDOWN: f32 = 2.0;
pub const SLIME_SIZE: f32 = 25.0;
/// Distance a slime bounces away when hit
pub const SLIME_BOUNCE_DISTANCE: f32 = 10.0;

// GOBLIN
pub const GOBLIN_HEALTH: f32 = 45.0;
pub const GOBLIN_ATTACK: f32 = 8.0;
pub const GOBLIN_DEFENSE: f32 = 3.0;
pub const GOBLIN_SPEED: f32 = 2.5;
pub const GOBLIN_LEVEL: u32 = 2;
pub const GOBLIN_ATTACK_RANGE: f32 = 40.0;
pub const GOBLIN_SIGHT_RADIUS: f32 = 120.0;
pub const GOBLIN_ATTACK_COOLDOWN: f32 = 1.5;
pub const GOBLIN_SIZE: f32 = 30.0;
/// Goblins rage below this health fraction
pub const GOBLIN_RAGE_THRESHOLD: f32 = 0.5;
pub const GOBLIN_RAGE_ATTACK: f32 = 12.0;
pub const GOBLIN_RAGE_SPEED: f32 = 3.5;

// ORC
pub const ORC_HEALTH: f32 = 70.0;
pub const ORC_ATTACK: f32 = 12.0;
pub const ORC_DEFENSE: f32 = 6.0;
pub const ORC_SPEED: f32 = 3.2;
pub const ORC_LEVEL: u32 = 3;
pub const ORC_ATTACK_RANGE: f32 = 50.0;
pub const ORC_SIGHT_RADIUS: f32 = 150.0;
pub const ORC_ATTACK_COOLDOWN: f32 = 1.8;
pub const ORC_SIZE: f32 = 35.0;
/// Orcs arm a heavy attack below this health fraction
pub const ORC_HEAVY_THRESHOLD: f32 = 0.3;
/// Internal cooldown between heavy attack charges (seconds)
pub const ORC_HEAVY_CHARGE_COOLDOWN: f32 = 5.0;
pub const ORC_HEAVY_DAMAGE_MULTIPLIER: f32 = 1.5;
/// Attack cooldown after a heavy attack lands
pub const ORC_HEAVY_RECOVERY: f32 = 2.5;
pub const ORC_HEAVY_KNOCKBACK: f32 = 40.0;

// BOSS
pub const BOSS_HEALTH: f32 = 180.0;
pub const BOSS_ATTACK: f32 = 20.0;
pub const BOSS_DEFENSE: f32 = 12.0;
pub const BOSS_SPEED: f32 = 2.2;
pub const BOSS_LEVEL: u32 = 5;
pub const BOSS_ATTACK_RANGE: f32 = 80.0;
pub const BOSS_SIGHT_RADIUS: f32 = 200.0;
pub const BOSS_ATTACK_COOLDOWN: f32 = 2.5;
pub const BOSS_SIZE: f32 = 50.0;

/// Health fraction at or below which the boss enters phase 2
pub const BOSS_PHASE_TWO_THRESHOLD: f32 = 2.0 / 3.0;
/// Health fraction at or below which the boss enters phase 3
pub const BOSS_PHASE_THREE_THRESHOLD: f32 = 1.0 / 3.0;

pub const BOSS_MAX_MINIONS: usize = 3;
pub const BOSS_SUMMON_COOLDOWN: f32 = 15.0;
pub const BOSS_SUMMON_RANGE: f32 = 150.0;
/// Minimum game time between two summons, whatever triggered them
pub const BOSS_SUMMON_RATE_LIMIT: f32 = 5.0;
/// Chance that taking damage provokes a summon
pub const BOSS_SUMMON_ON_HIT_CHANCE: f64 = 0.3;
/// Offset of each minion from the boss
pub const BOSS_MINION_OFFSETS: [(f32, f32); 3] = [(60.0, 60.0), (-60.0, -60.0), (60.0, -60.0)];

pub const BOSS_METEOR_DAMAGE: f32 = 30.0;
pub const BOSS_METEOR_COOLDOWN: f32 = 10.0;
pub const BOSS_METEOR_RANGE: f32 = 200.0;

pub const BOSS_RAGE_THRESHOLD: f32 = 0.5;
pub const BOSS_RAGE_COOLDOWN: f32 = 20.0;
pub const BOSS_RAGE_ATTACK_MULTIPLIER: f32 = 1.5;
pub const BOSS_RAGE_SPEED_MULTIPLIER: f32 = 1.3;

pub const BOSS_HEAL_THRESHOLD: f32 = 0.3;
pub const BOSS_HEAL_AMOUNT: f32 = 40.0;
pub const BOSS_HEAL_COOLDOWN: f32 = 25.0;

pub const BOSS_ENHANCED_ATTACK_MULTIPLIER: f32 = 1.2;
pub const BOSS_ENHANCED_ATTACK_COOLDOWN: f32 = 2.0;

// SPAWN WEIGHTS
pub const SLIME_SPAWN_WEIGHT: u32 = 5;
pub const GOBLIN_SPAWN_WEIGHT: u32 = 3;
pub const ORC_SPAWN_WEIGHT: u32 = 1;
/// Bosses only appear through explicit scripting
pub const BOSS_SPAWN_WEIGHT: u32 = 0;

/// Placement attempts per spawn before deferring to the next interval
pub const SPAWN_MAX_ATTEMPTS: usize = 10;
/// Minimum distance between a new monster and the target
pub const SPAWN_MIN_TARGET_DISTANCE: f32 = 150.0;
/// Minimum distance between a new monster and any existing one
pub const SPAWN_MIN_MONSTER_SPACING: f32 = 50.0;
