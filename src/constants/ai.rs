//! Monster AI constants (perception, decision, movement).

/// Chasing monsters keep the target until it is this far past sight range
pub const CHASE_HYSTERESIS: f32 = 1.2;
/// Hard leash: a chase is abandoned beyond this distance regardless of species
pub const CHASE_LEASH_DISTANCE: f32 = 200.0;

/// Radius of the circle new patrol points are picked on
pub const PATROL_RADIUS: f32 = 100.0;
/// A patrol point closer than this counts as reached
pub const PATROL_ARRIVAL_DISTANCE: f32 = 20.0;

/// Velocities are expressed per 1/60 s; integration scales by this
pub const MOVEMENT_TICK_RATE: f32 = 60.0;

/// Distance a basic monster attack pushes the target
pub const ATTACK_KNOCKBACK: f32 = 20.0;

// Decision priorities
pub const PRIORITY_PATROL: f32 = 3.0;
pub const PRIORITY_COOLDOWN_IDLE: f32 = 4.0;
pub const PRIORITY_GIVE_UP: f32 = 5.0;
pub const PRIORITY_COOLDOWN_FOLLOW: f32 = 6.0;
pub const PRIORITY_CHASE: f32 = 7.0;
pub const PRIORITY_SPOTTED: f32 = 8.0;
pub const PRIORITY_ATTACK: f32 = 9.0;
pub const PRIORITY_REATTACK: f32 = 10.0;

/// Health fraction under which attack priority is damped
pub const CAUTION_HEALTH_FRACTION: f32 = 0.3;
/// Attack priority multiplier when hurt
pub const CAUTION_MULTIPLIER: f32 = 0.8;
/// Target distance under which attack priority is boosted
pub const OPPORTUNITY_DISTANCE: f32 = 50.0;
/// Attack priority multiplier when the target is close
pub const OPPORTUNITY_MULTIPLIER: f32 = 1.2;
