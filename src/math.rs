//! Vector helpers on top of `glam::Vec2`.
//!
//! Positions use screen orientation: +x right, +y down.

use glam::Vec2;

use crate::constants::WORLD_SIZE;

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// Unit vector in the direction of `v`, or zero for a zero-length input.
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamp a point into the map, keeping `margin` units from every edge.
pub fn clamp_to_world(p: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        clamp(p.x, margin, WORLD_SIZE - margin),
        clamp(p.y, margin, WORLD_SIZE - margin),
    )
}

/// Unit vector for an angle in radians.
pub fn from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
