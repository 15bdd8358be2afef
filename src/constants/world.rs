//! World geometry constants.

/// Width and height of the square exploration map (world units)
pub const WORLD_SIZE: f32 = 2000.0;
/// Margin kept between a moving monster and the map edge
pub const MONSTER_MOVE_MARGIN: f32 = 20.0;
/// Margin used for patrol targets and spawn placement
pub const PLACEMENT_MARGIN: f32 = 50.0;
