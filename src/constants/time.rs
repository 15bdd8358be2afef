//! Time system constants.

/// Fixed simulation rate (updates per second)
pub const DEFAULT_FPS: u32 = 60;
/// Real time beyond this per frame is dropped instead of simulated
pub const MAX_FRAME_TIME: f32 = 0.25;
