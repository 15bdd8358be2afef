//! Fixed-timestep driver.
//!
//! Real elapsed time accumulates and is drained in fixed `1/fps` slices.
//! Each slice is one simulation update; rendering (outside this crate) runs
//! once per frame however many slices ran.

use crate::constants::MAX_FRAME_TIME;

#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(fps: u32) -> Self {
        Self {
            step: 1.0 / fps.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Length of one simulation step in seconds
    pub fn step_seconds(&self) -> f32 {
        self.step
    }

    /// Add real elapsed time. Long stalls are capped so the simulation
    /// does not spiral trying to catch up.
    fn accumulate(&mut self, real_dt: f32) {
        self.accumulator += real_dt.clamp(0.0, MAX_FRAME_TIME);
    }

    /// Take one step's worth of time if available
    fn consume(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Accumulate `real_dt` and call `update` once per whole step.
    /// Returns how many steps ran.
    pub fn run(&mut self, real_dt: f32, mut update: impl FnMut(f32)) -> u32 {
        puffin::profile_function!();
        self.accumulate(real_dt);
        let mut steps = 0;
        while self.consume() {
            update(self.step);
            steps += 1;
        }
        steps
    }
}
