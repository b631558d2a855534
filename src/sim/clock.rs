//! Fixed-step frame clock
//!
//! Hosts render at whatever rate they get; the session only ever ticks in
//! `SIM_STEP_MS` increments. [`FrameClock`] accumulates real frame time and
//! reports how many fixed steps to run this frame.

use crate::consts::{MAX_SUBSTEPS, SIM_STEP_MS};

/// Longest frame we account for, in seconds. Anything longer (a stall, a
/// backgrounded window) is treated as this long.
pub const MAX_FRAME_SECS: f32 = 0.1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameClock {
    /// Unconsumed time in milliseconds
    accumulator_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds and return the number of fixed steps
    /// to run. Capped at `MAX_SUBSTEPS` to prevent a spiral of death; time
    /// beyond the cap is dropped.
    pub fn advance(&mut self, dt_secs: f32) -> u32 {
        let dt = dt_secs.clamp(0.0, MAX_FRAME_SECS);
        self.accumulator_ms += f64::from(dt) * 1000.0;

        let step = SIM_STEP_MS as f64;
        let mut steps = 0;
        while self.accumulator_ms >= step && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= step;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator_ms = self.accumulator_ms.min(step);
        }
        steps
    }

    /// Drop any partial step, e.g. after pausing or restarting
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator_ms / SIM_STEP_MS as f64) as f32
    }
}
