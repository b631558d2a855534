//! Viewport tracking
//!
//! The camera keeps the player centered and stops at the world edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Top-left of the visible viewport in world space. The presentation layer
/// translates the world by `-offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Center on `target`, clamped to `[0, world - viewport]` per axis. An
    /// axis where the world is smaller than the viewport pins to 0.
    pub fn follow(&mut self, target: Vec2, world: Vec2, viewport: Vec2) {
        self.offset = clamp_offset(target - viewport / 2.0, world, viewport);
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }
}

fn clamp_offset(raw: Vec2, world: Vec2, viewport: Vec2) -> Vec2 {
    let max = (world - viewport).max(Vec2::ZERO);
    raw.clamp(Vec2::ZERO, max)
}
