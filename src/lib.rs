//! Tank Arena - a top-down tank battle simulation core
//!
//! Core modules:
//! - `sim`: Deterministic tick-driven simulation (actors, projectiles, AI, session state)
//! - `config`: Arena bootstrap constants, loadable from JSON
//! - `error`: Configuration errors
//!
//! Rendering, assets and device input are left to the host. The core takes
//! abstract key signals and hands back a [`sim::Snapshot`] every tick.

pub mod config;
pub mod error;
pub mod sim;

pub use config::ArenaConfig;
pub use error::{ConfigError, ConfigResult};

/// Game configuration constants (defaults for [`ArenaConfig`])
pub mod consts {
    /// Fixed simulation step in milliseconds (62.5 Hz)
    pub const SIM_STEP_MS: u64 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1344.0;
    pub const WORLD_HEIGHT: f32 = 896.0;
    /// Visible viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 784.0;
    pub const VIEWPORT_HEIGHT: f32 = 784.0;

    /// Wall tile size
    pub const TILE_WIDTH: f32 = 16.0;
    pub const TILE_HEIGHT: f32 = 14.0;
    /// Tiles on each side of the center tile for the central cross
    pub const CROSS_HALF_LENGTH: u32 = 15;

    /// Tank sprite extents
    pub const TANK_SIZE: f32 = 32.0;
    /// Tank step per move
    pub const TANK_SPEED: f32 = 6.5;
    /// Sprite frames per tank
    pub const TANK_FRAMES: usize = 2;

    /// Projectile extents (square) and step per tick
    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Player spawn point (top-left of the tank box)
    pub const PLAYER_SPAWN_X: f32 = 672.0;
    pub const PLAYER_SPAWN_Y: f32 = 680.0;

    /// Enemy spawn band along the top edge
    pub const ENEMY_SPAWN_MIN_X: f32 = 60.0;
    pub const ENEMY_SPAWN_MAX_X: f32 = 1250.0;
    pub const ENEMY_SPAWN_Y: f32 = 40.0;
    pub const INITIAL_ENEMIES: u32 = 3;

    /// Player cooldowns
    pub const MOVE_INTERVAL_MS: u64 = 25;
    pub const FIRE_INTERVAL_MS: u64 = 1000;
    /// Enemy spawn cadence
    pub const SPAWN_INTERVAL_MS: u64 = 3000;
    /// Delay between player death and respawn
    pub const RESPAWN_DELAY_MS: u64 = 2000;

    /// Enemy wander cadence and per-heading step budget
    pub const WANDER_INTERVAL_MS: u64 = 50;
    pub const WANDER_MIN_STEPS: u32 = 20;
    pub const WANDER_MAX_STEPS: u32 = 60;
    /// Enemy fire interval bounds (re-drawn after each attempt)
    pub const ENEMY_FIRE_MIN_MS: u64 = 1000;
    pub const ENEMY_FIRE_MAX_MS: u64 = 2000;

    /// Session rules
    pub const STARTING_LIVES: u8 = 3;
    pub const ENEMY_SCORE: u64 = 100;

    /// Impact effect lifetime
    pub const EFFECT_LIFETIME_MS: u64 = 300;
}
