//! Arena bootstrap configuration
//!
//! World size, tile size, spawn points, sprite-frame counts, speeds and
//! cadences. These are fixed for the lifetime of a session; `Default`
//! reproduces the stock arena and a JSON file can override any field.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// Arena configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// RNG seed for enemy placement and AI rolls
    pub seed: u64,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// Tiles on each side of the center tile for the central cross
    pub cross_half_length: u32,

    // === Tanks ===
    pub tank_size: f32,
    pub tank_speed: f32,
    pub player_frames: usize,
    pub enemy_frames: usize,
    pub player_spawn: Vec2,
    pub enemy_spawn_min_x: f32,
    pub enemy_spawn_max_x: f32,
    pub enemy_spawn_y: f32,
    pub initial_enemies: u32,

    // === Projectiles ===
    pub projectile_size: f32,
    pub projectile_speed: f32,

    // === Cadences (ms of session time) ===
    pub move_interval_ms: u64,
    pub fire_interval_ms: u64,
    pub spawn_interval_ms: u64,
    pub respawn_delay_ms: u64,
    pub wander_interval_ms: u64,
    pub wander_min_steps: u32,
    pub wander_max_steps: u32,
    pub enemy_fire_min_ms: u64,
    pub enemy_fire_max_ms: u64,
    pub effect_lifetime_ms: u64,

    // === Rules ===
    pub starting_lives: u8,
    pub enemy_score: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 0x7a4e_2025,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            tile_width: TILE_WIDTH,
            tile_height: TILE_HEIGHT,
            cross_half_length: CROSS_HALF_LENGTH,

            tank_size: TANK_SIZE,
            tank_speed: TANK_SPEED,
            player_frames: TANK_FRAMES,
            enemy_frames: TANK_FRAMES,
            player_spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            enemy_spawn_min_x: ENEMY_SPAWN_MIN_X,
            enemy_spawn_max_x: ENEMY_SPAWN_MAX_X,
            enemy_spawn_y: ENEMY_SPAWN_Y,
            initial_enemies: INITIAL_ENEMIES,

            projectile_size: PROJECTILE_SIZE,
            projectile_speed: PROJECTILE_SPEED,

            move_interval_ms: MOVE_INTERVAL_MS,
            fire_interval_ms: FIRE_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            wander_interval_ms: WANDER_INTERVAL_MS,
            wander_min_steps: WANDER_MIN_STEPS,
            wander_max_steps: WANDER_MAX_STEPS,
            enemy_fire_min_ms: ENEMY_FIRE_MIN_MS,
            enemy_fire_max_ms: ENEMY_FIRE_MAX_MS,
            effect_lifetime_ms: EFFECT_LIFETIME_MS,

            starting_lives: STARTING_LIVES,
            enemy_score: ENEMY_SCORE,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
            ("tank_size", self.tank_size),
            ("tank_speed", self.tank_speed),
            ("projectile_size", self.projectile_size),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in positive {
            // Also catches NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }

        let intervals = [
            ("move_interval_ms", self.move_interval_ms),
            ("fire_interval_ms", self.fire_interval_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("wander_interval_ms", self.wander_interval_ms),
            ("enemy_fire_min_ms", self.enemy_fire_min_ms),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(ConfigError::NonPositive { field, value: 0.0 });
            }
        }

        if self.player_frames == 0 {
            return Err(ConfigError::NoSpriteFrames { faction: "player" });
        }
        if self.enemy_frames == 0 {
            return Err(ConfigError::NoSpriteFrames { faction: "enemy" });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        if self.enemy_spawn_min_x > self.enemy_spawn_max_x {
            return Err(ConfigError::InvertedRange {
                field: "enemy_spawn_x",
                min: self.enemy_spawn_min_x as f64,
                max: self.enemy_spawn_max_x as f64,
            });
        }
        if self.wander_min_steps > self.wander_max_steps {
            return Err(ConfigError::InvertedRange {
                field: "wander_steps",
                min: self.wander_min_steps as f64,
                max: self.wander_max_steps as f64,
            });
        }
        if self.enemy_fire_min_ms > self.enemy_fire_max_ms {
            return Err(ConfigError::InvertedRange {
                field: "enemy_fire_ms",
                min: self.enemy_fire_min_ms as f64,
                max: self.enemy_fire_max_ms as f64,
            });
        }

        self.check_inside("player spawn", self.player_spawn)?;
        self.check_inside(
            "enemy spawn band start",
            Vec2::new(self.enemy_spawn_min_x, self.enemy_spawn_y),
        )?;
        self.check_inside(
            "enemy spawn band end",
            Vec2::new(self.enemy_spawn_max_x, self.enemy_spawn_y),
        )?;

        Ok(())
    }

    /// World extents as a vector
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Viewport extents as a vector
    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    fn check_inside(&self, what: &'static str, top_left: Vec2) -> ConfigResult<()> {
        let bottom_right = top_left + Vec2::splat(self.tank_size);
        let inside = top_left.x >= 0.0
            && top_left.y >= 0.0
            && bottom_right.x <= self.world_width
            && bottom_right.y <= self.world_height;
        if inside {
            Ok(())
        } else {
            Err(ConfigError::OutsideWorld {
                what,
                x: top_left.x,
                y: top_left.y,
                width: self.world_width,
                height: self.world_height,
            })
        }
    }
}
