//! Tanks
//!
//! Player and enemy tanks share one [`Actor`] type. Enemies carry an
//! [`AiState`]; the player's `ai` is `None`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::AiState;
use super::geometry::Aabb;

/// Stable entity ID
pub type ActorId = u32;

/// Which side a tank fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    /// The side this faction's shells can hit
    pub fn opponent(self) -> Faction {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Movement command. Angles are screen-space with y pointing down, so
/// Forward (up the screen) is 270°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];

    /// Canonical facing angle in degrees
    pub fn degrees(self) -> f32 {
        match self {
            Direction::Forward => 270.0,
            Direction::Backward => 90.0,
            Direction::Left => 180.0,
            Direction::Right => 0.0,
        }
    }

    /// Exact unit step (no trig rounding)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Forward => Vec2::NEG_Y,
            Direction::Backward => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// A tank
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub faction: Faction,
    /// Top-left corner
    pub pos: Vec2,
    /// Sprite extents
    pub size: Vec2,
    pub facing: Direction,
    /// Step length per move
    pub speed: f32,
    pub alive: bool,
    /// Set once a shell has struck this tank
    pub hit: bool,
    /// A shell fired by this tank is still in flight
    pub outstanding_shot: bool,
    /// Current sprite frame
    pub frame: usize,
    pub frame_count: usize,
    /// Wander/fire state, enemies only
    pub ai: Option<AiState>,
}

impl Actor {
    /// A fresh tank facing Forward. `frame_count` is validated by the config.
    pub fn new(id: ActorId, faction: Faction, pos: Vec2, size: f32, speed: f32, frame_count: usize) -> Self {
        Self {
            id,
            faction,
            pos,
            size: Vec2::splat(size),
            facing: Direction::Forward,
            speed,
            alive: true,
            hit: false,
            outstanding_shot: false,
            frame: 0,
            frame_count: frame_count.max(1),
            ai: None,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Facing angle in degrees
    pub fn facing_degrees(&self) -> f32 {
        self.facing.degrees()
    }

    /// Can collide or be collided with
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.alive && !self.hit
    }

    /// Turn toward `dir` and return the box a full step would occupy
    pub fn face(&mut self, dir: Direction) -> Aabb {
        self.facing = dir;
        self.bounds().translated(dir.unit() * self.speed)
    }

    /// Commit the step planned by [`Actor::face`] and advance the track animation
    pub fn step(&mut self) {
        self.pos += self.facing.unit() * self.speed;
        self.frame = (self.frame + 1) % self.frame_count;
    }

    /// May this tank fire right now
    pub fn can_fire(&self) -> bool {
        self.is_solid() && !self.outstanding_shot
    }

    /// Where a shell of `shell_size` should appear: its center sits just
    /// past the barrel, half a tank plus half a shell from the tank center.
    pub fn muzzle(&self, shell_size: f32) -> Vec2 {
        let radius = shell_size / 2.0;
        let offset = self.size.x / 2.0 + radius;
        self.center() + self.facing.unit() * offset
    }
}
