//! Shells
//!
//! A shell travels in a straight line at constant speed. Each tick it checks
//! the box it would occupy next: walls first, then tanks of the opposing
//! faction in roster order, then the world edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Faction};
use super::geometry::{Aabb, hits_any};

/// A shell in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    /// Tank that fired it
    pub owner: ActorId,
    /// Faction of the tank that fired it
    pub faction: Faction,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Step length per tick
    pub speed: f32,
    /// Travel angle in degrees (screen space)
    pub angle: f32,
    pub alive: bool,
}

/// What a shell runs into on its next step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    /// Path is clear
    None,
    /// Absorbed by a wall
    Wall,
    /// Struck a tank
    Actor(ActorId),
    /// Left the world
    OutOfBounds,
}

impl Projectile {
    /// Shell centered on `center`
    pub fn new(id: u32, owner: &Actor, center: Vec2, size: f32, speed: f32) -> Self {
        let size = Vec2::splat(size);
        Self {
            id,
            owner: owner.id,
            faction: owner.faction,
            pos: Aabb::from_center(center, size).min,
            size,
            speed,
            angle: owner.facing_degrees(),
            alive: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Per-tick displacement
    pub fn velocity(&self) -> Vec2 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Vec2::new(cos, sin) * self.speed
    }

    /// Faction this shell may damage
    pub fn target_faction(&self) -> Faction {
        self.faction.opponent()
    }

    /// Resolve the next step without moving. `actors` is scanned in order and
    /// the first solid opposing tank in the path wins.
    pub fn next_impact<'a>(
        &self,
        walls: &[Aabb],
        actors: impl IntoIterator<Item = &'a Actor>,
        world: &Aabb,
    ) -> Impact {
        let next = self.bounds().translated(self.velocity());

        if hits_any(&next, walls) {
            return Impact::Wall;
        }

        let target = self.target_faction();
        let struck = actors
            .into_iter()
            .find(|a| a.faction == target && a.is_solid() && a.bounds().intersects(&next));
        if let Some(actor) = struck {
            return Impact::Actor(actor.id);
        }

        if !world.intersects(&next) {
            return Impact::OutOfBounds;
        }

        Impact::None
    }

    /// Commit one step
    pub fn advance(&mut self) {
        self.pos += self.velocity();
    }
}
