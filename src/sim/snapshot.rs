//! Presentation output
//!
//! After each tick the host reads a [`Snapshot`] to draw and drains the
//! [`GameEvent`] queue for one-shot cues (sounds, flashes, HUD updates).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Faction};
use super::arena::{Effect, EffectKind};
use super::projectile::Projectile;
use super::session::SessionState;

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { actor: ActorId, projectile: u32 },
    /// Shell absorbed by a wall (small impact)
    WallImpact { projectile: u32, at: Vec2 },
    /// Tank destroyed by a shell (large impact)
    ActorDestroyed { id: ActorId, faction: Faction, at: Vec2 },
    /// Shell left the world without hitting anything
    ProjectileCulled { projectile: u32 },
    EnemySpawned { id: ActorId, pos: Vec2 },
    ScoreChanged { score: u64 },
    PlayerDied { lives_left: u8 },
    PlayerRespawned { id: ActorId },
    GameOver { score: u64 },
    Paused,
    Resumed,
    Restarted,
    ExitRequested,
}

/// Drawable tank state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub faction: Faction,
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub facing: f32,
    pub alive: bool,
    pub frame: usize,
    pub outstanding_shot: bool,
}

impl From<&Actor> for ActorView {
    fn from(a: &Actor) -> Self {
        Self {
            id: a.id,
            faction: a.faction,
            pos: a.pos,
            size: a.size,
            facing: a.facing_degrees(),
            alive: a.alive,
            frame: a.frame,
            outstanding_shot: a.outstanding_shot,
        }
    }
}

/// Drawable shell state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub faction: Faction,
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
}

impl From<&Projectile> for ProjectileView {
    fn from(p: &Projectile) -> Self {
        Self {
            id: p.id,
            faction: p.faction,
            pos: p.pos,
            size: p.size,
            angle: p.angle,
        }
    }
}

/// Drawable impact effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    pub center: Vec2,
    pub remaining_ms: u64,
}

impl From<&Effect> for EffectView {
    fn from(e: &Effect) -> Self {
        Self {
            kind: e.kind,
            center: e.center,
            remaining_ms: e.remaining_ms,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session time in milliseconds
    pub clock_ms: u64,
    pub state: SessionState,
    pub lives: u8,
    pub score: u64,
    /// Viewport top-left in world space
    pub camera: Vec2,
    /// Player first (when present), then enemies in roster order
    pub actors: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub effects: Vec<EffectView>,
    pub exit_requested: bool,
}

impl Snapshot {
    pub fn player(&self) -> Option<&ActorView> {
        self.actors.iter().find(|a| a.faction == Faction::Player)
    }

    pub fn enemy_count(&self) -> usize {
        self.actors.iter().filter(|a| a.faction == Faction::Enemy).count()
    }
}
