//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (milliseconds on the session clock)
//! - Seeded RNG only
//! - Stable iteration order (player first, then enemies by spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod ai;
pub mod arena;
pub mod camera;
pub mod clock;
pub mod geometry;
pub mod input;
pub mod projectile;
pub mod session;
pub mod snapshot;

pub use actor::{Actor, ActorId, Direction, Faction};
pub use ai::{AiState, AiTuning};
pub use arena::{Arena, Effect, EffectKind, Resolution, build_walls};
pub use camera::Camera;
pub use clock::FrameClock;
pub use geometry::{Aabb, hits_any};
pub use input::{Key, KeyState};
pub use projectile::{Impact, Projectile};
pub use session::{Session, SessionState};
pub use snapshot::{ActorView, EffectView, GameEvent, ProjectileView, Snapshot};
