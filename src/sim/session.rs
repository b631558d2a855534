//! Session loop
//!
//! Owns the arena and runs the fixed-step tick: player input under
//! cooldowns, enemy spawning, enemy AI, shell resolution, respawn and the
//! camera. This is the only place lives and score change.
//!
//! States:
//! - `Playing`: player alive, everything runs
//! - `RespawnPending`: player destroyed with lives left; the world keeps
//!   running without player input until the respawn deadline
//! - `Paused`: nothing advances, including the session clock, so pending
//!   deadlines keep their remaining time
//! - `GameOver`: frozen until restart

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{ActorId, Faction};
use super::ai;
use super::arena::{Arena, Resolution};
use super::camera::Camera;
use super::input::{Key, KeyState};
use super::projectile::Impact;
use super::snapshot::{ActorView, EffectView, GameEvent, ProjectileView, Snapshot};
use crate::{ArenaConfig, ConfigResult};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Paused,
    RespawnPending,
    GameOver,
}

/// One play session, from start (or restart) to game over
#[derive(Debug)]
pub struct Session {
    config: ArenaConfig,
    rng: Pcg32,
    arena: Arena,
    camera: Camera,
    keys: KeyState,
    state: SessionState,
    /// State to return to when unpausing
    resume_to: SessionState,
    lives: u8,
    score: u64,
    /// Unpaused milliseconds since (re)start
    clock_ms: u64,
    last_move_ms: Option<u64>,
    last_fire_ms: Option<u64>,
    last_spawn_ms: u64,
    respawn_at_ms: Option<u64>,
    exit_requested: bool,
    events: Vec<GameEvent>,
}

impl Session {
    /// Validate the config and build the opening world: walls, the player at
    /// its spawn point and the initial enemies.
    pub fn new(config: ArenaConfig) -> ConfigResult<Self> {
        config.validate()?;
        let mut session = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            arena: Arena::new(&config),
            camera: Camera::default(),
            keys: KeyState::default(),
            state: SessionState::Playing,
            resume_to: SessionState::Playing,
            lives: config.starting_lives,
            score: 0,
            clock_ms: 0,
            last_move_ms: None,
            last_fire_ms: None,
            last_spawn_ms: 0,
            respawn_at_ms: None,
            exit_requested: false,
            events: Vec::new(),
            config,
        };
        session.populate();
        log::info!(
            "Session started (seed {}, {} enemies)",
            session.config.seed,
            session.arena.enemies().len()
        );
        Ok(session)
    }

    fn populate(&mut self) {
        self.arena.spawn_player();
        for _ in 0..self.config.initial_enemies {
            if let Some(id) = self.arena.spawn_enemy(self.clock_ms, &mut self.rng) {
                self.push_spawn_event(id);
            }
        }
        self.update_camera();
    }

    // === Accessors ===

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Direct world access for scripted test scenarios
    #[cfg(test)]
    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Time left before the player respawns, if a respawn is pending
    pub fn respawn_remaining_ms(&self) -> Option<u64> {
        self.respawn_at_ms
            .map(|at| at.saturating_sub(self.clock_ms))
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    /// Key pressed. Pause, restart and exit act here; movement and fire are
    /// sampled on the next tick.
    pub fn on_key_down(&mut self, key: Key) {
        if !self.keys.press(key) {
            return;
        }
        match key {
            Key::Pause => self.toggle_pause(),
            Key::Restart => {
                if matches!(self.state, SessionState::Paused | SessionState::GameOver) {
                    self.restart();
                }
            }
            Key::Exit => {
                if !self.exit_requested {
                    log::info!("Exit requested");
                    self.exit_requested = true;
                    self.events.push(GameEvent::ExitRequested);
                }
            }
            Key::Up | Key::Down | Key::Left | Key::Right | Key::Fire => {}
        }
    }

    pub fn on_key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Pause or resume. Ignored after game over.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Playing | SessionState::RespawnPending => {
                self.resume_to = self.state;
                self.state = SessionState::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused at {} ms", self.clock_ms);
            }
            SessionState::Paused => {
                self.state = self.resume_to;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed at {} ms", self.clock_ms);
            }
            SessionState::GameOver => {}
        }
    }

    /// Throw the world away and start over with full lives and zero score
    pub fn restart(&mut self) {
        log::info!("Restarting (final score {})", self.score);
        self.arena = Arena::new(&self.config);
        self.camera.reset();
        self.state = SessionState::Playing;
        self.resume_to = SessionState::Playing;
        self.lives = self.config.starting_lives;
        self.score = 0;
        self.clock_ms = 0;
        self.last_move_ms = None;
        self.last_fire_ms = None;
        self.last_spawn_ms = 0;
        self.respawn_at_ms = None;
        self.events.push(GameEvent::Restarted);
        self.populate();
    }

    // === Tick ===

    /// Advance the session by `dt_ms` of game time
    pub fn tick(&mut self, dt_ms: u64) {
        if matches!(self.state, SessionState::Paused | SessionState::GameOver) {
            return;
        }

        self.clock_ms += dt_ms;
        let now = self.clock_ms;

        if self.state == SessionState::Playing {
            self.apply_player_input(now);
        }

        if now.saturating_sub(self.last_spawn_ms) >= self.config.spawn_interval_ms {
            if let Some(id) = self.arena.spawn_enemy(now, &mut self.rng) {
                self.push_spawn_event(id);
            }
            self.last_spawn_ms = now;
        }

        for (actor, projectile) in ai::drive(&mut self.arena, now, &mut self.rng) {
            self.events.push(GameEvent::ShotFired { actor, projectile });
        }

        // Effects spawned below start their lifetime on this tick
        self.arena.age_effects(dt_ms);

        let resolutions = self.arena.advance_projectiles();
        for resolution in resolutions {
            self.resolve(resolution, now);
        }

        if self.state == SessionState::RespawnPending
            && self.respawn_at_ms.is_some_and(|at| now >= at)
        {
            self.respawn();
        }

        self.update_camera();
    }

    /// Movement at most once per move interval, fire at most once per fire
    /// interval while held
    fn apply_player_input(&mut self, now: u64) {
        let Some(player) = self.arena.player().map(|p| p.id) else {
            return;
        };

        let move_ready = self
            .last_move_ms
            .is_none_or(|t| now - t >= self.config.move_interval_ms);
        if move_ready {
            if let Some(dir) = self.keys.movement() {
                self.arena.move_actor(player, dir);
            }
            self.last_move_ms = Some(now);
        }

        let fire_ready = self
            .last_fire_ms
            .is_none_or(|t| now - t >= self.config.fire_interval_ms);
        if self.keys.fire_held() && fire_ready {
            if let Some(projectile) = self.arena.fire(player) {
                self.events.push(GameEvent::ShotFired {
                    actor: player,
                    projectile,
                });
            }
            self.last_fire_ms = Some(now);
        }
    }

    fn resolve(&mut self, resolution: Resolution, now: u64) {
        match (resolution.impact, resolution.victim) {
            (Impact::Wall, _) => {
                self.events.push(GameEvent::WallImpact {
                    projectile: resolution.projectile,
                    at: resolution.at,
                });
            }
            (Impact::Actor(id), Some(faction)) => {
                self.events.push(GameEvent::ActorDestroyed {
                    id,
                    faction,
                    at: resolution.at,
                });
                match faction {
                    Faction::Enemy => {
                        self.score += self.config.enemy_score;
                        log::debug!("Enemy {} destroyed, score {}", id, self.score);
                        self.events.push(GameEvent::ScoreChanged { score: self.score });
                    }
                    Faction::Player => self.player_destroyed(now),
                }
            }
            (Impact::Actor(_), None) | (Impact::None, _) => {}
            (Impact::OutOfBounds, _) => {
                self.events.push(GameEvent::ProjectileCulled {
                    projectile: resolution.projectile,
                });
            }
        }
    }

    fn player_destroyed(&mut self, now: u64) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerDied {
            lives_left: self.lives,
        });

        if self.lives > 0 {
            self.state = SessionState::RespawnPending;
            self.respawn_at_ms = Some(now + self.config.respawn_delay_ms);
            log::info!(
                "Player destroyed, {} lives left, respawn at {} ms",
                self.lives,
                now + self.config.respawn_delay_ms
            );
        } else {
            self.state = SessionState::GameOver;
            self.respawn_at_ms = None;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over, score {}", self.score);
        }
    }

    fn respawn(&mut self) {
        let id = self.arena.spawn_player();
        self.state = SessionState::Playing;
        self.respawn_at_ms = None;
        self.events.push(GameEvent::PlayerRespawned { id });
        log::info!("Player respawned at {} ms", self.clock_ms);
    }

    fn push_spawn_event(&mut self, id: ActorId) {
        if let Some(enemy) = self.arena.actor(id) {
            self.events.push(GameEvent::EnemySpawned { id, pos: enemy.pos });
        }
    }

    fn update_camera(&mut self) {
        if let Some(player) = self.arena.player() {
            self.camera.follow(
                player.center(),
                self.config.world_size(),
                self.config.viewport_size(),
            );
        }
    }

    // === Output ===

    /// Current drawable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock_ms: self.clock_ms,
            state: self.state,
            lives: self.lives,
            score: self.score,
            camera: self.camera.offset,
            actors: self.arena.actors().map(ActorView::from).collect(),
            projectiles: self.arena.projectiles().iter().map(ProjectileView::from).collect(),
            effects: self.arena.effects().iter().map(EffectView::from).collect(),
            exit_requested: self.exit_requested,
        }
    }
}
