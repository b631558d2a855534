//! World state
//!
//! The arena owns the walls, the player (while alive), the enemy roster,
//! shells in flight and transient impact effects. It knows how to move,
//! fire and resolve shells, but not about lives, score or session state;
//! those live in [`super::session`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, Direction, Faction};
use super::ai::{AiState, AiTuning};
use super::geometry::{Aabb, hits_any};
use super::projectile::{Impact, Projectile};
use crate::ArenaConfig;

/// Random x positions tried before giving up on an enemy spawn
pub const SPAWN_ATTEMPTS: u32 = 8;

/// Impact effect size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Shell absorbed by a wall
    Small,
    /// Tank destroyed
    Large,
}

/// A short-lived explosion marker
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub center: Vec2,
    pub remaining_ms: u64,
}

/// How a shell ended this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub projectile: u32,
    pub impact: Impact,
    /// Where the effect was placed (shell center for walls, tank center for hits)
    pub at: Vec2,
    /// Faction of the destroyed tank, for `Impact::Actor`
    pub victim: Option<Faction>,
}

/// The playing field
#[derive(Debug, Clone)]
pub struct Arena {
    config: ArenaConfig,
    ai_tuning: AiTuning,
    world: Aabb,
    walls: Vec<Aabb>,
    player: Option<Actor>,
    enemies: Vec<Actor>,
    projectiles: Vec<Projectile>,
    effects: Vec<Effect>,
    next_id: u32,
}

impl Arena {
    /// Empty arena with walls built. No tanks yet.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            config: config.clone(),
            ai_tuning: AiTuning::from(config),
            world: Aabb::new(Vec2::ZERO, config.world_size()),
            walls: build_walls(config),
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (shared by tanks and shells)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Accessors ===

    pub fn ai_tuning(&self) -> &AiTuning {
        &self.ai_tuning
    }

    /// Static wall tiles
    pub fn obstacles(&self) -> &[Aabb] {
        &self.walls
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.as_ref()
    }

    pub fn enemies(&self) -> &[Actor] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Every tank, player first
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.player.iter().chain(self.enemies.iter())
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.player
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|a| a.id == id)
    }

    pub fn enemy_ids(&self) -> Vec<ActorId> {
        self.enemies.iter().map(|e| e.id).collect()
    }

    // === Spawning ===

    /// Place a fresh player tank at the configured spawn point, facing Forward
    pub fn spawn_player(&mut self) -> ActorId {
        let id = self.next_entity_id();
        let player = Actor::new(
            id,
            Faction::Player,
            self.config.player_spawn,
            self.config.tank_size,
            self.config.tank_speed,
            self.config.player_frames,
        );
        log::debug!("Player {} spawned at {:?}", id, player.pos);
        self.player = Some(player);
        id
    }

    /// Drop an enemy at a random x in the spawn band along the top edge.
    /// Positions overlapping a wall or another tank are re-rolled; returns
    /// `None` if every attempt was blocked.
    pub fn spawn_enemy<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> Option<ActorId> {
        let size = Vec2::splat(self.config.tank_size);
        let (min_x, max_x) = (self.config.enemy_spawn_min_x, self.config.enemy_spawn_max_x);

        let mut spot = None;
        for _ in 0..SPAWN_ATTEMPTS {
            let x = if min_x < max_x {
                rng.random_range(min_x..max_x)
            } else {
                min_x
            };
            let candidate = Aabb::new(Vec2::new(x, self.config.enemy_spawn_y), size);
            if !self.is_blocked(&candidate, None) {
                spot = Some(candidate.min);
                break;
            }
        }

        let Some(pos) = spot else {
            log::debug!("Enemy spawn skipped: band is crowded");
            return None;
        };

        Some(self.insert_enemy(pos, now, rng))
    }

    /// Place an enemy at an exact position with fresh AI timers. Used by
    /// [`Arena::spawn_enemy`] and by scripted scenarios.
    pub fn insert_enemy<R: Rng + ?Sized>(&mut self, pos: Vec2, now: u64, rng: &mut R) -> ActorId {
        let id = self.next_entity_id();
        let mut enemy = Actor::new(
            id,
            Faction::Enemy,
            pos,
            self.config.tank_size,
            self.config.tank_speed,
            self.config.enemy_frames,
        );
        enemy.ai = Some(AiState::new(now, &self.ai_tuning, rng));
        log::debug!("Enemy {} spawned at {:?}", id, pos);
        self.enemies.push(enemy);
        id
    }

    /// Take a tank out of the world
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        if self.player.as_ref().is_some_and(|p| p.id == id) {
            return self.player.take();
        }
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn add_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    // === Actions ===

    /// Would `candidate` collide with a wall or a solid tank other than `except`
    pub fn is_blocked(&self, candidate: &Aabb, except: Option<ActorId>) -> bool {
        hits_any(candidate, &self.walls)
            || self
                .actors()
                .filter(|a| Some(a.id) != except && a.is_solid())
                .any(|a| a.bounds().intersects(candidate))
    }

    /// Turn a tank toward `dir` and step if the way is clear. The facing
    /// changes even when the step is blocked. Returns whether it moved.
    pub fn move_actor(&mut self, id: ActorId, dir: Direction) -> bool {
        let Some(actor) = self.actor_mut(id) else {
            return false;
        };
        let target = actor.face(dir);

        let blocked = self.is_blocked(&target, Some(id));
        if !blocked {
            if let Some(actor) = self.actor_mut(id) {
                actor.step();
            }
        }
        !blocked
    }

    /// Fire a shell from the tank's barrel. No-op while the tank's previous
    /// shell is still in flight. Returns the new shell's ID.
    pub fn fire(&mut self, id: ActorId) -> Option<u32> {
        let shell_size = self.config.projectile_size;
        let shell_speed = self.config.projectile_speed;

        let actor = self.actor(id)?;
        if !actor.can_fire() {
            return None;
        }
        let muzzle = actor.muzzle(shell_size);
        let projectile_id = self.next_id;
        let projectile = Projectile::new(projectile_id, actor, muzzle, shell_size, shell_speed);
        self.next_id += 1;

        if let Some(actor) = self.actor_mut(id) {
            actor.outstanding_shot = true;
        }
        self.add_projectile(projectile);
        Some(projectile_id)
    }

    /// Move every shell one step, resolving walls, hits and culls in roster
    /// order. Struck tanks are removed immediately so later shells this tick
    /// cannot hit them again.
    pub fn advance_projectiles(&mut self) -> Vec<Resolution> {
        let mut resolutions = Vec::new();

        for i in 0..self.projectiles.len() {
            if !self.projectiles[i].alive {
                continue;
            }

            let impact = self.projectiles[i].next_impact(
                &self.walls,
                self.player.iter().chain(self.enemies.iter()),
                &self.world,
            );
            let (projectile_id, owner) = (self.projectiles[i].id, self.projectiles[i].owner);

            let (at, victim) = match impact {
                Impact::None => {
                    self.projectiles[i].advance();
                    continue;
                }
                Impact::Wall => {
                    let at = self.projectiles[i].center();
                    self.spawn_effect(EffectKind::Small, at);
                    (at, None)
                }
                Impact::Actor(target) => {
                    let Some(mut victim) = self.remove_actor(target) else {
                        continue;
                    };
                    victim.hit = true;
                    victim.alive = false;
                    victim.ai = None;
                    let at = victim.center();
                    self.spawn_effect(EffectKind::Large, at);
                    (at, Some(victim.faction))
                }
                Impact::OutOfBounds => (self.projectiles[i].center(), None),
            };

            self.projectiles[i].alive = false;
            if let Some(shooter) = self.actor_mut(owner) {
                shooter.outstanding_shot = false;
            }
            resolutions.push(Resolution {
                projectile: projectile_id,
                impact,
                at,
                victim,
            });
        }

        self.projectiles.retain(|p| p.alive);
        resolutions
    }

    fn spawn_effect(&mut self, kind: EffectKind, center: Vec2) {
        self.effects.push(Effect {
            kind,
            center,
            remaining_ms: self.config.effect_lifetime_ms,
        });
    }

    /// Count down effect lifetimes and drop expired ones
    pub fn age_effects(&mut self, dt_ms: u64) {
        for effect in &mut self.effects {
            effect.remaining_ms = effect.remaining_ms.saturating_sub(dt_ms);
        }
        self.effects.retain(|e| e.remaining_ms > 0);
    }
}

/// Wall layout: a cross through the world center (each arm
/// `cross_half_length` tiles either side of the center tile) and a full
/// border of tiles around the edge.
pub fn build_walls(config: &ArenaConfig) -> Vec<Aabb> {
    let tile = Vec2::new(config.tile_width, config.tile_height);
    let (width, height) = (config.world_width, config.world_height);
    let center = (config.world_size() - tile) / 2.0;
    let arm = config.cross_half_length as i32;

    let mut walls = Vec::new();

    // Vertical then horizontal arm
    for i in -arm..=arm {
        walls.push(Aabb::new(Vec2::new(center.x, center.y + i as f32 * tile.y), tile));
    }
    for j in -arm..=arm {
        walls.push(Aabb::new(Vec2::new(center.x + j as f32 * tile.x, center.y), tile));
    }

    // Top and bottom edges
    let cols = (width / tile.x).ceil() as u32;
    for i in 0..cols {
        let x = i as f32 * tile.x;
        walls.push(Aabb::new(Vec2::new(x, 0.0), tile));
        walls.push(Aabb::new(Vec2::new(x, height - tile.y), tile));
    }

    // Left and right edges
    let rows = (height / tile.y).ceil() as u32;
    for j in 0..rows {
        let y = j as f32 * tile.y;
        walls.push(Aabb::new(Vec2::new(0.0, y), tile));
        walls.push(Aabb::new(Vec2::new(width - tile.x, y), tile));
    }

    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(&ArenaConfig::default())
    }

    fn place(arena: &mut Arena, faction: Faction, pos: Vec2) -> ActorId {
        let id = arena.next_entity_id();
        let actor = Actor::new(id, faction, pos, 32.0, 6.5, 2);
        match faction {
            Faction::Player => arena.player = Some(actor),
            Faction::Enemy => arena.enemies.push(actor),
        }
        id
    }

    #[test]
    fn test_wall_layout() {
        let config = ArenaConfig::default();
        let walls = build_walls(&config);
        // 31 + 31 cross tiles, 84 x 2 top/bottom, 64 x 2 left/right
        assert_eq!(walls.len(), 31 + 31 + 84 * 2 + 64 * 2);

        // Corners are covered
        assert!(hits_any(&Aabb::new(Vec2::ZERO, Vec2::ONE), &walls));
        assert!(hits_any(&Aabb::new(Vec2::new(1343.0, 895.0), Vec2::ONE), &walls));
        // Player spawn is clear of every wall
        let spawn = Aabb::new(config.player_spawn, Vec2::splat(config.tank_size));
        assert!(!hits_any(&spawn, &walls));
    }

    #[test]
    fn test_blocked_move_turns_but_stays() {
        let mut arena = arena();
        // Hug the left border: x = 16 touches the border tile
        let id = place(&mut arena, Faction::Player, Vec2::new(16.0, 300.0));

        assert!(!arena.move_actor(id, Direction::Left));
        let p = arena.player().unwrap();
        assert_eq!(p.pos, Vec2::new(16.0, 300.0));
        assert_eq!(p.facing, Direction::Left);
        assert_eq!(p.frame, 0);

        assert!(arena.move_actor(id, Direction::Right));
        let p = arena.player().unwrap();
        assert_eq!(p.pos, Vec2::new(22.5, 300.0));
        assert_eq!(p.facing, Direction::Right);
        assert_eq!(p.frame, 1);
    }

    #[test]
    fn test_tanks_block_each_other_unless_hit() {
        let mut arena = arena();
        let player = place(&mut arena, Faction::Player, Vec2::new(100.0, 300.0));
        let enemy = place(&mut arena, Faction::Enemy, Vec2::new(135.0, 300.0));

        assert!(!arena.move_actor(player, Direction::Right));
        assert!(!arena.move_actor(enemy, Direction::Left));

        arena.actor_mut(enemy).unwrap().hit = true;
        assert!(arena.move_actor(player, Direction::Right));
    }

    #[test]
    fn test_single_outstanding_shot() {
        let mut arena = arena();
        let id = place(&mut arena, Faction::Player, Vec2::new(300.0, 300.0));

        assert!(arena.fire(id).is_some());
        assert!(arena.player().unwrap().outstanding_shot);
        assert!(arena.fire(id).is_none());
        assert_eq!(arena.projectiles().len(), 1);

        // Fly until it resolves against the top border
        let mut resolved = Vec::new();
        for _ in 0..200 {
            resolved.extend(arena.advance_projectiles());
            if !resolved.is_empty() {
                break;
            }
        }
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].impact, Impact::Wall);
        assert!(!arena.player().unwrap().outstanding_shot);
        assert!(arena.fire(id).is_some());
    }

    #[test]
    fn test_shell_spawns_ahead_of_barrel() {
        let mut arena = arena();
        let id = place(&mut arena, Faction::Player, Vec2::new(300.0, 300.0));
        arena.move_actor(id, Direction::Right);

        arena.fire(id).unwrap();
        let shell = &arena.projectiles()[0];
        let tank = arena.player().unwrap();
        assert_eq!(shell.angle, 0.0);
        assert_eq!(shell.owner, id);
        assert!(!shell.bounds().intersects(&tank.bounds()));
        assert!((shell.center().x - (tank.center().x + 16.0 + 4.0)).abs() < 1e-3);
    }

    #[test]
    fn test_wall_hit_leaves_small_effect() {
        let mut arena = arena();
        // Shell appears right under the top border
        let id = place(&mut arena, Faction::Player, Vec2::new(100.0, 20.0));
        arena.fire(id).unwrap();

        let resolutions = arena.advance_projectiles();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].impact, Impact::Wall);
        assert!(resolutions[0].victim.is_none());
        assert!(arena.projectiles().is_empty());
        assert_eq!(arena.effects().len(), 1);
        assert_eq!(arena.effects()[0].kind, EffectKind::Small);
    }

    #[test]
    fn test_shell_destroys_first_enemy_only() {
        let mut arena = arena();
        let player = place(&mut arena, Faction::Player, Vec2::new(300.0, 400.0));
        let front = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 340.0));
        let behind = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 300.0));

        arena.fire(player).unwrap();
        let mut resolutions = Vec::new();
        for _ in 0..50 {
            resolutions.extend(arena.advance_projectiles());
        }

        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].impact, Impact::Actor(front));
        assert_eq!(resolutions[0].victim, Some(Faction::Enemy));
        assert!(arena.actor(front).is_none());
        assert!(arena.actor(behind).is_some());
        assert_eq!(arena.effects().len(), 1);
        assert_eq!(arena.effects()[0].kind, EffectKind::Large);
    }

    #[test]
    fn test_enemy_shells_pass_through_enemies() {
        let mut arena = arena();
        let shooter = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 400.0));
        let ally = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 340.0));

        arena.fire(shooter).unwrap();
        for _ in 0..20 {
            arena.advance_projectiles();
        }
        assert!(arena.actor(ally).is_some());
        assert_eq!(arena.projectiles().len(), 1);
    }

    #[test]
    fn test_enemy_shell_kills_player() {
        let mut arena = arena();
        let player = place(&mut arena, Faction::Player, Vec2::new(300.0, 300.0));
        let enemy = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 400.0));

        arena.fire(enemy).unwrap();
        let mut resolutions = Vec::new();
        for _ in 0..50 {
            resolutions.extend(arena.advance_projectiles());
        }
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].impact, Impact::Actor(player));
        assert_eq!(resolutions[0].victim, Some(Faction::Player));
        assert!(arena.player().is_none());
        assert!(!arena.actor(enemy).unwrap().outstanding_shot);
    }

    #[test]
    fn test_spawn_enemy_in_band() {
        let mut arena = arena();
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..5 {
            arena.spawn_enemy(0, &mut rng);
        }
        assert!(!arena.enemies().is_empty());
        for e in arena.enemies() {
            assert!(e.pos.x >= 60.0 && e.pos.x < 1250.0);
            assert_eq!(e.pos.y, 40.0);
            assert!(e.ai.is_some());
            assert!(!e.outstanding_shot);
        }
        // No two enemies overlap
        let enemies = arena.enemies();
        for (i, a) in enemies.iter().enumerate() {
            for b in &enemies[i + 1..] {
                assert!(!a.bounds().intersects(&b.bounds()));
            }
        }
    }

    #[test]
    fn test_effects_expire() {
        let mut arena = arena();
        arena.spawn_effect(EffectKind::Small, Vec2::new(50.0, 50.0));
        arena.age_effects(200);
        assert_eq!(arena.effects()[0].remaining_ms, 100);
        arena.age_effects(100);
        assert!(arena.effects().is_empty());
    }

    #[test]
    fn test_shell_leaving_world_resolves_as_cull() {
        let mut arena = arena();
        let id = place(&mut arena, Faction::Player, Vec2::new(-100.0, 300.0));
        arena.actor_mut(id).unwrap().facing = Direction::Left;
        let shell = arena.fire(id).unwrap();

        let resolutions = arena.advance_projectiles();
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].projectile, shell);
        assert_eq!(resolutions[0].impact, Impact::OutOfBounds);
        assert!(resolutions[0].victim.is_none());
        assert!(!arena.player().unwrap().outstanding_shot);
        assert!(arena.projectiles().is_empty());
        assert!(arena.effects().is_empty());
    }

    #[test]
    fn test_second_shell_same_tick_misses_removed_tank() {
        let mut arena = arena();
        let player = place(&mut arena, Faction::Player, Vec2::new(300.0, 600.0));
        let below = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 700.0));
        let above = place(&mut arena, Faction::Enemy, Vec2::new(300.0, 500.0));
        arena.actor_mut(above).unwrap().facing = Direction::Backward;
        arena.fire(below).unwrap();
        arena.fire(above).unwrap();

        // Both shells reach the player on the same step
        let mut resolutions = Vec::new();
        for _ in 0..30 {
            let step = arena.advance_projectiles();
            if !step.is_empty() {
                resolutions = step;
                break;
            }
        }

        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].impact, Impact::Actor(player));
        assert!(arena.player().is_none());
        assert_eq!(arena.projectiles().len(), 1);
        assert_eq!(arena.effects().len(), 1);
    }
}
