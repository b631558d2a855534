//! Enemy behavior
//!
//! Each enemy runs two uncorrelated timers on the session clock:
//! - wander: every `wander_interval_ms`, step along the current heading,
//!   re-rolling heading and step budget once the budget runs out
//! - fire: after a delay drawn from `[fire_min_ms, fire_max_ms]`, try to
//!   shoot at the player; a new delay is drawn after every attempt

use rand::Rng;

use super::actor::{ActorId, Direction};
use super::arena::Arena;
use crate::ArenaConfig;

/// Behavior constants shared by every enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTuning {
    pub wander_interval_ms: u64,
    pub min_steps: u32,
    pub max_steps: u32,
    pub fire_min_ms: u64,
    pub fire_max_ms: u64,
}

impl From<&ArenaConfig> for AiTuning {
    fn from(config: &ArenaConfig) -> Self {
        Self {
            wander_interval_ms: config.wander_interval_ms,
            min_steps: config.wander_min_steps,
            max_steps: config.wander_max_steps,
            fire_min_ms: config.enemy_fire_min_ms,
            fire_max_ms: config.enemy_fire_max_ms,
        }
    }
}

/// Per-enemy AI state
#[derive(Debug, Clone, PartialEq)]
pub struct AiState {
    pub heading: Direction,
    /// Steps left before re-rolling the heading
    pub steps_left: u32,
    /// Session time of the next wander step
    pub next_wander_ms: u64,
    /// Session time of the next fire attempt
    pub next_fire_ms: u64,
}

impl AiState {
    /// Timers start counting from `now`. The step budget starts empty so the
    /// first wander step rolls a heading.
    pub fn new<R: Rng + ?Sized>(now: u64, tuning: &AiTuning, rng: &mut R) -> Self {
        Self {
            heading: Direction::Forward,
            steps_left: 0,
            next_wander_ms: now + tuning.wander_interval_ms,
            next_fire_ms: now + fire_delay(tuning, rng),
        }
    }

    /// Consume one wander deadline if it has passed
    pub fn wander_due(&mut self, now: u64, tuning: &AiTuning) -> bool {
        if now >= self.next_wander_ms {
            self.next_wander_ms += tuning.wander_interval_ms;
            true
        } else {
            false
        }
    }

    /// Heading for this wander step. A step is spent whether or not the
    /// tank actually manages to move.
    pub fn next_heading<R: Rng + ?Sized>(&mut self, tuning: &AiTuning, rng: &mut R) -> Direction {
        if self.steps_left == 0 {
            self.heading = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            self.steps_left = rng.random_range(tuning.min_steps..=tuning.max_steps);
        }
        self.steps_left = self.steps_left.saturating_sub(1);
        self.heading
    }

    /// Consume the fire deadline if it has passed, drawing the next one
    pub fn fire_due<R: Rng + ?Sized>(&mut self, now: u64, tuning: &AiTuning, rng: &mut R) -> bool {
        if now >= self.next_fire_ms {
            self.next_fire_ms += fire_delay(tuning, rng);
            true
        } else {
            false
        }
    }
}

/// Run every enemy's due wander steps and fire attempts up to `now`.
/// Returns `(enemy, shell)` for each shell fired.
pub fn drive<R: Rng + ?Sized>(arena: &mut Arena, now: u64, rng: &mut R) -> Vec<(ActorId, u32)> {
    let tuning = *arena.ai_tuning();
    let mut fired = Vec::new();

    for id in arena.enemy_ids() {
        loop {
            let Some(ai) = arena.actor_mut(id).and_then(|a| a.ai.as_mut()) else {
                break;
            };
            if !ai.wander_due(now, &tuning) {
                break;
            }
            let heading = ai.next_heading(&tuning, rng);
            arena.move_actor(id, heading);
        }

        let fire_due = arena
            .actor_mut(id)
            .and_then(|a| a.ai.as_mut())
            .is_some_and(|ai| ai.fire_due(now, &tuning, rng));
        if fire_due {
            if let Some(shell) = arena.fire(id) {
                fired.push((id, shell));
            }
        }
    }

    fired
}

fn fire_delay<R: Rng + ?Sized>(tuning: &AiTuning, rng: &mut R) -> u64 {
    rng.random_range(tuning.fire_min_ms..=tuning.fire_max_ms)
}
