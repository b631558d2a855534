//! Abstract key input
//!
//! The host maps its devices onto [`Key`] and forwards key-down/key-up
//! signals. Movement and fire are sampled from the held set every tick;
//! pause, restart and exit act on the press itself.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::actor::Direction;

/// Abstract key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
    Restart,
    Exit,
}

/// Keys currently held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    /// Record a press. Returns false on auto-repeat (key already held).
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movement for this tick. Exactly one key of an axis must be held for
    /// that axis to count, and horizontal wins over vertical.
    pub fn movement(&self) -> Option<Direction> {
        let left = self.is_held(Key::Left);
        let right = self.is_held(Key::Right);
        let up = self.is_held(Key::Up);
        let down = self.is_held(Key::Down);

        if left ^ right {
            Some(if left { Direction::Left } else { Direction::Right })
        } else if up ^ down {
            Some(if up { Direction::Forward } else { Direction::Backward })
        } else {
            None
        }
    }

    pub fn fire_held(&self) -> bool {
        self.is_held(Key::Fire)
    }
}
