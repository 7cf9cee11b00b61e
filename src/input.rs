//! Logical input from the platform layer
//!
//! The platform polls whatever device it has and reports, per player, which
//! logical directions are currently held. Key bindings are its business.

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

/// Directions held down by one player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    pub fn only(dir: Direction) -> Self {
        Self {
            left: dir == Direction::Left,
            right: dir == Direction::Right,
            up: dir == Direction::Up,
            down: dir == Direction::Down,
        }
    }

    /// Turn to request. With several held, Left beats Right beats Up beats
    /// Down; nothing held gives `Direction::None`.
    pub fn requested_direction(&self) -> Direction {
        if self.left {
            Direction::Left
        } else if self.right {
            Direction::Right
        } else if self.up {
            Direction::Up
        } else if self.down {
            Direction::Down
        } else {
            Direction::None
        }
    }
}
