//! Maze Chase - a grid maze arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, pursuers, round state)
//! - `input`: Held logical directions to turn requests
//! - `session`: Menu / playing / game-over flow around a round
//! - `settings`: Runtime configuration loaded from JSON
//! - `error`: Error types shared by the simulation

pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use session::{Session, SessionCommand, SessionMode};
pub use settings::{Settings, SettingsError};
pub use sim::LayoutKind;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 45;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Grid units travelled per tick
    pub const PLAYER_SPEED: f32 = 0.2;
    pub const GHOST_SPEED: f32 = 0.18;

    /// Max distance from an integer coordinate (per axis) that counts as aligned
    pub const ALIGN_TOLERANCE: f32 = 0.1;
    /// Offset of the four hitbox sample points from the entity centre
    pub const HITBOX_RADIUS: f32 = 0.35;
    /// Per-axis distance below which a pursuer touches a player
    pub const CONTACT_DISTANCE: f32 = 0.5;

    /// Power mode length on the player (10 seconds)
    pub const POWER_PELLET_TICKS: u32 = 10 * SIM_HZ;
    /// Ghost vulnerability length (7 seconds)
    pub const VULNERABLE_TICKS: u32 = 7 * SIM_HZ;
    /// Time an eaten ghost stays out of play (3 seconds)
    pub const RESPAWN_TICKS: u32 = 3 * SIM_HZ;
    /// Vulnerable ghosts start flashing with this much time left
    pub const FLASH_WARNING_TICKS: u32 = 2 * SIM_HZ;
    /// Ticks per flash colour while the warning is active
    pub const FLASH_PERIOD_TICKS: u32 = 15;

    /// Scoring
    pub const DOT_POINTS: u32 = 10;
    pub const PELLET_POINTS: u32 = 50;
    pub const GHOST_POINTS: u32 = 200;

    /// Beyond this distance the opportunist chases instead of retreating
    pub const OPPORTUNIST_RANGE: f32 = 8.0;
    /// Look-ahead of the ambusher and flanker (cells in front of the player)
    pub const AMBUSH_LOOKAHEAD: f32 = 4.0;
    pub const FLANK_LOOKAHEAD: f32 = 2.0;

    /// Player spawn cell (column, row)
    pub const PLAYER_SPAWN: (i32, i32) = (9, 11);
    /// Up to two players share a round
    pub const MAX_PLAYERS: usize = 2;
}

/// Nearest grid cell to a continuous position
#[inline]
pub fn round_cell(pos: Vec2) -> IVec2 {
    pos.round().as_ivec2()
}

/// True when both axes are within `ALIGN_TOLERANCE` of an integer
#[inline]
pub fn is_grid_aligned(pos: Vec2) -> bool {
    let offset = (pos - pos.round()).abs();
    offset.x < consts::ALIGN_TOLERANCE && offset.y < consts::ALIGN_TOLERANCE
}

/// Wrap a coordinate into `[0, width)`
#[inline]
pub fn wrap_coord(x: f32, width: f32) -> f32 {
    x.rem_euclid(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_alignment() {
        assert!(is_grid_aligned(Vec2::new(3.0, 7.0)));
        assert!(is_grid_aligned(Vec2::new(2.95, 7.08)));
        assert!(!is_grid_aligned(Vec2::new(3.2, 7.0)));
        assert!(!is_grid_aligned(Vec2::new(3.0, 6.85)));
    }

    #[test]
    fn test_wrap_coord() {
        assert!((wrap_coord(-0.2, 19.0) - 18.8).abs() < 1e-5);
        assert!((wrap_coord(19.1, 19.0) - 0.1).abs() < 1e-5);
        assert_eq!(wrap_coord(5.0, 19.0), 5.0);
    }

    #[test]
    fn test_round_cell() {
        assert_eq!(round_cell(Vec2::new(4.6, 2.4)), IVec2::new(5, 2));
    }
}
