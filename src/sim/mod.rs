//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (players by slot, ghosts by identity)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod ghost;
pub mod grid;
pub mod layouts;
pub mod movement;
pub mod pathing;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Contact, in_contact, resolve_ghost_contacts};
pub use ghost::{Ghost, GhostKind, GhostMode, Quarry, TargetContext};
pub use grid::{CellKind, Grid};
pub use layouts::LayoutKind;
pub use movement::{Body, Direction, can_move};
pub use pathing::{check_win, find_path, is_valid_cell, nearest_pickup_path};
pub use player::{Pickup, Player};
pub use snapshot::{GhostView, PlayerView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
