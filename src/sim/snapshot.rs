//! Read-only view of a round for the renderer
//!
//! Captured once per frame; the renderer never touches `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ghost::{Ghost, GhostKind};
use super::grid::CellKind;
use super::movement::Direction;
use super::player::Player;
use super::state::{GamePhase, GameState};
use crate::consts::FLASH_PERIOD_TICKS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: usize,
    pub pos: Vec2,
    pub dir: Direction,
    pub alive: bool,
    pub score: u32,
    pub power_ticks: u32,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            slot: player.slot,
            pos: player.body.pos,
            dir: player.body.dir,
            alive: player.alive,
            score: player.score,
            power_ticks: player.power_ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostView {
    pub kind: GhostKind,
    pub pos: Vec2,
    pub dir: Direction,
    pub vulnerable: bool,
    /// Eaten ghosts are not drawn
    pub eaten: bool,
    /// Vulnerability about to run out
    pub flashing: bool,
    /// Alternates every `FLASH_PERIOD_TICKS` while flashing
    pub flash_on: bool,
}

impl From<&Ghost> for GhostView {
    fn from(ghost: &Ghost) -> Self {
        let flashing = ghost.is_flashing();
        Self {
            kind: ghost.kind,
            pos: ghost.body.pos,
            dir: ghost.body.dir,
            vulnerable: ghost.is_vulnerable(),
            eaten: ghost.is_eaten(),
            flashing,
            flash_on: flashing && (ghost.vulnerable_ticks() / FLASH_PERIOD_TICKS) % 2 == 1,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub width: i32,
    pub height: i32,
    /// Row-major, top row first
    pub cells: Vec<Vec<CellKind>>,
    pub remaining_pickups: usize,
    pub players: Vec<PlayerView>,
    pub ghosts: Vec<GhostView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            width: state.grid.width(),
            height: state.grid.height(),
            cells: state.grid.rows().map(<[CellKind]>::to_vec).collect(),
            remaining_pickups: state.grid.count_remaining_pickups(),
            players: state.players.iter().map(PlayerView::from).collect(),
            ghosts: state.ghosts.iter().map(GhostView::from).collect(),
        }
    }

    pub fn total_score(&self) -> u32 {
        self.players.iter().map(|p| p.score).sum()
    }
}
