//! Player-controlled agent

use serde::{Deserialize, Serialize};

use super::grid::{CellKind, Grid};
use super::movement::{Body, Direction, can_move};
use crate::consts::*;

/// What a player collected this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pickup {
    Dot,
    PowerPellet,
}

impl Pickup {
    pub fn points(self) -> u32 {
        match self {
            Pickup::Dot => DOT_POINTS,
            Pickup::PowerPellet => PELLET_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// 0 for player one, 1 for player two
    pub slot: usize,
    pub body: Body,
    /// Buffered turn request, applied at the next aligned tick where it is legal
    pub next_dir: Direction,
    pub score: u32,
    /// Power mode ticks remaining (cosmetic; vulnerability lives on ghosts)
    pub power_ticks: u32,
    pub alive: bool,
}

impl Player {
    pub fn new(slot: usize) -> Self {
        let (col, row) = PLAYER_SPAWN;
        Self {
            slot,
            body: Body::at_cell(col, row),
            next_dir: Direction::None,
            score: 0,
            power_ticks: 0,
            alive: true,
        }
    }

    /// Queue a turn. `Direction::None` leaves the current request untouched.
    pub fn request(&mut self, dir: Direction) {
        if dir != Direction::None {
            self.next_dir = dir;
        }
    }

    /// Advance one tick: count down power mode, take a pending turn if the
    /// player sits on a cell centre, move, then eat whatever is underfoot.
    pub fn step(&mut self, grid: &mut Grid) -> Option<Pickup> {
        if !self.alive {
            return None;
        }

        self.power_ticks = self.power_ticks.saturating_sub(1);

        if self.body.snap_if_aligned(grid)
            && self.next_dir != Direction::None
            && can_move(grid, self.body.pos, self.next_dir, PLAYER_SPEED)
        {
            self.body.dir = self.next_dir;
        }

        self.body.advance(grid, PLAYER_SPEED);
        self.collect(grid)
    }

    fn collect(&mut self, grid: &mut Grid) -> Option<Pickup> {
        let cell = self.body.cell(grid);
        let pickup = match grid.consume(cell.x, cell.y)? {
            CellKind::Dot => Pickup::Dot,
            CellKind::PowerPellet => {
                self.power_ticks = POWER_PELLET_TICKS;
                Pickup::PowerPellet
            }
            _ => return None,
        };
        self.score += pickup.points();
        Some(pickup)
    }
}
