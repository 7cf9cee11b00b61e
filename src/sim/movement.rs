//! Continuous movement over the discrete maze
//!
//! Shared by players and ghosts. An entity carries a real-valued position and
//! a heading; every tick it tries to advance `speed` grid units. Walls are
//! detected with five sample points (centre plus four at `HITBOX_RADIUS`),
//! which approximates a round body against square wall cells.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::grid::{CellKind, Grid};
use crate::consts::HITBOX_RADIUS;
use crate::{is_grid_aligned, round_cell, wrap_coord};

/// Heading of an entity. Rows grow downward, so `Down` is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Candidate order for ghost decisions; earlier entries win ties
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    pub fn reverse(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in cells
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::None => IVec2::ZERO,
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        self.delta().as_vec2()
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Position and heading of a moving entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub dir: Direction,
}

impl Body {
    pub fn at_cell(col: i32, row: i32) -> Self {
        Self {
            pos: Vec2::new(col as f32, row as f32),
            dir: Direction::None,
        }
    }

    /// Cell the entity occupies (rounded, tunnel-wrapped)
    pub fn cell(&self, grid: &Grid) -> IVec2 {
        let cell = round_cell(self.pos);
        IVec2::new(grid.wrap_col(cell.x, cell.y), cell.y)
    }

    #[inline]
    pub fn is_aligned(&self) -> bool {
        is_grid_aligned(self.pos)
    }

    /// Snap to the nearest integer coordinate if within alignment tolerance.
    /// Returns true when aligned.
    pub fn snap_if_aligned(&mut self, grid: &Grid) -> bool {
        if !self.is_aligned() {
            return false;
        }
        let cell = self.cell(grid);
        self.pos = cell.as_vec2();
        true
    }

    /// Advance one tick along the current heading. Returns true if the
    /// entity moved.
    pub fn advance(&mut self, grid: &Grid, speed: f32) -> bool {
        if self.dir == Direction::None {
            return false;
        }
        if !can_move(grid, self.pos, self.dir, speed) {
            return false;
        }

        let mut next = self.pos + self.dir.as_vec2() * speed;
        let row = round_cell(self.pos).y;
        if self.dir.is_horizontal() && grid.is_tunnel_row(row) {
            next.x = wrap_coord(next.x, grid.width() as f32);
        } else if !in_bounds(grid, next) {
            return false;
        }

        self.pos = next;
        true
    }
}

/// Would a step of `speed` from `pos` toward `dir` keep every sample point off
/// a wall? On the tunnel row, sample columns wrap around the edges.
pub fn can_move(grid: &Grid, pos: Vec2, dir: Direction, speed: f32) -> bool {
    let center = pos + dir.as_vec2() * speed;
    let samples = [
        center,
        center - Vec2::X * HITBOX_RADIUS,
        center + Vec2::X * HITBOX_RADIUS,
        center - Vec2::Y * HITBOX_RADIUS,
        center + Vec2::Y * HITBOX_RADIUS,
    ];

    samples.iter().all(|&point| {
        let cell = round_cell(point);
        let col = grid.wrap_col(cell.x, cell.y);
        matches!(grid.cell_at(col, cell.y), Ok(kind) if kind != CellKind::Wall)
    })
}

fn in_bounds(grid: &Grid, pos: Vec2) -> bool {
    pos.x >= 0.0
        && pos.y >= 0.0
        && pos.x < grid.width() as f32
        && pos.y < grid.height() as f32
}
