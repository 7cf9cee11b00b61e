//! Maze grid: static layout plus per-cell consumable state
//!
//! Columns run left to right, rows top to bottom. Only Dot and PowerPellet
//! cells change during a round (they become Empty when eaten); walls are
//! fixed for the life of the grid.

use serde::{Deserialize, Serialize};

use super::layouts::{self, LayoutKind};
use crate::error::{SimError, SimResult};

/// Contents of one maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Wall,
    Dot,
    PowerPellet,
    Tunnel,
}

impl CellKind {
    /// Decode a layout table code (0 empty, 1 wall, 2 dot, 3 pellet, 4 tunnel)
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Wall),
            2 => Some(Self::Dot),
            3 => Some(Self::PowerPellet),
            4 => Some(Self::Tunnel),
            _ => None,
        }
    }

    /// Dots and power pellets count toward the win condition
    #[inline]
    pub fn is_pickup(self) -> bool {
        matches!(self, Self::Dot | Self::PowerPellet)
    }
}

/// The maze a round is played in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major cell storage
    cells: Vec<CellKind>,
    tunnel_row: Option<i32>,
}

impl Grid {
    /// Build a fresh grid from one of the compiled-in layouts
    pub fn new(layout: LayoutKind) -> SimResult<Self> {
        Self::from_codes(&layouts::table(layout))
    }

    /// Build a grid from rows of layout codes, validating shape and tunnels
    pub fn from_codes(rows: &[Vec<u8>]) -> SimResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(SimError::Layout("layout has no cells".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SimError::Layout(format!(
                    "row {row_idx} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (col_idx, &code) in row.iter().enumerate() {
                let kind = CellKind::from_code(code).ok_or_else(|| {
                    SimError::Layout(format!("unknown cell code {code} at ({col_idx}, {row_idx})"))
                })?;
                cells.push(kind);
            }
        }

        let tunnel_row = find_tunnel_row(&cells, width, height)?;

        Ok(Self {
            width: width as i32,
            height: height as i32,
            cells,
            tunnel_row,
        })
    }

    /// Put every consumed pickup back by reloading the layout table
    pub fn restore(&mut self, layout: LayoutKind) -> SimResult<()> {
        *self = Self::new(layout)?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        (0..self.width).contains(&col) && (0..self.height).contains(&row)
    }

    fn index(&self, col: i32, row: i32) -> SimResult<usize> {
        if self.in_bounds(col, row) {
            Ok((row * self.width + col) as usize)
        } else {
            Err(SimError::OutOfBounds { col, row })
        }
    }

    pub fn cell_at(&self, col: i32, row: i32) -> SimResult<CellKind> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Walls are fixed: a wall cannot be cleared and no
    /// cell can become a wall.
    pub fn set_cell(&mut self, col: i32, row: i32, kind: CellKind) -> SimResult<()> {
        let idx = self.index(col, row)?;
        let current = self.cells[idx];
        if current != kind && (current == CellKind::Wall || kind == CellKind::Wall) {
            return Err(SimError::InvalidState(format!(
                "walls cannot change at runtime ({col}, {row}: {current:?} -> {kind:?})"
            )));
        }
        self.cells[idx] = kind;
        Ok(())
    }

    /// Eat whatever pickup sits in a cell, leaving it Empty
    pub fn consume(&mut self, col: i32, row: i32) -> Option<CellKind> {
        let idx = self.index(col, row).ok()?;
        let kind = self.cells[idx];
        if kind.is_pickup() {
            self.cells[idx] = CellKind::Empty;
            Some(kind)
        } else {
            None
        }
    }

    /// Anything but a wall; cells outside the grid are never walkable
    pub fn is_walkable(&self, col: i32, row: i32) -> bool {
        matches!(self.cell_at(col, row), Ok(kind) if kind != CellKind::Wall)
    }

    #[inline]
    pub fn is_tunnel_row(&self, row: i32) -> bool {
        self.tunnel_row == Some(row)
    }

    #[inline]
    pub fn tunnel_row(&self) -> Option<i32> {
        self.tunnel_row
    }

    /// Apply tunnel wraparound to a column on the tunnel row; other rows are
    /// returned unchanged.
    #[inline]
    pub fn wrap_col(&self, col: i32, row: i32) -> i32 {
        if self.is_tunnel_row(row) {
            col.rem_euclid(self.width)
        } else {
            col
        }
    }

    pub fn count_remaining_pickups(&self) -> usize {
        self.cells.iter().filter(|c| c.is_pickup()).count()
    }

    /// Cells of each row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width as usize)
    }

    /// Every (col, row) holding a pickup, row-major
    pub fn pickup_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_pickup())
            .map(|(i, _)| ((i as i32) % self.width, (i as i32) / self.width))
    }
}

/// Tunnel cells must sit in a single row, at both horizontal extremes only
fn find_tunnel_row(cells: &[CellKind], width: usize, height: usize) -> SimResult<Option<i32>> {
    let mut tunnel_row = None;
    for row in 0..height {
        let line = &cells[row * width..(row + 1) * width];
        let tunnels: Vec<usize> = line
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == CellKind::Tunnel)
            .map(|(col, _)| col)
            .collect();
        if tunnels.is_empty() {
            continue;
        }
        if tunnel_row.is_some() {
            return Err(SimError::Layout(format!(
                "tunnel cells found on more than one row (second at row {row})"
            )));
        }
        if tunnels != [0, width - 1] {
            return Err(SimError::Layout(format!(
                "tunnel cells on row {row} must be exactly the two edge columns, found {tunnels:?}"
            )));
        }
        tunnel_row = Some(row as i32);
    }
    Ok(tunnel_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_dimensions_and_tunnel() {
        let grid = Grid::new(LayoutKind::Classic).unwrap();
        assert_eq!(grid.width(), 19);
        assert_eq!(grid.height(), 19);
        assert_eq!(grid.tunnel_row(), Some(8));
        assert!(grid.is_tunnel_row(8));
        assert!(!grid.is_tunnel_row(7));
        assert_eq!(grid.cell_at(0, 8).unwrap(), CellKind::Tunnel);
        assert_eq!(grid.cell_at(18, 8).unwrap(), CellKind::Tunnel);
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let grid = Grid::new(LayoutKind::Classic).unwrap();
        assert_eq!(
            grid.cell_at(19, 0),
            Err(SimError::OutOfBounds { col: 19, row: 0 })
        );
        assert_eq!(
            grid.cell_at(0, -1),
            Err(SimError::OutOfBounds { col: 0, row: -1 })
        );
        assert!(!grid.is_walkable(-1, 8));
    }

    #[test]
    fn test_wrap_col_only_on_tunnel_row() {
        let grid = Grid::new(LayoutKind::Classic).unwrap();
        assert_eq!(grid.wrap_col(-1, 8), 18);
        assert_eq!(grid.wrap_col(19, 8), 0);
        assert_eq!(grid.wrap_col(-1, 7), -1);
    }

    #[test]
    fn test_consume_clears_pickups_only() {
        let mut grid = Grid::new(LayoutKind::Classic).unwrap();
        let before = grid.count_remaining_pickups();

        assert_eq!(grid.consume(1, 1), Some(CellKind::Dot));
        assert_eq!(grid.cell_at(1, 1).unwrap(), CellKind::Empty);
        assert_eq!(grid.count_remaining_pickups(), before - 1);

        // Already empty, and a wall
        assert_eq!(grid.consume(1, 1), None);
        assert_eq!(grid.consume(0, 0), None);
        assert_eq!(grid.cell_at(0, 0).unwrap(), CellKind::Wall);
    }

    #[test]
    fn test_walls_are_immutable() {
        let mut grid = Grid::new(LayoutKind::Classic).unwrap();
        assert!(matches!(
            grid.set_cell(0, 0, CellKind::Empty),
            Err(SimError::InvalidState(_))
        ));
        assert!(matches!(
            grid.set_cell(1, 1, CellKind::Wall),
            Err(SimError::InvalidState(_))
        ));
        // Rewriting a wall as a wall is a no-op, not an error
        grid.set_cell(0, 0, CellKind::Wall).unwrap();
        grid.set_cell(1, 1, CellKind::PowerPellet).unwrap();
        assert_eq!(grid.cell_at(1, 1).unwrap(), CellKind::PowerPellet);
    }

    #[test]
    fn test_rejects_malformed_tables() {
        assert!(Grid::from_codes(&[]).is_err());
        assert!(Grid::from_codes(&[vec![1, 1], vec![1]]).is_err());
        assert!(Grid::from_codes(&[vec![1, 9]]).is_err());
        // Tunnel away from the edge
        assert!(Grid::from_codes(&[vec![4, 4, 0, 4]]).is_err());
        // Tunnels on two rows
        assert!(Grid::from_codes(&[vec![4, 0, 4], vec![4, 0, 4]]).is_err());
        // One tunnel mouth only
        assert!(Grid::from_codes(&[vec![4, 0, 0]]).is_err());

        let grid = Grid::from_codes(&[vec![1, 1, 1], vec![4, 2, 4], vec![1, 1, 1]]).unwrap();
        assert_eq!(grid.tunnel_row(), Some(1));
        assert_eq!(grid.count_remaining_pickups(), 1);
    }
}
