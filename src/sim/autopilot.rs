//! Demo autopilot: steers players toward the nearest pickup when idle mode
//! is on

use glam::IVec2;

use super::grid::Grid;
use super::movement::Direction;
use super::pathing::nearest_pickup_path;
use super::player::Player;

/// Heading that takes `from` onto the adjacent cell `to`, allowing for the
/// tunnel wrap (column 0 and the last column are neighbours).
pub fn direction_between(grid: &Grid, from: IVec2, to: IVec2) -> Direction {
    let last = grid.width() - 1;
    match (to - from).to_array() {
        [0, 1] => Direction::Down,
        [0, -1] => Direction::Up,
        [dx, 0] if dx == 1 || dx == -last => Direction::Right,
        [dx, 0] if dx == -1 || dx == last => Direction::Left,
        _ => Direction::None,
    }
}

/// First step along the shortest path to a pickup, or None when the maze is
/// cleared or the player is dead.
pub fn steer(grid: &Grid, player: &Player) -> Direction {
    if !player.alive {
        return Direction::None;
    }
    let path = nearest_pickup_path(grid, player.body.cell(grid));
    match path.as_slice() {
        [from, to, ..] => direction_between(grid, *from, *to),
        _ => Direction::None,
    }
}
