//! Grid queries: cell validity, BFS shortest paths, win detection

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use glam::IVec2;

use super::grid::Grid;
use super::movement::Direction;

/// In bounds and not a wall
pub fn is_valid_cell(grid: &Grid, cell: IVec2) -> bool {
    grid.is_walkable(cell.x, cell.y)
}

/// Walkable neighbours of a cell, in search order, with tunnel wrap
fn neighbours(grid: &Grid, cell: IVec2) -> impl Iterator<Item = IVec2> + '_ {
    Direction::SEARCH_ORDER.into_iter().filter_map(move |dir| {
        let next = cell + dir.delta();
        let next = IVec2::new(grid.wrap_col(next.x, next.y), next.y);
        is_valid_cell(grid, next).then_some(next)
    })
}

/// Breadth-first search from `start` until `is_goal` accepts a cell.
/// Returns the path including both ends, or empty when nothing matches.
fn bfs(grid: &Grid, start: IVec2, is_goal: impl Fn(IVec2) -> bool) -> Vec<IVec2> {
    if !is_valid_cell(grid, start) {
        return Vec::new();
    }

    let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    came_from.insert(start, start);

    while let Some(cell) = queue.pop_front() {
        if is_goal(cell) {
            let mut path = vec![cell];
            let mut cur = cell;
            while cur != start {
                let Some(&prev) = came_from.get(&cur) else {
                    break;
                };
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return path;
        }
        for next in neighbours(grid, cell) {
            if let Entry::Vacant(e) = came_from.entry(next) {
                e.insert(cell);
                queue.push_back(next);
            }
        }
    }

    Vec::new()
}

/// Shortest path between two cells (tunnel aware)
pub fn find_path(grid: &Grid, start: IVec2, target: IVec2) -> Vec<IVec2> {
    if !is_valid_cell(grid, target) {
        return Vec::new();
    }
    bfs(grid, start, |cell| cell == target)
}

/// Shortest path to the closest remaining dot or power pellet
pub fn nearest_pickup_path(grid: &Grid, start: IVec2) -> Vec<IVec2> {
    bfs(grid, start, |cell| {
        grid.cell_at(cell.x, cell.y).is_ok_and(|kind| kind.is_pickup())
    })
}

/// All dots and power pellets are gone
pub fn check_win(grid: &Grid) -> bool {
    grid.count_remaining_pickups() == 0
}
