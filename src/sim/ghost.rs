//! Pursuer AI: four targeting strategies and the vulnerable/eaten lifecycle
//!
//! Ghosts only pick a new heading when they sit on a cell centre. A patrolling
//! ghost heads for the neighbour closest to its strategy's target cell; a
//! vulnerable one picks a random legal neighbour. Neither turns back unless it
//! is the only way out.
//!
//! In a two-player round each ghost hunts whichever living player is nearest
//! to it, not always player one.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::layouts::LayoutKind;
use super::movement::{Body, Direction};
use super::player::Player;
use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::round_cell;

/// Identity of a ghost; decides its target and spawn cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostKind {
    /// Heads straight for the player
    Chaser,
    /// Aims four cells ahead of the player
    Ambusher,
    /// Mirrors the chaser around a point two cells ahead of the player
    Flanker,
    /// Chases from afar, retreats to the bottom-left corner up close
    Opportunist,
}

impl GhostKind {
    /// Update order within a tick
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Chaser,
        GhostKind::Ambusher,
        GhostKind::Flanker,
        GhostKind::Opportunist,
    ];

    /// Start and respawn cell. The classic maze has a house in the middle;
    /// the bonus maze has none, so its ghosts start along the top row.
    pub fn spawn_cell(self, layout: LayoutKind) -> IVec2 {
        match (layout, self) {
            (LayoutKind::Classic, GhostKind::Chaser) => IVec2::new(9, 8),
            (LayoutKind::Classic, GhostKind::Ambusher) => IVec2::new(8, 9),
            (LayoutKind::Classic, GhostKind::Flanker) => IVec2::new(10, 9),
            (LayoutKind::Classic, GhostKind::Opportunist) => IVec2::new(9, 9),
            (LayoutKind::Bonus, GhostKind::Chaser) => IVec2::new(9, 1),
            (LayoutKind::Bonus, GhostKind::Ambusher) => IVec2::new(8, 1),
            (LayoutKind::Bonus, GhostKind::Flanker) => IVec2::new(10, 1),
            (LayoutKind::Bonus, GhostKind::Opportunist) => IVec2::new(9, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GhostKind::Chaser => "chaser",
            GhostKind::Ambusher => "ambusher",
            GhostKind::Flanker => "flanker",
            GhostKind::Opportunist => "opportunist",
        }
    }
}

impl std::str::FromStr for GhostKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chaser" | "blinky" => Ok(GhostKind::Chaser),
            "ambusher" | "pinky" => Ok(GhostKind::Ambusher),
            "flanker" | "inky" => Ok(GhostKind::Flanker),
            "opportunist" | "clyde" => Ok(GhostKind::Opportunist),
            other => Err(SimError::InvalidState(format!("unknown ghost '{other}'"))),
        }
    }
}

/// Lifecycle of a ghost. Eaten and Vulnerable are exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GhostMode {
    #[default]
    Patrol,
    Vulnerable { ticks_left: u32 },
    Eaten { respawn_ticks: u32 },
}

/// The player a ghost is hunting, as seen at the start of its step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quarry {
    pub pos: Vec2,
    pub dir: Direction,
}

impl Quarry {
    /// Nearest living player to `from` (lower slot wins ties). Player two is
    /// hunted whenever it is closer, not only once player one is caught.
    /// With nobody alive the ghosts keep hunting player one.
    pub fn select(players: &[Player], from: Vec2) -> SimResult<Self> {
        let nearest = players
            .iter()
            .filter(|p| p.alive)
            .min_by(|a, b| {
                from.distance_squared(a.body.pos)
                    .total_cmp(&from.distance_squared(b.body.pos))
            })
            .or_else(|| players.first())
            .ok_or_else(|| SimError::InvalidState("no players to target".into()))?;
        Ok(Self {
            pos: nearest.body.pos,
            dir: nearest.body.dir,
        })
    }

    #[inline]
    fn cell_ahead(&self, cells: f32) -> IVec2 {
        round_cell(self.pos + self.dir.as_vec2() * cells)
    }
}

/// Everything a ghost needs to know about the rest of the round to aim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetContext {
    pub quarry: Quarry,
    /// Current position of the chaser (rounded), used by the flanker
    pub chaser_cell: Option<IVec2>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub kind: GhostKind,
    pub body: Body,
    pub mode: GhostMode,
    /// Where the ghost starts and returns to after being eaten
    pub spawn: IVec2,
}

impl Ghost {
    pub fn new(kind: GhostKind, layout: LayoutKind) -> Self {
        let spawn = kind.spawn_cell(layout);
        Self {
            kind,
            body: Body::at_cell(spawn.x, spawn.y),
            mode: GhostMode::Patrol,
            spawn,
        }
    }

    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        matches!(self.mode, GhostMode::Vulnerable { .. })
    }

    #[inline]
    pub fn is_eaten(&self) -> bool {
        matches!(self.mode, GhostMode::Eaten { .. })
    }

    pub fn vulnerable_ticks(&self) -> u32 {
        match self.mode {
            GhostMode::Vulnerable { ticks_left } => ticks_left,
            _ => 0,
        }
    }

    /// Vulnerable and about to recover
    pub fn is_flashing(&self) -> bool {
        matches!(self.mode, GhostMode::Vulnerable { ticks_left } if ticks_left < FLASH_WARNING_TICKS)
    }

    /// Pellet eaten somewhere: become (or stay) vulnerable with a full timer.
    /// Eaten ghosts ignore it.
    pub fn make_vulnerable(&mut self) {
        if !self.is_eaten() {
            self.mode = GhostMode::Vulnerable {
                ticks_left: VULNERABLE_TICKS,
            };
        }
    }

    /// Caught by a player while vulnerable
    pub fn mark_eaten(&mut self) {
        self.mode = GhostMode::Eaten {
            respawn_ticks: RESPAWN_TICKS,
        };
    }

    fn respawn(&mut self) {
        self.body = Body::at_cell(self.spawn.x, self.spawn.y);
        self.mode = GhostMode::Patrol;
    }

    /// Cell this ghost is steering toward
    pub fn target_cell(&self, ctx: &TargetContext, grid: &Grid) -> SimResult<IVec2> {
        let quarry = &ctx.quarry;
        let target = match self.kind {
            GhostKind::Chaser => round_cell(quarry.pos),
            GhostKind::Ambusher => quarry.cell_ahead(AMBUSH_LOOKAHEAD),
            GhostKind::Flanker => {
                let chaser = ctx.chaser_cell.ok_or_else(|| {
                    SimError::InvalidState("flanker needs a chaser to aim from".into())
                })?;
                let ahead = quarry.cell_ahead(FLANK_LOOKAHEAD);
                ahead + (ahead - chaser)
            }
            GhostKind::Opportunist => {
                if self.body.pos.distance(quarry.pos) > OPPORTUNIST_RANGE {
                    round_cell(quarry.pos)
                } else {
                    IVec2::new(0, grid.height() - 1)
                }
            }
        };
        Ok(target)
    }

    /// Advance one tick. Eaten ghosts only count down to respawn.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        ctx: &TargetContext,
        rng: &mut R,
    ) -> SimResult<()> {
        match &mut self.mode {
            GhostMode::Eaten { respawn_ticks } => {
                *respawn_ticks = respawn_ticks.saturating_sub(1);
                if *respawn_ticks == 0 {
                    self.respawn();
                }
                return Ok(());
            }
            GhostMode::Vulnerable { ticks_left } => {
                *ticks_left = ticks_left.saturating_sub(1);
                if *ticks_left == 0 {
                    self.mode = GhostMode::Patrol;
                }
            }
            GhostMode::Patrol => {}
        }

        if self.body.snap_if_aligned(grid) {
            let cell = self.body.cell(grid);
            let mut moves = valid_moves(grid, cell);
            if moves.is_empty() {
                return Ok(());
            }
            if moves.len() > 1 {
                let back = self.body.dir.reverse();
                moves.retain(|&d| d != back);
            }

            self.body.dir = if self.is_vulnerable() {
                moves[rng.random_range(0..moves.len())]
            } else {
                let target = self.target_cell(ctx, grid)?;
                closest_move(grid, cell, &moves, target)
            };
        }

        self.body.advance(grid, GHOST_SPEED);
        Ok(())
    }
}

/// Directions out of `cell` that land on a walkable cell, in search order
pub fn valid_moves(grid: &Grid, cell: IVec2) -> Vec<Direction> {
    Direction::SEARCH_ORDER
        .into_iter()
        .filter(|dir| {
            let next = cell + dir.delta();
            grid.is_walkable(grid.wrap_col(next.x, next.y), next.y)
        })
        .collect()
}

/// First move (in the given order) whose landing cell is nearest the target
fn closest_move(grid: &Grid, cell: IVec2, moves: &[Direction], target: IVec2) -> Direction {
    let on_tunnel_row = grid.is_tunnel_row(cell.y);
    let width = grid.width() as f32;
    let target = target.as_vec2();

    let mut best = Direction::None;
    let mut best_dist = f32::INFINITY;
    for &dir in moves {
        let next = (cell + dir.delta()).as_vec2();
        let mut dist = next.distance(target);
        if on_tunnel_row {
            let left = (next + Vec2::X * width).distance(target);
            let right = (next - Vec2::X * width).distance(target);
            dist = dist.min(left).min(right);
        }
        if dist < best_dist {
            best_dist = dist;
            best = dir;
        }
    }
    best
}
