//! Round state and core simulation types
//!
//! Everything the simulation reads or mutates lives in `GameState`; `tick`
//! and `Snapshot::capture` take it explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ghost::{Ghost, GhostKind};
use super::grid::Grid;
use super::layouts::LayoutKind;
use super::player::Player;
use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Every pickup collected
    Victory,
    /// Every player caught
    Defeat,
}

impl GamePhase {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Something that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DotEaten { player: usize },
    PelletEaten { player: usize },
    GhostEaten { ghost: GhostKind, player: usize },
    PlayerCaught { ghost: GhostKind, player: usize },
    GhostRespawned { ghost: GhostKind },
    RoundWon,
    RoundLost,
}

/// Complete round state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG is (re)started from on every reset
    pub seed: u64,
    pub layout: LayoutKind,
    pub grid: Grid,
    /// Active players, indexed by slot
    pub players: Vec<Player>,
    /// Ghosts in update order
    pub ghosts: Vec<Ghost>,
    /// Drives vulnerable ghosts' random turns
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a fresh round for one or two players
    pub fn new(seed: u64, layout: LayoutKind, player_count: usize) -> SimResult<Self> {
        if !(1..=MAX_PLAYERS).contains(&player_count) {
            return Err(SimError::InvalidState(format!(
                "player count must be 1..={MAX_PLAYERS}, got {player_count}"
            )));
        }

        let state = Self {
            seed,
            layout,
            grid: Grid::new(layout)?,
            players: (0..player_count).map(Player::new).collect(),
            ghosts: GhostKind::ALL
                .into_iter()
                .map(|kind| Ghost::new(kind, layout))
                .collect(),
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
        };

        log::info!(
            "Round start: layout={}, players={}, seed={}, pickups={}",
            layout.as_str(),
            player_count,
            seed,
            state.grid.count_remaining_pickups()
        );
        Ok(state)
    }

    /// Put the round back to its starting position with the same layout,
    /// player count and seed.
    pub fn reset(&mut self) -> SimResult<()> {
        self.grid.restore(self.layout)?;
        for (slot, player) in self.players.iter_mut().enumerate() {
            *player = Player::new(slot);
        }
        for ghost in &mut self.ghosts {
            *ghost = Ghost::new(ghost.kind, self.layout);
        }
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;

        log::info!("Round reset (seed={})", self.seed);
        Ok(())
    }

    /// Sum of every player's score
    pub fn total_score(&self) -> u32 {
        self.players.iter().map(|p| p.score).sum()
    }

    pub fn all_players_dead(&self) -> bool {
        self.players.iter().all(|p| !p.alive)
    }

    pub fn ghost(&self, kind: GhostKind) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.kind == kind)
    }
}
