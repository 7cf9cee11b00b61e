//! Session flow around rounds: menu, playing, game over
//!
//! The front end shows whatever `mode()` says and forwards the player's
//! choices as `SessionCommand`s.

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    Menu,
    Playing,
    GameOver {
        won: bool,
        total_score: u32,
    },
}

/// Choices offered by the menu and game-over screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    StartSinglePlayer,
    StartTwoPlayer,
    /// Same player count, fresh round
    Restart,
    BackToMenu,
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
    mode: SessionMode,
    round: Option<GameState>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: SessionMode::Menu,
            round: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The current (or just finished) round
    pub fn round(&self) -> Option<&GameState> {
        self.round.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Act on a menu choice. Commands that make no sense in the current mode
    /// are ignored.
    pub fn apply(&mut self, command: SessionCommand) -> SimResult<()> {
        match (self.mode, command) {
            (SessionMode::Menu, SessionCommand::StartSinglePlayer) => self.start(1),
            (SessionMode::Menu, SessionCommand::StartTwoPlayer) => self.start(2),
            (SessionMode::GameOver { .. }, SessionCommand::Restart) => {
                if let Some(round) = &mut self.round {
                    round.reset()?;
                    self.mode = SessionMode::Playing;
                    Ok(())
                } else {
                    self.start(self.settings.players)
                }
            }
            (SessionMode::GameOver { .. }, SessionCommand::BackToMenu) => {
                self.round = None;
                self.mode = SessionMode::Menu;
                log::info!("Back to menu");
                Ok(())
            }
            (mode, command) => {
                log::debug!("Ignoring {:?} in {:?}", command, mode);
                Ok(())
            }
        }
    }

    fn start(&mut self, players: usize) -> SimResult<()> {
        self.settings.players = players;
        self.round = Some(GameState::new(
            self.settings.seed,
            self.settings.layout,
            players,
        )?);
        self.mode = SessionMode::Playing;
        Ok(())
    }

    /// Advance the running round by one tick. Outside `Playing` nothing
    /// happens.
    pub fn update(&mut self, input: &TickInput) -> SimResult<Vec<GameEvent>> {
        if self.mode != SessionMode::Playing {
            return Ok(Vec::new());
        }
        let Some(round) = self.round.as_mut() else {
            return Ok(Vec::new());
        };

        let mut input = *input;
        input.idle_mode |= self.settings.idle_mode;
        let events = tick(round, &input)?;

        if round.phase.is_over() {
            self.mode = SessionMode::GameOver {
                won: round.phase == GamePhase::Victory,
                total_score: round.total_score(),
            };
            log::info!("Game over: {:?}", self.mode);
        }
        Ok(events)
    }
}
