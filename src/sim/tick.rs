//! Fixed timestep simulation tick
//!
//! One call advances the round by one step at `SIM_HZ`. Order within a tick
//! is fixed: input intents, players, pellet broadcast, ghosts, contacts,
//! round end.

use super::autopilot;
use super::collision::{Contact, resolve_ghost_contacts};
use super::ghost::{GhostKind, Quarry, TargetContext};
use super::movement::Direction;
use super::pathing::check_win;
use super::player::Pickup;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_PLAYERS;
use crate::error::SimResult;
use crate::input::HeldDirections;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions per player slot
    pub held: [HeldDirections; MAX_PLAYERS],
    /// Idle/demo mode - the autopilot drives every player
    pub idle_mode: bool,
}

impl TickInput {
    /// Player one holding a single direction
    pub fn single(dir: Direction) -> Self {
        let mut input = Self::default();
        input.held[0] = HeldDirections::only(dir);
        input
    }

    pub fn demo() -> Self {
        Self {
            idle_mode: true,
            ..Default::default()
        }
    }
}

/// Advance the round by one fixed timestep. Once the round has ended this
/// does nothing.
pub fn tick(state: &mut GameState, input: &TickInput) -> SimResult<Vec<GameEvent>> {
    let mut events = Vec::new();
    if state.phase.is_over() {
        return Ok(events);
    }
    state.time_ticks += 1;

    for player in &mut state.players {
        let dir = if input.idle_mode {
            autopilot::steer(&state.grid, player)
        } else {
            input
                .held
                .get(player.slot)
                .map_or(Direction::None, HeldDirections::requested_direction)
        };
        player.request(dir);
    }

    let mut pellet_eaten = false;
    for player in &mut state.players {
        match player.step(&mut state.grid) {
            Some(Pickup::Dot) => events.push(GameEvent::DotEaten {
                player: player.slot,
            }),
            Some(Pickup::PowerPellet) => {
                pellet_eaten = true;
                events.push(GameEvent::PelletEaten {
                    player: player.slot,
                });
            }
            None => {}
        }
    }

    if pellet_eaten {
        log::debug!("Power pellet eaten at tick {}", state.time_ticks);
        for ghost in &mut state.ghosts {
            ghost.make_vulnerable();
        }
    }

    for idx in 0..state.ghosts.len() {
        let chaser_cell = state
            .ghost(GhostKind::Chaser)
            .map(|chaser| chaser.body.cell(&state.grid));
        let ghost = &mut state.ghosts[idx];
        let ctx = TargetContext {
            quarry: Quarry::select(&state.players, ghost.body.pos)?,
            chaser_cell,
        };

        let was_eaten = ghost.is_eaten();
        ghost.step(&state.grid, &ctx, &mut state.rng)?;
        if was_eaten && !ghost.is_eaten() {
            log::debug!("{} respawned", ghost.kind.as_str());
            events.push(GameEvent::GhostRespawned { ghost: ghost.kind });
        }
    }

    for ghost in &mut state.ghosts {
        for contact in resolve_ghost_contacts(ghost, &mut state.players) {
            match contact {
                Contact::GhostEaten { player } => {
                    log::debug!("Player {} ate {}", player + 1, ghost.kind.as_str());
                    events.push(GameEvent::GhostEaten {
                        ghost: ghost.kind,
                        player,
                    });
                }
                Contact::PlayerCaught { player } => {
                    log::info!("Player {} caught by {}", player + 1, ghost.kind.as_str());
                    events.push(GameEvent::PlayerCaught {
                        ghost: ghost.kind,
                        player,
                    });
                }
            }
        }
    }

    if check_win(&state.grid) {
        state.phase = GamePhase::Victory;
        events.push(GameEvent::RoundWon);
        log::info!(
            "Round won at tick {} (score {})",
            state.time_ticks,
            state.total_score()
        );
    } else if state.all_players_dead() {
        state.phase = GamePhase::Defeat;
        events.push(GameEvent::RoundLost);
        log::info!(
            "Round lost at tick {} (score {})",
            state.time_ticks,
            state.total_score()
        );
    }

    log::trace!("tick {}: {} events", state.time_ticks, events.len());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ghost::GhostMode;
    use crate::sim::grid::CellKind;
    use crate::sim::layouts::LayoutKind;
    use crate::sim::snapshot::Snapshot;
    use glam::Vec2;

    fn classic(players: usize) -> GameState {
        GameState::new(12345, LayoutKind::Classic, players).unwrap()
    }

    fn clear_pickups_except(state: &mut GameState, keep: (i32, i32)) {
        let pickups: Vec<_> = state.grid.pickup_cells().collect();
        for cell in pickups {
            if cell != keep {
                state.grid.set_cell(cell.0, cell.1, CellKind::Empty).unwrap();
            }
        }
    }

    #[test]
    fn test_first_tick_eats_spawn_dot() {
        let mut state = classic(1);
        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.time_ticks, 1);
        assert_eq!(events, vec![GameEvent::DotEaten { player: 0 }]);
        assert_eq!(state.players[0].score, DOT_POINTS);
        assert_eq!(state.grid.cell_at(9, 11).unwrap(), CellKind::Empty);
    }

    #[test]
    fn test_two_players_steer_independently() {
        let mut state = classic(2);
        let mut input = TickInput::single(Direction::Right);
        input.held[1] = HeldDirections::only(Direction::Left);

        tick(&mut state, &input).unwrap();
        // Player one moves first and takes the shared spawn dot
        assert_eq!(state.players[0].score, DOT_POINTS);
        assert_eq!(state.players[1].score, 0);

        for _ in 0..4 {
            tick(&mut state, &input).unwrap();
        }
        assert!(state.players[0].body.pos.x > 9.5);
        assert!(state.players[1].body.pos.x < 8.5);
    }

    #[test]
    fn test_pellet_makes_every_ghost_vulnerable() {
        let mut state = classic(1);
        state.players[0].body.pos = Vec2::new(1.0, 3.0);

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert!(events.contains(&GameEvent::PelletEaten { player: 0 }));
        assert_eq!(state.players[0].score, PELLET_POINTS);
        for ghost in &state.ghosts {
            assert!(ghost.is_vulnerable());
            // Counted down once by the ghost's own step this tick
            assert_eq!(ghost.vulnerable_ticks(), VULNERABLE_TICKS - 1);
        }
    }

    #[test]
    fn test_pellet_does_not_wake_eaten_ghost() {
        let mut state = classic(1);
        state.players[0].body.pos = Vec2::new(1.0, 3.0);
        state.ghosts[1].mark_eaten();

        tick(&mut state, &TickInput::default()).unwrap();
        assert!(state.ghosts[1].is_eaten());
        assert!(!state.ghosts[1].is_vulnerable());
        assert!(state.ghosts[0].is_vulnerable());
    }

    #[test]
    fn test_dangerous_contact_ends_round() {
        let mut state = classic(1);
        state.players[0].body.pos = Vec2::new(1.0, 1.0);
        state.ghosts[0].body.pos = Vec2::new(1.0, 1.0);

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert!(events.contains(&GameEvent::PlayerCaught {
            ghost: GhostKind::Chaser,
            player: 0,
        }));
        assert_eq!(events.last(), Some(&GameEvent::RoundLost));
        assert!(!state.players[0].alive);
        assert_eq!(state.phase, GamePhase::Defeat);
    }

    #[test]
    fn test_vulnerable_contact_eats_ghost() {
        let mut state = classic(1);
        state.players[0].body.pos = Vec2::new(1.0, 1.0);
        state.ghosts[0].body.pos = Vec2::new(1.0, 1.0);
        state.ghosts[0].make_vulnerable();

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert!(events.contains(&GameEvent::GhostEaten {
            ghost: GhostKind::Chaser,
            player: 0,
        }));
        assert!(state.players[0].alive);
        assert_eq!(state.players[0].score, DOT_POINTS + GHOST_POINTS);
        assert!(state.ghosts[0].is_eaten());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_one_survivor_keeps_round_going() {
        let mut state = classic(2);
        state.players[0].body.pos = Vec2::new(1.0, 1.0);
        state.ghosts[0].body.pos = Vec2::new(1.0, 1.0);

        tick(&mut state, &TickInput::default()).unwrap();
        assert!(!state.players[0].alive);
        assert!(state.players[1].alive);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ghosts_hunt_nearest_player() {
        // The chaser leaves its spawn (9,8) either up or down
        let chaser_dir = |p2_alive: bool| {
            let mut state = classic(2);
            state.players[0].body.pos = Vec2::new(1.0, 17.0);
            state.players[1].body.pos = Vec2::new(10.0, 5.0);
            state.players[1].alive = p2_alive;
            tick(&mut state, &TickInput::default()).unwrap();
            state.ghost(GhostKind::Chaser).unwrap().body.dir
        };

        assert_eq!(chaser_dir(true), Direction::Up);
        // With player two gone it turns back toward player one
        assert_eq!(chaser_dir(false), Direction::Down);
    }

    #[test]
    fn test_ghost_respawn_event() {
        let mut state = classic(1);
        state.ghosts[2].mode = GhostMode::Eaten { respawn_ticks: 1 };
        state.ghosts[2].body.pos = Vec2::new(1.0, 17.0);

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert!(events.contains(&GameEvent::GhostRespawned {
            ghost: GhostKind::Flanker
        }));
        assert_eq!(state.ghosts[2].mode, GhostMode::Patrol);
        assert_eq!(state.ghosts[2].body.pos, Vec2::new(10.0, 9.0));
    }

    #[test]
    fn test_victory_then_no_op() {
        let mut state = classic(1);
        clear_pickups_except(&mut state, PLAYER_SPAWN);

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(events.last(), Some(&GameEvent::RoundWon));
        assert_eq!(state.phase, GamePhase::Victory);

        let before = Snapshot::capture(&state);
        let events = tick(&mut state, &TickInput::single(Direction::Left)).unwrap();
        assert!(events.is_empty());
        assert_eq!(Snapshot::capture(&state), before);
    }

    #[test]
    fn test_victory_beats_simultaneous_defeat() {
        let mut state = classic(1);
        clear_pickups_except(&mut state, PLAYER_SPAWN);
        state.ghosts[0].body.pos = Vec2::new(9.0, 11.0);

        tick(&mut state, &TickInput::default()).unwrap();
        assert!(!state.players[0].alive);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_idle_mode_collects() {
        let mut state = classic(1);
        for _ in 0..20 {
            tick(&mut state, &TickInput::demo()).unwrap();
        }
        assert!(state.players[0].score > DOT_POINTS);
        assert_ne!(state.players[0].body.pos, Vec2::new(9.0, 11.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = classic(2);
        let mut state2 = classic(2);

        let inputs = [
            TickInput::demo(),
            TickInput::single(Direction::Left),
            TickInput::single(Direction::Up),
            TickInput::default(),
        ];

        for step in 0..600 {
            let input = &inputs[(step / 50) % inputs.len()];
            let e1 = tick(&mut state1, input).unwrap();
            let e2 = tick(&mut state2, input).unwrap();
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(Snapshot::capture(&state1), Snapshot::capture(&state2));
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut state = classic(1);
        let run = |state: &mut GameState| {
            for _ in 0..400 {
                tick(state, &TickInput::demo()).unwrap();
            }
            Snapshot::capture(state)
        };

        let first = run(&mut state);
        state.reset().unwrap();
        let second = run(&mut state);
        assert_eq!(first, second);
    }
}
