//! Contact detection and resolution between ghosts and players
//!
//! Contact is a per-axis proximity test rather than a true circle overlap:
//! both |dx| and |dy| must be under `CONTACT_DISTANCE`.

use glam::Vec2;

use super::ghost::Ghost;
use super::player::Player;
use crate::consts::{CONTACT_DISTANCE, GHOST_POINTS};

/// Outcome of a ghost touching a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The ghost was vulnerable: it is eaten and the player scores
    GhostEaten { player: usize },
    /// The ghost was dangerous: the player is out
    PlayerCaught { player: usize },
}

#[inline]
pub fn in_contact(a: Vec2, b: Vec2) -> bool {
    let d = (a - b).abs();
    d.x < CONTACT_DISTANCE && d.y < CONTACT_DISTANCE
}

/// Test one ghost against every living player, in slot order. An eaten ghost
/// takes no part; a ghost eaten by an earlier player stops checking.
pub fn resolve_ghost_contacts(ghost: &mut Ghost, players: &mut [Player]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (idx, player) in players.iter_mut().enumerate() {
        if ghost.is_eaten() {
            break;
        }
        if !player.alive || !in_contact(ghost.body.pos, player.body.pos) {
            continue;
        }

        if ghost.is_vulnerable() {
            ghost.mark_eaten();
            player.score += GHOST_POINTS;
            contacts.push(Contact::GhostEaten { player: idx });
        } else {
            player.alive = false;
            contacts.push(Contact::PlayerCaught { player: idx });
        }
    }
    contacts
}
