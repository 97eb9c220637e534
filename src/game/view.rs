use super::night::{NightReport, NightTurn};
use super::player::PlayerId;
use super::role::{Charges, Role, RoleKind};
use super::victory::Verdict;
use super::Game;
use serde::{Deserialize, Serialize};

/// The phases of the game loop, as seen from outside the engine.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Phase {
    RoleAssignment,
    Night,
    Day,
    Discussion,
    Voting,
    Revote,
    GameOver,
}

/// What `advance_phase` moved the game into.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type")]
pub enum PhaseDescriptor {
    Night {
        /// The index of the night that has just begun.
        night: u32,
        pending: Option<NightTurn>,
        /// The player eliminated by the vote that ended the day, if any.
        eliminated: Option<PlayerId>,
    },
    Day {
        report: NightReport,
    },
    Discussion,
    Voting,
    Revote {
        tied: Vec<PlayerId>,
    },
    GameOver {
        verdict: Verdict,
        eliminated: Vec<PlayerId>,
    },
}

impl PhaseDescriptor {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseDescriptor::Night { .. } => Phase::Night,
            PhaseDescriptor::Day { .. } => Phase::Day,
            PhaseDescriptor::Discussion => Phase::Discussion,
            PhaseDescriptor::Voting => Phase::Voting,
            PhaseDescriptor::Revote { .. } => Phase::Revote,
            PhaseDescriptor::GameOver { .. } => Phase::GameOver,
        }
    }
}

/// A read-only view of one seat.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub disabled: bool,
    pub role: Option<RoleKind>,
    pub label: Option<String>,
    /// A hunter's remaining ammunition.
    pub charges: Option<Charges>,
}

impl Game {
    /// Gets every seat in order. Whether roles are shown is up to the caller.
    pub fn roster_view(&self) -> Vec<RosterEntry> {
        self.players
            .iter()
            .enumerate()
            .map(|(id, player)| RosterEntry {
                id,
                name: player.name.clone(),
                alive: player.alive,
                disabled: self.disabled.includes(id),
                role: player.role.map(|r| r.kind()),
                label: player.role.map(|r| r.label()),
                charges: match player.role {
                    Some(Role::Hunter { charges, .. }) => Some(charges),
                    _ => None,
                },
            })
            .collect()
    }
}
