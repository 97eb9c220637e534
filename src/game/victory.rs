use super::player::Player;
use super::role::RoleKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a finished game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Verdict {
    /// Every mafia-aligned player is dead and the maniac is gone.
    VillagersWin,
    /// The mafia matches or outnumbers the village.
    MafiaWins,
    /// The maniac outlived everyone else.
    ManiacWins,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::VillagersWin => "Villagers Win",
            Verdict::MafiaWins => "Mafia Wins",
            Verdict::ManiacWins => "Maniac Wins",
        })
    }
}

/// Checks the roster for a finished game.
pub fn evaluate(players: &[Player]) -> Option<Verdict> {
    let alive = || players.iter().filter(|p| p.alive);
    let mafia = alive().filter(|p| p.is_mafia_aligned()).count();
    let is_maniac = |p: &Player| p.role.map(|r| r.kind()) == Some(RoleKind::Maniac);
    let village = alive().filter(|p| !p.is_mafia_aligned() && !is_maniac(p)).count();
    let maniac_alive = alive().any(is_maniac);

    if mafia == 0 && !maniac_alive {
        Some(Verdict::VillagersWin)
    } else if mafia >= village && village > 0 && !maniac_alive {
        Some(Verdict::MafiaWins)
    } else if maniac_alive && mafia == 0 && village == 0 {
        Some(Verdict::ManiacWins)
    } else {
        None
    }
}
