use super::role::Role;
use serde::{Deserialize, Serialize};

/// Index of a player within the roster; stable for the life of the game.
pub type PlayerId = usize;

/// A seat at the table.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub name: String,
    pub role: Option<Role>,
    pub alive: bool,
    /// Set once the player's death has been narrated.
    pub reported_dead: bool,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            role: None,
            alive: true,
            reported_dead: false,
        }
    }

    /// Kills the player, returning `true` iff they were alive until now.
    pub fn eliminate(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    pub fn is_mafia_aligned(&self) -> bool {
        self.role.map_or(false, |role| role.is_mafia_aligned())
    }
}
