use super::role::{Charges, RoleCaps};
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Options for customising a game.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GameOptions {
    /// Normal charges each hunter starts with.
    pub normal_charges: u8,
    /// Silver charges each hunter starts with.
    pub silver_charges: u8,
    /// How many players may be dealt each role.
    pub caps: RoleCaps,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            normal_charges: 2,
            silver_charges: 1,
            caps: RoleCaps::default(),
        }
    }
}

impl GameOptions {
    /// The ammunition a newly dealt hunter receives.
    pub fn hunter_charges(&self) -> Charges {
        Charges {
            normal: self.normal_charges,
            silver: self.silver_charges,
        }
    }

    /// Returns a `GameError` if these options cannot seat the given number of players.
    pub fn validate(&self, num_players: usize) -> Result<(), GameError> {
        if num_players > self.max_players() {
            return Err(GameError::InvalidGameOptions);
        }
        Ok(())
    }

    /// Returns the maximum number of players these options can seat.
    pub fn max_players(&self) -> usize {
        self.caps.total().min(super::MAX_PLAYERS)
    }
}
