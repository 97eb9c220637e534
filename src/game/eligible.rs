use super::{night::NightTurn, player::PlayerId, role::RoleKind, Game, MAX_PLAYERS};
use serde::{Deserialize, Serialize};

/// A set of players, indexed by seat.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct PlayerSet {
    members: [bool; MAX_PLAYERS],
}

impl PlayerSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn only(players: &[PlayerId]) -> Self {
        Self {
            members: core::array::from_fn(|i| players.contains(&i)),
        }
    }

    pub fn insert(&mut self, player: PlayerId) {
        self.members[player] = true;
    }

    pub fn exclude(&mut self, player: PlayerId) {
        self.members[player] = false;
    }

    pub fn includes(&self, player: PlayerId) -> bool {
        self.members.get(player).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|m| *m)
    }

    pub fn len(&self) -> usize {
        self.members.iter().filter(|m| **m).count()
    }

    /// Iterates over the members in seat order.
    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.members.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| i)
    }

    pub fn to_vec(&self) -> Vec<PlayerId> {
        self.iter().collect()
    }

    pub fn names(&self, game: &Game) -> Vec<String> {
        self.iter().map(|i| game.players[i].name.clone()).collect()
    }
}

pub struct EligiblePlayersBuilder<'a> {
    game: &'a Game,
    eligible: [bool; MAX_PLAYERS],
}

impl Game {
    /// Starts building a set of players, initially every living player.
    pub fn eligible_players(&self) -> EligiblePlayersBuilder<'_> {
        EligiblePlayersBuilder {
            game: self,
            eligible: core::array::from_fn(|i| self.players.get(i).map(|p| p.alive).unwrap_or(false)),
        }
    }
}

impl<'a> EligiblePlayersBuilder<'a> {
    pub fn exclude(mut self, player: PlayerId) -> Self {
        if let Some(slot) = self.eligible.get_mut(player) {
            *slot = false;
        }
        self
    }

    pub fn of_kind(mut self, kind: RoleKind) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= player.role.map(|r| r.kind()) == Some(kind);
        }
        self
    }

    /// Keeps the players whose role wakes during the given night turn.
    pub fn waking_in(mut self, turn: NightTurn) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= player.role.and_then(|r| r.kind().night_turn()) == Some(turn);
        }
        self
    }

    pub fn not_mafia_aligned(mut self) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= !player.is_mafia_aligned();
        }
        self
    }

    pub fn not_disabled(mut self) -> Self {
        for idx in 0..self.game.players.len() {
            self.eligible[idx] &= !self.game.disabled.includes(idx);
        }
        self
    }

    pub fn within(mut self, set: &PlayerSet) -> Self {
        for (idx, eligible) in self.eligible.iter_mut().enumerate() {
            *eligible &= set.includes(idx);
        }
        self
    }

    pub fn outside(mut self, set: &PlayerSet) -> Self {
        for (idx, eligible) in self.eligible.iter_mut().enumerate() {
            *eligible &= !set.includes(idx);
        }
        self
    }

    pub fn make(self) -> PlayerSet {
        PlayerSet { members: self.eligible }
    }
}
