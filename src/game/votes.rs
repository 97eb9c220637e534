use super::{eligible::PlayerSet, player::PlayerId, MAX_PLAYERS};
use serde::{Deserialize, Serialize};

/// Tracks the votes cast during one voting round.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default)]
pub struct Votes {
    counts: [usize; MAX_PLAYERS],
    cast: PlayerSet,
}

/// The result of counting a round of votes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteOutcome {
    /// A single player received the most votes.
    Elimination(PlayerId),
    /// Several players share the most votes.
    Tie(PlayerSet),
}

impl Votes {
    /// Creates a new `Votes` with every count at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the given player has cast their vote.
    pub fn has_cast(&self, voter: PlayerId) -> bool {
        self.cast.includes(voter)
    }

    /// Records the vote of a player.
    pub fn vote(&mut self, voter: PlayerId, candidate: PlayerId) {
        self.cast.insert(voter);
        self.counts[candidate] += 1;
    }

    /// The number of votes received by the given player.
    pub fn count(&self, candidate: PlayerId) -> usize {
        self.counts.get(candidate).copied().unwrap_or(0)
    }

    /// Counts the votes among the given candidates. Does not modify the counts,
    /// so repeated calls on the same votes always agree.
    pub fn tally(&self, candidates: &PlayerSet) -> VoteOutcome {
        let max = candidates.iter().map(|c| self.counts[c]).max().unwrap_or(0);
        let leaders = candidates.iter().filter(|c| self.counts[*c] == max).collect::<Vec<_>>();
        match leaders[..] {
            [winner] => VoteOutcome::Elimination(winner),
            _ => VoteOutcome::Tie(PlayerSet::only(&leaders)),
        }
    }
}
