pub use self::eligible::PlayerSet;
use self::logbook::Logbook;
use self::night::NightRound;
pub use self::night::{HunterReading, NightAction, NightReport, NightTurn, Reading};
pub use self::options::GameOptions;
pub use self::player::PlayerId;
use self::player::Player;
pub use self::role::{Alignment, ChargeKind, Charges, RebornForm, Role, RoleCaps, RoleKind};
pub use self::setup::{Preset, Seat};
pub use self::victory::Verdict;
pub use self::view::{Phase, PhaseDescriptor, RosterEntry};
use self::votes::{VoteOutcome, Votes};
use crate::error::GameError;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

mod eligible;
mod json;
mod logbook;
mod night;
mod options;
mod player;
mod role;
mod setup;
mod test;
mod victory;
mod view;
mod votes;

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 23;

/// A moderated game of Mafia.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game {
    opts: GameOptions,
    players: Vec<Player>,
    state: GameState,
    night_count: u32,
    /// Players who may not vote until the next night begins.
    disabled: PlayerSet,
    reported_disabled: PlayerSet,
    logbook: Logbook,
    last_night: Option<NightReport>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Serialize, Deserialize, Debug)]
enum GameState {
    RoleAssignment,
    Night {
        round: NightRound,
    },
    Day,
    Discussion,
    Voting {
        votes: Votes,
        /// Set during a revote: the players who tied in the previous round.
        tied: Option<PlayerSet>,
    },
    GameOver(Verdict),
}

impl Game {
    /// Creates a new game; every player starts without a role.
    pub fn new(opts: GameOptions, player_names: &[String], seed: u64) -> Result<Self, GameError> {
        let num_players = player_names.len();
        if num_players < MIN_PLAYERS {
            return Err(GameError::TooFewPlayers);
        }
        if num_players > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        opts.validate(num_players)?;

        let players = player_names.iter().map(|name| Player::new(name.into())).collect();

        Ok(Game {
            opts,
            players,
            state: GameState::RoleAssignment,
            night_count: 0,
            disabled: PlayerSet::empty(),
            reported_disabled: PlayerSet::empty(),
            logbook: Logbook::new(),
            last_night: None,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Finds a player with the given name.
    pub fn find_player(&self, name: &str) -> Result<PlayerId, GameError> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or(GameError::UnknownPlayer)
    }

    /// Moves the game on by one step, resolving the night or the vote when it is over.
    pub fn advance_phase(&mut self) -> Result<PhaseDescriptor, GameError> {
        self.ensure_running();

        match &self.state {
            GameState::RoleAssignment => {
                if self.players.iter().any(|p| p.role.is_none()) {
                    return Err(GameError::IncompleteAssignment);
                }
                log::info!("Roles assigned to {} players", self.players.len());
                self.begin_night();
                Ok(self.night_descriptor(None))
            }
            GameState::Night { round } => {
                if !round.is_complete() {
                    return Err(GameError::NightInProgress);
                }
                let report = self.resolve_night();
                self.last_night = Some(report.clone());
                if let Some(verdict) = self.check_game_over() {
                    return Ok(PhaseDescriptor::GameOver {
                        verdict,
                        eliminated: report.deaths,
                    });
                }
                self.state = GameState::Day;
                Ok(PhaseDescriptor::Day { report })
            }
            GameState::Day => {
                self.state = GameState::Discussion;
                Ok(PhaseDescriptor::Discussion)
            }
            GameState::Discussion => {
                self.logbook.push(format!("Day {} Voting:", self.night_count));
                self.start_voting(None);
                Ok(PhaseDescriptor::Voting)
            }
            GameState::Voting { votes, tied } => match votes.tally(&self.tally_candidates(tied)) {
                VoteOutcome::Elimination(player) => {
                    let player_ref = &mut self.players[player];
                    player_ref.eliminate();
                    player_ref.reported_dead = true;
                    self.logbook.push(format!("{} was eliminated by voting.", player_ref.name));
                    log::info!("{} was eliminated by voting", player_ref.name);
                    if let Some(verdict) = self.check_game_over() {
                        return Ok(PhaseDescriptor::GameOver {
                            verdict,
                            eliminated: vec![player],
                        });
                    }
                    self.begin_night();
                    Ok(self.night_descriptor(Some(player)))
                }
                VoteOutcome::Tie(tied) => {
                    let names = tied.names(self).join(", ");
                    self.logbook.push(format!("Vote tied between {}; revote.", names));
                    log::info!("Vote tied between {}", names);
                    self.start_voting(Some(tied));
                    Ok(PhaseDescriptor::Revote { tied: tied.to_vec() })
                }
            },
            GameState::GameOver(_) => unreachable!(),
        }
    }

    /// Called when a player casts their vote.
    pub fn submit_vote(&mut self, voter: PlayerId, candidate: PlayerId) -> Result<(), GameError> {
        self.ensure_running();
        self.check_player_index(voter)?;
        self.check_player_index(candidate)?;

        let GameState::Voting { votes, tied } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        if !self.voters(tied).includes(voter) {
            return Err(GameError::VotingBarred);
        }
        if votes.has_cast(voter) {
            return Err(GameError::AlreadyVoted);
        }
        if !self.candidates(voter, tied).includes(candidate) {
            return Err(GameError::IneligibleTarget);
        }

        let GameState::Voting { votes, .. } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        votes.vote(voter, candidate);
        log::debug!("{} voted for {}", self.players[voter].name, self.players[candidate].name);
        Ok(())
    }

    /// Gets the players who may still vote this round.
    pub fn eligible_voters(&self) -> PlayerSet {
        match &self.state {
            GameState::Voting { votes, tied } => {
                let mut voters = self.voters(tied);
                for voter in 0..self.players.len() {
                    if votes.has_cast(voter) {
                        voters.exclude(voter);
                    }
                }
                voters
            }
            _ => PlayerSet::empty(),
        }
    }

    /// Gets the players the given voter may vote for.
    pub fn vote_candidates(&self, voter: PlayerId) -> PlayerSet {
        match &self.state {
            GameState::Voting { tied, .. } => self.candidates(voter, tied),
            _ => PlayerSet::empty(),
        }
    }

    /// The number of votes the given player has received this round.
    pub fn votes_for(&self, player: PlayerId) -> usize {
        match &self.state {
            GameState::Voting { votes, .. } => votes.count(player),
            _ => 0,
        }
    }

    /// Gets the current phase.
    pub fn phase(&self) -> Phase {
        match &self.state {
            GameState::RoleAssignment => Phase::RoleAssignment,
            GameState::Night { .. } => Phase::Night,
            GameState::Day => Phase::Day,
            GameState::Discussion => Phase::Discussion,
            GameState::Voting { tied: None, .. } => Phase::Voting,
            GameState::Voting { tied: Some(_), .. } => Phase::Revote,
            GameState::GameOver(_) => Phase::GameOver,
        }
    }

    /// The number of nights that have been resolved.
    pub fn night_count(&self) -> u32 {
        self.night_count
    }

    /// Everything narrated so far, oldest first.
    pub fn logbook(&self) -> &[String] {
        self.logbook.entries()
    }

    /// Gets the report of the most recently resolved night.
    pub fn last_night_report(&self) -> Option<&NightReport> {
        self.last_night.as_ref()
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    /// Gets the outcome of the game, if it has finished.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.state {
            GameState::GameOver(verdict) => Some(verdict),
            _ => None,
        }
    }

    /// Returns whether a particular player has won.
    pub fn player_has_won(&self, player: PlayerId) -> bool {
        let (Some(verdict), Some(role)) = (self.verdict(), self.players.get(player).and_then(|p| p.role)) else {
            return false;
        };
        match verdict {
            Verdict::VillagersWin => role.alignment() == Alignment::Village,
            Verdict::MafiaWins => role.alignment() == Alignment::Mafia,
            Verdict::ManiacWins => role.kind() == RoleKind::Maniac,
        }
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    fn start_voting(&mut self, tied: Option<PlayerSet>) {
        self.state = GameState::Voting {
            votes: Votes::new(),
            tied,
        };
    }

    fn voters(&self, tied: &Option<PlayerSet>) -> PlayerSet {
        let builder = self.eligible_players().not_disabled();
        match tied {
            Some(tied) => builder.outside(tied).make(),
            None => builder.make(),
        }
    }

    fn candidates(&self, voter: PlayerId, tied: &Option<PlayerSet>) -> PlayerSet {
        match tied {
            Some(tied) => self.eligible_players().within(tied).make(),
            None => self.eligible_players().not_disabled().exclude(voter).make(),
        }
    }

    fn tally_candidates(&self, tied: &Option<PlayerSet>) -> PlayerSet {
        match tied {
            Some(tied) => self.eligible_players().within(tied).make(),
            None => self.eligible_players().make(),
        }
    }

    fn night_descriptor(&self, eliminated: Option<PlayerId>) -> PhaseDescriptor {
        PhaseDescriptor::Night {
            night: self.night_count + 1,
            pending: self.pending_turn(),
            eliminated,
        }
    }

    fn check_game_over(&mut self) -> Option<Verdict> {
        let verdict = victory::evaluate(&self.players)?;
        self.logbook.push(format!("Game over: {}", verdict));
        log::info!("Game over: {}", verdict);
        self.state = GameState::GameOver(verdict);
        Some(verdict)
    }

    /// Every entry point that changes the game must not be used once it is over.
    fn ensure_running(&self) {
        if self.game_over() {
            panic!("the game is already over");
        }
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: PlayerId) -> Result<(), GameError> {
        if player < self.num_players() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer)
        }
    }
}
