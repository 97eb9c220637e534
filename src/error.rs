use crate::game::{ChargeKind, RoleKind};
use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid combination of game options")]
    InvalidGameOptions,
    #[error("too few players in the game")]
    TooFewPlayers,
    #[error("too many players in the game")]
    TooManyPlayers,
    #[error("every player must hold a role before the first night")]
    IncompleteAssignment,
    #[error("no player exists with the given id")]
    UnknownPlayer,
    #[error("no more {0} roles can be assigned")]
    RoleCapacityExceeded(RoleKind),
    #[error("this player already holds a role")]
    RoleAlreadyAssigned,
    #[error("the reborn must return as a hunter or a werewolf")]
    RebornFormRequired,
    #[error("this player cannot be chosen for this action")]
    IneligibleTarget,
    #[error("it is not this player's turn to act")]
    NotYourTurn,
    #[error("no {0} charges remain")]
    ResourceExhausted(ChargeKind),
    #[error("this player has already acted tonight")]
    AlreadyActed,
    #[error("this player has already voted this round")]
    AlreadyVoted,
    #[error("this player may not vote this round")]
    VotingBarred,
    #[error("this role cannot perform that kind of action")]
    InvalidActionKind,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("the night is not over yet")]
    NightInProgress,
}
