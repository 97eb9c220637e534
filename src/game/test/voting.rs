//! Tests for day voting and revotes

use super::super::night::NightTurn;
use super::super::role::RoleKind::*;
use super::super::view::{Phase, PhaseDescriptor};
use super::test_utils::*;
use crate::error::GameError;
use crate::game::Game;

const ROLES: [crate::game::RoleKind; 6] = [MafiaLeader, Villager, Villager, Villager, Doctor, Hunter];

fn voting_game() -> Game {
    let mut game = create_game_at_night(&ROLES);
    advance_to_voting(&mut game);
    game
}

#[test]
fn single_winner_is_eliminated() {
    let mut game = voting_game();
    game.submit_vote(0, 1).unwrap();
    game.submit_vote(2, 1).unwrap();
    game.submit_vote(3, 2).unwrap();
    assert_eq!(game.votes_for(1), 2);
    assert_eq!(game.votes_for(2), 1);

    assert_eq!(
        game.advance_phase().unwrap(),
        PhaseDescriptor::Night {
            night: 2,
            pending: Some(NightTurn::Mafia),
            eliminated: Some(1),
        }
    );
    assert!(!is_alive(&game, 1));
    assert_eq!(log_lines_containing(&game, "Day 1 Voting:"), 1);
    assert_eq!(log_lines_containing(&game, "P1 was eliminated by voting."), 1);

    // The vote already announced the death
    let report = finish_night(&mut game);
    assert_eq!(report.summary, vec!["No one was killed tonight".to_string()]);
}

#[test]
fn each_player_votes_once() {
    let mut game = voting_game();
    game.submit_vote(0, 1).unwrap();
    assert_eq!(game.submit_vote(0, 2), Err(GameError::AlreadyVoted));
    assert!(!game.eligible_voters().includes(0));
    assert_eq!(game.eligible_voters().len(), 5);
    assert_eq!(game.votes_for(1), 1);
}

#[test]
fn players_cannot_vote_for_themselves() {
    let mut game = voting_game();
    assert_eq!(game.submit_vote(2, 2), Err(GameError::IneligibleTarget));
    assert!(!game.vote_candidates(2).includes(2));
    assert_eq!(game.vote_candidates(2).len(), 5);
}

#[test]
fn votes_are_only_taken_while_voting() {
    let mut game = create_game_at_night(&ROLES);
    assert_eq!(game.submit_vote(0, 1), Err(GameError::InvalidAction));
    finish_night(&mut game);
    assert_eq!(game.phase(), Phase::Day);
    assert_eq!(game.submit_vote(0, 1), Err(GameError::InvalidAction));
    assert!(game.eligible_voters().is_empty());
}

#[test]
fn unknown_players_are_rejected() {
    let mut game = voting_game();
    assert_eq!(game.submit_vote(0, 99), Err(GameError::UnknownPlayer));
    assert_eq!(game.submit_vote(99, 0), Err(GameError::UnknownPlayer));
}

#[test]
fn the_dead_neither_vote_nor_receive_votes() {
    let mut game = create_game_at_night(&ROLES);
    target(&mut game, 0, 1);
    advance_to_voting(&mut game);

    assert_eq!(game.submit_vote(1, 2), Err(GameError::VotingBarred));
    assert_eq!(game.submit_vote(2, 1), Err(GameError::IneligibleTarget));
    assert!(!game.eligible_voters().includes(1));
}

#[test]
fn a_silent_table_ties_everyone() {
    let mut game = voting_game();
    let PhaseDescriptor::Revote { tied } = game.advance_phase().unwrap() else {
        panic!("Expected a revote");
    };
    assert_eq!(tied, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(game.phase(), Phase::Revote);

    // Everyone is tied, so nobody is left to break it
    assert!(game.eligible_voters().is_empty());
    assert_eq!(game.submit_vote(0, 1), Err(GameError::VotingBarred));
    assert_eq!(
        game.advance_phase().unwrap(),
        PhaseDescriptor::Revote { tied: vec![0, 1, 2, 3, 4, 5] }
    );
    assert_eq!(log_lines_containing(&game, "Vote tied between"), 2);
}

#[test]
fn revote_is_restricted_to_the_tied_players() {
    let mut game = voting_game();
    game.submit_vote(0, 1).unwrap();
    game.submit_vote(3, 1).unwrap();
    game.submit_vote(4, 2).unwrap();
    game.submit_vote(5, 2).unwrap();
    assert_eq!(game.advance_phase().unwrap(), PhaseDescriptor::Revote { tied: vec![1, 2] });
    assert_eq!(log_lines_containing(&game, "Vote tied between P1, P2; revote."), 1);

    // Counts start again from zero
    assert_eq!(game.votes_for(1), 0);
    assert_eq!(game.eligible_voters().to_vec(), vec![0, 3, 4, 5]);
    assert_eq!(game.vote_candidates(0).to_vec(), vec![1, 2]);
    assert_eq!(game.submit_vote(1, 2), Err(GameError::VotingBarred));
    assert_eq!(game.submit_vote(0, 3), Err(GameError::IneligibleTarget));

    game.submit_vote(0, 2).unwrap();
    game.submit_vote(3, 2).unwrap();
    game.submit_vote(4, 1).unwrap();
    let PhaseDescriptor::Night { eliminated, .. } = game.advance_phase().unwrap() else {
        panic!("Expected the night to begin");
    };
    assert_eq!(eliminated, Some(2));
}
