//! Fixtures shared by the game tests

use super::super::night::{NightAction, NightReport};
use super::super::player::PlayerId;
use super::super::role::RoleKind;
use super::super::view::{Phase, PhaseDescriptor};
use crate::game::{Game, GameOptions};

/// Names the players P0, P1, ...
pub fn names(num_players: usize) -> Vec<String> {
    (0..num_players).map(|i| format!("P{}", i)).collect()
}

/// Creates a game where player `i` holds `roles[i]`, still in role assignment.
pub fn create_game_with_options(opts: GameOptions, roles: &[RoleKind]) -> Game {
    let mut game = Game::new(opts, &names(roles.len()), 42).unwrap();
    for (player, kind) in roles.iter().enumerate() {
        game.assign_role(player, *kind).unwrap();
    }
    game
}

pub fn create_game(roles: &[RoleKind]) -> Game {
    create_game_with_options(GameOptions::default(), roles)
}

/// Creates a game with the given roles and starts the first night.
pub fn create_game_at_night(roles: &[RoleKind]) -> Game {
    let mut game = create_game(roles);
    game.advance_phase().unwrap();
    assert_eq!(game.phase(), Phase::Night);
    game
}

pub fn target(game: &mut Game, player: PlayerId, target: PlayerId) {
    game.submit_night_action(player, NightAction::Target(target)).unwrap();
}

pub fn abstain(game: &mut Game, player: PlayerId) {
    game.submit_night_action(player, NightAction::Abstain).unwrap();
}

/// Every remaining night actor abstains.
pub fn abstain_rest(game: &mut Game) {
    while game.pending_turn().is_some() {
        let actor = game.eligible_actors().iter().next().expect("pending turn without actors");
        abstain(game, actor);
    }
}

/// Lets the remaining actors abstain and resolves the night.
pub fn finish_night(game: &mut Game) -> NightReport {
    abstain_rest(game);
    game.advance_phase().unwrap();
    game.last_night_report().cloned().unwrap()
}

/// Finishes the night and moves through the day into voting.
pub fn advance_to_voting(game: &mut Game) {
    finish_night(game);
    assert_eq!(game.advance_phase().unwrap(), PhaseDescriptor::Discussion);
    assert_eq!(game.advance_phase().unwrap(), PhaseDescriptor::Voting);
}

pub fn is_alive(game: &Game, player: PlayerId) -> bool {
    game.roster_view()[player].alive
}

/// Counts logbook lines containing the given text.
pub fn log_lines_containing(game: &Game, text: &str) -> usize {
    game.logbook().iter().filter(|line| line.contains(text)).count()
}
