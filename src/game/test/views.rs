//! Tests for the read-only views of a game

use super::super::role::{Charges, RoleKind::*};
use super::test_utils::*;
use serde_json::json;

#[test]
fn roster_shows_roles_and_ammunition() {
    let game = create_game_at_night(&[MafiaLeader, Witch, Villager, Doctor, Hunter, Villager]);
    let roster = game.roster_view();

    assert_eq!(roster.len(), 6);
    assert_eq!(roster[0].label.as_deref(), Some("Mafia Leader"));
    assert_eq!(roster[1].role, Some(Witch));
    assert_eq!(roster[4].charges, Some(Charges { normal: 2, silver: 1 }));
    assert_eq!(roster[3].charges, None);
    assert!(roster.iter().all(|entry| entry.alive && !entry.disabled));
}

#[test]
fn board_hides_roles_during_play() {
    let mut game = create_game_at_night(&[MafiaLeader, Witch, Villager, Doctor, Hunter, Villager]);
    let board = game.get_board_json();
    assert_eq!(board["phase"], "Night");
    assert_eq!(board["pending"], "Mafia");
    assert_eq!(board["night"], 0);
    assert_eq!(board["alive"], 6);
    assert!(board["players"].as_array().unwrap().iter().all(|p| p["role"].is_null()));
    assert!(board["summary"].is_null());

    target(&mut game, 0, 2);
    finish_night(&mut game);
    let board = game.get_board_json();
    assert_eq!(board["phase"], "Day");
    assert_eq!(board["night"], 1);
    assert_eq!(board["alive"], 5);
    assert_eq!(board["summary"], json!(["P2 was found dead"]));
    assert_eq!(board["players"][2]["isDead"], true);
}

#[test]
fn mafia_recognise_each_other() {
    let game = create_game_at_night(&[MafiaLeader, Witch, Villager, Doctor, Hunter, Villager]);

    let leader = game.get_player_json(0).unwrap();
    assert_eq!(leader["role"], "Mafia Leader");
    assert_eq!(leader["canAct"], true);
    assert_eq!(leader["players"][1]["role"], "Witch");
    assert!(leader["players"][2]["role"].is_null());

    let hunter = game.get_player_json(4).unwrap();
    assert_eq!(hunter["role"], "Hunter");
    assert_eq!(hunter["charges"], json!({ "normal": 2, "silver": 1 }));
    assert_eq!(hunter["canAct"], false);
    let known_roles = hunter["players"].as_array().unwrap().iter().filter(|p| !p["role"].is_null()).count();
    assert_eq!(known_roles, 1);

    assert!(game.get_player_json(99).is_none());
}

#[test]
fn votes_show_on_the_board() {
    let mut game = create_game_at_night(&[MafiaLeader, Witch, Villager, Doctor, Hunter, Villager]);
    advance_to_voting(&mut game);
    game.submit_vote(2, 1).unwrap();
    game.submit_vote(3, 1).unwrap();

    let board = game.get_board_json();
    assert_eq!(board["phase"], "Voting");
    assert_eq!(board["players"][1]["votes"], 2);
    assert_eq!(game.get_player_json(2).unwrap()["canVote"], false);
    assert_eq!(game.get_player_json(4).unwrap()["canVote"], true);
}

#[test]
fn everything_is_revealed_at_the_end() {
    let mut game = create_game_at_night(&[MafiaLeader, Villager, Villager, Doctor, Hunter]);
    advance_to_voting(&mut game);
    game.submit_vote(1, 0).unwrap();
    game.submit_vote(2, 0).unwrap();
    game.advance_phase().unwrap();

    let board = game.get_board_json();
    assert_eq!(board["phase"], "GameOver");
    assert_eq!(board["verdict"], "VillagersWin");
    assert_eq!(board["players"][0]["role"], "Mafia Leader");
    assert_eq!(game.get_player_json(1).unwrap()["hasWon"], true);
    assert_eq!(game.get_player_json(0).unwrap()["hasWon"], false);
}

#[test]
fn logbook_keeps_every_round_in_order() {
    let mut game = create_game_at_night(&[MafiaLeader, Villager, Villager, Doctor, Hunter]);
    advance_to_voting(&mut game);
    game.submit_vote(0, 1).unwrap();
    game.advance_phase().unwrap();
    finish_night(&mut game);

    let log = game.logbook();
    let night_1 = log.iter().position(|line| line == "Night 1 Actions:").unwrap();
    let voting = log.iter().position(|line| line == "Day 1 Voting:").unwrap();
    let night_2 = log.iter().position(|line| line == "Night 2 Actions:").unwrap();
    assert!(night_1 < voting && voting < night_2);
    assert_eq!(log.iter().filter(|line| *line == "----------------------").count(), 2);
}
