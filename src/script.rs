//! Replays a moderator's commands from a JSON file.

use crate::error::GameError;
use crate::game::{ChargeKind, Game, GameOptions, NightAction, PlayerId, Preset, RebornForm, RoleKind};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug)]
pub struct Script {
    pub players: Vec<String>,
    #[serde(default)]
    pub options: GameOptions,
    #[serde(default)]
    pub seed: u64,
    pub commands: Vec<Command>,
}

/// One step of a script. Players are referred to by name.
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Assign { player: String, role: RoleKind },
    AssignReborn { player: String, form: RebornForm },
    Preset { preset: Preset },
    Deal,
    Act { player: String, action: ScriptAction },
    Vote { voter: String, candidate: String },
    Advance,
}

#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptAction {
    Target { target: String },
    Check { target: String },
    Shoot { charge: ChargeKind, target: String },
    Abstain,
}

/// The game after a script has run, along with every command the engine refused.
pub struct Replay {
    pub game: Game,
    pub rejected: Vec<(usize, GameError)>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid script")
    }

    /// Runs every command in order. Rejected commands are logged and skipped;
    /// commands after the game ends are ignored.
    pub fn run(&self) -> anyhow::Result<Replay> {
        let mut game = Game::new(self.options, &self.players, self.seed)?;
        let mut rejected = vec![];

        for (idx, command) in self.commands.iter().enumerate() {
            if game.game_over() {
                log::warn!("ignoring {} command(s) after the game ended", self.commands.len() - idx);
                break;
            }
            if let Err(err) = execute(&mut game, command) {
                log::warn!("command {} ({:?}) rejected: {}", idx, command, err);
                rejected.push((idx, err));
            }
        }

        Ok(Replay { game, rejected })
    }
}

fn execute(game: &mut Game, command: &Command) -> Result<(), GameError> {
    match command {
        Command::Assign { player, role } => {
            let player = game.find_player(player)?;
            game.assign_role(player, *role)
        }
        Command::AssignReborn { player, form } => {
            let player = game.find_player(player)?;
            game.assign_reborn(player, *form)
        }
        Command::Preset { preset } => game.apply_preset(*preset),
        Command::Deal => game.deal_remaining_roles(),
        Command::Act { player, action } => {
            let player = game.find_player(player)?;
            let action = resolve_action(game, action)?;
            game.submit_night_action(player, action)
        }
        Command::Vote { voter, candidate } => {
            let (voter, candidate) = (game.find_player(voter)?, game.find_player(candidate)?);
            game.submit_vote(voter, candidate)
        }
        Command::Advance => {
            let phase = game.advance_phase()?;
            log::info!("advanced to {:?}", phase.phase());
            Ok(())
        }
    }
}

fn resolve_action(game: &Game, action: &ScriptAction) -> Result<NightAction, GameError> {
    let find = |name: &str| -> Result<PlayerId, GameError> { game.find_player(name) };
    Ok(match action {
        ScriptAction::Target { target } => NightAction::Target(find(target)?),
        ScriptAction::Check { target } => NightAction::Check(find(target)?),
        ScriptAction::Shoot { charge, target } => NightAction::Shoot {
            charge: *charge,
            target: find(target)?,
        },
        ScriptAction::Abstain => NightAction::Abstain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Verdict};

    const SCENARIO: &str = r#"{
        "players": ["Ann", "Ben", "Cat", "Dan", "Eve"],
        "seed": 7,
        "commands": [
            { "type": "preset", "preset": "small" },
            { "type": "advance" },
            { "type": "act", "player": "Ann", "action": { "kind": "target", "target": "Ben" } },
            { "type": "act", "player": "Eve", "action": { "kind": "check", "target": "Ann" } },
            { "type": "act", "player": "Cat", "action": { "kind": "target", "target": "Dan" } },
            { "type": "act", "player": "Dan", "action": { "kind": "target", "target": "Ben" } },
            { "type": "advance" },
            { "type": "advance" },
            { "type": "advance" },
            { "type": "vote", "voter": "Ben", "candidate": "Ann" },
            { "type": "vote", "voter": "Eve", "candidate": "Ann" },
            { "type": "vote", "voter": "Cat", "candidate": "Ben" },
            { "type": "advance" },
            { "type": "act", "player": "Eve", "action": { "kind": "shoot", "charge": "normal", "target": "Cat" } },
            { "type": "act", "player": "Cat", "action": { "kind": "target", "target": "Dan" } },
            { "type": "act", "player": "Dan", "action": { "kind": "abstain" } },
            { "type": "advance" }
        ]
    }"#;

    #[test]
    fn parses_commands() {
        let script = Script::parse(SCENARIO).unwrap();
        assert_eq!(script.players.len(), 5);
        assert_eq!(script.options, GameOptions::default());
        assert_eq!(
            script.commands[2],
            Command::Act {
                player: "Ann".into(),
                action: ScriptAction::Target { target: "Ben".into() },
            }
        );
    }

    #[test]
    fn replays_a_whole_game() {
        let replay = Script::parse(SCENARIO).unwrap().run().unwrap();
        assert!(replay.rejected.is_empty());
        assert_eq!(replay.game.phase(), Phase::GameOver);
        assert_eq!(replay.game.verdict(), Some(Verdict::VillagersWin));
        assert!(replay.game.logbook().iter().any(|l| l == "Ann was eliminated by voting."));
    }

    #[test]
    fn rejected_commands_are_reported() {
        let text = r#"{
            "players": ["Ann", "Ben", "Cat", "Dan", "Eve"],
            "commands": [
                { "type": "advance" },
                { "type": "assign", "player": "Zed", "role": "villager" }
            ]
        }"#;
        let replay = Script::parse(text).unwrap().run().unwrap();
        assert_eq!(
            replay.rejected,
            vec![(0, GameError::IncompleteAssignment), (1, GameError::UnknownPlayer)]
        );
        assert_eq!(replay.game.phase(), Phase::RoleAssignment);
    }

    #[test]
    fn malformed_scripts_fail_to_parse() {
        assert!(Script::parse(r#"{ "players": [] }"#).is_err());
    }
}
