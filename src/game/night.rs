use super::eligible::PlayerSet;
use super::player::PlayerId;
use super::role::{ChargeKind, Role, RoleKind};
use super::{Game, GameState};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role groups that are woken, in order, to collect night actions.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum NightTurn {
    /// The mafia leader, or the ordinary mafia when the leader is dead.
    Mafia,
    Vampire,
    Werewolf,
    Maniac,
    Hunter,
    Witch,
    Occultist,
    Doctor,
}

impl NightTurn {
    pub const ALL: [NightTurn; 8] = [
        NightTurn::Mafia,
        NightTurn::Vampire,
        NightTurn::Werewolf,
        NightTurn::Maniac,
        NightTurn::Hunter,
        NightTurn::Witch,
        NightTurn::Occultist,
        NightTurn::Doctor,
    ];
}

impl fmt::Display for NightTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NightTurn::Mafia => "Mafia",
            NightTurn::Vampire => "Vampire",
            NightTurn::Werewolf => "Werewolf",
            NightTurn::Maniac => "Maniac",
            NightTurn::Hunter => "Hunter",
            NightTurn::Witch => "Witch",
            NightTurn::Occultist => "Occultist",
            NightTurn::Doctor => "Doctor",
        })
    }
}

/// A choice submitted by a player during their night turn.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum NightAction {
    /// Kill, heal or disable the given player, depending on the actor's role.
    Target(PlayerId),
    /// Hunter only: learn the target's alignment.
    Check(PlayerId),
    /// Hunter only: spend a charge shooting the target.
    Shoot { charge: ChargeKind, target: PlayerId },
    /// Act without choosing anyone.
    Abstain,
}

/// What a hunter learns when checking a player.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Reading {
    /// The target is the mafia leader.
    BloodyRed,
    /// The target is mafia-aligned.
    Red,
    Black,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reading::BloodyRed => "Bloody Red",
            Reading::Red => "Red",
            Reading::Black => "Black",
        })
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct HunterReading {
    pub hunter: PlayerId,
    pub target: PlayerId,
    pub reading: Reading,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct Submission {
    pub player: PlayerId,
    pub action: NightAction,
    /// `false` for submissions accepted only to mark the player as having acted.
    pub counted: bool,
}

/// The actions collected so far during one night.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NightRound {
    /// The 1-based index of this night.
    pub night: u32,
    turn: usize,
    pub acted: PlayerSet,
    pub submissions: Vec<Submission>,
}

impl NightRound {
    pub fn new(night: u32) -> Self {
        Self {
            night,
            turn: 0,
            acted: PlayerSet::empty(),
            submissions: vec![],
        }
    }

    /// The turn currently collecting actions, or `None` once every turn has passed.
    pub fn pending(&self) -> Option<NightTurn> {
        NightTurn::ALL.get(self.turn).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.pending().is_none()
    }

    /// The counted action submitted by the given player, if any.
    pub fn action_of(&self, player: PlayerId) -> Option<NightAction> {
        self.submissions
            .iter()
            .find(|s| s.player == player && s.counted)
            .map(|s| s.action)
    }
}

/// Everything that happened during a resolved night.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct NightReport {
    pub night: u32,
    /// Step-by-step account of the resolution, for the moderator.
    pub narrative: Vec<String>,
    /// What is announced to the table in the morning.
    pub summary: Vec<String>,
    pub readings: Vec<HunterReading>,
    /// Players killed during the night, in the order they died.
    pub deaths: Vec<PlayerId>,
}

/// Picks the most common target, breaking ties by whichever was chosen first.
pub fn collective_choice(targets: impl IntoIterator<Item = PlayerId>) -> Option<PlayerId> {
    let mut tally: Vec<(PlayerId, usize)> = vec![];
    for target in targets {
        match tally.iter_mut().find(|(t, _)| *t == target) {
            Some((_, count)) => *count += 1,
            None => tally.push((target, 1)),
        }
    }
    // `max_by_key` keeps the last maximum, so scan from the back
    tally.iter().rev().max_by_key(|(_, count)| *count).map(|(t, _)| *t)
}

impl Game {
    /// Starts a new night, clearing everything left over from the previous cycle.
    pub(crate) fn begin_night(&mut self) {
        self.disabled = PlayerSet::empty();
        self.reported_disabled = PlayerSet::empty();
        let round = NightRound::new(self.night_count + 1);
        log::info!("Night {} begins", round.night);
        self.state = GameState::Night { round };
        self.skip_finished_turns();
    }

    /// Gets the turn currently collecting night actions.
    pub fn pending_turn(&self) -> Option<NightTurn> {
        match &self.state {
            GameState::Night { round } => round.pending(),
            _ => None,
        }
    }

    /// Players who still have to act before the pending turn ends.
    pub fn eligible_actors(&self) -> PlayerSet {
        let GameState::Night { round } = &self.state else {
            return PlayerSet::empty();
        };
        let Some(turn) = round.pending() else {
            return PlayerSet::empty();
        };
        self.eligible_players()
            .within(&self.turn_actors(turn))
            .outside(&round.acted)
            .make()
    }

    /// Gets the players that the given player may choose at night.
    pub fn valid_night_targets(&self, player: PlayerId) -> PlayerSet {
        let Some(role) = self.players.get(player).and_then(|p| p.role) else {
            return PlayerSet::empty();
        };
        match role.kind() {
            RoleKind::Doctor => self.eligible_players().make(),
            RoleKind::OrdinaryMafia | RoleKind::Vampire | RoleKind::Werewolf => {
                self.eligible_players().not_mafia_aligned().make()
            }
            RoleKind::MafiaLeader
            | RoleKind::Hunter
            | RoleKind::Witch
            | RoleKind::Occultist
            | RoleKind::Maniac => self.eligible_players().exclude(player).make(),
            RoleKind::Villager | RoleKind::Ghost | RoleKind::Reborn => PlayerSet::empty(),
        }
    }

    /// Called when a player submits their action for the night.
    pub fn submit_night_action(&mut self, player: PlayerId, action: NightAction) -> Result<(), GameError> {
        self.ensure_running();
        self.check_player_index(player)?;

        let GameState::Night { round } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        let Some(turn) = round.pending() else {
            return Err(GameError::NotYourTurn);
        };
        let actors = self.turn_actors(turn);
        let silent = self.silent_members(turn);
        if !actors.includes(player) && !silent.includes(player) {
            return Err(GameError::NotYourTurn);
        }
        if round.acted.includes(player) {
            return Err(GameError::AlreadyActed);
        }
        self.validate_action(player, action)?;

        // Without a leader, the first mafia member to act decides for the group
        let counted = !silent.includes(player)
            && (turn != NightTurn::Mafia || !round.submissions.iter().any(|s| actors.includes(s.player)));

        let GameState::Night { round } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        round.acted.insert(player);
        round.submissions.push(Submission { player, action, counted });
        log::debug!("{} submitted {:?} (counted: {})", self.players[player].name, action, counted);

        self.skip_finished_turns();
        Ok(())
    }

    /// Players of the given turn whose actions are required.
    fn turn_actors(&self, turn: NightTurn) -> PlayerSet {
        let waking = self.eligible_players().waking_in(turn);
        match turn {
            NightTurn::Mafia if self.leader_alive() => waking.of_kind(RoleKind::MafiaLeader).make(),
            NightTurn::Mafia => waking.of_kind(RoleKind::OrdinaryMafia).make(),
            _ => waking.make(),
        }
    }

    /// Players who may act during the given turn but whose choice is ignored.
    /// While the leader lives, only the leader picks the mafia's target.
    fn silent_members(&self, turn: NightTurn) -> PlayerSet {
        if !self.leader_alive() {
            return PlayerSet::empty();
        }
        match turn {
            NightTurn::Mafia => self.eligible_players().of_kind(RoleKind::OrdinaryMafia).make(),
            NightTurn::Vampire | NightTurn::Werewolf => self.turn_actors(turn),
            _ => PlayerSet::empty(),
        }
    }

    fn leader_alive(&self) -> bool {
        self.players
            .iter()
            .any(|p| p.alive && p.role.map(|r| r.kind()) == Some(RoleKind::MafiaLeader))
    }

    fn validate_action(&self, player: PlayerId, action: NightAction) -> Result<(), GameError> {
        let Some(role) = self.players[player].role else {
            return Err(GameError::NotYourTurn);
        };
        let target = match (role, action) {
            (_, NightAction::Abstain) => return Ok(()),
            (Role::Hunter { charges, .. }, NightAction::Shoot { charge, target }) => {
                if charges.remaining(charge) == 0 {
                    return Err(GameError::ResourceExhausted(charge));
                }
                target
            }
            (Role::Hunter { .. }, NightAction::Check(target)) => target,
            (Role::Hunter { .. }, NightAction::Target(_)) => return Err(GameError::InvalidActionKind),
            (_, NightAction::Target(target)) => target,
            (_, NightAction::Check(_) | NightAction::Shoot { .. }) => {
                return Err(GameError::InvalidActionKind)
            }
        };
        if !self.valid_night_targets(player).includes(target) {
            return Err(GameError::IneligibleTarget);
        }
        Ok(())
    }

    /// Moves past every turn whose actors have all acted.
    fn skip_finished_turns(&mut self) {
        loop {
            let GameState::Night { round } = &self.state else {
                return;
            };
            let Some(turn) = round.pending() else {
                return;
            };
            let actors = self.turn_actors(turn);
            if actors.iter().any(|p| !round.acted.includes(p)) {
                return;
            }
            let GameState::Night { round } = &mut self.state else {
                return;
            };
            round.turn += 1;
            log::debug!("{} turn finished", turn);
        }
    }

    /// Applies every collected action. Must run exactly once per night.
    pub(crate) fn resolve_night(&mut self) -> NightReport {
        let GameState::Night { round } = &self.state else {
            panic!("Invalid game state");
        };
        let round = round.clone();
        self.night_count += 1;

        let mut night = NightLog::default();

        // Mafia target
        let mafia_target = self.mafia_target(&round, &mut night);

        // Doctors
        let mut healed = PlayerSet::empty();
        for doctor in self.eligible_players().of_kind(RoleKind::Doctor).make().iter() {
            match round.action_of(doctor) {
                Some(NightAction::Target(target)) if self.players[target].alive => {
                    healed.insert(target);
                    night.say(format!("Doctor {} protected {}", self.name(doctor), self.name(target)));
                }
                _ => night.say(format!("Doctor {} did not select a target", self.name(doctor))),
            }
        }

        // Hunters
        for hunter in self.eligible_players().of_kind(RoleKind::Hunter).make().iter() {
            match round.action_of(hunter) {
                Some(NightAction::Check(target)) => {
                    let reading = self.read(target);
                    night.say(format!("Hunter {} checked {}: {}", self.name(hunter), self.name(target), reading));
                    night.readings.push(HunterReading { hunter, target, reading });
                }
                Some(NightAction::Shoot { charge, target }) => self.shoot(hunter, charge, target, &mut night),
                _ => night.say(format!("Hunter {} did not act", self.name(hunter))),
            }
        }

        // Witch and occultist
        for kind in [RoleKind::Witch, RoleKind::Occultist] {
            let Some(actor) = self.eligible_players().of_kind(kind).make().iter().next() else {
                continue;
            };
            match round.action_of(actor) {
                Some(NightAction::Target(target)) if self.players[target].alive => {
                    self.disabled.insert(target);
                    night.say(format!("The {} disabled {}", kind, self.name(target)));
                    if kind == RoleKind::Occultist && self.holds(target, RoleKind::Ghost) {
                        self.kill(target, &mut night);
                        night.say(format!("Ghost {} was banished by the Occultist", self.name(target)));
                    }
                }
                _ => night.say(format!("The {} did not select a target", kind)),
            }
        }

        // Maniac
        if let Some(maniac) = self.eligible_players().of_kind(RoleKind::Maniac).make().iter().next() {
            match round.action_of(maniac) {
                Some(NightAction::Target(target)) if self.players[target].alive => {
                    self.kill(target, &mut night);
                    night.say(format!("Maniac {} killed {}", self.name(maniac), self.name(target)));
                }
                _ => night.say("The Maniac did not select a target"),
            }
        }

        // Mafia attack
        if let Some(target) = mafia_target {
            if !self.players[target].alive {
                night.say(format!("{} was already dead when the Mafia arrived", self.name(target)));
            } else if healed.includes(target) {
                night.say(format!("{} was attacked but healed by the Doctor", self.name(target)));
            } else if self.holds(target, RoleKind::Ghost) {
                night.say(format!("Ghost {} cannot be killed by the Mafia", self.name(target)));
            } else {
                self.kill(target, &mut night);
                night.say(format!("{} was killed by the Mafia", self.name(target)));
            }
        }

        let mut summary = self.summarize();
        if night.deaths.is_empty() {
            summary.insert(0, "No one was killed tonight".to_string());
        }

        let mut narrative = night.lines;
        narrative.push("SUMMARY:".to_string());
        narrative.extend(summary.iter().cloned());
        narrative.push("----------------------".to_string());
        self.logbook.push(format!("Night {} Actions:", round.night));
        self.logbook.extend(narrative.iter().cloned());
        log::info!("Night {} resolved with {} death(s)", round.night, night.deaths.len());

        NightReport {
            night: round.night,
            narrative,
            summary,
            readings: night.readings,
            deaths: night.deaths,
        }
    }

    fn mafia_target(&self, round: &NightRound, night: &mut NightLog) -> Option<PlayerId> {
        let leader = self.eligible_players().of_kind(RoleKind::MafiaLeader).make().iter().next();
        if let Some(leader) = leader {
            return match round.action_of(leader) {
                Some(NightAction::Target(target)) if self.players[target].alive => {
                    night.say(format!("The Mafia Leader targeted {}", self.name(target)));
                    Some(target)
                }
                _ => {
                    night.say("The Mafia Leader did not select a target");
                    None
                }
            };
        }

        let members = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let kind = p.role.map(|r| r.kind());
                p.alive
                    && matches!(
                        kind,
                        Some(RoleKind::OrdinaryMafia | RoleKind::Vampire | RoleKind::Werewolf)
                    )
            })
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if members.is_empty() {
            night.say("No Mafia remain to select a target");
            return None;
        }

        let picks = round
            .submissions
            .iter()
            .filter(|s| s.counted && members.contains(&s.player))
            .filter_map(|s| match s.action {
                NightAction::Target(target) if self.players[target].alive => Some(target),
                _ => None,
            });
        match collective_choice(picks) {
            Some(target) => {
                night.say(format!("The Mafia collectively targeted {}", self.name(target)));
                Some(target)
            }
            None => {
                night.say("The Mafia did not select a target");
                None
            }
        }
    }

    fn shoot(&mut self, hunter: PlayerId, charge: ChargeKind, target: PlayerId, night: &mut NightLog) {
        let Some(Role::Hunter { charges, .. }) = &mut self.players[hunter].role else {
            return;
        };
        if !charges.consume(charge) {
            night.say(format!("Hunter {} has no {} charges left", self.name(hunter), charge));
            return;
        }
        let vampire = self.holds(target, RoleKind::Vampire);
        match (charge, vampire) {
            (ChargeKind::Silver, true) | (ChargeKind::Normal, false) => {
                if self.kill(target, night) {
                    night.say(format!(
                        "Hunter {} shot {} with a {} charge",
                        self.name(hunter),
                        self.name(target),
                        charge
                    ));
                } else {
                    night.say(format!("Hunter {} shot at {}, who was already dead", self.name(hunter), self.name(target)));
                }
            }
            (ChargeKind::Silver, false) => {
                night.say(format!("The silver charge had no effect on {}", self.name(target)))
            }
            (ChargeKind::Normal, true) => {
                night.say(format!("The normal charge had no effect on Vampire {}", self.name(target)))
            }
        }
    }

    fn read(&self, target: PlayerId) -> Reading {
        match self.players[target].role {
            Some(Role::MafiaLeader) => Reading::BloodyRed,
            Some(role) if role.is_mafia_aligned() => Reading::Red,
            _ => Reading::Black,
        }
    }

    fn kill(&mut self, target: PlayerId, night: &mut NightLog) -> bool {
        let killed = self.players[target].eliminate();
        if killed {
            night.deaths.push(target);
        }
        killed
    }

    /// Announces every death and disability that has not been announced yet.
    pub(crate) fn summarize(&mut self) -> Vec<String> {
        let mut summary = vec![];
        for (idx, player) in self.players.iter_mut().enumerate() {
            if !player.alive {
                if !player.reported_dead {
                    summary.push(format!("{} was found dead", player.name));
                    player.reported_dead = true;
                }
            } else if self.disabled.includes(idx) && !self.reported_disabled.includes(idx) {
                summary.push(format!("{} is unable to act today", player.name));
                self.reported_disabled.insert(idx);
            }
        }
        summary
    }

    fn holds(&self, player: PlayerId, kind: RoleKind) -> bool {
        self.players[player].role.map(|r| r.kind()) == Some(kind)
    }

    fn name(&self, player: PlayerId) -> &str {
        &self.players[player].name
    }
}

#[derive(Default)]
struct NightLog {
    lines: Vec<String>,
    readings: Vec<HunterReading>,
    deaths: Vec<PlayerId>,
}

impl NightLog {
    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}
