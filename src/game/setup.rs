use super::player::PlayerId;
use super::role::{RebornForm, Role, RoleKind};
use super::{Game, GameState};
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A role as chosen by the moderator, including the reborn's choice of form.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Role(RoleKind),
    Reborn(RebornForm),
}

impl Seat {
    /// The kind whose cap this seat counts against.
    pub fn slot(self) -> RoleKind {
        match self {
            Seat::Role(kind) => kind,
            Seat::Reborn(_) => RoleKind::Reborn,
        }
    }
}

/// Ready-made tables for quickly starting a game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Five players: a lone mafia leader against a witch, doctor and hunter.
    Small,
    /// Every role at its default cap: twenty-two players. Classic 23-seat
    /// tables seat a second ordinary mafia, which needs raised caps and
    /// manual assignment.
    Big,
}

impl Preset {
    pub fn seats(self) -> Vec<Seat> {
        use RoleKind::*;
        let kinds: &[(RoleKind, usize)] = match self {
            Preset::Small => &[(MafiaLeader, 1), (Villager, 1), (Witch, 1), (Doctor, 1), (Hunter, 1)],
            Preset::Big => &[
                (MafiaLeader, 1),
                (Vampire, 2),
                (Werewolf, 2),
                (OrdinaryMafia, 1),
                (Villager, 7),
                (Doctor, 2),
                (Hunter, 2),
                (Witch, 1),
                (Occultist, 1),
                (Ghost, 1),
                (Maniac, 1),
            ],
        };
        let mut seats = kinds
            .iter()
            .flat_map(|(kind, count)| std::iter::repeat(Seat::Role(*kind)).take(*count))
            .collect::<Vec<_>>();
        if self == Preset::Big {
            seats.push(Seat::Reborn(RebornForm::Hunter));
        }
        seats
    }
}

impl Game {
    /// Assigns a role to a player during role assignment.
    pub fn assign_role(&mut self, player: PlayerId, kind: RoleKind) -> Result<(), GameError> {
        if kind == RoleKind::Reborn {
            return Err(GameError::RebornFormRequired);
        }
        self.assign(player, Seat::Role(kind))
    }

    /// Assigns the reborn role to a player, who returns in the given form.
    pub fn assign_reborn(&mut self, player: PlayerId, form: RebornForm) -> Result<(), GameError> {
        self.assign(player, Seat::Reborn(form))
    }

    /// Takes a player's role away again during role assignment.
    pub fn unassign_role(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_running();
        self.check_player_index(player)?;
        self.check_assigning()?;
        self.players[player].role = None;
        Ok(())
    }

    /// Replaces every assignment with the given preset table.
    pub fn apply_preset(&mut self, preset: Preset) -> Result<(), GameError> {
        self.ensure_running();
        self.check_assigning()?;
        let seats = preset.seats();
        if seats.len() != self.num_players() {
            return Err(GameError::InvalidGameOptions);
        }
        // Every seat must fit before anything is cleared
        for slot in RoleKind::ALL {
            let wanted = seats.iter().filter(|seat| seat.slot() == slot).count();
            if wanted > self.opts.caps.cap(slot) {
                return Err(GameError::RoleCapacityExceeded(slot));
            }
        }
        for player in self.players.iter_mut() {
            player.role = None;
        }
        for (player, seat) in seats.into_iter().enumerate() {
            self.assign(player, seat)?;
        }
        Ok(())
    }

    /// Deals a random role to every player who does not have one yet,
    /// respecting the remaining capacity of each role.
    pub fn deal_remaining_roles(&mut self) -> Result<(), GameError> {
        self.ensure_running();
        self.check_assigning()?;
        for player in 0..self.num_players() {
            if self.players[player].role.is_some() {
                continue;
            }
            let pool = RoleKind::ALL
                .iter()
                .flat_map(|kind| std::iter::repeat(*kind).take(self.remaining_capacity(*kind)))
                .collect::<Vec<_>>();
            let Some(kind) = pool.choose(&mut self.rng).copied() else {
                return Err(GameError::InvalidGameOptions);
            };
            let seat = match kind {
                RoleKind::Reborn if self.rng.gen_bool(0.5) => Seat::Reborn(RebornForm::Hunter),
                RoleKind::Reborn => Seat::Reborn(RebornForm::Werewolf),
                kind => Seat::Role(kind),
            };
            self.assign(player, seat)?;
        }
        Ok(())
    }

    /// How many more players may be dealt the given role.
    pub fn remaining_capacity(&self, slot: RoleKind) -> usize {
        let used = self
            .players
            .iter()
            .filter(|p| p.role.map(|r| r.slot()) == Some(slot))
            .count();
        self.opts.caps.cap(slot).saturating_sub(used)
    }

    fn assign(&mut self, player: PlayerId, seat: Seat) -> Result<(), GameError> {
        self.ensure_running();
        self.check_player_index(player)?;
        self.check_assigning()?;
        if self.players[player].role.is_some() {
            return Err(GameError::RoleAlreadyAssigned);
        }

        let charges = self.opts.hunter_charges();
        let slot = seat.slot();
        let role = match seat {
            Seat::Role(kind) => Role::new(kind, charges).ok_or(GameError::RebornFormRequired)?,
            Seat::Reborn(form) => Role::reborn(form, charges),
        };
        if self.remaining_capacity(slot) == 0 {
            return Err(GameError::RoleCapacityExceeded(slot));
        }

        log::debug!("{} is the {}", self.players[player].name, role.label());
        self.players[player].role = Some(role);
        Ok(())
    }

    fn check_assigning(&self) -> Result<(), GameError> {
        match self.state {
            GameState::RoleAssignment => Ok(()),
            _ => Err(GameError::InvalidAction),
        }
    }
}
