use super::night::NightTurn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of roles a player can be dealt.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    MafiaLeader,
    OrdinaryMafia,
    Vampire,
    Werewolf,
    Villager,
    Doctor,
    Hunter,
    Witch,
    Occultist,
    Ghost,
    Maniac,
    Reborn,
}

impl RoleKind {
    pub const ALL: [RoleKind; 12] = [
        RoleKind::MafiaLeader,
        RoleKind::OrdinaryMafia,
        RoleKind::Vampire,
        RoleKind::Werewolf,
        RoleKind::Villager,
        RoleKind::Doctor,
        RoleKind::Hunter,
        RoleKind::Witch,
        RoleKind::Occultist,
        RoleKind::Ghost,
        RoleKind::Maniac,
        RoleKind::Reborn,
    ];

    /// The night turn during which players of this kind act, if they act at all.
    pub fn night_turn(self) -> Option<NightTurn> {
        match self {
            RoleKind::MafiaLeader | RoleKind::OrdinaryMafia => Some(NightTurn::Mafia),
            RoleKind::Vampire => Some(NightTurn::Vampire),
            RoleKind::Werewolf => Some(NightTurn::Werewolf),
            RoleKind::Maniac => Some(NightTurn::Maniac),
            RoleKind::Hunter => Some(NightTurn::Hunter),
            RoleKind::Witch => Some(NightTurn::Witch),
            RoleKind::Occultist => Some(NightTurn::Occultist),
            RoleKind::Doctor => Some(NightTurn::Doctor),
            RoleKind::Villager | RoleKind::Ghost | RoleKind::Reborn => None,
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoleKind::MafiaLeader => "Mafia Leader",
            RoleKind::OrdinaryMafia => "Mafia",
            RoleKind::Vampire => "Vampire",
            RoleKind::Werewolf => "Werewolf",
            RoleKind::Villager => "Villager",
            RoleKind::Doctor => "Doctor",
            RoleKind::Hunter => "Hunter",
            RoleKind::Witch => "Witch",
            RoleKind::Occultist => "Occultist",
            RoleKind::Ghost => "Ghost",
            RoleKind::Maniac => "Maniac",
            RoleKind::Reborn => "Reborn",
        })
    }
}

/// The faction a role counts towards when checking for victory.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Alignment {
    Mafia,
    Independent,
    Village,
}

/// What a reborn player returns as.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum RebornForm {
    Hunter,
    Werewolf,
}

/// The two kinds of hunter ammunition.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    Normal,
    Silver,
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChargeKind::Normal => "normal",
            ChargeKind::Silver => "silver",
        })
    }
}

/// A hunter's remaining ammunition.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Charges {
    pub normal: u8,
    pub silver: u8,
}

impl Charges {
    pub fn remaining(&self, kind: ChargeKind) -> u8 {
        match kind {
            ChargeKind::Normal => self.normal,
            ChargeKind::Silver => self.silver,
        }
    }

    /// Uses up one charge of the given kind, returning `false` if none were left.
    pub fn consume(&mut self, kind: ChargeKind) -> bool {
        let count = match kind {
            ChargeKind::Normal => &mut self.normal,
            ChargeKind::Silver => &mut self.silver,
        };
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }
}

/// A role held by a player. Only the hunter carries mutable state.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    MafiaLeader,
    OrdinaryMafia,
    Vampire,
    Werewolf { reborn: bool },
    Villager,
    Doctor,
    Hunter { charges: Charges, reborn: bool },
    Witch,
    Occultist,
    Ghost,
    Maniac,
}

impl Role {
    /// Creates a freshly dealt role of the given kind.
    /// Returns `None` for the reborn, which must pick a form first.
    pub fn new(kind: RoleKind, charges: Charges) -> Option<Self> {
        Some(match kind {
            RoleKind::MafiaLeader => Role::MafiaLeader,
            RoleKind::OrdinaryMafia => Role::OrdinaryMafia,
            RoleKind::Vampire => Role::Vampire,
            RoleKind::Werewolf => Role::Werewolf { reborn: false },
            RoleKind::Villager => Role::Villager,
            RoleKind::Doctor => Role::Doctor,
            RoleKind::Hunter => Role::Hunter { charges, reborn: false },
            RoleKind::Witch => Role::Witch,
            RoleKind::Occultist => Role::Occultist,
            RoleKind::Ghost => Role::Ghost,
            RoleKind::Maniac => Role::Maniac,
            RoleKind::Reborn => return None,
        })
    }

    pub fn reborn(form: RebornForm, charges: Charges) -> Self {
        match form {
            RebornForm::Hunter => Role::Hunter { charges, reborn: true },
            RebornForm::Werewolf => Role::Werewolf { reborn: true },
        }
    }

    /// The kind this role behaves as during play.
    pub fn kind(&self) -> RoleKind {
        match self {
            Role::MafiaLeader => RoleKind::MafiaLeader,
            Role::OrdinaryMafia => RoleKind::OrdinaryMafia,
            Role::Vampire => RoleKind::Vampire,
            Role::Werewolf { .. } => RoleKind::Werewolf,
            Role::Villager => RoleKind::Villager,
            Role::Doctor => RoleKind::Doctor,
            Role::Hunter { .. } => RoleKind::Hunter,
            Role::Witch => RoleKind::Witch,
            Role::Occultist => RoleKind::Occultist,
            Role::Ghost => RoleKind::Ghost,
            Role::Maniac => RoleKind::Maniac,
        }
    }

    /// The kind whose cap this role counts against.
    pub fn slot(&self) -> RoleKind {
        match self {
            Role::Werewolf { reborn: true } | Role::Hunter { reborn: true, .. } => RoleKind::Reborn,
            other => other.kind(),
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            Role::MafiaLeader
            | Role::OrdinaryMafia
            | Role::Vampire
            | Role::Werewolf { .. }
            | Role::Witch
            | Role::Occultist => Alignment::Mafia,
            Role::Maniac => Alignment::Independent,
            Role::Villager | Role::Doctor | Role::Hunter { .. } | Role::Ghost => Alignment::Village,
        }
    }

    pub fn is_mafia_aligned(&self) -> bool {
        self.alignment() == Alignment::Mafia
    }

    /// The label shown to the moderator, e.g. "Reborn (Hunter)".
    pub fn label(&self) -> String {
        match self {
            Role::Werewolf { reborn: true } | Role::Hunter { reborn: true, .. } => {
                format!("Reborn ({})", self.kind())
            }
            other => other.kind().to_string(),
        }
    }
}

/// The maximum number of players that may be dealt each role.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct RoleCaps {
    pub mafia_leader: usize,
    pub vampire: usize,
    pub werewolf: usize,
    pub ordinary_mafia: usize,
    pub villager: usize,
    pub doctor: usize,
    pub hunter: usize,
    pub witch: usize,
    pub occultist: usize,
    pub ghost: usize,
    pub maniac: usize,
    pub reborn: usize,
}

impl Default for RoleCaps {
    fn default() -> Self {
        Self {
            mafia_leader: 1,
            vampire: 2,
            werewolf: 2,
            ordinary_mafia: 1,
            villager: 7,
            doctor: 2,
            hunter: 2,
            witch: 1,
            occultist: 1,
            ghost: 1,
            maniac: 1,
            reborn: 1,
        }
    }
}

impl RoleCaps {
    pub fn cap(&self, kind: RoleKind) -> usize {
        match kind {
            RoleKind::MafiaLeader => self.mafia_leader,
            RoleKind::OrdinaryMafia => self.ordinary_mafia,
            RoleKind::Vampire => self.vampire,
            RoleKind::Werewolf => self.werewolf,
            RoleKind::Villager => self.villager,
            RoleKind::Doctor => self.doctor,
            RoleKind::Hunter => self.hunter,
            RoleKind::Witch => self.witch,
            RoleKind::Occultist => self.occultist,
            RoleKind::Ghost => self.ghost,
            RoleKind::Maniac => self.maniac,
            RoleKind::Reborn => self.reborn,
        }
    }

    /// The number of seats these caps can fill.
    pub fn total(&self) -> usize {
        RoleKind::ALL.iter().map(|kind| self.cap(*kind)).sum()
    }
}
