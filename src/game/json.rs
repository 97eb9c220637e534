use super::player::PlayerId;
use super::Game;
use serde_json::{json, Value};

impl Game {
    /// A snapshot for the shared table display. Roles stay hidden until the game is over.
    pub fn get_board_json(&self) -> Value {
        json!({
            "phase": self.phase(),
            "night": self.night_count,
            "alive": self.num_players_alive(),
            "pending": self.pending_turn(),
            "players": self.get_players_json(None),
            "verdict": self.verdict(),
            "summary": self.last_night.as_ref().map(|report| &report.summary),
        })
    }

    /// A snapshot for a single player's private display.
    pub fn get_player_json(&self, player: PlayerId) -> Option<Value> {
        let entry = self.roster_view().into_iter().nth(player)?;
        Some(json!({
            "id": entry.id,
            "name": entry.name,
            "role": entry.label,
            "charges": entry.charges,
            "isDead": !entry.alive,
            "isDisabled": entry.disabled,
            "canAct": self.eligible_actors().includes(player),
            "canVote": self.eligible_voters().includes(player),
            "hasWon": self.player_has_won(player),
            "players": self.get_players_json(Some(player)),
        }))
    }

    fn get_players_json(&self, viewer: Option<PlayerId>) -> Value {
        self.roster_view()
            .into_iter()
            .map(|entry| {
                let view_role = match viewer {
                    Some(viewer) => self.can_view_role(viewer, entry.id),
                    None => self.game_over(),
                };
                json!({
                    "id": entry.id,
                    "name": entry.name,
                    "isDead": !entry.alive,
                    "isDisabled": entry.disabled,
                    "votes": self.votes_for(entry.id),
                    "role": view_role.then_some(entry.label).flatten(),
                })
            })
            .collect()
    }

    /// Players see their own role, the mafia see each other, and everyone sees everything at the end.
    fn can_view_role(&self, viewer: PlayerId, other: PlayerId) -> bool {
        viewer == other
            || self.game_over()
            || (self.players[viewer].is_mafia_aligned() && self.players[other].is_mafia_aligned())
    }
}
