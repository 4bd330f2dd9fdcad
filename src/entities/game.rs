use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameStatus, InvitedPlayer, Participant, RoundStatus};

/// A game snapshot as returned by `GET /games/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub status: GameStatus,
    pub join_code: String,
    pub goal_length: usize,
    /// Set while a round is in progress, `None` between rounds
    #[serde(default)]
    pub current_round_id: Option<String>,
    #[serde(default)]
    pub current_round_number: Option<u32>,
    #[serde(default)]
    pub players_count: usize,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// `None` means the server left the list out, not that it is empty
    #[serde(default)]
    pub invited_players: Option<Vec<InvitedPlayer>>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub winner_names: Vec<String>,
    #[serde(default)]
    pub winning_round_number: Option<u32>,
    #[serde(default)]
    pub rounds: Vec<RoundSummary>,
}

/// Per-round entry embedded in a game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub id: String,
    pub number: u32,
    pub status: RoundStatus,
}

impl Game {
    /// Combine a freshly fetched snapshot with the one held before it.
    ///
    /// An omitted invited-players list keeps the previous one; an explicit
    /// list, even an empty one, replaces it.
    #[must_use]
    pub fn merged_with(mut self, previous: &Self) -> Self {
        if self.invited_players.is_none() {
            self.invited_players.clone_from(&previous.invited_players);
        }
        self
    }

    /// Find the participant for a player id
    #[must_use]
    pub fn participant(&self, player_id: &str) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|participant| participant.player_id() == player_id)
    }

    /// Current score of a player, 0 when they are not a participant
    #[must_use]
    pub fn score_for(&self, player_id: &str) -> i32 {
        self.participant(player_id)
            .map_or(0, |participant| participant.score)
    }

    /// Summaries of every round the server reports as closed
    pub fn closed_rounds(&self) -> impl Iterator<Item = &RoundSummary> {
        self.rounds.iter().filter(|round| round.status.is_closed())
    }
}
