use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParticipantRole;

/// Player identity shared across games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Stable identity assigned by the platform the player signed in with
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub is_virtual: bool,
}

/// A player's membership in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub role: ParticipantRole,
    #[serde(default)]
    pub score: i32,
    pub joined_at: DateTime<Utc>,
    pub player: Player,
}

impl Participant {
    /// The participant's player id
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player.id
    }
}

/// A pending or resolved invitation to a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitedPlayer {
    pub player_id: String,
    pub display_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub status: String,
    #[serde(default)]
    pub accepted: bool,
}
