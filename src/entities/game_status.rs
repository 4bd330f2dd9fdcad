use serde::{Deserialize, Serialize};
use std::fmt;

/// Game lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Game is in the lobby, waiting for the host to start
    #[default]
    Waiting,
    /// Rounds are being played
    Active,
    /// Game has ended; all round data is final
    Completed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GameStatus {
    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Check if the host can start the game
    #[must_use]
    pub const fn can_start(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Check if the game has finished
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Coarse round status as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Players are submitting guesses and phrases
    #[default]
    Open,
    /// Players are voting on phrases
    Voting,
    /// Round is over
    Closed,
    /// Any status this client does not know about
    #[serde(other)]
    Other,
}

impl RoundStatus {
    /// Check if the round has left the in-progress state
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Fine-grained round stage used for UI sequencing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundStage {
    #[default]
    WaitingSubmissions,
    Voting,
    Reveal,
    #[serde(other)]
    Other,
}

/// A participant's role within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Host,
    #[default]
    Player,
}
