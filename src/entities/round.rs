use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RoundStage, RoundStatus};

/// Player ids with this prefix belong to server-controlled players.
pub const VIRTUAL_PLAYER_ID_PREFIX: &str = "virtual-";

/// Per-letter feedback symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Right letter, right position
    Correct,
    /// Letter occurs elsewhere in the goal word
    Present,
    /// Letter is not (or no longer) available in the goal word
    Absent,
}

impl Mark {
    /// Single-character symbol used in compact renderings
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '.',
        }
    }
}

/// A round payload as returned by `GET /games/{id}/rounds/{roundId}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    pub number: u32,
    pub status: RoundStatus,
    #[serde(default)]
    pub stage: RoundStage,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub phrase_vote_count: u32,
    /// Set once the server has recorded the viewer's vote
    #[serde(default)]
    pub viewer_favorite_submission_id: Option<String>,
    #[serde(default)]
    pub viewer_least_favorite_submission_id: Option<String>,
}

impl Round {
    /// The viewer's own submission, if any
    #[must_use]
    pub fn submission_by(&self, player_id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.player_id == player_id)
    }

    /// Both vote ids the server has confirmed for the viewer
    #[must_use]
    pub fn confirmed_votes(&self) -> Option<(&str, &str)> {
        self.viewer_favorite_submission_id
            .as_deref()
            .zip(self.viewer_least_favorite_submission_id.as_deref())
    }
}

/// Goal/guess/marks payload attached to a submission after reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFeedback {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub guess: Option<String>,
    #[serde(default)]
    pub marks: Vec<Mark>,
}

/// One player's entry in a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub guess_word: Option<String>,
    #[serde(default)]
    pub phrase: Option<String>,
    pub player_id: String,
    pub player_name: String,
    #[serde(default)]
    pub player_is_virtual: Option<bool>,
    #[serde(default)]
    pub marks: Option<Vec<Mark>>,
    #[serde(default)]
    pub correct_guess: Option<bool>,
    /// `None` until the owner has submitted
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feedback: Option<SubmissionFeedback>,
    #[serde(default)]
    pub score_delta: Option<i32>,
    #[serde(default)]
    pub voted: Option<bool>,
}

impl Submission {
    /// Whether the owner has submitted yet
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.created_at.is_some()
    }

    /// Virtual flag from the server, or the id prefix when the server omits it
    #[must_use]
    pub fn is_virtual_player(&self) -> bool {
        self.player_is_virtual
            .unwrap_or_else(|| self.player_id.starts_with(VIRTUAL_PLAYER_ID_PREFIX))
    }

    /// Trimmed phrase, `None` when missing or blank
    #[must_use]
    pub fn trimmed_phrase(&self) -> Option<&str> {
        self.phrase
            .as_deref()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
    }

    /// Whether the submission guessed the goal word
    #[must_use]
    pub fn guessed_correctly(&self) -> bool {
        self.correct_guess == Some(true)
    }
}
