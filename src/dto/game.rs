use serde::{Deserialize, Serialize};

use crate::entities::GameStatus;

// ============ Request DTOs ============

/// PATCH /games/:id - Change game status (host only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGameStatusRequest {
    pub status: GameStatus,
}

/// POST /words/validate - Check a candidate guess word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateWordRequest {
    pub word: String,
}

/// What a user report is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Player,
    Phrase,
}

/// POST /games/:id/reports - Report a player or offensive phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub kind: ReportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_player_id: Option<String>,
    #[serde(default)]
    pub submission_ids: Vec<String>,
    pub description: String,
}

// ============ Response DTOs ============

/// Word validity verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateWordResponse {
    pub valid: bool,
}
