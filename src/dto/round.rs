use serde::{Deserialize, Serialize};

// ============ Request DTOs ============

/// POST /games/:id/rounds/:roundId/submissions - Submit a guess and phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGuessRequest {
    /// Trimmed, lowercased guess word
    pub guess_word: String,
    /// Trimmed phrase containing every letter of the guess
    pub phrase: String,
}

/// POST /games/:id/rounds/:roundId/votes - Cast phrase votes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVotesRequest {
    pub favorite_submission_id: String,
    pub least_favorite_submission_id: String,
}
