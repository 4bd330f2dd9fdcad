use crate::entities::{Game, Round};

/// Observable copy of a game room's state, published to subscribers after every
/// session command that changes something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub game: Game,
    pub round: Option<Round>,
    pub completed_rounds: Vec<Round>,
    pub guess_word: String,
    pub phrase: String,
    pub is_guess_valid: bool,
    pub is_phrase_valid: bool,
    pub selected_favorite_id: Option<String>,
    pub selected_least_id: Option<String>,
    pub vote_submitted: bool,
    pub error_message: Option<String>,
    pub is_refreshing: bool,
    pub is_submitting: bool,
}

impl RoomSnapshot {
    /// Id of the in-progress round, if any
    #[must_use]
    pub fn round_id(&self) -> Option<&str> {
        self.round.as_ref().map(|round| round.id.as_str())
    }
}
