//! Client-side game room state and its reconciliation against server snapshots.
//!
//! [`GameRoomModel`] owns the held game/round snapshots, the completed-round
//! cache and the viewer's drafts. Every mutation goes through one of its
//! operations; the session actor in [`crate::sessions`] is the only intended
//! owner, so no two operations ever interleave.
//!
//! Remote failures never escape the async operations: they land in
//! `error_message`. Only the report submissions return errors to the caller.

use std::sync::Arc;

use crate::api::{FetchOptions, GameApi};
use crate::dto::{SubmitGuessRequest, SubmitVotesRequest, UpdateGameStatusRequest};
use crate::entities::{Game, GameStatus, Round, RoundStage, RoundStatus, Submission};
use crate::errors::ClientError;
use crate::services::ordering;
use crate::services::report::{self, ReportablePhrase};
use crate::state::RoomSnapshot;
use crate::utils::{char_len, normalize_guess, phrase_contains_letters};

const MISSING_VOTES_MESSAGE: &str = "Pick a favorite and a least favorite phrase.";
const SAME_VOTES_MESSAGE: &str = "Your favorite and least favorite must be different phrases.";

/// Whether an operation respects the refresh busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Skip silently when a refresh is already running
    Gated,
    /// Run regardless; used right after a successful submit
    Ungated,
}

/// Reconciled state of one game as seen by one player.
pub struct GameRoomModel {
    api: Arc<dyn GameApi>,
    viewer_id: String,

    game: Game,
    round: Option<Round>,
    completed_rounds: Vec<Round>,

    guess_word: String,
    phrase: String,
    is_guess_valid: bool,
    is_phrase_valid: bool,
    /// Last remotely checked guess and the server's verdict for it
    last_validation: Option<(String, bool)>,
    last_round_id: Option<String>,

    selected_favorite_id: Option<String>,
    selected_least_id: Option<String>,
    vote_submitted: bool,

    error_message: Option<String>,
    is_refreshing: bool,
    is_submitting: bool,
}

impl std::fmt::Debug for GameRoomModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRoomModel")
            .field("viewer_id", &self.viewer_id)
            .field("game_id", &self.game.id)
            .field("round_id", &self.round.as_ref().map(|r| &r.id))
            .field("completed_rounds", &self.completed_rounds.len())
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}

impl GameRoomModel {
    /// Start from a game snapshot the caller already holds.
    #[must_use]
    pub fn new(api: Arc<dyn GameApi>, game: Game, viewer_id: impl Into<String>) -> Self {
        Self {
            api,
            viewer_id: viewer_id.into(),
            game,
            round: None,
            completed_rounds: Vec::new(),
            guess_word: String::new(),
            phrase: String::new(),
            is_guess_valid: false,
            is_phrase_valid: false,
            last_validation: None,
            last_round_id: None,
            selected_favorite_id: None,
            selected_least_id: None,
            vote_submitted: false,
            error_message: None,
            is_refreshing: false,
            is_submitting: false,
        }
    }

    /// Fetch the game and start from it.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; there is no state yet to surface it in.
    pub async fn load(
        api: Arc<dyn GameApi>,
        game_id: &str,
        viewer_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let game = api.fetch_game(game_id).await?;
        Ok(Self::new(api, game, viewer_id))
    }

    // ============ Accessors ============

    #[must_use]
    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// The in-progress round, `None` between rounds
    #[must_use]
    pub const fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Closed rounds, ascending by number
    #[must_use]
    pub fn completed_rounds(&self) -> &[Round] {
        &self.completed_rounds
    }

    #[must_use]
    pub fn guess_word(&self) -> &str {
        &self.guess_word
    }

    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub const fn is_guess_valid(&self) -> bool {
        self.is_guess_valid
    }

    #[must_use]
    pub const fn is_phrase_valid(&self) -> bool {
        self.is_phrase_valid
    }

    #[must_use]
    pub fn last_validated_guess(&self) -> Option<&str> {
        self.last_validation.as_ref().map(|(word, _)| word.as_str())
    }

    #[must_use]
    pub fn last_round_id(&self) -> Option<&str> {
        self.last_round_id.as_deref()
    }

    #[must_use]
    pub fn selected_favorite_id(&self) -> Option<&str> {
        self.selected_favorite_id.as_deref()
    }

    #[must_use]
    pub fn selected_least_id(&self) -> Option<&str> {
        self.selected_least_id.as_deref()
    }

    #[must_use]
    pub const fn vote_submitted(&self) -> bool {
        self.vote_submitted
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Copy of everything an observer can see.
    #[must_use]
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            game: self.game.clone(),
            round: self.round.clone(),
            completed_rounds: self.completed_rounds.clone(),
            guess_word: self.guess_word.clone(),
            phrase: self.phrase.clone(),
            is_guess_valid: self.is_guess_valid,
            is_phrase_valid: self.is_phrase_valid,
            selected_favorite_id: self.selected_favorite_id.clone(),
            selected_least_id: self.selected_least_id.clone(),
            vote_submitted: self.vote_submitted,
            error_message: self.error_message.clone(),
            is_refreshing: self.is_refreshing,
            is_submitting: self.is_submitting,
        }
    }

    // ============ Draft input ============

    /// Replace the draft guess word.
    ///
    /// The word counts as invalid until `validate_guess_word` runs for it;
    /// phrase validity is recomputed against the new word right away.
    pub fn set_guess_word(&mut self, word: impl Into<String>) {
        self.guess_word = word.into();
        self.is_guess_valid = false;
        self.validate_phrase();
    }

    /// Replace the draft phrase and recompute its validity.
    pub fn set_phrase(&mut self, phrase: impl Into<String>) {
        self.phrase = phrase.into();
        self.validate_phrase();
    }

    pub fn select_favorite(&mut self, submission_id: Option<String>) {
        self.selected_favorite_id = submission_id;
    }

    pub fn select_least(&mut self, submission_id: Option<String>) {
        self.selected_least_id = submission_id;
    }

    /// Set the guess word and validate it, as on every keystroke.
    pub async fn update_guess_word(&mut self, word: impl Into<String>) {
        self.set_guess_word(word);
        self.validate_guess_word().await;
    }

    // ============ Validation ============

    /// Validate the draft guess word, hitting the server at most once per candidate.
    pub async fn validate_guess_word(&mut self) {
        let candidate = normalize_guess(&self.guess_word);

        if char_len(&candidate) != self.game.goal_length {
            self.is_guess_valid = false;
            self.validate_phrase();
            return;
        }

        if let Some((word, verdict)) = &self.last_validation
            && *word == candidate
        {
            self.is_guess_valid = *verdict;
            self.validate_phrase();
            return;
        }

        match self.api.validate_word(&candidate).await {
            Ok(valid) => {
                tracing::debug!(word = %candidate, valid, "Guess word checked");
                self.is_guess_valid = valid;
                self.last_validation = Some((candidate, valid));
            }
            Err(err) => {
                self.is_guess_valid = false;
                self.surface_error(&err);
            }
        }
        self.validate_phrase();
    }

    /// Recompute phrase validity against the current draft guess.
    pub fn validate_phrase(&mut self) {
        self.is_phrase_valid = phrase_contains_letters(&self.guess_word, &self.phrase);
    }

    // ============ Refresh ============

    /// Fetch the latest game and round and reconcile local state.
    ///
    /// Does nothing if a refresh is already running.
    pub async fn refresh_round(&mut self) {
        self.refresh_round_with(RefreshMode::Gated).await;
    }

    /// Refresh with an explicit gating mode.
    pub async fn refresh_round_with(&mut self, mode: RefreshMode) {
        if mode == RefreshMode::Gated && self.is_refreshing {
            tracing::debug!(game_id = %self.game.id, "Refresh already in flight, skipping");
            return;
        }

        let was_refreshing = self.is_refreshing;
        self.is_refreshing = true;
        let result = self.reconcile().await;
        self.is_refreshing = was_refreshing;

        match result {
            Ok(()) => self.clear_error(),
            Err(err) => {
                tracing::warn!(game_id = %self.game.id, error = %err, "Round refresh failed");
                self.surface_error(&err);
            }
        }
    }

    async fn reconcile(&mut self) -> Result<(), ClientError> {
        let fetched = self.api.fetch_game(&self.game.id).await?;
        self.apply_game(fetched);

        self.sync_completed_rounds().await?;

        let Some(round_id) = self.game.current_round_id.clone() else {
            self.clear_current_round();
            return Ok(());
        };

        let round = self
            .api
            .fetch_round(&self.game.id, &round_id, FetchOptions::default())
            .await?;

        if round.status.is_closed() {
            tracing::info!(game_id = %self.game.id, round_id = %round.id, number = round.number, "Round closed");
            if !self.completed_rounds.iter().any(|r| r.id == round.id) {
                self.completed_rounds.push(round);
                self.sort_completed_rounds();
            }
            self.clear_current_round();
            return Ok(());
        }

        if self.round.as_ref() != Some(&round) {
            self.round = Some(round);
        }
        self.reset_for_round(Some(&round_id));
        self.sync_vote_state();
        Ok(())
    }

    /// Adopt a game snapshot if it differs from the held one.
    fn apply_game(&mut self, fetched: Game) {
        let merged = fetched.merged_with(&self.game);
        if merged != self.game {
            tracing::debug!(game_id = %merged.id, status = %merged.status, "Game snapshot changed");
            self.game = merged;
        }
    }

    /// Fill the completed-round cache from the game's closed round summaries.
    ///
    /// A completed game re-fetches every closed round so final marks and
    /// scores are picked up once the server has settled them.
    async fn sync_completed_rounds(&mut self) -> Result<(), ClientError> {
        let force = self.game.status.is_completed();
        let pending: Vec<String> = self
            .game
            .closed_rounds()
            .filter(|summary| force || !self.completed_rounds.iter().any(|r| r.id == summary.id))
            .map(|summary| summary.id.clone())
            .collect();

        for round_id in pending {
            let round = self
                .api
                .fetch_round(&self.game.id, &round_id, FetchOptions::background(force))
                .await?;
            self.upsert_completed(round);
        }
        Ok(())
    }

    fn upsert_completed(&mut self, round: Round) {
        match self.completed_rounds.iter_mut().find(|r| r.id == round.id) {
            Some(existing) if *existing == round => return,
            Some(existing) => *existing = round,
            None => self.completed_rounds.push(round),
        }
        self.sort_completed_rounds();
    }

    fn sort_completed_rounds(&mut self) {
        self.completed_rounds.sort_by_key(|round| round.number);
    }

    fn clear_current_round(&mut self) {
        self.round = None;
        self.reset_for_round(None);
    }

    /// Drop drafts and selections when the effective round changes.
    fn reset_for_round(&mut self, round_id: Option<&str>) {
        if self.last_round_id.as_deref() == round_id {
            return;
        }

        tracing::debug!(
            from = ?self.last_round_id,
            to = ?round_id,
            "Round changed, resetting drafts"
        );
        self.last_round_id = round_id.map(str::to_string);
        self.selected_favorite_id = None;
        self.selected_least_id = None;
        self.vote_submitted = false;
        self.clear_drafts();
    }

    fn clear_drafts(&mut self) {
        self.guess_word.clear();
        self.phrase.clear();
        self.is_guess_valid = false;
        self.is_phrase_valid = false;
        self.last_validation = None;
    }

    /// Move `vote_submitted` forward from server state; never backwards.
    fn sync_vote_state(&mut self) {
        let Some(round) = &self.round else {
            return;
        };

        if round.status == RoundStatus::Voting
            && round.stage != RoundStage::Voting
            && !self.vote_submitted
        {
            tracing::debug!(round_id = %round.id, "Server moved viewer past voting");
            self.vote_submitted = true;
        }

        if let Some((favorite, least)) = round.confirmed_votes() {
            if self.selected_favorite_id.as_deref() != Some(favorite) {
                self.selected_favorite_id = Some(favorite.to_string());
            }
            if self.selected_least_id.as_deref() != Some(least) {
                self.selected_least_id = Some(least.to_string());
            }
            self.vote_submitted = true;
        }
    }

    // ============ Submissions ============

    /// Submit the draft guess and phrase for the current round.
    ///
    /// Needs a current round and both drafts valid; ignored while another
    /// submission is in flight.
    pub async fn submit_guess(&mut self) {
        if self.is_submitting {
            tracing::debug!("Submission already in flight, skipping guess");
            return;
        }
        let Some(round_id) = self.round.as_ref().map(|round| round.id.clone()) else {
            return;
        };
        if !(self.is_guess_valid && self.is_phrase_valid) {
            return;
        }

        let request = SubmitGuessRequest {
            guess_word: normalize_guess(&self.guess_word),
            phrase: self.phrase.trim().to_string(),
        };

        self.is_submitting = true;
        match self
            .api
            .submit_guess(&self.game.id, &round_id, &request)
            .await
        {
            Ok(submission) => {
                tracing::info!(
                    game_id = %self.game.id,
                    round_id = %round_id,
                    submission_id = %submission.id,
                    "Guess submitted"
                );
                self.clear_drafts();
                self.clear_error();
                self.refresh_round_with(RefreshMode::Ungated).await;
            }
            Err(err) => {
                tracing::warn!(round_id = %round_id, error = %err, "Guess submission failed");
                self.surface_error(&err);
            }
        }
        self.is_submitting = false;
    }

    /// Cast the selected favorite and least-favorite votes.
    pub async fn submit_votes(&mut self) {
        if self.is_submitting {
            tracing::debug!("Submission already in flight, skipping votes");
            return;
        }
        let Some(round_id) = self.round.as_ref().map(|round| round.id.clone()) else {
            return;
        };

        let request = match self.vote_request() {
            Ok(request) => request,
            Err(err) => {
                self.surface_error(&err);
                return;
            }
        };

        self.is_submitting = true;
        match self
            .api
            .submit_votes(&self.game.id, &round_id, &request)
            .await
        {
            Ok(round) => {
                tracing::info!(game_id = %self.game.id, round_id = %round_id, "Votes submitted");
                self.vote_submitted = true;
                if self.round.as_ref() != Some(&round) {
                    self.round = Some(round);
                }
                self.clear_error();
                self.refresh_round_with(RefreshMode::Ungated).await;
            }
            Err(err) => {
                tracing::warn!(round_id = %round_id, error = %err, "Vote submission failed");
                self.surface_error(&err);
            }
        }
        self.is_submitting = false;
    }

    fn vote_request(&self) -> Result<SubmitVotesRequest, ClientError> {
        let (Some(favorite), Some(least)) = (&self.selected_favorite_id, &self.selected_least_id)
        else {
            return Err(ClientError::Validation(MISSING_VOTES_MESSAGE.to_string()));
        };
        if favorite == least {
            return Err(ClientError::Validation(SAME_VOTES_MESSAGE.to_string()));
        }

        Ok(SubmitVotesRequest {
            favorite_submission_id: favorite.clone(),
            least_favorite_submission_id: least.clone(),
        })
    }

    /// Move the game from the lobby into play (host only on the server side).
    ///
    /// Ignored unless the held game is still waiting in the lobby.
    pub async fn start_game(&mut self) {
        if self.is_submitting || !self.game.status.can_start() {
            return;
        }

        let request = UpdateGameStatusRequest {
            status: GameStatus::Active,
        };

        self.is_submitting = true;
        match self.api.update_game_status(&self.game.id, &request).await {
            Ok(game) => {
                tracing::info!(game_id = %game.id, status = %game.status, "Game started");
                self.apply_game(game);
                self.clear_error();
                self.refresh_round_with(RefreshMode::Ungated).await;
            }
            Err(err) => {
                tracing::warn!(game_id = %self.game.id, error = %err, "Starting game failed");
                self.surface_error(&err);
            }
        }
        self.is_submitting = false;
    }

    // ============ Reports ============

    /// Report a player. Validation and network failures go back to the caller.
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` for a blank description, otherwise the API failure.
    pub async fn report_player(&self, player_id: &str, description: &str) -> Result<(), ClientError> {
        let request = report::player_report(player_id, description)?;
        self.api.submit_report(&self.game.id, &request).await?;
        tracing::info!(game_id = %self.game.id, player_id, "Player reported");
        Ok(())
    }

    /// Report one or more phrases.
    ///
    /// # Errors
    ///
    /// `ClientError::Validation` for an empty selection, otherwise the API failure.
    pub async fn report_phrases(
        &self,
        submission_ids: &[String],
        description: &str,
    ) -> Result<(), ClientError> {
        let request = report::phrase_report(submission_ids, description)?;
        self.api.submit_report(&self.game.id, &request).await?;
        tracing::info!(
            game_id = %self.game.id,
            count = request.submission_ids.len(),
            "Phrases reported"
        );
        Ok(())
    }

    // ============ Queries ============

    /// Opponents' submissions in this viewer's voting order.
    #[must_use]
    pub fn other_submissions(&self) -> Vec<&Submission> {
        self.round
            .as_ref()
            .map(|round| ordering::other_submissions(round, &self.viewer_id))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn report_rounds(&self) -> Vec<&Round> {
        report::report_rounds(&self.completed_rounds, self.round.as_ref())
    }

    #[must_use]
    pub fn ordered_player_ids_for_report(&self, rounds: &[&Round]) -> Vec<String> {
        report::ordered_player_ids(&self.game, &self.viewer_id, rounds)
    }

    #[must_use]
    pub fn winning_round(&self) -> Option<&Round> {
        report::winning_round(&self.game, &self.completed_rounds, self.round.as_ref())
    }

    #[must_use]
    pub fn goal_word(&self) -> Option<String> {
        report::goal_word(&self.report_rounds())
    }

    #[must_use]
    pub fn winner_ids(&self, round: &Round) -> Vec<String> {
        report::winner_ids(&self.game, round)
    }

    #[must_use]
    pub fn reportable_phrases(&self) -> Vec<ReportablePhrase> {
        report::reportable_phrases(&self.report_rounds(), &self.viewer_id)
    }

    // ============ Errors ============

    fn surface_error(&mut self, err: &ClientError) {
        let message = err.to_string();
        if self.error_message.as_deref() != Some(message.as_str()) {
            self.error_message = Some(message);
        }
    }

    fn clear_error(&mut self) {
        if self.error_message.is_some() {
            self.error_message = None;
        }
    }
}
