//! Shared test fixtures: an in-memory game server behind the `GameApi` trait.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use wordsmoke_client::api::{FetchOptions, GameApi};
use wordsmoke_client::dto::{
    ReportRequest, SubmitGuessRequest, SubmitVotesRequest, UpdateGameStatusRequest,
};
use wordsmoke_client::entities::{
    Game, GameStatus, Participant, ParticipantRole, Player, Round, RoundStage, RoundStatus,
    RoundSummary, Submission, SubmissionFeedback,
};
use wordsmoke_client::errors::ClientError;
use wordsmoke_client::services::{GameRoomModel, feedback};

pub const VIEWER: &str = "viewer";

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

pub fn player(id: &str, name: &str) -> Player {
    Player {
        id: id.to_string(),
        display_name: name.to_string(),
        nickname: None,
        external_id: Some(format!("ext-{id}")),
        is_virtual: false,
    }
}

pub fn participant(player_id: &str, name: &str, score: i32) -> Participant {
    Participant {
        id: format!("part-{player_id}"),
        role: if player_id == VIEWER {
            ParticipantRole::Host
        } else {
            ParticipantRole::Player
        },
        score,
        joined_at: DateTime::<Utc>::default(),
        player: player(player_id, name),
    }
}

pub fn game(current_round_id: Option<&str>) -> Game {
    Game {
        id: "g1".to_string(),
        status: GameStatus::Active,
        join_code: "SMOKE1".to_string(),
        goal_length: 5,
        current_round_id: current_round_id.map(str::to_string),
        current_round_number: current_round_id.map(|_| 1),
        players_count: 3,
        participants: vec![
            participant(VIEWER, "Vera", 0),
            participant("p-ann", "ann", 0),
            participant("p-bob", "Bob", 0),
        ],
        invited_players: None,
        ended_at: None,
        winner_names: Vec::new(),
        winning_round_number: None,
        rounds: Vec::new(),
    }
}

pub fn round(id: &str, number: u32, status: RoundStatus, stage: RoundStage) -> Round {
    Round {
        id: id.to_string(),
        number,
        status,
        stage,
        submissions: Vec::new(),
        phrase_vote_count: 0,
        viewer_favorite_submission_id: None,
        viewer_least_favorite_submission_id: None,
    }
}

pub fn open_round(id: &str, number: u32) -> Round {
    round(id, number, RoundStatus::Open, RoundStage::WaitingSubmissions)
}

pub fn closed_round(id: &str, number: u32) -> Round {
    round(id, number, RoundStatus::Closed, RoundStage::Reveal)
}

pub fn submission(id: &str, player_id: &str, name: &str) -> Submission {
    Submission {
        id: id.to_string(),
        guess_word: None,
        phrase: None,
        player_id: player_id.to_string(),
        player_name: name.to_string(),
        player_is_virtual: None,
        marks: None,
        correct_guess: None,
        created_at: None,
        feedback: None,
        score_delta: None,
        voted: None,
    }
}

/// A revealed submission with marks computed against `goal`.
pub fn revealed(id: &str, player_id: &str, name: &str, guess: &str, goal: &str) -> Submission {
    let marks = feedback::marks(guess, goal);
    let correct = feedback::is_solved(&marks);
    Submission {
        guess_word: Some(guess.to_string()),
        phrase: Some(format!("{name} says {guess}")),
        marks: Some(marks.clone()),
        correct_guess: Some(correct),
        created_at: Some(DateTime::<Utc>::default()),
        feedback: Some(SubmissionFeedback {
            goal: Some(goal.to_string()),
            guess: Some(guess.to_string()),
            marks,
        }),
        ..submission(id, player_id, name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fake server
// ─────────────────────────────────────────────────────────────────────────────

/// Server-side state the fake answers from. Tests mutate it between calls.
#[derive(Debug)]
pub struct ServerState {
    pub game: Game,
    pub rounds: HashMap<String, Round>,
    pub valid_words: HashSet<String>,

    pub game_errors: VecDeque<ClientError>,
    pub validate_errors: VecDeque<ClientError>,
    pub guess_errors: VecDeque<ClientError>,
    pub vote_errors: VecDeque<ClientError>,

    /// Close the round once a guess is submitted
    pub close_round_on_guess: bool,
    /// Move the round to `reveal` and record the vote ids when votes arrive
    pub reveal_on_vote: bool,

    pub game_fetches: usize,
    pub round_fetches: Vec<(String, bool)>,
    pub validated_words: Vec<String>,
    pub guesses: Vec<SubmitGuessRequest>,
    pub votes: Vec<SubmitVotesRequest>,
    pub status_updates: Vec<GameStatus>,
    pub reports: Vec<ReportRequest>,
}

#[derive(Debug, Clone)]
pub struct FakeGameApi {
    state: Arc<Mutex<ServerState>>,
}

impl FakeGameApi {
    pub fn new(game: Game) -> Self {
        Self {
            state: Arc::new(Mutex::new(ServerState {
                game,
                rounds: HashMap::new(),
                valid_words: ["smoke", "smile", "crane"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                game_errors: VecDeque::new(),
                validate_errors: VecDeque::new(),
                guess_errors: VecDeque::new(),
                vote_errors: VecDeque::new(),
                close_round_on_guess: false,
                reveal_on_vote: true,
                game_fetches: 0,
                round_fetches: Vec::new(),
                validated_words: Vec::new(),
                guesses: Vec::new(),
                votes: Vec::new(),
                status_updates: Vec::new(),
                reports: Vec::new(),
            })),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }

    /// Store a round and keep the game's round summaries in step with it.
    pub fn put_round(&self, round: Round) {
        let mut state = self.state();
        let summary = RoundSummary {
            id: round.id.clone(),
            number: round.number,
            status: round.status,
        };
        match state.game.rounds.iter_mut().find(|r| r.id == round.id) {
            Some(existing) => *existing = summary,
            None => state.game.rounds.push(summary),
        }
        state.rounds.insert(round.id.clone(), round);
    }

    pub fn set_current_round(&self, round_id: Option<&str>) {
        self.state().game.current_round_id = round_id.map(str::to_string);
    }

    pub fn api(&self) -> Arc<dyn GameApi> {
        Arc::new(self.clone())
    }

    /// Model for the viewer, starting from the server's current game.
    pub fn model(&self) -> GameRoomModel {
        let game = self.state().game.clone();
        GameRoomModel::new(self.api(), game, VIEWER)
    }
}

fn not_found(what: &str) -> ClientError {
    ClientError::Http {
        status: 404,
        message: format!("{what} not found."),
    }
}

#[async_trait]
impl GameApi for FakeGameApi {
    async fn fetch_game(&self, _game_id: &str) -> Result<Game, ClientError> {
        let mut state = self.state();
        state.game_fetches += 1;
        if let Some(err) = state.game_errors.pop_front() {
            return Err(err);
        }
        Ok(state.game.clone())
    }

    async fn fetch_round(
        &self,
        _game_id: &str,
        round_id: &str,
        options: FetchOptions,
    ) -> Result<Round, ClientError> {
        let mut state = self.state();
        state
            .round_fetches
            .push((round_id.to_string(), options.force_refresh));
        state
            .rounds
            .get(round_id)
            .cloned()
            .ok_or_else(|| not_found("Round"))
    }

    async fn submit_guess(
        &self,
        _game_id: &str,
        round_id: &str,
        request: &SubmitGuessRequest,
    ) -> Result<Submission, ClientError> {
        let mut state = self.state();
        state.guesses.push(request.clone());
        if let Some(err) = state.guess_errors.pop_front() {
            return Err(err);
        }

        let close = state.close_round_on_guess;
        let round = state
            .rounds
            .get_mut(round_id)
            .ok_or_else(|| not_found("Round"))?;
        let created = Submission {
            guess_word: Some(request.guess_word.clone()),
            phrase: Some(request.phrase.clone()),
            created_at: Some(DateTime::<Utc>::default()),
            ..submission(
                &format!("s-{}-{VIEWER}", round.id),
                VIEWER,
                "Vera",
            )
        };
        round.submissions.push(created.clone());
        if close {
            round.status = RoundStatus::Closed;
            round.stage = RoundStage::Reveal;
        }
        let status = round.status;
        if let Some(summary) = state.game.rounds.iter_mut().find(|r| r.id == round_id) {
            summary.status = status;
        }
        Ok(created)
    }

    async fn submit_votes(
        &self,
        _game_id: &str,
        round_id: &str,
        request: &SubmitVotesRequest,
    ) -> Result<Round, ClientError> {
        let mut state = self.state();
        state.votes.push(request.clone());
        if let Some(err) = state.vote_errors.pop_front() {
            return Err(err);
        }

        let reveal = state.reveal_on_vote;
        let round = state
            .rounds
            .get_mut(round_id)
            .ok_or_else(|| not_found("Round"))?;
        round.phrase_vote_count += 1;
        if reveal {
            round.stage = RoundStage::Reveal;
            round.viewer_favorite_submission_id = Some(request.favorite_submission_id.clone());
            round.viewer_least_favorite_submission_id =
                Some(request.least_favorite_submission_id.clone());
        }
        Ok(round.clone())
    }

    async fn validate_word(&self, word: &str) -> Result<bool, ClientError> {
        let mut state = self.state();
        state.validated_words.push(word.to_string());
        if let Some(err) = state.validate_errors.pop_front() {
            return Err(err);
        }
        Ok(state.valid_words.contains(word))
    }

    async fn update_game_status(
        &self,
        _game_id: &str,
        request: &UpdateGameStatusRequest,
    ) -> Result<Game, ClientError> {
        let mut state = self.state();
        state.status_updates.push(request.status);
        state.game.status = request.status;
        Ok(state.game.clone())
    }

    async fn submit_report(
        &self,
        _game_id: &str,
        request: &ReportRequest,
    ) -> Result<(), ClientError> {
        self.state().reports.push(request.clone());
        Ok(())
    }
}
