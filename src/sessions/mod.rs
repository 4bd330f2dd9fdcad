//! Single-owner session actor for one game room.
//!
//! A [`GameSession`] task owns the [`GameRoomModel`] and executes commands one
//! at a time, so reconciliation passes never interleave. Callers (UI input,
//! the poller, the change-notification listener) talk to it through a
//! cloneable [`SessionHandle`] and observe state through a watch channel.
//!
//! While a refresh or a submission runs, further commands of the same kind
//! that arrive are dropped rather than queued.

pub mod notifier;

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::errors::ClientError;
use crate::services::GameRoomModel;
use crate::state::RoomSnapshot;

/// Reply channel for commands whose outcome goes back to the caller.
pub type Reply<T> = oneshot::Sender<T>;

/// A request for the session actor.
#[derive(Debug)]
pub enum SessionCommand {
    Refresh,
    SetGuessWord(String),
    SetPhrase(String),
    SelectFavorite(Option<String>),
    SelectLeast(Option<String>),
    SubmitGuess,
    SubmitVotes,
    StartGame,
    ReportPlayer {
        player_id: String,
        description: String,
        reply: Reply<Result<(), ClientError>>,
    },
    ReportPhrases {
        submission_ids: Vec<String>,
        description: String,
        reply: Reply<Result<(), ClientError>>,
    },
    /// Answer with the state after every earlier command has run
    Snapshot { reply: Reply<RoomSnapshot> },
}

/// Single-flight groups; a command is dropped when one of its group just ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flight {
    Refresh,
    Submit,
}

impl SessionCommand {
    const fn flight(&self) -> Option<Flight> {
        match self {
            Self::Refresh => Some(Flight::Refresh),
            Self::SubmitGuess | Self::SubmitVotes | Self::StartGame => Some(Flight::Submit),
            _ => None,
        }
    }
}

/// Spawns the actor task.
pub struct GameSession;

impl GameSession {
    /// Hand the model to a new actor task.
    ///
    /// The task ends once every [`SessionHandle`] clone is dropped.
    #[must_use]
    pub fn spawn(model: GameRoomModel) -> (SessionHandle, JoinHandle<()>) {
        let (commands, inbox) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(model.snapshot());

        let task = tokio::spawn(run(model, inbox, publisher));

        (
            SessionHandle {
                commands,
                snapshots,
            },
            task,
        )
    }
}

async fn run(
    mut model: GameRoomModel,
    mut inbox: mpsc::UnboundedReceiver<SessionCommand>,
    publisher: watch::Sender<RoomSnapshot>,
) {
    tracing::debug!(game_id = %model.game().id, "Game session started");
    let mut backlog: VecDeque<SessionCommand> = VecDeque::new();

    loop {
        let command = match backlog.pop_front() {
            Some(command) => command,
            None => match inbox.recv().await {
                Some(command) => command,
                None => break,
            },
        };

        let flight = command.flight();
        execute(&mut model, command).await;
        publish(&publisher, &model);

        while let Ok(next) = inbox.try_recv() {
            if flight.is_some() && next.flight() == flight {
                tracing::debug!(command = ?next, "Dropped while the same operation was in flight");
                continue;
            }
            backlog.push_back(next);
        }
    }

    tracing::debug!(game_id = %model.game().id, "Game session stopped");
}

async fn execute(model: &mut GameRoomModel, command: SessionCommand) {
    match command {
        SessionCommand::Refresh => model.refresh_round().await,
        SessionCommand::SetGuessWord(word) => model.update_guess_word(word).await,
        SessionCommand::SetPhrase(phrase) => model.set_phrase(phrase),
        SessionCommand::SelectFavorite(id) => model.select_favorite(id),
        SessionCommand::SelectLeast(id) => model.select_least(id),
        SessionCommand::SubmitGuess => model.submit_guess().await,
        SessionCommand::SubmitVotes => model.submit_votes().await,
        SessionCommand::StartGame => model.start_game().await,
        SessionCommand::ReportPlayer {
            player_id,
            description,
            reply,
        } => {
            let _ = reply.send(model.report_player(&player_id, &description).await);
        }
        SessionCommand::ReportPhrases {
            submission_ids,
            description,
            reply,
        } => {
            let _ = reply.send(model.report_phrases(&submission_ids, &description).await);
        }
        SessionCommand::Snapshot { reply } => {
            let _ = reply.send(model.snapshot());
        }
    }
}

fn publish(publisher: &watch::Sender<RoomSnapshot>, model: &GameRoomModel) {
    let next = model.snapshot();
    publisher.send_if_modified(|current| {
        if *current == next {
            false
        } else {
            *current = next;
            true
        }
    });
}

/// Cloneable front door to a running [`GameSession`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<RoomSnapshot>,
}

impl SessionHandle {
    fn send(&self, command: SessionCommand) -> Result<(), ClientError> {
        self.commands
            .send(command)
            .map_err(|_| ClientError::SessionClosed)
    }

    /// Queue a refresh. Also what change notifications and the poller call.
    ///
    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn refresh(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::Refresh)
    }

    /// Update the draft guess word and validate it.
    ///
    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn set_guess_word(&self, word: impl Into<String>) -> Result<(), ClientError> {
        self.send(SessionCommand::SetGuessWord(word.into()))
    }

    /// Update the draft phrase.
    ///
    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn set_phrase(&self, phrase: impl Into<String>) -> Result<(), ClientError> {
        self.send(SessionCommand::SetPhrase(phrase.into()))
    }

    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn select_favorite(&self, submission_id: Option<String>) -> Result<(), ClientError> {
        self.send(SessionCommand::SelectFavorite(submission_id))
    }

    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn select_least(&self, submission_id: Option<String>) -> Result<(), ClientError> {
        self.send(SessionCommand::SelectLeast(submission_id))
    }

    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn submit_guess(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::SubmitGuess)
    }

    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn submit_votes(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::SubmitVotes)
    }

    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub fn start_game(&self) -> Result<(), ClientError> {
        self.send(SessionCommand::StartGame)
    }

    /// Report a player and wait for the outcome.
    ///
    /// # Errors
    ///
    /// Validation failure for a blank description, the API failure, or
    /// `ClientError::SessionClosed`.
    pub async fn report_player(
        &self,
        player_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ClientError> {
        let (reply, outcome) = oneshot::channel();
        self.send(SessionCommand::ReportPlayer {
            player_id: player_id.into(),
            description: description.into(),
            reply,
        })?;
        outcome.await.map_err(|_| ClientError::SessionClosed)?
    }

    /// Report phrases and wait for the outcome.
    ///
    /// # Errors
    ///
    /// Validation failure for an empty selection, the API failure, or
    /// `ClientError::SessionClosed`.
    pub async fn report_phrases(
        &self,
        submission_ids: Vec<String>,
        description: impl Into<String>,
    ) -> Result<(), ClientError> {
        let (reply, outcome) = oneshot::channel();
        self.send(SessionCommand::ReportPhrases {
            submission_ids,
            description: description.into(),
            reply,
        })?;
        outcome.await.map_err(|_| ClientError::SessionClosed)?
    }

    /// State after every command queued so far has been processed.
    ///
    /// # Errors
    ///
    /// `ClientError::SessionClosed` if the actor has stopped.
    pub async fn settled(&self) -> Result<RoomSnapshot, ClientError> {
        let (reply, outcome) = oneshot::channel();
        self.send(SessionCommand::Snapshot { reply })?;
        outcome.await.map_err(|_| ClientError::SessionClosed)
    }

    /// Latest published state, without waiting.
    #[must_use]
    pub fn snapshot(&self) -> RoomSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that wakes whenever the published state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RoomSnapshot> {
        self.snapshots.clone()
    }
}

/// Queue a refresh every `interval` until the session closes.
pub async fn poll_refresh(handle: SessionHandle, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if handle.refresh().is_err() {
            tracing::debug!("Session closed, poller stopping");
            break;
        }
    }
}
