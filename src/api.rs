//! Game server API seam.
//!
//! [`GameApi`] is what the reconciler talks to; [`HttpGameApi`] is the
//! production implementation over `reqwest`. Tests substitute in-memory fakes.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::dto::{
    ReportRequest, SubmitGuessRequest, SubmitVotesRequest, UpdateGameStatusRequest,
    ValidateWordRequest, ValidateWordResponse,
};
use crate::entities::{Game, Round, Submission};
use crate::errors::ClientError;

/// How loudly a round fetch should be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogStrategy {
    /// Log at `debug`, for user-visible fetches
    #[default]
    Verbose,
    /// Log at `trace`, for background cache fills
    Quiet,
}

/// Hints for `fetch_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Ask the server to bypass any response cache
    pub force_refresh: bool,
    pub log_strategy: LogStrategy,
}

impl FetchOptions {
    /// Options for a background completed-round fetch
    #[must_use]
    pub const fn background(force_refresh: bool) -> Self {
        Self {
            force_refresh,
            log_strategy: LogStrategy::Quiet,
        }
    }
}

/// Remote operations the client core depends on.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `GET /games/{gameId}`
    async fn fetch_game(&self, game_id: &str) -> Result<Game, ClientError>;

    /// `GET /games/{gameId}/rounds/{roundId}`
    async fn fetch_round(
        &self,
        game_id: &str,
        round_id: &str,
        options: FetchOptions,
    ) -> Result<Round, ClientError>;

    /// `POST /games/{gameId}/rounds/{roundId}/submissions`
    async fn submit_guess(
        &self,
        game_id: &str,
        round_id: &str,
        request: &SubmitGuessRequest,
    ) -> Result<Submission, ClientError>;

    /// `POST /games/{gameId}/rounds/{roundId}/votes`, answers with the updated round
    async fn submit_votes(
        &self,
        game_id: &str,
        round_id: &str,
        request: &SubmitVotesRequest,
    ) -> Result<Round, ClientError>;

    /// `POST /words/validate`
    async fn validate_word(&self, word: &str) -> Result<bool, ClientError>;

    /// `PATCH /games/{gameId}`
    async fn update_game_status(
        &self,
        game_id: &str,
        request: &UpdateGameStatusRequest,
    ) -> Result<Game, ClientError>;

    /// `POST /games/{gameId}/reports`
    async fn submit_report(&self, game_id: &str, request: &ReportRequest)
    -> Result<(), ClientError>;
}

/// `reqwest`-backed [`GameApi`].
#[derive(Debug, Clone)]
pub struct HttpGameApi {
    client: reqwest::Client,
    api_root: String,
    auth_token: Option<String>,
}

impl HttpGameApi {
    /// Build a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("wordsmoke-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(
            client,
            config.api_root(),
            config.auth_token.clone(),
        ))
    }

    /// Wrap an existing `reqwest` client; `api_root` already includes `/api/v1`.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        api_root: impl Into<String>,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            client,
            api_root: api_root.into().trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{path}", self.api_root));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Game server request failed");
        Err(ClientError::from_status(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn game_path(game_id: &str) -> String {
    format!("/games/{}", urlencoding::encode(game_id))
}

fn round_path(game_id: &str, round_id: &str) -> String {
    format!(
        "{}/rounds/{}",
        game_path(game_id),
        urlencoding::encode(round_id)
    )
}

#[async_trait]
impl GameApi for HttpGameApi {
    async fn fetch_game(&self, game_id: &str) -> Result<Game, ClientError> {
        tracing::debug!(game_id, "Fetching game");
        Self::decode(self.request(Method::GET, &game_path(game_id))).await
    }

    async fn fetch_round(
        &self,
        game_id: &str,
        round_id: &str,
        options: FetchOptions,
    ) -> Result<Round, ClientError> {
        match options.log_strategy {
            LogStrategy::Verbose => tracing::debug!(
                game_id,
                round_id,
                force_refresh = options.force_refresh,
                "Fetching round"
            ),
            LogStrategy::Quiet => tracing::trace!(
                game_id,
                round_id,
                force_refresh = options.force_refresh,
                "Fetching round"
            ),
        }

        let mut builder = self.request(Method::GET, &round_path(game_id, round_id));
        if options.force_refresh {
            builder = builder
                .query(&[("forceRefresh", "true")])
                .header(reqwest::header::CACHE_CONTROL, "no-cache");
        }
        Self::decode(builder).await
    }

    async fn submit_guess(
        &self,
        game_id: &str,
        round_id: &str,
        request: &SubmitGuessRequest,
    ) -> Result<Submission, ClientError> {
        let path = format!("{}/submissions", round_path(game_id, round_id));
        Self::decode(self.request(Method::POST, &path).json(request)).await
    }

    async fn submit_votes(
        &self,
        game_id: &str,
        round_id: &str,
        request: &SubmitVotesRequest,
    ) -> Result<Round, ClientError> {
        let path = format!("{}/votes", round_path(game_id, round_id));
        Self::decode(self.request(Method::POST, &path).json(request)).await
    }

    async fn validate_word(&self, word: &str) -> Result<bool, ClientError> {
        let body = ValidateWordRequest {
            word: word.to_string(),
        };
        let verdict: ValidateWordResponse =
            Self::decode(self.request(Method::POST, "/words/validate").json(&body)).await?;
        Ok(verdict.valid)
    }

    async fn update_game_status(
        &self,
        game_id: &str,
        request: &UpdateGameStatusRequest,
    ) -> Result<Game, ClientError> {
        Self::decode(
            self.request(Method::PATCH, &game_path(game_id))
                .json(request),
        )
        .await
    }

    async fn submit_report(
        &self,
        game_id: &str,
        request: &ReportRequest,
    ) -> Result<(), ClientError> {
        let path = format!("{}/reports", game_path(game_id));
        Self::send(self.request(Method::POST, &path).json(request)).await?;
        Ok(())
    }
}
