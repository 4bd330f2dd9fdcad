use std::time::Duration;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Game server base URL, without the `/api/v1` suffix
    pub api_base_url: String,
    /// Explicit change-notification socket URL; derived from the API URL when unset
    pub socket_url: Option<String>,
    pub auth_token: Option<String>,
    pub game_id: String,
    /// The viewer's own player id
    pub player_id: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub environment: Environment,
    pub log_level: String,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `WORDSMOKE_API_URL`, `WORDSMOKE_GAME_ID`, `WORDSMOKE_PLAYER_ID`
    /// Optional with defaults: `WORDSMOKE_AUTH_TOKEN`, `WORDSMOKE_SOCKET_URL`,
    /// `POLL_INTERVAL_SECS`, `REQUEST_TIMEOUT_SECS`, `ENVIRONMENT`, `LOG_LEVEL`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = required("WORDSMOKE_API_URL")?
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("WORDSMOKE_API_URL must be an http(s) URL");
        }

        let game_id = required("WORDSMOKE_GAME_ID")?;
        let player_id = required("WORDSMOKE_PLAYER_ID")?;

        let auth_token = optional("WORDSMOKE_AUTH_TOKEN");
        let socket_url = optional("WORDSMOKE_SOCKET_URL");

        let poll_interval = Duration::from_secs(seconds(
            "POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let request_timeout = Duration::from_secs(seconds(
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            api_base_url,
            socket_url,
            auth_token,
            game_id,
            player_id,
            poll_interval,
            request_timeout,
            environment,
            log_level,
        })
    }

    /// Versioned REST root, e.g. `https://api.example.com/api/v1`.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.api_base_url)
    }

    /// WebSocket URL for game change notifications.
    ///
    /// Uses `WORDSMOKE_SOCKET_URL` verbatim when set; otherwise swaps the API
    /// scheme for `ws`/`wss` and appends the player id (and token) as query
    /// parameters.
    #[must_use]
    pub fn notification_url(&self) -> String {
        if let Some(url) = &self.socket_url {
            return url.clone();
        }

        let ws_root = self
            .api_root()
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);

        let mut url = format!(
            "{ws_root}/games/{}/ws?playerId={}",
            urlencoding::encode(&self.game_id),
            urlencoding::encode(&self.player_id),
        );
        if let Some(token) = &self.auth_token {
            url.push_str("&token=");
            url.push_str(&urlencoding::encode(token));
        }
        url
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn seconds(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| anyhow::anyhow!("{name} must be a positive number of seconds")),
        Err(_) => Ok(default),
    }
}
