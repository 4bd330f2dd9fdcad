//! `WebSocket` change-notification listener.
//!
//! Frames from the server are only hints that something changed; their
//! payloads are never applied to the model. Each one queues a refresh, which
//! re-fetches authoritative state.

use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;

use super::SessionHandle;
use crate::errors::ClientError;

/// What a notification frame means to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotification {
    /// Connection handshake acknowledgement
    Connected,
    /// Something about the game changed; carries the frame type for logging
    Changed(String),
}

impl ChangeNotification {
    /// Classify a text frame. Anything that is not a `connected` frame counts
    /// as a change, including frames that are not JSON.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let kind = serde_json::from_str::<serde_json::Value>(text)
            .ok()
            .and_then(|value| {
                value
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "unknown".to_string());

        if kind == "connected" {
            Self::Connected
        } else {
            Self::Changed(kind)
        }
    }
}

/// Listen on `url` and queue a refresh for every change notification.
///
/// Returns when the server closes the socket or the session stops.
///
/// # Errors
///
/// `ClientError::Transport` if the connection cannot be opened or breaks.
pub async fn listen(url: &str, handle: SessionHandle) -> Result<(), ClientError> {
    let (mut socket, _) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| ClientError::Transport(format!("WebSocket connect failed: {e}")))?;
    tracing::info!("Listening for game change notifications");

    while let Some(frame) = socket.next().await {
        let frame = frame.map_err(|e| ClientError::Transport(format!("WebSocket error: {e}")))?;

        let notification = match frame {
            Message::Text(text) => ChangeNotification::parse(text.as_str()),
            Message::Binary(_) => ChangeNotification::Changed("binary".to_string()),
            Message::Close(_) => break,
            _ => continue,
        };

        match notification {
            ChangeNotification::Connected => tracing::debug!("Notification channel connected"),
            ChangeNotification::Changed(kind) => {
                tracing::debug!(%kind, "Change notification received");
                if handle.refresh().is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!("Notification channel closed");
    Ok(())
}
