use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wordsmoke_client::config::Config;
use wordsmoke_client::services::feedback;
use wordsmoke_client::sessions::{self, notifier};
use wordsmoke_client::{GameApi, GameRoomModel, GameSession, HttpGameApi, RoomSnapshot};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize structured logging
    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        game_id = %config.game_id,
        player_id = %config.player_id,
        "Starting Wordsmoke watcher"
    );

    let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config)?);

    tracing::info!("Loading game...");
    let model = GameRoomModel::load(api, &config.game_id, config.player_id.clone()).await?;
    tracing::info!(status = %model.game().status, "Game loaded");

    let (handle, session_task) = GameSession::spawn(model);
    handle.refresh()?;

    let poller = tokio::spawn(sessions::poll_refresh(handle.clone(), config.poll_interval));

    let notification_url = config.notification_url();
    let listener_handle = handle.clone();
    let listener = tokio::spawn(async move {
        if let Err(err) = notifier::listen(&notification_url, listener_handle).await {
            tracing::warn!(error = %err, "Change notifications unavailable, relying on polling");
        }
    });

    let mut updates = handle.subscribe();
    let watch_updates = async {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            log_snapshot(&snapshot);
        }
    };

    tokio::select! {
        () = watch_updates => {
            tracing::info!("Session ended");
        },
        () = shutdown_signal() => {},
    }

    poller.abort();
    listener.abort();
    drop(handle);
    let _ = session_task.await;

    Ok(())
}

/// Log what changed in a way that is useful when following a game from a terminal.
fn log_snapshot(snapshot: &RoomSnapshot) {
    if let Some(message) = &snapshot.error_message {
        tracing::warn!(%message, "Game error");
    }

    match &snapshot.round {
        Some(round) => tracing::info!(
            round = round.number,
            status = ?round.status,
            stage = ?round.stage,
            submissions = round.submissions.len(),
            vote_submitted = snapshot.vote_submitted,
            "Current round"
        ),
        None => tracing::info!(
            status = %snapshot.game.status,
            completed_rounds = snapshot.completed_rounds.len(),
            "No round in progress"
        ),
    }

    for submission in snapshot.round.iter().flat_map(|round| &round.submissions) {
        if let Some(marks) = &submission.marks {
            tracing::debug!(
                player = %submission.player_name,
                marks = %feedback::render(marks),
                "Submission feedback"
            );
        }
    }
}

/// Initialize the `tracing` subscriber with an environment-based filter.
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("wordsmoke_client={log_level},reqwest=warn").into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .map_err(|e| tracing::error!("Failed to install Ctrl+C handler: {e}"))
            .ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
