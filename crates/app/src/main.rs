use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::BoardConfig;
use shiftboard_board::ScheduleBoard;
use shiftboard_core::calendar::ViewGranularity;
use shiftboard_dispatch::{BoardEvent, CommandDispatcher, DispatchConfig};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = BoardConfig::from_env();
    tracing::info!(ws_url = %config.ws_url, "Loaded board configuration");

    // --- Channel ---
    let mut dispatch_config = DispatchConfig::new(config.ws_url.clone());
    dispatch_config.command_timeout = config.command_timeout;
    let dispatcher = CommandDispatcher::start(dispatch_config);
    let mut events = dispatcher.subscribe();

    // --- Board session ---
    let anchor = chrono::Local::now().date_naive();
    let mut board = ScheduleBoard::new(
        std::sync::Arc::clone(&dispatcher),
        anchor,
        ViewGranularity::Week,
    );

    // Reload whenever the channel (re)connects; surface everything else
    // as log lines until a front end hangs off the event stream.
    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(BoardEvent::ChannelUp) => match board.reload().await {
                        Ok(count) => {
                            dispatcher.publish(BoardEvent::ScheduleLoaded { shift_count: count });
                        }
                        Err(e) => tracing::error!(error = %e, "Schedule load failed"),
                    },
                    Ok(BoardEvent::CommandFailed { code, error }) => {
                        tracing::warn!(code, error = %error, "Command failed");
                    }
                    Ok(event) => tracing::debug!(?event, "Board event"),
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    dispatcher.shutdown().await;
    Ok(())
}
