//! Exponential-backoff reconnection for the scheduling channel.
//!
//! When the connection drops, the dispatcher's connection task calls
//! [`reconnect_loop`] to keep retrying with growing delays until the
//! channel comes back or the [`CancellationToken`] fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{BoardClient, BoardConnection};

/// Tunable parameters for the backoff strategy.
pub struct ReconnectConfig {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
    /// Factor the delay grows by after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// The delay to use after `current`, clamped to the configured maximum.
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let grown_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(grown_ms).min(config.max_delay)
}

/// Retry connecting until success or cancellation.
///
/// Returns `Some(connection)` once an attempt succeeds, `None` if the
/// token fires first.
pub async fn reconnect_loop(
    client: &BoardClient,
    config: &ReconnectConfig,
    cancel: &CancellationToken,
) -> Option<BoardConnection> {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        tracing::info!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to scheduling server",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reconnect cancelled");
                return None;
            }
            result = client.connect() => {
                match result {
                    Ok(conn) => {
                        tracing::info!(attempt, "Reconnected to scheduling server");
                        return Some(conn);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Reconnect attempt {attempt} failed");
                    }
                }
            }
        }

        // Sleep before the next attempt, still honouring cancellation.
        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        delay = next_delay(delay, config);
    }
}
