//! Environment configuration for the board binary.

use std::time::Duration;

/// Runtime configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; override via
/// the environment in production.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// WebSocket URL of the scheduling server.
    pub ws_url: String,
    /// Per-command response timeout.
    pub command_timeout: Duration,
}

impl BoardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                  |
    /// |-----------------------------------|--------------------------|
    /// | `SHIFTBOARD_WS_URL`               | `ws://localhost:8787/ws` |
    /// | `SHIFTBOARD_COMMAND_TIMEOUT_SECS` | `15`                     |
    pub fn from_env() -> Self {
        let ws_url = std::env::var("SHIFTBOARD_WS_URL")
            .unwrap_or_else(|_| "ws://localhost:8787/ws".into());

        let command_timeout_secs: u64 = std::env::var("SHIFTBOARD_COMMAND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("SHIFTBOARD_COMMAND_TIMEOUT_SECS must be a valid u64");

        Self {
            ws_url,
            command_timeout: Duration::from_secs(command_timeout_secs),
        }
    }
}
