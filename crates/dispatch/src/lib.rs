//! The scheduling channel: WebSocket transport, command dispatch, and
//! response correlation.
//!
//! Provides connection management with exponential-backoff reconnection,
//! the one-in-flight-per-code correlation table, and the broadcast event
//! stream the board surface listens on for banners and connection state.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod events;
mod processor;
pub mod reconnect;

pub use dispatcher::{CommandDispatcher, DispatchConfig};
pub use error::DispatchError;
pub use events::{BoardEvent, BoardEventBus};
