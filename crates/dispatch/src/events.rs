//! Board-facing events broadcast by the channel layer.
//!
//! These are the state changes the board surface renders as banners and
//! connection indicators. They are produced by the dispatcher (and, for
//! load notifications, by the board session) and fanned out over a
//! `tokio::sync::broadcast` channel.

use serde::Serialize;
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// A state change the board surface cares about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BoardEvent {
    /// The channel to the scheduling server is open.
    ChannelUp,

    /// The channel dropped; the reconnect loop is running.
    ChannelDown,

    /// A schedule window finished loading.
    ScheduleLoaded { shift_count: usize },

    /// A command failed; `error` is display-ready banner text.
    CommandFailed { code: u16, error: String },

    /// An inbound frame could not be parsed as a response envelope.
    MalformedResponse,
}

/// Broadcast hub for [`BoardEvent`]s.
///
/// Any number of subscribers independently receive every published
/// event. Slow subscribers observe `RecvError::Lagged` when the buffer
/// wraps.
pub struct BoardEventBus {
    sender: broadcast::Sender<BoardEvent>,
}

impl BoardEventBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Silently dropped when nobody is listening.
    pub fn publish(&self, event: BoardEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }
}

impl Default for BoardEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
