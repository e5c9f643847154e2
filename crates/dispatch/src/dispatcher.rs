//! Command dispatch and response correlation over the scheduling channel.
//!
//! [`CommandDispatcher`] owns one possibly-reconnecting WebSocket
//! connection. Commands are serialized onto the channel and responses
//! correlated back by operation code alone; the wire carries no per-call
//! token. At most one command per code is in flight: a newer command
//! supersedes an older one with the same code, and the superseded caller
//! is told so.
//!
//! Commands dispatched while the channel is down fail immediately with
//! [`DispatchError::NotConnected`]; nothing queues and nothing retries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use shiftboard_protocol::{parse_response, Command, ResponseEnvelope};

use crate::client::BoardClient;
use crate::error::DispatchError;
use crate::events::{BoardEvent, BoardEventBus};
use crate::processor::process_connection;
use crate::reconnect::{reconnect_loop, ReconnectConfig};

/// Default time to wait for a response before giving up on a command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(15);

/// Tunables for the dispatcher.
pub struct DispatchConfig {
    /// WebSocket URL of the scheduling server.
    pub ws_url: String,
    /// Per-command response timeout.
    pub command_timeout: Duration,
    /// Backoff policy when the connection drops.
    pub reconnect: ReconnectConfig,
}

impl DispatchConfig {
    /// Configuration with default timeout and backoff.
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            reconnect: ReconnectConfig::default(),
        }
    }
}

/// What resolves a pending command slot.
#[derive(Debug)]
enum PendingOutcome {
    /// The correlated response arrived.
    Response(ResponseEnvelope),
    /// A newer command with the same code took the slot.
    Superseded,
}

/// One outstanding command, keyed by operation code.
struct PendingSlot {
    seq: u64,
    tx: oneshot::Sender<PendingOutcome>,
}

/// Serializes commands onto the channel and correlates responses back.
///
/// Created once via [`CommandDispatcher::start`]; the returned `Arc` is
/// cheap to clone into whatever owns the board session.
pub struct CommandDispatcher {
    /// Outbound sender for the live connection; `None` while down.
    outbound: RwLock<Option<mpsc::UnboundedSender<Message>>>,
    /// Correlation table: operation code -> the single pending slot.
    pending: Mutex<HashMap<u16, PendingSlot>>,
    next_seq: AtomicU64,
    command_timeout: Duration,
    events: BoardEventBus,
    /// Master cancellation token, fired during shutdown.
    cancel: CancellationToken,
    connection_task: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl CommandDispatcher {
    /// Start the dispatcher and its connection task.
    ///
    /// The task connects, processes frames, and re-enters the reconnect
    /// loop whenever the connection drops, until
    /// [`shutdown`](Self::shutdown).
    pub fn start(config: DispatchConfig) -> Arc<Self> {
        let dispatcher = Arc::new(Self {
            outbound: RwLock::new(None),
            pending: Mutex::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            command_timeout: config.command_timeout,
            events: BoardEventBus::default(),
            cancel: CancellationToken::new(),
            connection_task: Mutex::new(None),
        });

        let task = tokio::spawn(run_connection_loop(
            Arc::clone(&dispatcher),
            BoardClient::new(config.ws_url),
            config.reconnect,
        ));
        // The dispatcher was created two statements ago; nothing else can
        // hold this lock yet.
        if let Ok(mut slot) = dispatcher.connection_task.try_lock() {
            *slot = Some(task);
        }

        dispatcher
    }

    /// Dispatch a command and wait for its correlated response.
    ///
    /// Fails immediately with [`DispatchError::NotConnected`] while the
    /// channel is down. A well-formed `success: false` response becomes
    /// [`DispatchError::Rejected`] carrying the server's text verbatim.
    pub async fn dispatch(&self, command: &Command) -> Result<ResponseEnvelope, DispatchError> {
        let code = command.op_code();
        let wire = command.to_wire()?;

        let sender = {
            let outbound = self.outbound.read().await;
            outbound.clone().ok_or(DispatchError::NotConnected)?
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            if let Some(previous) = pending.insert(code.as_u16(), PendingSlot { seq, tx }) {
                tracing::warn!(
                    code = code.as_u16(),
                    "Superseding in-flight command with the same operation code",
                );
                let _ = previous.tx.send(PendingOutcome::Superseded);
            }
        }

        tracing::debug!(code = code.as_u16(), "Dispatching command");
        if sender.send(Message::Text(wire)).is_err() {
            // The connection task went away between the check and the send.
            self.remove_pending_if_current(code.as_u16(), seq).await;
            return Err(DispatchError::NotConnected);
        }

        match tokio::time::timeout(self.command_timeout, rx).await {
            Ok(Ok(PendingOutcome::Response(envelope))) => {
                if envelope.success {
                    Ok(envelope)
                } else {
                    let error = envelope.rejection();
                    self.events.publish(BoardEvent::CommandFailed {
                        code: code.as_u16(),
                        error: error.clone(),
                    });
                    Err(DispatchError::Rejected(error))
                }
            }
            Ok(Ok(PendingOutcome::Superseded)) => Err(DispatchError::Superseded(code)),
            Ok(Err(_)) => Err(DispatchError::ConnectionClosed),
            Err(_) => {
                self.remove_pending_if_current(code.as_u16(), seq).await;
                self.events.publish(BoardEvent::CommandFailed {
                    code: code.as_u16(),
                    error: format!("Timed out waiting for a response to {code}"),
                });
                Err(DispatchError::Timeout(code))
            }
        }
    }

    /// Subscribe to channel and command events.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Publish onto the shared event stream.
    ///
    /// The board session uses this for events only it can compute, such
    /// as load notifications.
    pub fn publish(&self, event: BoardEvent) {
        self.events.publish(event);
    }

    /// Whether the channel is currently open.
    pub async fn is_connected(&self) -> bool {
        self.outbound.read().await.is_some()
    }

    /// Stop the connection task and fail anything outstanding.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down command dispatcher");
        self.cancel.cancel();
        if let Some(handle) = self.connection_task.lock().await.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
        self.clear_connection().await;
    }

    // ---- connection-task plumbing ----

    /// Route one inbound text frame to its pending command, if any.
    pub(crate) async fn route_response(&self, text: &str) {
        let envelope = match parse_response(text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Error processing server response");
                self.events.publish(BoardEvent::MalformedResponse);
                return;
            }
        };

        if envelope.op_code().is_none() {
            tracing::warn!(
                code = envelope.request_id,
                "Response carries an unknown operation code",
            );
            return;
        }

        let slot = self.pending.lock().await.remove(&envelope.request_id);
        match slot {
            Some(slot) => {
                let _ = slot.tx.send(PendingOutcome::Response(envelope));
            }
            None => {
                tracing::debug!(
                    code = envelope.request_id,
                    "Unsolicited response with no pending command",
                );
            }
        }
    }

    pub(crate) async fn install_connection(&self, sender: mpsc::UnboundedSender<Message>) {
        *self.outbound.write().await = Some(sender);
    }

    /// Drop the outbound channel and fail all outstanding commands.
    ///
    /// Clearing the table drops the pending senders, which resolves every
    /// waiting caller with [`DispatchError::ConnectionClosed`].
    pub(crate) async fn clear_connection(&self) {
        *self.outbound.write().await = None;
        self.pending.lock().await.clear();
    }

    async fn remove_pending_if_current(&self, code: u16, seq: u64) {
        let mut pending = self.pending.lock().await;
        if pending.get(&code).is_some_and(|slot| slot.seq == seq) {
            pending.remove(&code);
        }
    }
}

/// Connection lifecycle: connect, process frames, reconnect.
///
/// Runs until the dispatcher's cancellation token fires.
async fn run_connection_loop(
    dispatcher: Arc<CommandDispatcher>,
    client: BoardClient,
    reconnect_config: ReconnectConfig,
) {
    let cancel = dispatcher.cancel.clone();

    loop {
        let conn = match client.connect().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Connection failed, entering reconnect loop");
                match reconnect_loop(&client, &reconnect_config, &cancel).await {
                    Some(conn) => conn,
                    None => return, // cancelled
                }
            }
        };

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        dispatcher.install_connection(outbound_tx).await;
        dispatcher.events.publish(BoardEvent::ChannelUp);

        process_connection(conn.ws_stream, outbound_rx, &dispatcher, &cancel).await;

        dispatcher.clear_connection().await;
        dispatcher.events.publish(BoardEvent::ChannelDown);

        if cancel.is_cancelled() {
            return;
        }
        tracing::info!("Connection lost, reconnecting");
    }
}
