//! Socket frame loop for one live connection.
//!
//! Pumps outbound frames from the dispatcher's channel into the sink and
//! routes inbound text frames back to pending commands. Malformed frames
//! are logged and dropped; they never tear the connection down.

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::dispatcher::CommandDispatcher;

/// Drive one connection until it closes, errors, or is cancelled.
pub(crate) async fn process_connection(
    ws_stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
    mut outbound_rx: mpsc::UnboundedReceiver<Message>,
    dispatcher: &CommandDispatcher,
    cancel: &CancellationToken,
) {
    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                return;
            }
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) => {
                        if let Err(e) = sink.send(message).await {
                            tracing::error!(error = %e, "WebSocket send error");
                            return;
                        }
                    }
                    // Sender half dropped; the dispatcher is going away.
                    None => return,
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        dispatcher.route_response(&text).await;
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::trace!("Ignoring binary frame");
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {
                        // Keepalive frames are answered by tungstenite.
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "Scheduling server closed the channel");
                        return;
                    }
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "WebSocket receive error");
                        return;
                    }
                    None => return,
                }
            }
        }
    }
}
