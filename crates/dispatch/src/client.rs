//! WebSocket client for the scheduling server.
//!
//! [`BoardClient`] holds the connection configuration; call
//! [`BoardClient::connect`] to establish a live [`BoardConnection`].

use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Connection configuration for the scheduling channel.
pub struct BoardClient {
    ws_url: String,
}

/// A live WebSocket connection to the scheduling server.
pub struct BoardConnection {
    /// Unique client ID sent during the handshake.
    pub client_id: String,
    /// The raw WebSocket stream for reading/writing frames.
    pub ws_stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl BoardClient {
    /// Create a client targeting `ws_url` (e.g. `ws://host:8787/ws`).
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }

    /// WebSocket URL this client connects to.
    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Open the channel.
    ///
    /// Generates a v4 `clientId` and appends it as a query parameter so
    /// the server can address responses to this board session.
    pub async fn connect(&self) -> Result<BoardConnection, ClientError> {
        let client_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}?clientId={}", self.ws_url, client_id);

        let (ws_stream, _response) = connect_async(&url).await.map_err(|e| {
            ClientError::Connection(format!(
                "Failed to connect to scheduling server at {}: {e}",
                self.ws_url
            ))
        })?;

        tracing::info!(
            client_id = %client_id,
            "Connected to scheduling server at {}",
            self.ws_url,
        );

        Ok(BoardConnection {
            client_id,
            ws_stream,
        })
    }
}

/// Errors establishing the channel.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Failed to establish the WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),
}
