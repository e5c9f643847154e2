//! Dispatch-level error taxonomy.

use shiftboard_protocol::OpCode;

/// Errors surfaced to a command's caller.
///
/// All of these are local to the operation that raised them; the board
/// keeps its previous snapshot whenever one occurs.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The channel is not open; the command was never sent.
    #[error("Not connected to the scheduling server")]
    NotConnected,

    /// The server answered with `success: false`; the text is verbatim.
    #[error("{0}")]
    Rejected(String),

    /// No response arrived within the configured timeout.
    #[error("Timed out waiting for a response to {0}")]
    Timeout(OpCode),

    /// A newer command with the same operation code replaced this one.
    #[error("Superseded by a newer {0} command")]
    Superseded(OpCode),

    /// The connection dropped while the command was outstanding.
    #[error("Connection closed before a response arrived")]
    ConnectionClosed,

    /// The command could not be encoded to the wire format.
    #[error("Failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}
