//! Board-level error type.

use shiftboard_core::types::EntityId;
use shiftboard_dispatch::DispatchError;
use shiftboard_protocol::ProtocolError;

/// Errors raised by the board session and its controllers.
///
/// None of these is fatal: the session keeps its previous snapshot and
/// the caller renders the error as an inline banner.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A form or action failed local validation; nothing was dispatched.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The channel layer failed or the server rejected the command.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A response payload did not have the expected shape.
    #[error("Error processing server response")]
    MalformedResponse(#[source] ProtocolError),

    /// An action referenced a shift that is not in the loaded window.
    #[error("Shift {0} is not loaded")]
    UnknownShift(EntityId),
}
