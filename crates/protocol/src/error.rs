//! Protocol-level error types.

/// Errors interpreting a response envelope's payload.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The response carried no `data` payload.
    #[error("Response carried no data payload")]
    MissingData,

    /// The `data` payload did not match the expected shape.
    #[error("Malformed response payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),
}
