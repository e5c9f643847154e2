//! Server -> client response envelope and typed payloads.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use shiftboard_core::shift::{Job, Shift, Worker};

use crate::command::OpCode;
use crate::error::ProtocolError;

/// Raw response envelope.
///
/// `request_id` echoes the operation code of the command that caused the
/// response; the wire carries no finer-grained correlation token.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub request_id: u16,
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parse a raw text frame into a response envelope.
///
/// Returns `Err` for malformed JSON. Callers log and continue rather
/// than tearing down the connection.
pub fn parse_response(text: &str) -> Result<ResponseEnvelope, serde_json::Error> {
    serde_json::from_str(text)
}

impl ResponseEnvelope {
    /// The typed operation code, if the wire value is known.
    pub fn op_code(&self) -> Option<OpCode> {
        OpCode::from_u16(self.request_id)
    }

    /// The server's rejection text for a failed response.
    pub fn rejection(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Request rejected".to_string())
    }

    /// Deserialize the `data` payload into a typed structure.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, ProtocolError> {
        let data = self.data.clone().ok_or(ProtocolError::MissingData)?;
        serde_json::from_value(data).map_err(ProtocolError::MalformedPayload)
    }
}

/// Payload of a successful schedule-window fetch.
///
/// The worker and job directories ride along with the shift list so one
/// fetch refreshes the whole board snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulePayload {
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}
