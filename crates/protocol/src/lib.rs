//! Wire protocol for the scheduling channel.
//!
//! Requests are `{"request_id": <operation code>, "data": {...}}` and
//! responses echo the code alongside a `success` flag, an optional
//! payload, and optional error text. This crate provides the typed
//! command union, the response envelope, and the payload parsers; it
//! never touches the transport.

pub mod command;
pub mod error;
pub mod response;

pub use command::{Command, OpCode};
pub use error::ProtocolError;
pub use response::{parse_response, ResponseEnvelope, SchedulePayload};
