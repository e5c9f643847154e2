//! Seam between the board session and the command channel.

use std::sync::Arc;

use async_trait::async_trait;

use shiftboard_dispatch::{CommandDispatcher, DispatchError};
use shiftboard_protocol::{Command, ResponseEnvelope};

/// Anything that can carry a command to the scheduling server and hand
/// back its correlated response.
///
/// The session is generic over this so every flow runs the same against
/// the real dispatcher or a scripted double in tests.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn dispatch(&self, command: &Command) -> Result<ResponseEnvelope, DispatchError>;
}

#[async_trait]
impl CommandTransport for CommandDispatcher {
    async fn dispatch(&self, command: &Command) -> Result<ResponseEnvelope, DispatchError> {
        CommandDispatcher::dispatch(self, command).await
    }
}

#[async_trait]
impl<T: CommandTransport + ?Sized> CommandTransport for Arc<T> {
    async fn dispatch(&self, command: &Command) -> Result<ResponseEnvelope, DispatchError> {
        (**self).dispatch(command).await
    }
}
