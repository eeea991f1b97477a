//! WebSocket message types: the event envelope and its payloads.
//!
//! Every frame is a text frame holding
//! `{"event": "<name>", "data": { ... }}`.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Event name for console output pushed by the server.
pub const DOCKER_OUTPUT: &str = "docker_output";

/// Event name for command delivery failures reported by the server.
pub const COMMAND_OUTPUT: &str = "command_output";

/// Event name for commands sent by the client.
pub const SEND_COMMAND: &str = "send_command";

/// Untyped envelope, used to look at the event name before committing to
/// a payload shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Event name discriminator.
    pub event: String,
    /// Event-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of output-carrying server events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPayload {
    /// Opaque text; never parsed or sanitized.
    pub output: String,
}

/// Events the server pushes to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A fragment of container console output.
    DockerOutput(OutputPayload),
    /// The server could not deliver a command to the container.
    CommandOutput(OutputPayload),
}

impl ServerEvent {
    /// Decodes a text frame.
    ///
    /// Returns `Ok(None)` for well-formed envelopes naming an event this
    /// client does not handle.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Codec`] if the frame is not a JSON envelope
    /// or a known event carries a malformed payload.
    pub fn decode(text: &str) -> Result<Option<Self>, BridgeError> {
        let envelope: Envelope = serde_json::from_str(text)?;
        match envelope.event.as_str() {
            DOCKER_OUTPUT | COMMAND_OUTPUT => Ok(Some(serde_json::from_str(text)?)),
            _ => Ok(None),
        }
    }

    /// Encodes the event as a text frame body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Codec`] if serialization fails.
    pub fn encode(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds a `docker_output` event.
    #[must_use]
    pub fn docker_output(output: impl Into<String>) -> Self {
        Self::DockerOutput(OutputPayload {
            output: output.into(),
        })
    }
}

/// Events the client sends to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Ask the server to run a text command.
    SendCommand {
        /// Command text, sent exactly as typed.
        command: String,
    },
}

impl ClientEvent {
    /// Encodes the event as a text frame body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Codec`] if serialization fails.
    pub fn encode(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the event name as a static string slice.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::SendCommand { .. } => SEND_COMMAND,
        }
    }
}
