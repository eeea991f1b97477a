//! Typed events the UI bridge reacts to, and the actions it requests.

use crate::ws::messages::ClientEvent;

/// Input to [`crate::service::UiBridge::dispatch`].
///
/// Transport events and console events share one enum so a single loop can
/// feed them through the same handler in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// The transport completed its handshake.
    Connected,
    /// The server pushed a fragment of console output.
    OutputReceived(String),
    /// The user replaced the pending command text.
    InputChanged(String),
    /// The user asked to send the pending command.
    SendRequested,
}

/// What the runtime must do after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeAction {
    /// Nothing to do.
    None,
    /// Write `fragment` to the display; the viewport is now at `scroll_top`.
    Render {
        /// Newly appended text.
        fragment: String,
        /// Viewport position after the append.
        scroll_top: usize,
    },
    /// Transmit an event to the server.
    Emit(ClientEvent),
}
