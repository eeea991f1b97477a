//! UI bridge: owns the console state and reacts to typed events.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{BridgeAction, BridgeEvent, CommandInput, ConnectionState, DisplayBuffer};
use crate::ws::messages::ClientEvent;

/// Console state plus the handlers that mutate it.
///
/// Handlers are synchronous and perform no I/O: they return a
/// [`BridgeAction`] describing what the runtime should render or transmit.
/// This keeps every behavior testable without a live transport.
#[derive(Debug)]
pub struct UiBridge {
    session_id: Uuid,
    state: ConnectionState,
    display: DisplayBuffer,
    input: CommandInput,
}

impl UiBridge {
    /// Creates a disconnected bridge for the connection `session_id`.
    #[must_use]
    pub fn new(session_id: Uuid, viewport_height: usize) -> Self {
        Self {
            session_id,
            state: ConnectionState::Disconnected,
            display: DisplayBuffer::new(viewport_height),
            input: CommandInput::new(),
        }
    }

    /// Routes an event to its handler.
    pub fn dispatch(&mut self, event: BridgeEvent) -> BridgeAction {
        match event {
            BridgeEvent::Connected => {
                self.on_connected();
                BridgeAction::None
            }
            BridgeEvent::OutputReceived(output) => self.on_output_received(&output),
            BridgeEvent::InputChanged(value) => {
                self.input.set(value);
                BridgeAction::None
            }
            BridgeEvent::SendRequested => BridgeAction::Emit(self.on_send_clicked()),
        }
    }

    /// Marks the connection live and logs it. Repeated calls are ignored.
    pub fn on_connected(&mut self) {
        if self.state.is_connected() {
            tracing::debug!(session_id = %self.session_id, "duplicate connected event ignored");
            return;
        }
        self.state = ConnectionState::Connected {
            session_id: self.session_id,
            since: Utc::now(),
        };
        tracing::info!(session_id = %self.session_id, "websocket connected");
    }

    /// Appends `output` verbatim and scrolls to the newest content.
    pub fn on_output_received(&mut self, output: &str) -> BridgeAction {
        self.display.append(output);
        tracing::trace!(
            bytes = output.len(),
            total = self.display.len(),
            "output appended"
        );
        BridgeAction::Render {
            fragment: output.to_string(),
            scroll_top: self.display.viewport().scroll_top(),
        }
    }

    /// Takes the pending input and builds the `send_command` event.
    ///
    /// The input is reset to `""`. Empty and whitespace-only commands are
    /// sent as-is.
    pub fn on_send_clicked(&mut self) -> ClientEvent {
        let command = self.input.take();
        tracing::debug!(session_id = %self.session_id, len = command.len(), "sending command");
        ClientEvent::SendCommand { command }
    }

    /// Current connection state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Accumulated output.
    #[must_use]
    pub const fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Pending command input.
    #[must_use]
    pub const fn input(&self) -> &CommandInput {
        &self.input
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn bridge() -> UiBridge {
        UiBridge::new(Uuid::new_v4(), 24)
    }

    fn send(bridge: &mut UiBridge) -> ClientEvent {
        let BridgeAction::Emit(event) = bridge.dispatch(BridgeEvent::SendRequested) else {
            panic!("send should emit");
        };
        event
    }

    #[test]
    fn starts_disconnected() {
        let b = bridge();
        assert_eq!(b.state(), ConnectionState::Disconnected);
        assert!(b.display().is_empty());
    }

    #[test]
    fn connected_transitions_once() {
        let mut b = bridge();
        assert_eq!(b.dispatch(BridgeEvent::Connected), BridgeAction::None);
        let first = b.state();
        assert!(first.is_connected());
        b.dispatch(BridgeEvent::Connected);
        assert_eq!(b.state(), first);
    }

    #[test]
    fn output_is_appended_and_rendered() {
        let mut b = bridge();
        b.dispatch(BridgeEvent::Connected);
        let action = b.dispatch(BridgeEvent::OutputReceived("hello\n".into()));
        assert_eq!(
            action,
            BridgeAction::Render {
                fragment: "hello\n".into(),
                scroll_top: 0,
            }
        );
        assert_eq!(b.display().as_str(), "hello\n");
        assert!(b.display().is_scrolled_to_end());

        b.dispatch(BridgeEvent::OutputReceived("world\n".into()));
        assert_eq!(b.display().as_str(), "hello\nworld\n");
        assert!(b.display().is_scrolled_to_end());
    }

    #[test]
    fn many_fragments_concatenate_in_delivery_order() {
        let mut b = UiBridge::new(Uuid::new_v4(), 3);
        let fragments: Vec<String> = (0..50).map(|i| format!("line {i}\n")).collect();
        for f in &fragments {
            b.dispatch(BridgeEvent::OutputReceived(f.clone()));
        }
        assert_eq!(b.display().as_str(), fragments.concat());
        assert_eq!(b.display().viewport().scroll_top(), 47);
    }

    #[test]
    fn send_emits_input_and_clears_it() {
        let mut b = bridge();
        b.dispatch(BridgeEvent::InputChanged("ls -la".into()));
        assert_eq!(
            send(&mut b),
            ClientEvent::SendCommand {
                command: "ls -la".into()
            }
        );
        assert_eq!(b.input().value(), "");
    }

    #[test]
    fn typed_pwd_is_sent() {
        let mut b = bridge();
        b.dispatch(BridgeEvent::InputChanged("pwd".into()));
        let event = send(&mut b);
        assert_eq!(
            event,
            ClientEvent::SendCommand {
                command: "pwd".into()
            }
        );
        assert_eq!(b.input().value(), "");
    }

    #[test]
    fn empty_input_is_still_sent() {
        let mut b = bridge();
        assert_eq!(
            send(&mut b),
            ClientEvent::SendCommand {
                command: String::new()
            }
        );
    }

    #[test]
    fn sending_does_not_touch_display() {
        let mut b = bridge();
        b.dispatch(BridgeEvent::OutputReceived("prompt> ".into()));
        b.dispatch(BridgeEvent::InputChanged("help".into()));
        let _ = send(&mut b);
        assert_eq!(b.display().as_str(), "prompt> ");
    }
}
