//! Domain layer: the display buffer, command input, connection state, and
//! the typed events that drive them.
//!
//! Everything here is plain data mutated from a single task; nothing in
//! this module performs I/O.

pub mod bridge_event;
pub mod command_input;
pub mod connection_state;
pub mod display_buffer;

pub use bridge_event::{BridgeAction, BridgeEvent};
pub use command_input::CommandInput;
pub use connection_state::ConnectionState;
pub use display_buffer::{DisplayBuffer, Viewport};
