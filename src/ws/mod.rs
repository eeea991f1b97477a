//! WebSocket layer: endpoint derivation, wire messages, and the
//! connection loop.

pub mod connection;
pub mod endpoint;
pub mod messages;

pub use connection::{Connection, run_bridge};
pub use endpoint::Endpoint;
