//! # console-bridge
//!
//! Real-time console client for containerized servers.
//!
//! Connects to the WebSocket endpoint of the origin serving the console,
//! appends streamed `docker_output` fragments to a display buffer (written
//! to the terminal as they arrive), and forwards each typed line to the
//! server as a `send_command` event.
//!
//! ## Architecture
//!
//! ```text
//! stdin ──► console (thread) ──► mpsc ──┐
//!                                       ├──► run_bridge (ws/) ──► UiBridge (service/)
//! server ──► Connection (ws/) ──────────┘          │                 │
//!                                                  ▼                 ▼
//!                                        stdout / send_command   DisplayBuffer,
//!                                                                CommandInput (domain/)
//! ```

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
