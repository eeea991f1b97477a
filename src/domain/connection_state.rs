//! Two-state connection lifecycle.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Connection lifecycle as seen by the UI bridge.
///
/// Starts [`ConnectionState::Disconnected`] and moves to
/// [`ConnectionState::Connected`] once, on a successful handshake. There is
/// no reconnect or error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No handshake has completed yet.
    #[default]
    Disconnected,
    /// The transport reported the connection live.
    Connected {
        /// Session id of the connection handle.
        session_id: Uuid,
        /// When the handshake completed.
        since: DateTime<Utc>,
    },
}

impl ConnectionState {
    /// Returns `true` once connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}
