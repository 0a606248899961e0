//! Connection state.
//!
//! Tracks the lifecycle of the transport link to the game server.
//! The session partition is deliberately independent of this one:
//! losing the socket never tears down the board the user is looking at.

use chrono::{DateTime, Utc};

/// Connection lifecycle state.
///
/// Only `Connected` carries a client id, so "client id set while
/// disconnected" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport link. `last_error` holds the most recent failure, if any.
    Disconnected { last_error: Option<String> },

    /// A connection attempt is in flight.
    Connecting,

    /// Link established; the server assigned us `client_id`.
    Connected {
        client_id: String,
        since: DateTime<Utc>,
    },
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Disconnected { last_error: None }
    }
}

impl ConnectionState {
    /// Check if the transport link is up.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// Check if a connection attempt is in flight.
    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// Get the server-assigned client id, if connected.
    pub fn client_id(&self) -> Option<&str> {
        match self {
            Self::Connected { client_id, .. } => Some(client_id),
            _ => None,
        }
    }

    /// Get the most recent connection error, if disconnected with one.
    pub fn last_error(&self) -> Option<&str> {
        match self {
            Self::Disconnected { last_error } => last_error.as_deref(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected { .. } => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected { .. } => "connected",
        }
    }
}
