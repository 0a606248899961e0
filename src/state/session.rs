//! Game-session lifecycle state.
//!
//! Exactly one variant is active at a time, and `game_id` exists only in the
//! variants that need it. "Is a game running" is always answered by matching
//! on this enum, never by a separate flag.
//!
//! # State diagram
//!
//! ```text
//! ┌─────────┐  StartGame   ┌──────────────┐  GameCreated   ┌────────────┐
//! │ NoGame  │─────────────▶│ CreatingGame │───────────────▶│ ActiveGame │
//! └─────────┘              └──────┬───────┘                └─────┬──────┘
//!      ▲                          │ GameCreateFailed             │ (server
//!      │                          ▼                              │  reports
//!      │◀─────────────────── NoGame                              ▼  winner)
//!      │                                                   ┌────────────┐
//!      │◀── NewGameRequested / ResetGame (any variant) ────│  GameOver  │
//!      │                                                   └────────────┘
//! ```

use chrono::{DateTime, Utc};

use super::game::{GameState, PlayerIndex};
use super::settings::GameSettings;

/// Session lifecycle state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No match exists and none is being created.
    #[default]
    NoGame,

    /// A creation request is in flight. `settings` is the snapshot the
    /// request was built from; later settings edits do not retro-apply.
    CreatingGame {
        request_id: String,
        settings: GameSettings,
    },

    /// A match is running.
    ActiveGame {
        game_id: String,
        state: GameState,
        last_sync: DateTime<Utc>,
    },

    /// Transient teardown state while the server winds the match down.
    GameEnding { game_id: String },

    /// The match finished with a winner.
    GameOver {
        game_id: String,
        state: GameState,
        winner: PlayerIndex,
    },
}

impl SessionState {
    /// Check if no match exists (a new one may be started).
    pub fn is_no_game(&self) -> bool {
        matches!(self, Self::NoGame)
    }

    /// Check if a creation request is in flight.
    pub fn is_creating(&self) -> bool {
        matches!(self, Self::CreatingGame { .. })
    }

    /// Check if a match is currently running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::ActiveGame { .. })
    }

    /// Check if the session has a match attached, running or not.
    pub fn has_game(&self) -> bool {
        matches!(
            self,
            Self::ActiveGame { .. } | Self::GameEnding { .. } | Self::GameOver { .. }
        )
    }

    /// Get the game id, for the variants that carry one.
    pub fn game_id(&self) -> Option<&str> {
        match self {
            Self::ActiveGame { game_id, .. }
            | Self::GameEnding { game_id }
            | Self::GameOver { game_id, .. } => Some(game_id),
            _ => None,
        }
    }

    /// Get the game snapshot, for the variants that carry one.
    pub fn game_state(&self) -> Option<&GameState> {
        match self {
            Self::ActiveGame { state, .. } | Self::GameOver { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Get the in-flight creation request id.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::CreatingGame { request_id, .. } => Some(request_id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoGame => "no_game",
            Self::CreatingGame { .. } => "creating_game",
            Self::ActiveGame { .. } => "active_game",
            Self::GameEnding { .. } => "game_ending",
            Self::GameOver { .. } => "game_over",
        }
    }
}
