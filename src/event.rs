//! The closed taxonomy of events the core accepts.
//!
//! Transport callbacks and user intents both funnel into
//! [`Store::dispatch`](crate::store::Store::dispatch) as values of this enum;
//! there is no other way to change state.

use crate::state::game::GameState;
use crate::state::settings::SettingsPatch;

/// An event dispatched into the core.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The transport established a link; the server assigned `client_id`.
    ConnectionEstablished { client_id: String },

    /// The transport dropped, optionally with a reason.
    ConnectionLost { error: Option<String> },

    /// A reconnection attempt started.
    ConnectionRetry,

    /// User asked to start a match with the current settings.
    StartGame,

    /// The server created the match we asked for.
    GameCreated { game_id: String, state: GameState },

    /// The creation request was rejected or timed out.
    GameCreateFailed { error: String },

    /// The server pushed a fresh snapshot of the running match (a move was
    /// made, a wall placed, or the game ended).
    GameStateUpdated { game_id: String, state: GameState },

    /// User asked to abandon the current match and start over.
    NewGameRequested,

    /// User edited settings; unset patch fields keep their values.
    SettingsUpdated { patch: SettingsPatch },

    /// User toggled the settings panel open/closed.
    SettingsToggled,

    /// User scrubbed the move history; `None` returns to the live position.
    HistoryIndexSet { index: Option<usize> },

    /// Full reset of session and UI; settings and connection are preserved.
    ResetGame,
}

impl Event {
    /// Short tag for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectionEstablished { .. } => "connection_established",
            Self::ConnectionLost { .. } => "connection_lost",
            Self::ConnectionRetry => "connection_retry",
            Self::StartGame => "start_game",
            Self::GameCreated { .. } => "game_created",
            Self::GameCreateFailed { .. } => "game_create_failed",
            Self::GameStateUpdated { .. } => "game_state_updated",
            Self::NewGameRequested => "new_game_requested",
            Self::SettingsUpdated { .. } => "settings_updated",
            Self::SettingsToggled => "settings_toggled",
            Self::HistoryIndexSet { .. } => "history_index_set",
            Self::ResetGame => "reset_game",
        }
    }
}
