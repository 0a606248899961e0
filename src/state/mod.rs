//! State model for the client synchronization core.
//!
//! Four independent partitions, each a closed sum type or plain struct:
//!
//! - `connection` - transport link lifecycle
//! - `session` - match lifecycle (none, creating, active, ending, over)
//! - `settings` - user-editable match settings and preferences
//! - `ui` - transient affordances (panel expansion, history index, toasts)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         AppState                             │
//! │                                                              │
//! │  ┌───────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ ConnectionState│  │ SessionState │  │  SettingsState   │  │
//! │  │                │  │              │  │                  │  │
//! │  │ Disconnected   │  │ NoGame       │  │ game_settings    │  │
//! │  │ Connecting     │  │ CreatingGame │  │ theme            │  │
//! │  │ Connected      │  │ ActiveGame   │  │ sound_enabled    │  │
//! │  │                │  │ GameEnding   │  └──────────────────┘  │
//! │  │                │  │ GameOver     │  ┌──────────────────┐  │
//! │  └───────────────┘  └──────────────┘  │     UiState      │  │
//! │                                        └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Connection and session are deliberately orthogonal: resetting the game
//! never touches the transport, and losing the transport never tears down
//! the session. The only writer of any partition is
//! [`transition`](crate::transition::transition), called from
//! [`Store::dispatch`](crate::store::Store::dispatch).

pub mod connection;
pub mod game;
pub mod session;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use connection::ConnectionState;
pub use game::{GameState, PawnState, PlayerIndex, Position, WallOrientation, WallPlacement};
pub use session::SessionState;
pub use settings::{
    AiDifficulty, GameMode, GameSettings, SettingsPatch, SettingsState, Theme,
    DEFAULT_AI_TIME_LIMIT_MS, DEFAULT_BOARD_SIZE,
};
pub use ui::{Notification, NotificationKind, UiState};

/// The complete client state, one snapshot per dispatch.
///
/// Snapshots are immutable once published: the transition function builds a
/// new `AppState` and the store swaps it in whole. Readers never see a
/// partially updated state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub connection: ConnectionState,
    pub session: SessionState,
    pub settings: SettingsState,
    pub ui: UiState,

    /// Monotonic counter used to mint `creating-game` request ids, kept in
    /// state so the transition function stays deterministic.
    pub(crate) next_request_id: u64,
}

impl AppState {
    /// Initial state: disconnected, no game, default settings.
    pub fn new() -> Self {
        Self::default()
    }
}
