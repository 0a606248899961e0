//! The transition function.
//!
//! `transition(state, event, now)` is the only place state changes happen.
//! It is total (no event ever panics or errors; invalid events are no-ops)
//! and returns `None` when nothing relevant changed, so the store can keep
//! the previous snapshot and shallow-compare subscribers see the same `Arc`.

use chrono::{DateTime, Utc};

use crate::event::Event;
use crate::state::session::SessionState;
use crate::state::ui::{NotificationKind, UiState};
use crate::state::{AppState, ConnectionState};

/// Apply `event` to `state`, returning the next snapshot or `None` for a
/// no-op.
pub fn transition(state: &AppState, event: &Event, now: DateTime<Utc>) -> Option<AppState> {
    match event {
        Event::ConnectionEstablished { client_id } => {
            let mut next = state.clone();
            next.connection = ConnectionState::Connected {
                client_id: client_id.clone(),
                since: now,
            };
            Some(next)
        }

        Event::ConnectionLost { error } => {
            // The session stays untouched: the board remains visible while
            // the transport reconnects.
            let mut next = state.clone();
            next.connection = ConnectionState::Disconnected {
                last_error: error.clone(),
            };
            let notified = match error {
                Some(message) => {
                    next.ui
                        .push_notification(NotificationKind::Error, message.clone(), now)
                }
                None => false,
            };
            if next.connection == state.connection && !notified {
                return None;
            }
            Some(next)
        }

        Event::ConnectionRetry => {
            if state.connection.is_connecting() {
                return None;
            }
            let mut next = state.clone();
            next.connection = ConnectionState::Connecting;
            Some(next)
        }

        Event::StartGame => {
            // Guard against double-submission: only a connected client with
            // no session may start a game.
            if !state.connection.is_connected() || !state.session.is_no_game() {
                return None;
            }
            let mut next = state.clone();
            next.next_request_id += 1;
            next.session = SessionState::CreatingGame {
                request_id: format!("req-{}", next.next_request_id),
                settings: state.settings.game_settings.clone(),
            };
            Some(next)
        }

        Event::GameCreated { game_id, state: game } => {
            match &state.session {
                // Normal path, and last-writer-wins over an existing game.
                SessionState::CreatingGame { .. } | SessionState::ActiveGame { .. } => {
                    let mut next = state.clone();
                    next.session = SessionState::ActiveGame {
                        game_id: game_id.clone(),
                        state: game.clone(),
                        last_sync: now,
                    };
                    next.ui.settings_expanded = false;
                    next.ui.selected_history_index = None;
                    Some(next)
                }
                // A stale response must not resurrect a session the user
                // already reset or finished.
                SessionState::NoGame
                | SessionState::GameEnding { .. }
                | SessionState::GameOver { .. } => None,
            }
        }

        Event::GameCreateFailed { error } => {
            if !state.session.is_creating() {
                return None;
            }
            let mut next = state.clone();
            next.session = SessionState::NoGame;
            next.ui
                .push_notification(NotificationKind::Error, error.clone(), now);
            Some(next)
        }

        Event::GameStateUpdated { game_id, state: game } => {
            match &state.session {
                SessionState::ActiveGame { game_id: current, .. } if current == game_id => {
                    let mut next = state.clone();
                    next.session = match game.winner {
                        Some(winner) => SessionState::GameOver {
                            game_id: game_id.clone(),
                            state: game.clone(),
                            winner,
                        },
                        None => SessionState::ActiveGame {
                            game_id: game_id.clone(),
                            state: game.clone(),
                            last_sync: now,
                        },
                    };
                    Some(next)
                }
                // Updates for a game that is no longer current are dropped.
                _ => None,
            }
        }

        Event::NewGameRequested => {
            // Resetting the game must never imply resetting the transport:
            // only the session partition is written here.
            if state.session.is_no_game() {
                return None;
            }
            let mut next = state.clone();
            next.session = SessionState::NoGame;
            Some(next)
        }

        Event::SettingsUpdated { patch } => {
            let merged = state.settings.merged(patch);
            if merged == state.settings {
                return None;
            }
            let mut next = state.clone();
            next.settings = merged;
            Some(next)
        }

        Event::SettingsToggled => {
            let mut next = state.clone();
            next.ui.settings_expanded = !next.ui.settings_expanded;
            Some(next)
        }

        Event::HistoryIndexSet { index } => {
            if let Some(i) = index {
                let move_count = state
                    .session
                    .game_state()
                    .map(|g| g.move_count())
                    .unwrap_or(0);
                if *i > move_count {
                    return None;
                }
            }
            if state.ui.selected_history_index == *index {
                return None;
            }
            let mut next = state.clone();
            next.ui.selected_history_index = *index;
            Some(next)
        }

        Event::ResetGame => {
            if state.session.is_no_game() && state.ui == UiState::default() {
                return None;
            }
            let mut next = state.clone();
            next.session = SessionState::NoGame;
            next.ui = UiState::default();
            Some(next)
        }
    }
}
