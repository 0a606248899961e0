//! UI derivation functions.
//!
//! Every visibility or enablement decision the rendering layer needs is
//! computed here from the state snapshot alone. There are no independent
//! flags to fall out of sync with the session: "is the start button live"
//! has exactly one definition, and it lives in this module.

use crate::state::ui::Notification;
use crate::state::{AppState, GameState};

/// What the settings affordance should render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSurface {
    /// Compact toggle button. Shown mid-game, or whenever the client is
    /// disconnected (then disabled, so settings access is never absent).
    Button { enabled: bool },

    /// Full settings panel, for a connected client with no running match.
    Panel { can_start: bool, is_creating: bool },
}

/// Decide how the settings affordance renders.
///
/// Guarantee: `Panel` is never returned while the connection is down —
/// disconnection always downgrades to a disabled button.
pub fn settings_surface(state: &AppState) -> SettingsSurface {
    if state.session.has_game() {
        SettingsSurface::Button {
            enabled: state.connection.is_connected(),
        }
    } else if state.connection.is_connected() {
        SettingsSurface::Panel {
            can_start: state.session.is_no_game(),
            is_creating: state.session.is_creating(),
        }
    } else {
        SettingsSurface::Button { enabled: false }
    }
}

/// Check if the start-game intent would be accepted right now.
pub fn can_start_game(state: &AppState) -> bool {
    state.connection.is_connected() && state.session.is_no_game()
}

/// The id of the current match, if one is attached to the session.
pub fn current_game_id(state: &AppState) -> Option<&str> {
    state.session.game_id()
}

/// The snapshot of the current match, if the session carries one.
pub fn current_game_state(state: &AppState) -> Option<&GameState> {
    state.session.game_state()
}

/// Check if a match is actively running (not ending, not over).
pub fn is_game_active(state: &AppState) -> bool {
    state.session.is_active()
}

/// The history ply being viewed, or `None` for the live position.
pub fn selected_history_index(state: &AppState) -> Option<usize> {
    state.ui.selected_history_index
}

/// The most recent undismissed notification.
pub fn latest_notification(state: &AppState) -> Option<&Notification> {
    state.ui.latest_notification()
}
