//! Transport boundary.
//!
//! The core never touches sockets. This module defines the trait a wire
//! implementation must satisfy, the game-creation payload contract, and the
//! driver that turns session-state edges into transport calls. Transport
//! outcomes come back into the core as dispatched events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::scheduler::AiMoveRequest;
use crate::state::settings::{AiDifficulty, GameMode, GameSettings};
use crate::state::AppState;

/// Error from a transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No link to the server.
    NotConnected,
    /// The send itself failed.
    Send(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Send(reason) => write!(f, "send failed: {}", reason),
        }
    }
}

impl std::error::Error for TransportError {}

/// AI configuration sent with a game-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: AiDifficulty,
    pub time_limit_ms: u64,
    pub use_mcts: bool,
    pub mcts_iterations: u32,
}

impl AiConfig {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            difficulty: settings.ai_difficulty,
            time_limit_ms: settings.ai_time_limit_ms,
            use_mcts: settings.ai_difficulty.uses_mcts(),
            mcts_iterations: settings.ai_difficulty.mcts_iterations(),
        }
    }
}

/// Wire payload for creating a game.
///
/// `ai_config` is present iff the mode involves an AI seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub mode: GameMode,
    pub board_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_config: Option<AiConfig>,
}

impl CreateGameRequest {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            mode: settings.mode,
            board_size: settings.board_size,
            ai_config: settings
                .mode
                .has_ai()
                .then(|| AiConfig::from_settings(settings)),
        }
    }
}

/// The wire protocol the core depends on.
///
/// Implementations translate low-level socket events into [`Event`]s and
/// dispatch them into the store; calls here are fire-and-forget, with
/// outcomes reported the same way.
pub trait Transport {
    fn connect(&mut self) -> Result<(), TransportError>;
    fn disconnect(&mut self);
    fn disconnect_from_game(&mut self, game_id: &str);
    fn create_game(&mut self, request: &CreateGameRequest) -> Result<(), TransportError>;
    fn request_ai_move(&mut self, game_id: &str) -> Result<(), TransportError>;
    fn is_connected(&self) -> bool;
}

/// Edge-triggered bridge from session state to transport calls.
///
/// Keyed on the `creating-game` request id, so a given accepted start issues
/// exactly one `create_game` call no matter how many notifications arrive
/// while the request is in flight.
#[derive(Debug, Default)]
pub struct TransportDriver {
    in_flight: Option<String>,
}

impl TransportDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a new state snapshot. Returns a follow-up event to dispatch
    /// when the transport call itself fails.
    pub fn on_state_change(
        &mut self,
        state: &AppState,
        transport: &mut dyn Transport,
    ) -> Option<Event> {
        match &state.session {
            crate::state::SessionState::CreatingGame {
                request_id,
                settings,
            } => {
                if self.in_flight.as_deref() == Some(request_id.as_str()) {
                    return None;
                }
                // Mark before sending so a failure is not retried on the
                // next notification.
                self.in_flight = Some(request_id.clone());
                let request = CreateGameRequest::from_settings(settings);
                tracing::debug!(request_id = %request_id, "sending create_game");
                match transport.create_game(&request) {
                    Ok(()) => None,
                    Err(err) => {
                        tracing::warn!(request_id = %request_id, error = %err, "create_game failed");
                        Some(Event::GameCreateFailed {
                            error: err.to_string(),
                        })
                    }
                }
            }
            _ => {
                self.in_flight = None;
                None
            }
        }
    }

    /// Forward a scheduler fire to the wire. Failures are logged; the
    /// scheduler re-arms on the next relevant state change.
    pub fn request_ai_move(&self, request: &AiMoveRequest, transport: &mut dyn Transport) {
        tracing::debug!(game_id = %request.game_id, "requesting ai move");
        if let Err(err) = transport.request_ai_move(&request.game_id) {
            tracing::warn!(game_id = %request.game_id, error = %err, "ai move request failed");
        }
    }
}
