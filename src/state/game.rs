//! Game state read model.
//!
//! The server owns the rules; this crate only reads the snapshot it is sent.
//! Move legality, wall blocking, and win detection all happen remotely —
//! nothing here validates a position beyond decoding it.

use serde::{Deserialize, Serialize};

/// Index of a player seat (0 or 1 in a two-player game).
pub type PlayerIndex = usize;

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Wall orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallOrientation {
    Horizontal,
    Vertical,
}

/// A placed wall, anchored at the intersection south-east of `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallPlacement {
    pub position: Position,
    pub orientation: WallOrientation,
}

/// One player's pawn and remaining wall stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnState {
    pub position: Position,
    pub walls_remaining: u8,
}

/// Snapshot of a game as reported by the server.
///
/// History entries are kept opaque (`serde_json::Value`); the client renders
/// them but never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board_size: usize,

    /// Both pawns, indexed by [`PlayerIndex`].
    pub players: Vec<PawnState>,

    /// Walls placed so far.
    pub walls: Vec<WallPlacement>,

    /// Whose turn it is.
    pub current_player: PlayerIndex,

    /// Ordered, append-only move history.
    #[serde(default)]
    pub move_history: Vec<serde_json::Value>,

    /// Winning seat, if the game has ended.
    #[serde(default)]
    pub winner: Option<PlayerIndex>,
}

impl GameState {
    /// Number of plies played so far.
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Check if the game has reached a terminal position.
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }
}
