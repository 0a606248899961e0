//! Quoridor Client State Library
//!
//! Client-side synchronization core for the Quoridor game client. It keeps a
//! single consistent picture of connection health, game-session lifecycle,
//! match settings, and transient UI affordances, and derives every rendering
//! decision from that picture alone.
//!
//! # Overview
//!
//! - **State model** ([`state`]) - four partitions (connection, session,
//!   settings, ui) as closed sum types; invalid combinations are
//!   unrepresentable.
//!
//! - **Transition function** ([`transition`]) - the pure
//!   `(state, event, now) -> state` reducer, the only writer of state.
//!
//! - **UI derivation** ([`view`]) - pure functions computing what the
//!   rendering layer may show and whether it is enabled.
//!
//! - **AI-move scheduler** ([`scheduler`]) - a cancellable, debounced task
//!   that requests AI moves at the right moments.
//!
//! - **Store** ([`store`]) - holds the snapshot, serializes dispatches,
//!   notifies subscribers.
//!
//! - **Transport boundary** ([`transport`]) - the trait a wire
//!   implementation satisfies plus the driver bridging state edges to calls.
//!
//! # Design Principles
//!
//! 1. **Sum types over flags** - connection/session/UI state are tagged
//!    enums, so a `client_id` while disconnected cannot exist.
//!
//! 2. **One writer** - only the transition function changes state, and only
//!    the store calls it. Everything else reads snapshots.
//!
//! 3. **Derive, never cache** - visibility and enablement come from
//!    [`view`] functions on the current snapshot, never from independent
//!    booleans that could drift.
//!
//! 4. **No networking** - this crate is pure state; the socket lives behind
//!    the [`transport::Transport`] trait.
//!
//! # Example
//!
//! ```rust
//! use quoridor_client_state::{view, Event, Store};
//!
//! let store = Store::new();
//! store.dispatch(Event::ConnectionEstablished {
//!     client_id: "client-1".to_string(),
//! });
//! assert!(view::can_start_game(&store.state()));
//!
//! store.dispatch(Event::StartGame);
//! assert!(store.state().session.is_creating());
//!
//! // Resetting the game never resets the transport.
//! store.dispatch(Event::NewGameRequested);
//! assert!(store.state().connection.is_connected());
//! ```

pub mod event;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod transition;
pub mod transport;
pub mod view;

pub use event::Event;
pub use scheduler::{AiMoveRequest, AiMoveScheduler, AI_MOVE_DELAY_MS};
pub use state::*;
pub use store::{Store, SubscriptionId};
pub use transition::transition;
pub use transport::{AiConfig, CreateGameRequest, Transport, TransportDriver, TransportError};
pub use view::SettingsSurface;
