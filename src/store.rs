//! Store and dispatch shell.
//!
//! The store owns the current snapshot and serializes all state changes
//! through [`dispatch`](Store::dispatch). The hard logic lives in the pure
//! [`transition`](crate::transition::transition) function; this module is
//! the thin imperative shell around it: queueing, snapshot swapping, and
//! subscriber notification.
//!
//! The store is an explicit instance, not a global. Hand a reference to
//! whatever owns the UI tree's root; tests can spin up as many independent
//! stores as they like.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::event::Event;
use crate::state::AppState;
use crate::transition::transition;

/// A change-notification callback. Receives the new snapshot; it may read it
/// and dispatch further events, but never mutates it.
pub type Subscriber = Rc<dyn Fn(&Arc<AppState>)>;

/// Handle for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Clock used to stamp dispatches; injectable for deterministic tests.
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

struct Inner {
    state: Arc<AppState>,
    queue: VecDeque<Event>,
    dispatching: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription_id: u64,
}

/// Holds the current state and serializes dispatches.
pub struct Store {
    inner: RefCell<Inner>,
    clock: Clock,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a store with the initial state and the system clock.
    pub fn new() -> Self {
        Self::with_state(AppState::new())
    }

    /// Create a store starting from a specific state (for restoring or tests).
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: RefCell::new(Inner {
                state: Arc::new(state),
                queue: VecDeque::new(),
                dispatching: false,
                subscribers: Vec::new(),
                next_subscription_id: 0,
            }),
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the clock used to stamp dispatches.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The current snapshot. Cheap to clone; the `Arc` pointer changes iff
    /// the state did, so shallow comparison works.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.inner.borrow().state)
    }

    /// Register a change subscriber. It fires after every dispatch that
    /// produced a new snapshot.
    pub fn subscribe(&self, subscriber: impl Fn(&Arc<AppState>) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription_id += 1;
        let id = SubscriptionId(inner.next_subscription_id);
        inner.subscribers.push((id, Rc::new(subscriber)));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(sid, _)| *sid != id);
    }

    /// Apply an event to the state.
    ///
    /// Synchronous and re-entrant-safe: a dispatch issued from inside a
    /// subscriber callback is queued and processed after the current event
    /// completes, in order. Subscribers are notified once per state change
    /// with the new snapshot.
    pub fn dispatch(&self, event: Event) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.queue.push_back(event);
            if inner.dispatching {
                // Re-entrant call from a subscriber; the outer loop drains it.
                return;
            }
            inner.dispatching = true;
        }
        self.drain();
        self.inner.borrow_mut().dispatching = false;
    }

    fn drain(&self) {
        loop {
            let event = match self.inner.borrow_mut().queue.pop_front() {
                Some(event) => event,
                None => break,
            };
            let now = (self.clock)();
            let (changed, subscribers) = {
                let mut inner = self.inner.borrow_mut();
                match transition(&inner.state, &event, now) {
                    Some(next) => {
                        tracing::debug!(event = event.as_str(), "dispatch");
                        inner.state = Arc::new(next);
                        (
                            Some(Arc::clone(&inner.state)),
                            inner.subscribers.clone(),
                        )
                    }
                    None => {
                        tracing::trace!(event = event.as_str(), "dispatch ignored");
                        (None, Vec::new())
                    }
                }
            };
            // Notify outside the borrow so subscribers can read the store
            // and dispatch re-entrantly.
            if let Some(snapshot) = changed {
                for (_, subscriber) in &subscribers {
                    subscriber(&snapshot);
                }
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("queued", &inner.queue.len())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::game::test_fixtures::fresh_game;
    use crate::view;

    fn connect(store: &Store) {
        store.dispatch(Event::ConnectionEstablished {
            client_id: "c1".to_string(),
        });
    }

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let store = Store::new();
        let before = store.state();
        connect(&store);
        let after = store.state();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.connection.is_connected());
    }

    #[test]
    fn test_no_op_keeps_snapshot_reference() {
        let store = Store::new();
        let before = store.state();
        // StartGame while disconnected is rejected; same Arc survives.
        store.dispatch(Event::StartGame);
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_subscriber_sees_new_snapshot() {
        let store = Store::new();
        let seen = Rc::new(Cell::new(0u32));
        let seen_clone = Rc::clone(&seen);
        store.subscribe(move |state| {
            assert!(state.connection.is_connected());
            seen_clone.set(seen_clone.get() + 1);
        });
        connect(&store);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_subscribers_not_notified_on_no_op() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        store.dispatch(Event::StartGame); // rejected while disconnected
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let id = store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        connect(&store);
        assert_eq!(calls.get(), 1);

        store.unsubscribe(id);
        store.dispatch(Event::ConnectionLost { error: None });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reentrant_dispatch_is_queued() {
        // A subscriber reacting to CreatingGame by dispatching GameCreated
        // must not re-enter the reducer; the nested event runs afterwards.
        let store = Rc::new(Store::new());
        let store_clone = Rc::clone(&store);
        let depth = Rc::new(Cell::new(0u32));
        let max_depth = Rc::new(Cell::new(0u32));
        let (depth_c, max_c) = (Rc::clone(&depth), Rc::clone(&max_depth));

        store.subscribe(move |state| {
            depth_c.set(depth_c.get() + 1);
            max_c.set(max_c.get().max(depth_c.get()));
            if state.session.is_creating() {
                store_clone.dispatch(Event::GameCreated {
                    game_id: "g1".to_string(),
                    state: fresh_game(0),
                });
            }
            depth_c.set(depth_c.get() - 1);
        });

        connect(&store);
        store.dispatch(Event::StartGame);

        assert!(store.state().session.is_active());
        // The nested dispatch ran after the outer one completed.
        assert_eq!(max_depth.get(), 1);
    }

    #[test]
    fn test_dispatch_order_is_preserved() {
        // A later ConnectionLost overrides an earlier ConnectionEstablished
        // even when both are queued from inside a subscriber.
        let store = Rc::new(Store::new());
        let store_clone = Rc::clone(&store);
        let primed = Rc::new(Cell::new(false));
        let primed_clone = Rc::clone(&primed);

        store.subscribe(move |_| {
            if !primed_clone.get() {
                primed_clone.set(true);
                store_clone.dispatch(Event::ConnectionEstablished {
                    client_id: "c2".to_string(),
                });
                store_clone.dispatch(Event::ConnectionLost {
                    error: Some("dropped".to_string()),
                });
            }
        });

        connect(&store);
        let state = store.state();
        assert!(!state.connection.is_connected());
        assert_eq!(state.connection.last_error(), Some("dropped"));
    }

    #[test]
    fn test_injected_clock_stamps_snapshots() {
        let fixed = Utc::now();
        let store = Store::new().with_clock(move || fixed);
        connect(&store);
        store.dispatch(Event::StartGame);
        store.dispatch(Event::GameCreated {
            game_id: "g1".to_string(),
            state: fresh_game(0),
        });
        match &store.state().session {
            crate::state::SessionState::ActiveGame { last_sync, .. } => {
                assert_eq!(*last_sync, fixed);
            }
            other => panic!("expected ActiveGame, got {:?}", other),
        }
    }

    // Scenario tests for the full start flow, mirroring the behaviors the
    // rendering layer depends on.

    #[test]
    fn test_start_flow_scenario() {
        let store = Store::new();
        connect(&store);
        assert!(view::can_start_game(&store.state()));

        store.dispatch(Event::StartGame);
        assert!(store.state().session.is_creating());

        store.dispatch(Event::GameCreated {
            game_id: "g1".to_string(),
            state: fresh_game(0),
        });
        let state = store.state();
        assert_eq!(view::current_game_id(&state), Some("g1"));
        assert_eq!(
            view::settings_surface(&state),
            view::SettingsSurface::Button { enabled: true }
        );
    }

    #[test]
    fn test_double_start_produces_single_creation() {
        let store = Store::new();
        connect(&store);

        store.dispatch(Event::StartGame);
        let first = store.state();
        let request_id = first.session.request_id().map(str::to_string);

        // Rapid second click: no-op, same snapshot, same request id.
        store.dispatch(Event::StartGame);
        assert!(Arc::ptr_eq(&first, &store.state()));
        assert_eq!(
            store.state().session.request_id().map(str::to_string),
            request_id
        );
    }
}
