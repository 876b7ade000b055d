//! Listener registration for host elements.
//!
//! [`EventListeners`] is a registry of listeners keyed by event type. It follows
//! the host contract that adding the same listener twice for the same type is a
//! no-op, and that listeners run in registration order.
//!
//! # Bridge vs Callback
//!
//! - [`Listener::Bridge`]: the owning component itself. Dispatch routes the
//!   event through the component's event-routing method, so a component can
//!   listen to any number of types without building a bound closure per type.
//! - [`Listener::Callback`]: a standalone function.
//!
//! # Example
//!
//! ```
//! use graft_element::listener::{EventListeners, Listener};
//!
//! let listeners = EventListeners::new();
//! assert!(listeners.add("connected", Listener::Bridge));
//! assert!(!listeners.add("connected", Listener::Bridge), "duplicates are ignored");
//! assert_eq!(listeners.count("connected"), 1);
//! ```

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::event::Event;

// ─────────────────────────────────────────────────────────────────────────────
// Listener
// ─────────────────────────────────────────────────────────────────────────────

/// A listener registered for an event type.
#[derive(Clone)]
pub enum Listener {
    /// The owning component, reached through its event-routing method.
    Bridge,
    /// A standalone callback.
    Callback(Arc<dyn Fn(&Event) + Send + Sync>),
}

impl Listener {
    /// Wraps a closure as a callback listener.
    #[must_use]
    pub fn callback(f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    /// Returns `true` if both listeners are the same listener object.
    ///
    /// Callbacks compare by pointer identity, as the host does.
    #[must_use]
    pub fn same(&self, other: &Listener) -> bool {
        match (self, other) {
            (Listener::Bridge, Listener::Bridge) => true,
            (Listener::Callback(a), Listener::Callback(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Bridge => f.write_str("Listener::Bridge"),
            Listener::Callback(_) => f.write_str("Listener::Callback(..)"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventListeners
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of listeners by event type.
///
/// Uses interior mutability so listeners can be added through `&self`, which
/// lets a hook register further listeners while an event is being dispatched.
#[derive(Default)]
pub struct EventListeners {
    /// Maps event type to listeners in registration order.
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl EventListeners {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Adds `listener` for `event_type`.
    ///
    /// Returns `false` without changing anything if the same listener is
    /// already registered for that type.
    pub fn add(&self, event_type: impl Into<String>, listener: Listener) -> bool {
        let event_type = event_type.into();
        let mut listeners = self.listeners.write();
        let entries = listeners.entry(event_type).or_default();

        if entries.iter().any(|existing| existing.same(&listener)) {
            return false;
        }

        entries.push(listener);
        true
    }

    /// Removes `listener` from `event_type`. Returns `true` if it was present.
    pub fn remove(&self, event_type: &str, listener: &Listener) -> bool {
        let mut listeners = self.listeners.write();
        let Some(entries) = listeners.get_mut(event_type) else {
            return false;
        };

        let before = entries.len();
        entries.retain(|existing| !existing.same(listener));
        before != entries.len()
    }

    /// Returns a copy of the listeners for `event_type`, in registration order.
    ///
    /// Dispatch iterates the snapshot, so listeners added during dispatch only
    /// see later events.
    #[must_use]
    pub fn snapshot(&self, event_type: &str) -> Vec<Listener> {
        let listeners = self.listeners.read();
        listeners.get(event_type).cloned().unwrap_or_default()
    }

    /// Returns the number of listeners registered for `event_type`.
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        let listeners = self.listeners.read();
        listeners.get(event_type).map_or(0, Vec::len)
    }

    /// Checks whether `listener` is registered for `event_type`.
    #[must_use]
    pub fn contains(&self, event_type: &str, listener: &Listener) -> bool {
        let listeners = self.listeners.read();
        listeners
            .get(event_type)
            .is_some_and(|entries| entries.iter().any(|existing| existing.same(listener)))
    }

    /// Returns the total number of registrations across all types.
    #[must_use]
    pub fn total(&self) -> usize {
        let listeners = self.listeners.read();
        listeners.values().map(Vec::len).sum()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read();
        f.debug_map()
            .entries(listeners.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn add_increments_count() {
        let listeners = EventListeners::new();

        assert!(listeners.add("init", Listener::Bridge));
        assert_eq!(listeners.count("init"), 1);

        assert!(listeners.add("init", Listener::callback(|_| {})));
        assert_eq!(listeners.count("init"), 2);
    }

    #[test]
    fn same_callback_is_registered_once() {
        let listeners = EventListeners::new();
        let listener = Listener::callback(|_| {});

        assert!(listeners.add("connected", listener.clone()));
        assert!(!listeners.add("connected", listener.clone()));
        assert_eq!(listeners.count("connected"), 1);
        assert!(listeners.contains("connected", &listener));
    }

    #[test]
    fn distinct_closures_are_distinct_listeners() {
        let a = Listener::callback(|_| {});
        let b = Listener::callback(|_| {});
        assert!(!a.same(&b));
        assert!(!a.same(&Listener::Bridge));
    }

    #[test]
    fn same_listener_on_different_types_allowed() {
        let listeners = EventListeners::new();

        listeners.add("connected", Listener::Bridge);
        listeners.add("disconnected", Listener::Bridge);

        assert_eq!(listeners.count("connected"), 1);
        assert_eq!(listeners.count("disconnected"), 1);
        assert_eq!(listeners.total(), 2);
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let listeners = EventListeners::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            listeners.add(
                "init",
                Listener::callback(move |_| order.lock().unwrap().push(name)),
            );
        }

        let event = Event::init();
        for listener in listeners.snapshot("init") {
            if let Listener::Callback(f) = listener {
                f(&event);
            }
        }

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_drops_only_the_matching_listener() {
        let listeners = EventListeners::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        let counting = Listener::callback(move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        listeners.add("init", Listener::Bridge);
        listeners.add("init", counting.clone());

        assert!(listeners.remove("init", &counting));
        assert!(!listeners.remove("init", &counting));
        assert_eq!(listeners.count("init"), 1);
        assert!(listeners.contains("init", &Listener::Bridge));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_type_is_empty() {
        let listeners = EventListeners::new();
        assert_eq!(listeners.count("missing"), 0);
        assert!(listeners.snapshot("missing").is_empty());
        assert!(!listeners.remove("missing", &Listener::Bridge));
    }
}
