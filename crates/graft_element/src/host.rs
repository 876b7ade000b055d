//! Host element state.
//!
//! A [`HostElement`] stands in for the element the host runtime attaches a
//! component to. It stores attributes, the listener registry and the content
//! last committed by a templating engine.

use core::fmt;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::event::Event;
use crate::listener::{EventListeners, Listener};

/// Attributes, listeners and committed content of one element.
#[derive(Default)]
pub struct HostElement {
    attributes: RwLock<HashMap<String, String>>,
    listeners: EventListeners,
    content: RwLock<String>,
}

impl HostElement {
    /// Creates an element with no attributes, listeners or content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element with the given attributes.
    #[must_use]
    pub fn with_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let element = Self::new();
        {
            let mut map = element.attributes.write();
            for (name, value) in attributes {
                map.insert(name.into(), value.into());
            }
        }
        element
    }

    /// Returns the value of `name`, if set.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.read().get(name).cloned()
    }

    /// Checks whether `name` is set.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.read().contains_key(name)
    }

    /// Sets `name` to `value`, returning the previous value.
    ///
    /// This does not notify the component; the host runtime is responsible
    /// for calling the attribute-change callback.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.write().insert(name.into(), value.into())
    }

    /// Removes `name`, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes.write().remove(name)
    }

    /// Returns the listener registry.
    #[must_use]
    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    /// Adds a listener for `event_type`. Returns `false` for a duplicate.
    pub fn add_event_listener(&self, event_type: impl Into<String>, listener: Listener) -> bool {
        self.listeners.add(event_type, listener)
    }

    /// Removes a listener for `event_type`. Returns `true` if it was present.
    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener) -> bool {
        self.listeners.remove(event_type, listener)
    }

    /// Dispatches `event` to every listener registered for its type.
    ///
    /// [`Listener::Bridge`] entries are handed to `bridge`, which routes the
    /// event into the owning component. The first bridge error stops dispatch
    /// and is returned to the caller. No lock is held while listeners run.
    pub fn dispatch_event<E>(
        &self,
        event: &Event,
        mut bridge: impl FnMut(&Event) -> Result<(), E>,
    ) -> Result<(), E> {
        let listeners = self.listeners.snapshot(event.event_type());
        tracing::trace!(
            event_type = event.event_type(),
            listeners = listeners.len(),
            "dispatching event"
        );

        for listener in listeners {
            match listener {
                Listener::Bridge => bridge(event)?,
                Listener::Callback(f) => f(event),
            }
        }
        Ok(())
    }

    /// Returns the content last committed to this element.
    #[must_use]
    pub fn content(&self) -> String {
        self.content.read().clone()
    }

    /// Replaces the committed content.
    pub fn replace_content(&self, content: impl Into<String>) {
        *self.content.write() = content.into();
    }
}

impl fmt::Debug for HostElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostElement")
            .field("attributes", &*self.attributes.read())
            .field("listeners", &self.listeners)
            .field("content", &*self.content.read())
            .finish()
    }
}
