//! Event objects dispatched to components.
//!
//! An [`Event`] carries its type name and, for `attributechanged`, the
//! [`AttributeChange`] that triggered it. Hooks receive `&Event` and read the
//! payload through accessors, so hooks observe the same field contract whether
//! the event was synthesized by the lifecycle layer or dispatched directly.
//!
//! # Example
//!
//! ```
//! use graft_element::event::{self, Event};
//!
//! let event = Event::attribute_changed("value", None, Some("42"));
//! assert_eq!(event.event_type(), event::ATTRIBUTE_CHANGED);
//! assert_eq!(event.attribute_name(), Some("value"));
//! assert_eq!(event.old_value(), None);
//! assert_eq!(event.new_value(), Some("42"));
//! ```

use std::borrow::Cow;

/// Type of the event announced once per instance on initialization.
pub const INIT: &str = "init";

/// Type of the event dispatched by the synthesized attribute-change callback.
pub const ATTRIBUTE_CHANGED: &str = "attributechanged";

/// Type of the event dispatched by the synthesized connect callback.
pub const CONNECTED: &str = "connected";

/// Type of the event dispatched by the synthesized disconnect callback.
pub const DISCONNECTED: &str = "disconnected";

/// Prefix that turns an event type into its hook name (`init` -> `oninit`).
pub const HOOK_PREFIX: &str = "on";

/// Returns the hook name that handles events of `event_type`.
#[must_use]
pub fn hook_name(event_type: &str) -> String {
    format!("{HOOK_PREFIX}{event_type}")
}

/// Returns the bare event type for an `on`-prefixed hook name.
///
/// Names without the prefix have no event type.
#[must_use]
pub fn event_type_of(hook: &str) -> Option<&str> {
    hook.strip_prefix(HOOK_PREFIX).filter(|rest| !rest.is_empty())
}

/// Payload of an `attributechanged` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// Name of the attribute that changed.
    pub attribute_name: String,
    /// Value before the change, `None` if the attribute was absent.
    pub old_value: Option<String>,
    /// Value after the change, `None` if the attribute was removed.
    pub new_value: Option<String>,
}

/// An event dispatched on a host element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    event_type: Cow<'static, str>,
    attribute: Option<AttributeChange>,
}

impl Event {
    /// Creates a plain event of the given type.
    #[must_use]
    pub fn new(event_type: impl Into<Cow<'static, str>>) -> Self {
        Self {
            event_type: event_type.into(),
            attribute: None,
        }
    }

    /// Creates the `init` event.
    #[must_use]
    pub fn init() -> Self {
        Self::new(INIT)
    }

    /// Creates an `attributechanged` event carrying the change arguments verbatim.
    #[must_use]
    pub fn attribute_changed(
        attribute_name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Self {
        Self {
            event_type: Cow::Borrowed(ATTRIBUTE_CHANGED),
            attribute: Some(AttributeChange {
                attribute_name: attribute_name.to_owned(),
                old_value: old_value.map(str::to_owned),
                new_value: new_value.map(str::to_owned),
            }),
        }
    }

    /// Returns the event type name.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns the attribute-change payload, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&AttributeChange> {
        self.attribute.as_ref()
    }

    /// Name of the changed attribute.
    #[must_use]
    pub fn attribute_name(&self) -> Option<&str> {
        self.attribute.as_ref().map(|a| a.attribute_name.as_str())
    }

    /// Attribute value before the change.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.attribute.as_ref().and_then(|a| a.old_value.as_deref())
    }

    /// Attribute value after the change.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.attribute.as_ref().and_then(|a| a.new_value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_event_has_no_attribute_payload() {
        let event = Event::new("custom");
        assert_eq!(event.event_type(), "custom");
        assert!(event.attribute().is_none());
        assert_eq!(event.attribute_name(), None);
    }

    #[test]
    fn init_event_type() {
        assert_eq!(Event::init().event_type(), INIT);
    }

    #[test]
    fn attribute_changed_keeps_arguments() {
        let event = Event::attribute_changed("checked", Some(""), None);
        assert_eq!(event.event_type(), ATTRIBUTE_CHANGED);
        assert_eq!(event.attribute_name(), Some("checked"));
        assert_eq!(event.old_value(), Some(""));
        assert_eq!(event.new_value(), None);
    }

    #[test]
    fn hook_names_round_trip_through_prefix() {
        assert_eq!(hook_name(CONNECTED), "onconnected");
        assert_eq!(event_type_of("onconnected"), Some(CONNECTED));
        assert_eq!(event_type_of("render"), None);
        assert_eq!(event_type_of("on"), None);
    }
}
