//! Live component instances.

use core::fmt;
use core::ops::Deref;
use std::sync::{Arc, OnceLock, Weak};

use graft_element::{Event, HostElement, Listener};
use graft_template::TagFamily;

use crate::class::{ComponentClass, Invocation, Slot};
use crate::error::ComponentError;
use crate::lifecycle::InitState;
use crate::render::RenderFn;

/// Attribute read by the default `is` accessor.
pub const IS_ATTRIBUTE: &str = "is";

/// One live component of an augmented class.
///
/// Instances are always held in an [`Arc`]; render functions keep a weak
/// reference back to the instance they target. Hooks receive `&Instance<T>`
/// and reach the component state through [`Deref`].
pub struct Instance<T> {
    class: Arc<ComponentClass<T>>,
    hook_types: Arc<[String]>,
    state: T,
    element: HostElement,
    pub(crate) init_state: InitState,
    html: OnceLock<RenderFn>,
    svg: OnceLock<RenderFn>,
    this: Weak<Instance<T>>,
}

impl<T: Send + Sync + 'static> Instance<T> {
    /// Creates an instance on a fresh host element.
    #[must_use]
    pub fn new(class: &Arc<ComponentClass<T>>, state: T) -> Arc<Self> {
        Self::with_element(class, state, HostElement::new())
    }

    /// Creates an instance on an existing host element.
    #[must_use]
    pub fn with_element(class: &Arc<ComponentClass<T>>, state: T, element: HostElement) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            class: Arc::clone(class),
            hook_types: class.shared_hook_types(),
            state,
            element,
            init_state: InitState::new(),
            html: OnceLock::new(),
            svg: OnceLock::new(),
            this: this.clone(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Standard callbacks
    // ─────────────────────────────────────────────────────────────────────

    /// Host callback for an observed attribute change.
    ///
    /// # Errors
    ///
    /// Propagates any error from the init gate, the component's own callback
    /// or the `attributechanged` hook.
    pub fn attribute_changed_callback(
        &self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Result<(), ComponentError> {
        self.class.invoke(
            Slot::AttributeChanged,
            self,
            &Invocation::AttributeChanged {
                name,
                old_value,
                new_value,
            },
        )
    }

    /// Host callback for connect.
    ///
    /// # Errors
    ///
    /// Propagates any error from the composed layers.
    pub fn connected_callback(&self) -> Result<(), ComponentError> {
        self.class.invoke(Slot::Connected, self, &Invocation::Connected)
    }

    /// Host callback for disconnect.
    ///
    /// # Errors
    ///
    /// Propagates any error from the composed layers.
    pub fn disconnected_callback(&self) -> Result<(), ComponentError> {
        self.class
            .invoke(Slot::Disconnected, self, &Invocation::Disconnected)
    }

    /// Runs the render method.
    ///
    /// # Errors
    ///
    /// [`ComponentError::MissingMethod`] if the class has neither a render
    /// method nor an `oninit` hook; otherwise whatever render returns.
    pub fn render(&self) -> Result<(), ComponentError> {
        self.class.invoke(Slot::Render, self, &Invocation::Render)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────

    /// Routes `event` to a hook: through the class's `handle_event` if set,
    /// otherwise through the default bridge.
    ///
    /// # Errors
    ///
    /// [`ComponentError::MissingHandler`] from the default bridge when no hook
    /// exists for the event type, or the hook's own error.
    pub fn handle_event(&self, event: &Event) -> Result<(), ComponentError> {
        match self.class.custom_handle_event() {
            Some(handler) => handler(self, event),
            None => crate::bridge::route(self, event),
        }
    }

    /// Dispatches `event` to the listeners registered on the host element.
    ///
    /// Bridge listeners are routed through [`handle_event`](Self::handle_event).
    ///
    /// # Errors
    ///
    /// The first error returned by a bridge-routed hook.
    pub fn dispatch_event(&self, event: &Event) -> Result<(), ComponentError> {
        self.element
            .dispatch_event(event, |event| self.handle_event(event))
    }

    /// Registers the instance itself as a listener for `event_type`.
    ///
    /// Returns `false` if it was already registered.
    pub fn add_event_listener(&self, event_type: impl Into<String>) -> bool {
        self.element.add_event_listener(event_type, Listener::Bridge)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// The `is` value: the class accessor if set, else the `is` attribute.
    #[must_use]
    pub fn is(&self) -> Option<String> {
        match self.class.custom_is() {
            Some(accessor) => accessor(self),
            None => self.element.get_attribute(IS_ATTRIBUTE),
        }
    }

    /// Bound `html` render function, created on first access.
    #[must_use]
    pub fn html(&self) -> &RenderFn {
        self.html
            .get_or_init(|| RenderFn::new(TagFamily::Html, self.this.clone()))
    }

    /// Bound `svg` render function, created on first access.
    #[must_use]
    pub fn svg(&self) -> &RenderFn {
        self.svg
            .get_or_init(|| RenderFn::new(TagFamily::Svg, self.this.clone()))
    }

    /// Hook types the init gate registers, shared with the class.
    #[must_use]
    pub fn hook_types(&self) -> &[String] {
        &self.hook_types
    }

    /// The class this instance belongs to.
    #[must_use]
    pub fn class(&self) -> &Arc<ComponentClass<T>> {
        &self.class
    }

    /// The host element.
    #[must_use]
    pub fn element(&self) -> &HostElement {
        &self.element
    }
}

impl<T> Deref for Instance<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.state
    }
}

impl<T> fmt::Debug for Instance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("initialized", &self.init_state.is_claimed())
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}
