//! The augmented component class.
//!
//! A [`ComponentClass`] is what [`augment`](crate::augment()) produces: one
//! composed function per [`Slot`], the routing table used by the event
//! bridge, the hook-type-name list read by the init gate and the template
//! settings shared by every instance's render functions.

use core::fmt;
use std::sync::Arc;

use graft_template::{Engine, Replace, TemplateCache, TemplateConfig};
use hashbrown::HashMap;

use crate::descriptor::{Capabilities, HookFn, IsFn};
use crate::error::ComponentError;
use crate::instance::Instance;

// ─────────────────────────────────────────────────────────────────────────────
// Slots
// ─────────────────────────────────────────────────────────────────────────────

/// A composed entry point of a component class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `attribute_changed_callback(name, old, new)`.
    AttributeChanged,
    /// `connected_callback()`.
    Connected,
    /// `disconnected_callback()`.
    Disconnected,
    /// `render()`.
    Render,
}

impl Slot {
    pub(crate) fn index(self) -> usize {
        match self {
            Slot::AttributeChanged => 0,
            Slot::Connected => 1,
            Slot::Disconnected => 2,
            Slot::Render => 3,
        }
    }

    /// Method name of the slot.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Slot::AttributeChanged => "attribute_changed_callback",
            Slot::Connected => "connected_callback",
            Slot::Disconnected => "disconnected_callback",
            Slot::Render => "render",
        }
    }
}

/// Arguments of one slot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Attribute change with its name and values.
    AttributeChanged {
        /// Changed attribute.
        name: &'a str,
        /// Value before the change.
        old_value: Option<&'a str>,
        /// Value after the change.
        new_value: Option<&'a str>,
    },
    /// Connect.
    Connected,
    /// Disconnect.
    Disconnected,
    /// Render.
    Render,
}

/// A composed slot body.
pub type SlotFn<T> =
    Arc<dyn Fn(&Instance<T>, &Invocation<'_>) -> Result<(), ComponentError> + Send + Sync>;

/// Kind of decorator applied to a slot during augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Runs the init gate, then the previous body if any.
    InitGate,
    /// Runs the previous body, then dispatches the slot's event.
    DispatchEvent,
    /// Runs the previous body, then calls `render()`.
    CallRender,
}

// ─────────────────────────────────────────────────────────────────────────────
// ComponentClass
// ─────────────────────────────────────────────────────────────────────────────

/// An augmented component class with state `T`.
pub struct ComponentClass<T> {
    pub(crate) name: &'static str,
    pub(crate) capabilities: Capabilities,
    pub(crate) slots: [Option<SlotFn<T>>; 4],
    pub(crate) layers: Vec<(Slot, LayerKind)>,
    pub(crate) routes: HashMap<String, HookFn<T>>,
    pub(crate) hook_types: Arc<[String]>,
    pub(crate) handle_event: Option<HookFn<T>>,
    pub(crate) is: Option<IsFn<T>>,
    pub(crate) engine: Arc<dyn Engine>,
    pub(crate) replace: Arc<dyn Replace>,
    pub(crate) template_config: Option<TemplateConfig>,
    pub(crate) template_cache: TemplateCache,
}

impl<T: Send + Sync + 'static> ComponentClass<T> {
    /// Type name of the component state.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// What the descriptor defined before augmentation.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Event types the init gate registers listeners for, in order.
    #[must_use]
    pub fn hook_types(&self) -> &[String] {
        &self.hook_types
    }

    pub(crate) fn shared_hook_types(&self) -> Arc<[String]> {
        Arc::clone(&self.hook_types)
    }

    /// Whether `slot` has a body.
    #[must_use]
    pub fn has_slot(&self, slot: Slot) -> bool {
        self.slots[slot.index()].is_some()
    }

    /// Decorators applied to `slot`, in application order.
    #[must_use]
    pub fn layers(&self, slot: Slot) -> Vec<LayerKind> {
        self.layers
            .iter()
            .filter(|(s, _)| *s == slot)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Whether the routing table has a hook for `event_type`.
    #[must_use]
    pub fn routes_to(&self, event_type: &str) -> bool {
        self.routes.contains_key(event_type)
    }

    /// Parsed templates shared by this class's instances.
    #[must_use]
    pub fn template_cache(&self) -> &TemplateCache {
        &self.template_cache
    }

    /// Class-level template configuration.
    #[must_use]
    pub fn template_config(&self) -> Option<&TemplateConfig> {
        self.template_config.as_ref()
    }

    /// Templating engine used by the render functions.
    #[must_use]
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub(crate) fn replace(&self) -> &dyn Replace {
        self.replace.as_ref()
    }

    /// Runs the body of `slot`.
    pub(crate) fn invoke(
        &self,
        slot: Slot,
        instance: &Instance<T>,
        invocation: &Invocation<'_>,
    ) -> Result<(), ComponentError> {
        match &self.slots[slot.index()] {
            Some(body) => body(instance, invocation),
            None => Err(ComponentError::MissingMethod {
                method: slot.name(),
            }),
        }
    }

    pub(crate) fn route(&self, event_type: &str) -> Option<&HookFn<T>> {
        self.routes.get(event_type)
    }

    pub(crate) fn custom_handle_event(&self) -> Option<&HookFn<T>> {
        self.handle_event.as_ref()
    }

    pub(crate) fn custom_is(&self) -> Option<&IsFn<T>> {
        self.is.as_ref()
    }
}

impl<T> fmt::Debug for ComponentClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.name)
            .field("hook_types", &self.hook_types)
            .field("layers", &self.layers)
            .field("template_cache", &self.template_cache)
            .finish_non_exhaustive()
    }
}
