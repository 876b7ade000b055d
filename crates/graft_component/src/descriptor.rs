//! Capability descriptors.
//!
//! A [`Descriptor`] states up front which standard callbacks a component
//! implements itself and which shorthand hooks it wants wired in. Augmentation
//! reads the descriptor once and never inspects the component again.
//!
//! # Standard callbacks vs shorthand hooks
//!
//! | Kind | Entries | Effect of defining it |
//! |------|---------|-----------------------|
//! | Standard callback | `attribute_changed_callback`, `connected_callback`, `disconnected_callback` | Kept, with the init gate run first; the matching shorthand is not chained |
//! | Shorthand hook | `oninit`, `onattributechanged`, `onconnected`, `ondisconnected`, `on(type, ..)` | Receives the event of that type through the event bridge |
//! | Render method | `render` | Runs after connect when no own connect callback exists |
//! | Overrides | `handle_event`, `is` | Replace the default event routing / `is` accessor |
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use graft_component::Descriptor;
//!
//! #[derive(Default)]
//! struct Clicks {
//!     count: AtomicUsize,
//! }
//!
//! let class = Descriptor::<Clicks>::new()
//!     .onconnected(|this, _event| {
//!         this.count.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     })
//!     .augment();
//!
//! assert_eq!(class.hook_types(), ["connected"]);
//! ```

use core::fmt;
use std::sync::Arc;

use graft_element::Event;
use graft_element::event::{self, ATTRIBUTE_CHANGED, CONNECTED, DISCONNECTED, INIT};
use graft_template::{Engine, IncludeReplace, MarkupEngine, Replace, TemplateConfig};

use crate::augment::augment;
use crate::class::ComponentClass;
use crate::error::ComponentError;
use crate::instance::Instance;

/// Hook receiving the dispatched event.
pub type HookFn<T> = Arc<dyn Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync>;

/// Zero-argument method (connect, disconnect, render).
pub type MethodFn<T> = Arc<dyn Fn(&Instance<T>) -> Result<(), ComponentError> + Send + Sync>;

/// Attribute-change callback: name, old value, new value.
pub type AttributeChangedFn<T> = Arc<
    dyn Fn(&Instance<T>, &str, Option<&str>, Option<&str>) -> Result<(), ComponentError>
        + Send
        + Sync,
>;

/// Accessor for the `is` value.
pub type IsFn<T> = Arc<dyn Fn(&Instance<T>) -> Option<String> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────────────────

/// Which entries a descriptor defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Own attribute-change callback.
    pub attribute_changed_callback: bool,
    /// Own connect callback.
    pub connected_callback: bool,
    /// Own disconnect callback.
    pub disconnected_callback: bool,
    /// Own event routing.
    pub handle_event: bool,
    /// Own `is` accessor.
    pub is: bool,
    /// `oninit` hook.
    pub oninit: bool,
    /// `onattributechanged` hook.
    pub onattributechanged: bool,
    /// `onconnected` hook.
    pub onconnected: bool,
    /// `ondisconnected` hook.
    pub ondisconnected: bool,
    /// Render method.
    pub render: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// Capability descriptor for a component with state `T`.
///
/// Consumed by [`augment`](crate::augment()), so a definition can only be
/// augmented once.
pub struct Descriptor<T> {
    pub(crate) attribute_changed_callback: Option<AttributeChangedFn<T>>,
    pub(crate) connected_callback: Option<MethodFn<T>>,
    pub(crate) disconnected_callback: Option<MethodFn<T>>,
    pub(crate) handle_event: Option<HookFn<T>>,
    pub(crate) is: Option<IsFn<T>>,
    pub(crate) oninit: Option<HookFn<T>>,
    pub(crate) onattributechanged: Option<HookFn<T>>,
    pub(crate) onconnected: Option<HookFn<T>>,
    pub(crate) ondisconnected: Option<HookFn<T>>,
    pub(crate) render: Option<MethodFn<T>>,
    /// Generic `on<type>` hooks in declaration order.
    pub(crate) hooks: Vec<(String, HookFn<T>)>,
    pub(crate) engine: Arc<dyn Engine>,
    pub(crate) replace: Arc<dyn Replace>,
    pub(crate) template_config: Option<TemplateConfig>,
}

impl<T: Send + Sync + 'static> Default for Descriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> Descriptor<T> {
    /// Creates a descriptor that defines nothing, rendering with
    /// [`MarkupEngine`] and rewriting templates with [`IncludeReplace`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            attribute_changed_callback: None,
            connected_callback: None,
            disconnected_callback: None,
            handle_event: None,
            is: None,
            oninit: None,
            onattributechanged: None,
            onconnected: None,
            ondisconnected: None,
            render: None,
            hooks: Vec::new(),
            engine: Arc::new(MarkupEngine::new()),
            replace: Arc::new(IncludeReplace::new()),
            template_config: None,
        }
    }

    /// Defines the component's own attribute-change callback.
    #[must_use]
    pub fn attribute_changed_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Instance<T>, &str, Option<&str>, Option<&str>) -> Result<(), ComponentError>
            + Send
            + Sync
            + 'static,
    {
        self.attribute_changed_callback = Some(Arc::new(callback));
        self
    }

    /// Defines the component's own connect callback.
    #[must_use]
    pub fn connected_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Instance<T>) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.connected_callback = Some(Arc::new(callback));
        self
    }

    /// Defines the component's own disconnect callback.
    #[must_use]
    pub fn disconnected_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Instance<T>) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.disconnected_callback = Some(Arc::new(callback));
        self
    }

    /// Replaces the default event bridge.
    #[must_use]
    pub fn handle_event<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.handle_event = Some(Arc::new(handler));
        self
    }

    /// Replaces the default `is` accessor.
    #[must_use]
    pub fn is<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&Instance<T>) -> Option<String> + Send + Sync + 'static,
    {
        self.is = Some(Arc::new(accessor));
        self
    }

    /// Defines the init hook.
    #[must_use]
    pub fn oninit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.oninit = Some(Arc::new(hook));
        self
    }

    /// Defines the attribute-change hook.
    #[must_use]
    pub fn onattributechanged<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.onattributechanged = Some(Arc::new(hook));
        self
    }

    /// Defines the connect hook.
    #[must_use]
    pub fn onconnected<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.onconnected = Some(Arc::new(hook));
        self
    }

    /// Defines the disconnect hook.
    #[must_use]
    pub fn ondisconnected<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.ondisconnected = Some(Arc::new(hook));
        self
    }

    /// Defines the render method.
    #[must_use]
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Instance<T>) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Defines the `on<event_type>` hook.
    ///
    /// The built-in types (`init`, `attributechanged`, `connected`,
    /// `disconnected`) set the corresponding shorthand. Any other type is
    /// registered as a listener at init; defining the same type again
    /// replaces the earlier hook.
    #[must_use]
    pub fn on<F>(mut self, event_type: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        let hook: HookFn<T> = Arc::new(hook);
        match event_type.as_str() {
            INIT => self.oninit = Some(hook),
            ATTRIBUTE_CHANGED => self.onattributechanged = Some(hook),
            CONNECTED => self.onconnected = Some(hook),
            DISCONNECTED => self.ondisconnected = Some(hook),
            _ => match self.hooks.iter_mut().find(|(existing, _)| *existing == event_type) {
                Some((_, slot)) => *slot = hook,
                None => self.hooks.push((event_type, hook)),
            },
        }
        self
    }

    /// Defines a hook by its full `on`-prefixed name.
    ///
    /// Returns the descriptor unchanged if `name` has no `on` prefix.
    #[must_use]
    pub fn hook<F>(self, name: &str, hook: F) -> Self
    where
        F: Fn(&Instance<T>, &Event) -> Result<(), ComponentError> + Send + Sync + 'static,
    {
        match event::event_type_of(name) {
            Some(event_type) => self.on(event_type.to_owned(), hook),
            None => {
                tracing::warn!(name, "ignoring hook without `on` prefix");
                self
            }
        }
    }

    /// Sets the templating engine used by `html()` / `svg()`.
    #[must_use]
    pub fn engine(mut self, engine: Arc<dyn Engine>) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the replace transform applied when a template config is present.
    #[must_use]
    pub fn replace(mut self, replace: Arc<dyn Replace>) -> Self {
        self.replace = replace;
        self
    }

    /// Sets the class-level template configuration.
    #[must_use]
    pub fn template_config(mut self, config: TemplateConfig) -> Self {
        self.template_config = Some(config);
        self
    }

    /// Summarizes which entries are defined.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            attribute_changed_callback: self.attribute_changed_callback.is_some(),
            connected_callback: self.connected_callback.is_some(),
            disconnected_callback: self.disconnected_callback.is_some(),
            handle_event: self.handle_event.is_some(),
            is: self.is.is_some(),
            oninit: self.oninit.is_some(),
            onattributechanged: self.onattributechanged.is_some(),
            onconnected: self.onconnected.is_some(),
            ondisconnected: self.ondisconnected.is_some(),
            render: self.render.is_some(),
        }
    }

    /// Augments the described component. See [`augment`](crate::augment()).
    #[must_use]
    pub fn augment(self) -> Arc<ComponentClass<T>> {
        augment(self)
    }
}

impl<T> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("component", &core::any::type_name::<T>())
            .field("oninit", &self.oninit.is_some())
            .field("render", &self.render.is_some())
            .field(
                "hooks",
                &self.hooks.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>(),
            )
            .field("template_config", &self.template_config)
            .finish_non_exhaustive()
    }
}
