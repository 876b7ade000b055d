//! Lifecycle augmentation for graft components (Layer 3).
//!
//! `graft_component` wires optional shorthand hooks into the fixed lifecycle
//! contract a host runtime calls:
//!
//! - [`Descriptor`] - Explicit list of the callbacks and hooks a component defines
//! - [`augment`] - Composes the standard callbacks once per component type
//! - [`ComponentClass`] - The augmented class: slots, routing table, hook types
//! - [`Instance`] - One live component with exactly-once initialization
//! - [`RenderFn`] - Per-instance `html` / `svg` render functions
//!
//! # Lifecycle
//!
//! The host calls [`Instance::attribute_changed_callback`],
//! [`Instance::connected_callback`] and [`Instance::disconnected_callback`].
//! The first of those calls runs the init gate: the instance registers itself
//! as the listener for every hook type of its class and dispatches one `init`
//! event. Afterwards each callback dispatches its own event, which the event
//! bridge routes to the hook for that type.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use graft_component::{Descriptor, Instance};
//!
//! #[derive(Default)]
//! struct Counter {
//!     inits: AtomicUsize,
//!     connects: AtomicUsize,
//! }
//!
//! let class = Descriptor::<Counter>::new()
//!     .oninit(|this, _| {
//!         this.inits.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     })
//!     .onconnected(|this, _| {
//!         this.connects.fetch_add(1, Ordering::SeqCst);
//!         Ok(())
//!     })
//!     .augment();
//!
//! let counter = Instance::new(&class, Counter::default());
//! counter.connected_callback().unwrap();
//! counter.connected_callback().unwrap();
//!
//! assert_eq!(counter.inits.load(Ordering::SeqCst), 1);
//! assert_eq!(counter.connects.load(Ordering::SeqCst), 2);
//! ```

/// Augmentation of descriptors into classes.
pub mod augment;

mod bridge;

/// The augmented component class.
pub mod class;

/// Capability descriptors.
pub mod descriptor;

/// Error types for lifecycle dispatch.
pub mod error;

/// Live component instances.
pub mod instance;

mod lifecycle;

/// Per-instance render functions.
pub mod render;

pub use augment::augment;
pub use class::{ComponentClass, Invocation, LayerKind, Slot, SlotFn};
pub use descriptor::{AttributeChangedFn, Capabilities, Descriptor, HookFn, IsFn, MethodFn};
pub use error::{BoxError, ComponentError};
pub use instance::{IS_ATTRIBUTE, Instance};
pub use render::RenderFn;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::augment::augment;
    pub use crate::class::{ComponentClass, LayerKind, Slot};
    pub use crate::descriptor::{Capabilities, Descriptor};
    pub use crate::error::{BoxError, ComponentError};
    pub use crate::instance::Instance;
    pub use crate::render::RenderFn;
}
