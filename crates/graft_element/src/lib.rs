//! Host element primitives for graft (Layer 1).
//!
//! `graft_element` models the small slice of a host component runtime that the
//! lifecycle layer relies on:
//!
//! - [`Event`] - A typed event with an optional attribute-change payload
//! - [`Listener`] - Either the owning component's event bridge or a callback
//! - [`EventListeners`] - Per-type listener registry with de-duplication
//! - [`HostElement`] - Attributes, listeners and committed content
//!
//! # Architecture
//!
//! - **Layer 1** (`graft_element`): Host primitives (this crate)
//! - **Layer 2** (`graft_template`): Template cache, tags and engine seam
//! - **Layer 3** (`graft_component`): Augmentation and lifecycle dispatch

/// Event objects dispatched to components.
pub mod event;

/// Host element state: attributes, listeners and content.
pub mod host;

/// Listener registration and lookup.
pub mod listener;

pub use event::{AttributeChange, Event};
pub use host::HostElement;
pub use listener::{EventListeners, Listener};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::event::{self, AttributeChange, Event};
    pub use crate::host::HostElement;
    pub use crate::listener::{EventListeners, Listener};
}
