//! # Graft Internal Library
//!
//! Re-exports the core graft crates for convenience.

/// Layer 1: Host element primitives.
pub use graft_element;

/// Layer 2: Template cache, tag families and engine seam.
pub use graft_template;

/// Layer 3: Lifecycle augmentation and render wrappers.
pub use graft_component;

/// Tracing setup and configuration loading.
pub use graft_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use graft_component::prelude::*;
    pub use graft_core::prelude::*;
    pub use graft_element::prelude::*;
    pub use graft_template::prelude::*;
}
