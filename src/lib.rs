//! Lifecycle augmentation and memoized template rendering for host-driven components.
//!
//! # Architecture
//!
//! - **Layer 1** ([`graft_element`]): Host element, events and listeners
//! - **Layer 2** ([`graft_template`]): Template cache, `html` / `svg` tags, engine seam
//! - **Layer 3** ([`graft_component`]): Descriptors, augmentation, init gate, render functions
//! - [`graft_core`]: Tracing setup and configuration files
//!
//! # Example
//!
//! ```
//! use graft::prelude::*;
//!
//! struct Hello;
//!
//! let class = Descriptor::<Hello>::new()
//!     .render(|this| {
//!         this.html()
//!             .call(template!("<p>Hello, ", "!</p>"), vec![Value::from("graft")])
//!     })
//!     .augment();
//!
//! let hello = Instance::new(&class, Hello);
//! hello.connected_callback().unwrap();
//!
//! assert_eq!(hello.element().content(), "<p>Hello, graft!</p>");
//! ```

pub use graft_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use graft_internal::prelude::*;
}
