//! Template cache, tag families and engine seam for graft (Layer 2).
//!
//! `graft_template` turns call-site template literals into renderable holes:
//!
//! - [`TemplateStrings`] / [`template!`] - Call-site literals with stable identity
//! - [`TemplateCache`] - Memoized, immutable parsed fragments per call site
//! - [`Replace`] - Transform applied to a joined template body per class config
//! - [`TagFamily`], [`Hole`], [`html`], [`svg`] - Markup descriptions
//! - [`Engine`] - The templating engine that commits holes to a host element
//!
//! # Example
//!
//! ```
//! use graft_element::HostElement;
//! use graft_template::{MarkupEngine, Value, html, render, template};
//!
//! let engine = MarkupEngine::new();
//! let target = HostElement::new();
//!
//! let greeting = html(template!("<p>Hello, ", "!</p>"), vec![Value::from("world")]);
//! render(&engine, &target, greeting).unwrap();
//!
//! assert_eq!(target.content(), "<p>Hello, world!</p>");
//! ```

/// Parsed template memoization.
pub mod cache;

/// Declarative per-class template configuration.
pub mod config;

/// Templating engine seam and the reference markup engine.
pub mod engine;

/// Error types for template processing.
pub mod error;

/// Replace transforms applied before splitting a template.
pub mod replace;

/// Call-site template literals.
pub mod strings;

/// Tag families, holes and values.
pub mod tag;

pub use cache::{Fragments, ParsedTemplate, TemplateCache};
pub use config::{Include, TemplateConfig};
pub use engine::{Engine, KeyRef, MarkupEngine, Node, render, render_with};
pub use error::TemplateError;
pub use replace::{IncludeReplace, Replace};
pub use strings::{TemplateKey, TemplateStrings};
pub use tag::{Hole, KeyedTag, TagFamily, Value, html, html_for, svg, svg_for};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::cache::{Fragments, ParsedTemplate, TemplateCache};
    pub use crate::config::{Include, TemplateConfig};
    pub use crate::engine::{Engine, KeyRef, MarkupEngine, Node, render, render_with};
    pub use crate::error::TemplateError;
    pub use crate::replace::{IncludeReplace, Replace};
    pub use crate::strings::{TemplateKey, TemplateStrings};
    pub use crate::tag::{Hole, KeyedTag, TagFamily, Value, html, html_for, svg, svg_for};
    pub use crate::template;
}
