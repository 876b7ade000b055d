//! Tag families, holes and values.
//!
//! A [`Hole`] is a markup description: a tag family, the static fragments of a
//! template and the values interpolated between them. Nothing is rendered
//! until an [`Engine`](crate::Engine) commits the hole to a target.
//!
//! # Example
//!
//! ```
//! use graft_template::{TagFamily, Value, svg, template};
//!
//! let circle = svg(template!("<circle r=\"", "\"/>"), vec![Value::from(4)]);
//! assert_eq!(circle.family(), TagFamily::Svg);
//! assert_eq!(circle.values().len(), 1);
//! ```

use core::fmt;
use std::sync::Arc;

use crate::cache::Fragments;
use crate::engine::{Engine, KeyRef, Node};
use crate::error::TemplateError;
use crate::strings::TemplateStrings;

// ─────────────────────────────────────────────────────────────────────────────
// TagFamily
// ─────────────────────────────────────────────────────────────────────────────

/// The two template tag families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    /// Generic markup.
    Html,
    /// Vector graphics.
    Svg,
}

impl TagFamily {
    /// Name of the family as used by the tag functions.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TagFamily::Html => "html",
            TagFamily::Svg => "svg",
        }
    }

    /// Builds a hole of this family.
    #[must_use]
    pub fn hole(self, fragments: impl Into<Fragments>, values: Vec<Value>) -> Hole {
        Hole {
            family: self,
            fragments: fragments.into(),
            values,
        }
    }
}

impl fmt::Display for TagFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value
// ─────────────────────────────────────────────────────────────────────────────

/// A value interpolated into a hole.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Renders nothing.
    #[default]
    Empty,
    /// Text.
    Text(String),
    /// A number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// A nested hole.
    Hole(Box<Hole>),
    /// A sequence of values rendered one after another.
    List(Vec<Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Hole> for Value {
    fn from(value: Hole) -> Self {
        Value::Hole(Box::new(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hole
// ─────────────────────────────────────────────────────────────────────────────

/// A markup description awaiting rendering.
#[derive(Debug, Clone)]
pub struct Hole {
    family: TagFamily,
    fragments: Fragments,
    values: Vec<Value>,
}

impl Hole {
    /// The tag family.
    #[must_use]
    pub fn family(&self) -> TagFamily {
        self.family
    }

    /// The static fragments.
    #[must_use]
    pub fn fragments(&self) -> &Fragments {
        &self.fragments
    }

    /// The interpolated values.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Describes generic markup from a call-site literal and its values.
#[must_use]
pub fn html(strings: &'static TemplateStrings, values: Vec<Value>) -> Hole {
    TagFamily::Html.hole(strings, values)
}

/// Describes vector graphics from a call-site literal and its values.
#[must_use]
pub fn svg(strings: &'static TemplateStrings, values: Vec<Value>) -> Hole {
    TagFamily::Svg.hole(strings, values)
}

// ─────────────────────────────────────────────────────────────────────────────
// Keyed entry points
// ─────────────────────────────────────────────────────────────────────────────

/// A tag bound to an engine's identity-keyed lookup.
///
/// Created by [`html_for`] and [`svg_for`]. Calling it with the same reference
/// and id returns the same node from the engine, updated with the new values,
/// which is what list rendering relies on.
pub struct KeyedTag<'a> {
    engine: &'a dyn Engine,
    family: TagFamily,
    reference: &'a KeyRef,
    id: String,
}

impl KeyedTag<'_> {
    /// Renders through the engine's keyed lookup.
    pub fn call(
        &self,
        strings: &'static TemplateStrings,
        values: Vec<Value>,
    ) -> Result<Arc<Node>, TemplateError> {
        let hole = self.family.hole(strings, values);
        self.engine.keyed(self.family, self.reference, &self.id, hole)
    }
}

impl fmt::Debug for KeyedTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedTag")
            .field("family", &self.family)
            .field("reference", &self.reference)
            .field("id", &self.id)
            .finish()
    }
}

/// Keyed `html` entry point forwarding to [`Engine::keyed`].
#[must_use]
pub fn html_for<'a>(
    engine: &'a dyn Engine,
    reference: &'a KeyRef,
    id: impl Into<String>,
) -> KeyedTag<'a> {
    KeyedTag {
        engine,
        family: TagFamily::Html,
        reference,
        id: id.into(),
    }
}

/// Keyed `svg` entry point forwarding to [`Engine::keyed`].
#[must_use]
pub fn svg_for<'a>(
    engine: &'a dyn Engine,
    reference: &'a KeyRef,
    id: impl Into<String>,
) -> KeyedTag<'a> {
    KeyedTag {
        engine,
        family: TagFamily::Svg,
        reference,
        id: id.into(),
    }
}
