//! Templating engine seam.
//!
//! The [`Engine`] trait is the boundary to whatever turns holes into output
//! and commits it to a target. Components only ever call [`Engine::render`]
//! with a producer closure, and the keyed tags forward to [`Engine::keyed`].
//!
//! [`MarkupEngine`] is the bundled implementation. It serializes holes to
//! text by interleaving fragments and values, commits the text as the
//! target's content, and keeps keyed nodes in an identity map. It performs no
//! escaping, validation or diffing.
//!
//! # Keyed node ownership
//!
//! A keyed node belongs to the engine and is looked up by its owner's
//! [`KeyRef`]. The engine holds the owner weakly: while an entry exists the
//! owner's allocation cannot be reused, so a later owner never receives a
//! node that belonged to an earlier one. Entries whose owner has been dropped
//! are purged on the next insertion. [`MarkupEngine::forget`],
//! [`MarkupEngine::purge`] and [`MarkupEngine::clear`] evict explicitly.

use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use graft_element::HostElement;
use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::error::TemplateError;
use crate::tag::{Hole, TagFamily, Value};

// ─────────────────────────────────────────────────────────────────────────────
// KeyRef
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of the object a keyed render is attached to.
///
/// Holds the owner weakly. Two keys are equal when they refer to the same
/// owner allocation.
#[derive(Clone)]
pub struct KeyRef {
    owner: Weak<dyn Any + Send + Sync>,
}

impl KeyRef {
    /// Keys renders by the identity of `owner`.
    #[must_use]
    pub fn of<T: Send + Sync + 'static>(owner: &Arc<T>) -> Self {
        let owner: Weak<dyn Any + Send + Sync> = Arc::downgrade(owner) as Weak<T>;
        Self { owner }
    }

    /// Returns `true` while the owner is alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }

    fn addr(&self) -> usize {
        self.owner.as_ptr().cast::<()>().addr()
    }
}

impl PartialEq for KeyRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.owner, &other.owner)
    }
}

impl Eq for KeyRef {}

impl Hash for KeyRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRef")
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────────────────────────────────────

/// Output of a keyed render, stable per `(reference, id)`.
#[derive(Debug)]
pub struct Node {
    family: TagFamily,
    markup: RwLock<String>,
}

impl Node {
    fn new(family: TagFamily, markup: String) -> Self {
        Self {
            family,
            markup: RwLock::new(markup),
        }
    }

    /// The family the node was created with.
    #[must_use]
    pub fn family(&self) -> TagFamily {
        self.family
    }

    /// The node's current markup.
    #[must_use]
    pub fn markup(&self) -> String {
        self.markup.read().clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine
// ─────────────────────────────────────────────────────────────────────────────

/// Turns holes into output and commits it.
pub trait Engine: Send + Sync + 'static {
    /// Renders the hole produced by `what` into `target`.
    fn render(&self, target: &HostElement, what: &dyn Fn() -> Hole) -> Result<(), TemplateError>;

    /// Renders `hole` into the node kept for `(family, reference, id)`,
    /// creating the node on first use.
    ///
    /// Returns [`TemplateError::DanglingReference`] if the owner behind
    /// `reference` has been dropped.
    fn keyed(
        &self,
        family: TagFamily,
        reference: &KeyRef,
        id: &str,
        hole: Hole,
    ) -> Result<Arc<Node>, TemplateError>;
}

/// Renders a ready hole into `target`.
pub fn render(engine: &dyn Engine, target: &HostElement, hole: Hole) -> Result<(), TemplateError> {
    engine.render(target, &|| hole.clone())
}

/// Renders the hole produced by `producer` into `target`.
pub fn render_with(
    engine: &dyn Engine,
    target: &HostElement,
    producer: impl Fn() -> Hole,
) -> Result<(), TemplateError> {
    engine.render(target, &producer)
}

// ─────────────────────────────────────────────────────────────────────────────
// MarkupEngine
// ─────────────────────────────────────────────────────────────────────────────

type NodeKey = (TagFamily, KeyRef, String);

/// Text-serializing engine.
#[derive(Default)]
pub struct MarkupEngine {
    nodes: RwLock<HashMap<NodeKey, Arc<Node>>>,
}

impl MarkupEngine {
    /// Creates an engine with no keyed nodes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Serializes `hole` to text.
    ///
    /// # Errors
    ///
    /// [`TemplateError::ArityMismatch`] if the hole, or any nested hole, does
    /// not have exactly one value between each pair of fragments.
    pub fn serialize(hole: &Hole) -> Result<String, TemplateError> {
        let mut out = String::new();
        Self::write_hole(&mut out, hole)?;
        Ok(out)
    }

    fn write_hole(out: &mut String, hole: &Hole) -> Result<(), TemplateError> {
        let fragments = hole.fragments();
        let values = hole.values();
        if fragments.len() != values.len() + 1 {
            return Err(TemplateError::ArityMismatch {
                fragments: fragments.len(),
                values: values.len(),
            });
        }

        for (index, fragment) in fragments.iter().enumerate() {
            out.push_str(fragment);
            if let Some(value) = values.get(index) {
                Self::write_value(out, value)?;
            }
        }
        Ok(())
    }

    fn write_value(out: &mut String, value: &Value) -> Result<(), TemplateError> {
        match value {
            Value::Empty => {}
            Value::Text(text) => out.push_str(text),
            Value::Number(number) => out.push_str(&number.to_string()),
            Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
            Value::Hole(hole) => Self::write_hole(out, hole)?,
            Value::List(items) => {
                for item in items {
                    Self::write_value(out, item)?;
                }
            }
        }
        Ok(())
    }

    /// Number of keyed nodes held, including nodes of dropped owners not yet
    /// purged.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.read().len()
    }

    /// Drops every node kept for `reference`. Returns how many were removed.
    pub fn forget(&self, reference: &KeyRef) -> usize {
        let mut nodes = self.nodes.write();
        let before = nodes.len();
        nodes.retain(|(_, owner, _), _| owner != reference);
        before - nodes.len()
    }

    /// Drops every node whose owner has been dropped. Returns how many were
    /// removed.
    pub fn purge(&self) -> usize {
        let mut nodes = self.nodes.write();
        let before = nodes.len();
        nodes.retain(|(_, owner, _), _| owner.is_alive());
        before - nodes.len()
    }

    /// Drops every keyed node.
    pub fn clear(&self) {
        self.nodes.write().clear();
    }
}

impl Engine for MarkupEngine {
    fn render(&self, target: &HostElement, what: &dyn Fn() -> Hole) -> Result<(), TemplateError> {
        let hole = what();
        let markup = Self::serialize(&hole)?;
        tracing::trace!(family = %hole.family(), bytes = markup.len(), "committing render");
        target.replace_content(markup);
        Ok(())
    }

    fn keyed(
        &self,
        family: TagFamily,
        reference: &KeyRef,
        id: &str,
        hole: Hole,
    ) -> Result<Arc<Node>, TemplateError> {
        if !reference.is_alive() {
            return Err(TemplateError::DanglingReference);
        }
        let markup = Self::serialize(&hole)?;
        let key = (family, reference.clone(), id.to_owned());

        if let Some(node) = self.nodes.read().get(&key) {
            *node.markup.write() = markup;
            return Ok(Arc::clone(node));
        }

        let mut nodes = self.nodes.write();
        let before = nodes.len();
        nodes.retain(|(_, owner, _), _| owner.is_alive());
        if nodes.len() < before {
            tracing::trace!(
                purged = before - nodes.len(),
                "purged keyed nodes of dropped owners"
            );
        }
        let node = nodes
            .entry(key)
            .or_insert_with(|| Arc::new(Node::new(family, String::new())));
        *node.markup.write() = markup;
        Ok(Arc::clone(node))
    }
}

impl fmt::Debug for MarkupEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupEngine")
            .field("nodes", &self.node_count())
            .finish()
    }
}
