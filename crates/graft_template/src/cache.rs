//! Parsed template memoization.
//!
//! [`TemplateCache`] derives the static fragments a component renders with.
//! Without class configuration the literal's own fragments are used as they
//! are. With configuration, the fragments are joined on a private placeholder,
//! passed through the class's [`Replace`] transform, split back, and stored as
//! an immutable [`ParsedTemplate`] keyed by the call site's identity.
//!
//! # Ownership and eviction
//!
//! The cache owns every [`ParsedTemplate`]; callers hold only
//! [`TemplateKey`]s and cheap [`Arc`] clones. Call-site literals are `'static`,
//! so entries are never reclaimed implicitly. [`TemplateCache::evict`] and
//! [`TemplateCache::clear`] are the only ways to drop an entry.
//!
//! # Example
//!
//! ```
//! use graft_template::{IncludeReplace, TemplateCache, TemplateConfig, template};
//!
//! let cache = TemplateCache::new();
//! let config = TemplateConfig::new().with_include("Counter", "x-counter");
//! let strings = template!("<Counter count=", "></Counter>");
//!
//! let first = cache.parsed(strings, Some(&config), &IncludeReplace).unwrap();
//! let second = cache.parsed(strings, Some(&config), &IncludeReplace).unwrap();
//!
//! assert!(first.ptr_eq(&second));
//! assert_eq!(first.get(0), Some("<x-counter count="));
//! ```

use core::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::config::TemplateConfig;
use crate::error::TemplateError;
use crate::replace::{PLACEHOLDER, Replace};
use crate::strings::{TemplateKey, TemplateStrings};

// ─────────────────────────────────────────────────────────────────────────────
// ParsedTemplate
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable fragments derived from one call site.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedTemplate {
    fragments: Box<[String]>,
}

impl ParsedTemplate {
    fn new(fragments: Vec<String>) -> Self {
        Self {
            fragments: fragments.into_boxed_slice(),
        }
    }

    /// Returns the fragments.
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns the raw view, which is the fragments themselves.
    #[must_use]
    pub fn raw(&self) -> &[String] {
        &self.fragments
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragments
// ─────────────────────────────────────────────────────────────────────────────

/// The static fragments a hole renders with.
#[derive(Clone)]
pub enum Fragments {
    /// The literal's own fragments, used when the class has no configuration.
    Static(&'static TemplateStrings),
    /// Fragments produced by the replace transform and memoized.
    Parsed(Arc<ParsedTemplate>),
}

impl Fragments {
    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Fragments::Static(strings) => strings.len(),
            Fragments::Parsed(parsed) => parsed.fragments().len(),
        }
    }

    /// Returns `true` if there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns fragment `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Fragments::Static(strings) => strings.strings().get(index).copied(),
            Fragments::Parsed(parsed) => parsed.fragments().get(index).map(String::as_str),
        }
    }

    /// Iterates the fragments in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// Returns `true` if both refer to the same underlying fragment sequence.
    #[must_use]
    pub fn ptr_eq(&self, other: &Fragments) -> bool {
        match (self, other) {
            (Fragments::Static(a), Fragments::Static(b)) => core::ptr::eq(*a, *b),
            (Fragments::Parsed(a), Fragments::Parsed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&'static TemplateStrings> for Fragments {
    fn from(strings: &'static TemplateStrings) -> Self {
        Fragments::Static(strings)
    }
}

impl From<Arc<ParsedTemplate>> for Fragments {
    fn from(parsed: Arc<ParsedTemplate>) -> Self {
        Fragments::Parsed(parsed)
    }
}

impl fmt::Debug for Fragments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TemplateCache
// ─────────────────────────────────────────────────────────────────────────────

/// Memo of parsed templates keyed by call-site identity.
#[derive(Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<TemplateKey, Arc<ParsedTemplate>>>,
}

impl TemplateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves the fragments for `strings`.
    ///
    /// Without `config` the literal is returned unchanged and nothing is
    /// stored. With `config`, the first call runs `replace` and memoizes the
    /// result; later calls for the same call site return the identical entry
    /// without running `replace` again.
    ///
    /// # Errors
    ///
    /// Returns the transform's error, or [`TemplateError::FragmentMismatch`]
    /// if its output does not split into as many fragments as the literal.
    pub fn parsed(
        &self,
        strings: &'static TemplateStrings,
        config: Option<&TemplateConfig>,
        replace: &dyn Replace,
    ) -> Result<Fragments, TemplateError> {
        let Some(config) = config else {
            return Ok(Fragments::Static(strings));
        };

        let key = strings.key();
        if let Some(parsed) = self.entries.read().get(&key) {
            tracing::trace!(?key, "template cache hit");
            return Ok(Fragments::Parsed(Arc::clone(parsed)));
        }

        // The transform runs without the lock held.
        let parsed = Arc::new(Self::transform(strings, config, replace)?);
        tracing::trace!(?key, fragments = parsed.fragments().len(), "template cache miss");

        // A concurrent miss may have stored first; keep that entry so every
        // caller observes one object per call site.
        let mut entries = self.entries.write();
        let stored = entries.entry(key).or_insert(parsed);
        Ok(Fragments::Parsed(Arc::clone(stored)))
    }

    fn transform(
        strings: &'static TemplateStrings,
        config: &TemplateConfig,
        replace: &dyn Replace,
    ) -> Result<ParsedTemplate, TemplateError> {
        let joined = strings.strings().join(PLACEHOLDER);
        let replaced = replace.replace(&joined, config)?;
        let fragments: Vec<String> = replaced.split(PLACEHOLDER).map(str::to_owned).collect();

        if fragments.len() != strings.len() {
            return Err(TemplateError::FragmentMismatch {
                expected: strings.len(),
                found: fragments.len(),
            });
        }

        Ok(ParsedTemplate::new(fragments))
    }

    /// Returns the memoized entry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: TemplateKey) -> Option<Arc<ParsedTemplate>> {
        self.entries.read().get(&key).cloned()
    }

    /// Checks whether `key` has a memoized entry.
    #[must_use]
    pub fn contains(&self, key: TemplateKey) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// Number of memoized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops the entry for `key`. Returns `true` if one existed.
    pub fn evict(&self, key: TemplateKey) -> bool {
        self.entries.write().remove(&key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("entries", &self.len())
            .finish()
    }
}
