//! Call-site template literals.
//!
//! A tagged template call site evaluates to the same literal object every time
//! it runs. [`TemplateStrings`] reproduces that with a `'static` item per call
//! site: the [`template!`](crate::template) macro expands to a fresh `static`,
//! so its address is stable across evaluations and distinct from every other
//! call site, even one with identical text.
//!
//! # Example
//!
//! ```
//! use graft_template::{TemplateStrings, template};
//!
//! fn row() -> &'static TemplateStrings {
//!     template!("<li>", "</li>")
//! }
//!
//! assert_eq!(row().key(), row().key());
//! assert_ne!(row().key(), template!("<li>", "</li>").key());
//! ```

use core::fmt;

/// Static fragments of one template call site.
pub struct TemplateStrings {
    strings: &'static [&'static str],
}

impl TemplateStrings {
    /// Wraps static fragments. Use [`template!`](crate::template) at call sites.
    #[must_use]
    pub const fn new(strings: &'static [&'static str]) -> Self {
        Self { strings }
    }

    /// Returns the static fragments.
    #[must_use]
    pub fn strings(&self) -> &'static [&'static str] {
        self.strings
    }

    /// Returns the raw view of the fragments.
    ///
    /// Literals carry no escape processing here, so this equals
    /// [`strings`](Self::strings).
    #[must_use]
    pub fn raw(&self) -> &'static [&'static str] {
        self.strings
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns `true` if there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the identity key of this call site.
    #[must_use]
    pub fn key(&'static self) -> TemplateKey {
        TemplateKey(core::ptr::from_ref(self) as usize)
    }
}

impl fmt::Debug for TemplateStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TemplateStrings").field(&self.strings).finish()
    }
}

/// Identity of a template call site.
///
/// Two keys are equal only if they come from the same `'static` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateKey(usize);

/// Creates a `&'static` [`TemplateStrings`] bound to this call site.
///
/// ```
/// use graft_template::template;
///
/// let strings = template!("<b>", "</b>");
/// assert_eq!(strings.strings(), &["<b>", "</b>"]);
/// ```
#[macro_export]
macro_rules! template {
    ($($fragment:literal),+ $(,)?) => {{
        static STRINGS: $crate::TemplateStrings = $crate::TemplateStrings::new(&[$($fragment),+]);
        &STRINGS
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_site() -> &'static TemplateStrings {
        crate::template!("<p>", "</p>")
    }

    #[test]
    fn same_call_site_same_key() {
        assert_eq!(call_site().key(), call_site().key());
        assert!(core::ptr::eq(call_site(), call_site()));
    }

    #[test]
    fn identical_text_at_different_sites_differs() {
        let other = crate::template!("<p>", "</p>");
        assert_ne!(call_site().key(), other.key());
        assert_eq!(call_site().strings(), other.strings());
    }

    #[test]
    fn raw_matches_strings() {
        let strings = call_site();
        assert_eq!(strings.raw(), strings.strings());
        assert_eq!(strings.len(), 2);
        assert!(!strings.is_empty());
    }
}
