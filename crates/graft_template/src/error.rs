//! Error types for template processing.

/// Error produced while parsing, transforming or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The replace transform changed the number of fragments.
    #[error("replace transform produced {found} fragments, expected {expected}")]
    FragmentMismatch {
        /// Fragment count of the literal.
        expected: usize,
        /// Fragment count after the transform.
        found: usize,
    },

    /// A hole's values do not fit between its fragments.
    #[error("template has {fragments} fragments but {values} values")]
    ArityMismatch {
        /// Number of static fragments.
        fragments: usize,
        /// Number of interpolated values.
        values: usize,
    },

    /// The replace transform reported a failure.
    #[error("replace transform failed: {0}")]
    Replace(String),

    /// The render target was dropped before the render function ran.
    #[error("render target is no longer alive")]
    DanglingTarget,

    /// The owner of a keyed render was dropped before the render ran.
    #[error("keyed render owner is no longer alive")]
    DanglingReference,
}
