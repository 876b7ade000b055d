//! Error types for component lifecycle dispatch.

use graft_template::TemplateError;

/// Boxed error returned by user hooks.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Error surfaced from a lifecycle callback, hook or render.
///
/// Nothing here is recovered from: whichever layer fails stops the callback
/// and the error reaches the host's call site.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// An event was routed to a hook the component does not define.
    #[error("no `{method}` handler for dispatched event")]
    MissingHandler {
        /// Hook name the event was routed to (`on<type>`).
        method: String,
    },

    /// A method was called that the component does not define.
    #[error("component does not define `{method}`")]
    MissingMethod {
        /// Name of the missing method.
        method: &'static str,
    },

    /// Template resolution or rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A user hook failed.
    #[error("hook failed: {0}")]
    Hook(#[source] BoxError),
}

impl ComponentError {
    /// Wraps an arbitrary error raised inside a hook.
    pub fn hook(error: impl Into<BoxError>) -> Self {
        Self::Hook(error.into())
    }
}
