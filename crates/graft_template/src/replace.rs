//! Replace transforms applied before splitting a template.
//!
//! The template cache joins a literal's fragments with a private placeholder,
//! hands the joined body to a [`Replace`] implementation together with the
//! class's [`TemplateConfig`], and splits the result back on the placeholder.
//! Implementations must leave the placeholder untouched so the fragment count
//! survives the round trip; the cache rejects output that does not.
//!
//! Closures with the right signature implement [`Replace`] directly:
//!
//! ```
//! use graft_template::{Replace, TemplateConfig, TemplateError};
//!
//! let upper = |body: &str, _: &TemplateConfig| -> Result<String, TemplateError> {
//!     Ok(body.to_uppercase())
//! };
//! assert_eq!(upper.replace("<b>", &TemplateConfig::new()).unwrap(), "<B>");
//! ```

use regex::{Captures, Regex};

use crate::config::{Include, TemplateConfig};
use crate::error::TemplateError;

/// Token joining fragments while the replace transform runs.
pub(crate) const PLACEHOLDER: &str = "__graft__";

/// Transforms a joined template body according to class configuration.
pub trait Replace: Send + Sync + 'static {
    /// Returns the transformed body.
    fn replace(&self, joined: &str, config: &TemplateConfig) -> Result<String, TemplateError>;
}

impl<F> Replace for F
where
    F: Fn(&str, &TemplateConfig) -> Result<String, TemplateError> + Send + Sync + 'static,
{
    fn replace(&self, joined: &str, config: &TemplateConfig) -> Result<String, TemplateError> {
        self(joined, config)
    }
}

/// Rewrites component names listed in [`TemplateConfig::includes`].
///
/// Opening and closing tags are rewritten; a name only matches when it is not
/// followed by another name character, so `Counter` leaves `CounterList`
/// alone. An interpolation directly after the name ends it as well, so
/// `<Counter${attrs}>` is rewritten like `<Counter ...>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeReplace;

impl IncludeReplace {
    /// Creates the transform.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn pattern(config: &TemplateConfig) -> Result<Regex, TemplateError> {
        let names = config
            .includes
            .keys()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let placeholder = regex::escape(PLACEHOLDER);
        Regex::new(&format!(r"<(/?)({names})([^\w-]|{placeholder}|$)"))
            .map_err(|e| TemplateError::Replace(e.to_string()))
    }
}

impl Replace for IncludeReplace {
    fn replace(&self, joined: &str, config: &TemplateConfig) -> Result<String, TemplateError> {
        if config.is_empty() {
            return Ok(joined.to_owned());
        }

        let pattern = Self::pattern(config)?;
        let replaced = pattern.replace_all(joined, |caps: &Captures<'_>| {
            let closing = &caps[1];
            let tail = &caps[3];
            match config.includes.get(&caps[2]) {
                Some(Include::Tag(tag)) => format!("<{closing}{tag}{tail}"),
                Some(Include::Extends { tag, extends }) if closing.is_empty() => {
                    format!("<{extends} is=\"{tag}\"{tail}")
                }
                Some(Include::Extends { extends, .. }) => format!("</{extends}{tail}"),
                // The pattern only matches configured names.
                None => caps[0].to_owned(),
            }
        });

        Ok(replaced.into_owned())
    }
}
