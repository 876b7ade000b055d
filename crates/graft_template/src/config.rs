//! Declarative per-class template configuration.
//!
//! A [`TemplateConfig`] tells the replace transform how to rewrite a
//! component's templates before they are split into fragments. The bundled
//! [`IncludeReplace`](crate::IncludeReplace) reads the `includes` map, which
//! maps component names used in markup to the tag the host knows them by.
//!
//! # Format
//!
//! ```json
//! {
//!   "includes": {
//!     "Counter": "x-counter",
//!     "FancyButton": { "tag": "fancy-button", "extends": "button" }
//!   }
//! }
//! ```
//!
//! With that configuration `<Counter></Counter>` becomes
//! `<x-counter></x-counter>` and `<FancyButton>` becomes
//! `<button is="fancy-button">`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Target of one `includes` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Include {
    /// Autonomous element: the name is replaced by this tag.
    Tag(String),
    /// Customized built-in: the name becomes `extends` with an `is` attribute.
    Extends {
        /// Tag the component is registered as.
        tag: String,
        /// Built-in element the component extends.
        extends: String,
    },
}

impl Include {
    /// The tag the component is registered as.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Include::Tag(tag) | Include::Extends { tag, .. } => tag,
        }
    }
}

/// Class-level template configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Component names rewritten inside templates, in declaration order.
    #[serde(default)]
    pub includes: IndexMap<String, Include>,
}

impl TemplateConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `name` to the autonomous element `tag`.
    #[must_use]
    pub fn with_include(mut self, name: impl Into<String>, tag: impl Into<String>) -> Self {
        self.includes.insert(name.into(), Include::Tag(tag.into()));
        self
    }

    /// Maps `name` to a customized built-in `extends` registered as `tag`.
    #[must_use]
    pub fn with_extends(
        mut self,
        name: impl Into<String>,
        tag: impl Into<String>,
        extends: impl Into<String>,
    ) -> Self {
        self.includes.insert(
            name.into(),
            Include::Extends {
                tag: tag.into(),
                extends: extends.into(),
            },
        );
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns `true` if nothing would be rewritten.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_include_forms() {
        let config = TemplateConfig::from_json(
            r#"{
                "includes": {
                    "Counter": "x-counter",
                    "FancyButton": { "tag": "fancy-button", "extends": "button" }
                }
            }"#,
        )
        .expect("valid config");

        assert_eq!(
            config.includes.get("Counter"),
            Some(&Include::Tag("x-counter".into()))
        );
        assert_eq!(
            config.includes.get("FancyButton"),
            Some(&Include::Extends {
                tag: "fancy-button".into(),
                extends: "button".into(),
            })
        );
    }

    #[test]
    fn includes_keep_declaration_order() {
        let config = TemplateConfig::from_json(r#"{"includes": {"B": "x-b", "A": "x-a"}}"#).unwrap();
        let names: Vec<_> = config.includes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn missing_includes_defaults_to_empty() {
        let config = TemplateConfig::from_json("{}").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn builder_matches_json() {
        let built = TemplateConfig::new()
            .with_include("Counter", "x-counter")
            .with_extends("FancyButton", "fancy-button", "button");
        let parsed = TemplateConfig::from_json(
            r#"{"includes": {"Counter": "x-counter", "FancyButton": {"tag": "fancy-button", "extends": "button"}}}"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.includes["FancyButton"].tag(), "fancy-button");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(TemplateConfig::from_json(r#"{"includes": 3}"#).is_err());
    }
}
