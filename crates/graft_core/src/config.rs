//! Application configuration files.
//!
//! A graft configuration is a JSON document with an optional `tracing` section
//! and a map of named template configurations:
//!
//! ```json
//! {
//!   "tracing": { "level": "debug", "format": "compact" },
//!   "templates": {
//!     "dashboard": {
//!       "includes": {
//!         "Counter": "x-counter",
//!         "FancyButton": { "tag": "fancy-button", "extends": "button" }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Named template configurations are handed to component descriptors by name,
//! so several components can share one include map.

use std::path::Path;

use graft_template::TemplateConfig;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::tracing_setup::{TracingSettings, TracingSetup};

/// Parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraftConfig {
    /// Tracing settings.
    pub tracing: TracingSettings,
    /// Template configurations by name, in file order.
    pub templates: IndexMap<String, TemplateConfig>,
}

impl GraftConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if its content is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            templates = config.templates.len(),
            "loaded graft config"
        );
        Ok(config)
    }

    /// The template configuration registered under `name`.
    #[must_use]
    pub fn template(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.get(name)
    }

    /// Tracing setup described by the `tracing` section.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidLevel`] for an unknown level name.
    pub fn tracing_setup(&self) -> Result<TracingSetup, ConfigError> {
        TracingSetup::try_from(&self.tracing)
    }
}
