//! Tracing subscriber setup.
//!
//! [`TracingSetup`] configures the `tracing` subscriber the graft crates log
//! through. Augmentation and init transitions log at `debug`, template cache
//! lookups and event dispatch at `trace`.
//!
//! # Example
//!
//! ```
//! use graft_core::{TracingFormat, TracingSetup};
//! use tracing::Level;
//!
//! // Development: pretty output with graft internals at trace level
//! let dev = TracingSetup::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .with_env_filter("graft_template=trace,graft_component=debug");
//!
//! // Production: JSON output for log aggregation
//! let prod = TracingSetup::new()
//!     .with_level(Level::INFO)
//!     .with_format(TracingFormat::Json);
//! # let _ = (dev, prod);
//! ```

use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingSetup
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing subscriber configuration.
///
/// Uses the [`tracing`] and [`tracing_subscriber`] crates under the hood.
#[derive(Debug, Clone)]
pub struct TracingSetup {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Environment filter (e.g., "graft_component=debug,graft_template=trace").
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for TracingSetup {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingSetup {
    /// Creates a setup with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// The configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The configured format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// Builds the environment filter.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFilter`] if the custom filter does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter).map_err(|e| ConfigError::InvalidFilter {
                filter: filter.clone(),
                reason: e.to_string(),
            }),
            None => Ok(EnvFilter::new(self.level.as_str())),
        }
    }

    /// Installs the global subscriber.
    ///
    /// Returns `false` if a global subscriber was already installed, in which
    /// case the existing one is kept.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidFilter`] if the custom filter does not parse.
    pub fn init(&self) -> Result<bool, ConfigError> {
        let env_filter = self.env_filter()?;

        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            TracingFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
        };

        if installed {
            tracing::info!(
                level = %self.level,
                format = ?self.format,
                "tracing initialized"
            );
        }
        Ok(installed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Declarative settings
// ─────────────────────────────────────────────────────────────────────────────

/// The `tracing` section of a [`GraftConfig`](crate::GraftConfig) file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracingSettings {
    /// Level name (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: Option<String>,
    /// Output format.
    pub format: TracingFormat,
    /// Environment filter string.
    pub env_filter: Option<String>,
    /// Whether to include span events.
    pub span_events: bool,
}

impl TryFrom<&TracingSettings> for TracingSetup {
    type Error = ConfigError;

    fn try_from(settings: &TracingSettings) -> Result<Self, Self::Error> {
        let mut setup = TracingSetup::new()
            .with_format(settings.format)
            .with_span_events(settings.span_events);

        if let Some(level) = &settings.level {
            let level = level
                .parse::<Level>()
                .map_err(|_| ConfigError::InvalidLevel {
                    level: level.clone(),
                })?;
            setup = setup.with_level(level);
        }
        if let Some(filter) = &settings.env_filter {
            setup = setup.with_env_filter(filter.clone());
        }
        Ok(setup)
    }
}
