//! Ambient infrastructure for graft.
//!
//! - [`TracingSetup`] - Configures and installs the `tracing` subscriber
//! - [`GraftConfig`] - JSON configuration with tracing settings and named
//!   template configurations
//! - [`ConfigError`] - Errors from loading or applying configuration

/// Configuration file loading.
pub mod config;

/// Error types for configuration.
pub mod error;

/// Tracing subscriber setup.
pub mod tracing_setup;

pub use config::GraftConfig;
pub use error::ConfigError;
pub use tracing_setup::{TracingFormat, TracingSettings, TracingSetup};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::GraftConfig;
    pub use crate::error::ConfigError;
    pub use crate::tracing_setup::{TracingFormat, TracingSettings, TracingSetup};
}
