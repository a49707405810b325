//! Logging configuration and initialization
//!
//! The jmx crates log through `tracing` and never install a subscriber on
//! their own. Applications that want to see those events call
//! [`init_observability`] once at startup.
//!
//! # Events
//!
//! - `TRACE`: successful name parses and index lookups
//! - `DEBUG`: rejected input (malformed names, descriptor union conflicts,
//!   denied permission checks)
//!
//! # Usage Pattern
//!
//! ```rust,no_run
//! use jmx_core::ObservabilityConfig;
//!
//! let config = ObservabilityConfig::new("my-agent")
//!     .with_log_level("jmx_core=debug")
//!     .with_json(true);
//!
//! jmx_core::init_observability(config).expect("Failed to init logging");
//! tracing::info!("Agent started");
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level filter; takes precedence over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
///
/// # Defaults
///
/// - Service name: "jmx"
/// - Service version: Current crate version
/// - Log level: From `RUST_LOG` env var, or "info"
/// - Plain text output with thread ids and line numbers off
///
/// # Examples
///
/// ```rust
/// use jmx_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::new("name-index")
///     .with_log_level("debug")
///     .with_version("1.2.3")
///     .with_thread_ids(true);
/// assert_eq!(config.log_level, "debug");
/// ```
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    pub service_name: String,

    /// Service version attached to the startup event
    pub service_version: String,

    /// Filter directive used when `RUST_LOG` is unset, e.g. "info" or
    /// "jmx_query=trace"
    pub log_level: String,

    /// Emit JSON lines instead of human-readable text
    pub json: bool,

    /// Include the emitting thread's id
    pub thread_ids: bool,

    /// Include source line numbers
    pub line_number: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "jmx".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json: false,
            thread_ids: false,
            line_number: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration with a custom service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the log level filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    /// Switch between JSON and plain text output
    pub fn with_json(mut self, enable: bool) -> Self {
        self.json = enable;
        self
    }

    /// Include thread ids in each event
    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.thread_ids = enable;
        self
    }

    /// Include source line numbers in each event
    pub fn with_line_number(mut self, enable: bool) -> Self {
        self.line_number = enable;
        self
    }
}

/// Install a global `tracing` subscriber built from `config`
///
/// # Errors
///
/// - the log level is not a valid filter directive
/// - a global subscriber is already installed, including by an earlier call
pub fn init_observability(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    if config.json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(config.thread_ids)
            .with_line_number(config.line_number)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(config.thread_ids)
            .with_line_number(config.line_number);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    tracing::info!(
        service_name = %config.service_name,
        service_version = %config.service_version,
        json = config.json,
        "Logging initialized"
    );

    Ok(())
}
