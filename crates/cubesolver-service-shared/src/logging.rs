//! Tracing subscriber setup for the service binary.
//!
//! - `LOG_FORMAT`: `json` (default) or `text`
//! - `RUST_LOG`: filter directives (default `info`)
//! - `SERVICE_NAME`: name stamped on the startup line

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human readable output.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`], case-insensitively.
    /// Everything else is JSON.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("text") || s.eq_ignore_ascii_case("pretty") {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is unset or unparsable.
    pub level: String,
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.format),
            level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.level),
            service: lookup("SERVICE_NAME").filter(|v| !v.trim().is_empty()),
        }
    }

    /// Fill in the service name; `SERVICE_NAME` still wins.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service.get_or_insert_with(|| service.into());
        self
    }
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_span_list(false))
            .try_init(),
    }
    .is_ok();

    if installed {
        tracing::info!(
            service = config.service.as_deref().unwrap_or("cubesolver"),
            format = ?config.format,
            "logging initialized"
        );
    }
    installed
}
