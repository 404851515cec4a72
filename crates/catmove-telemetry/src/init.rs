//! Telemetry initialisation primitives and logging configuration.
//!
//! # Design
//! - Centralises logging setup (host lines or JSON) with a single entry point.
//! - `RUST_LOG` overrides the configured level, as everywhere else in the ecosystem.
//! - Exposes the host layer separately so tests can attach it to their own writer.

use std::io;
use std::str::FromStr;

use tracing::Subscriber;
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TelemetryError, TelemetryResult};
use crate::format::HostFormat;

/// Default level when `RUST_LOG` is not provided. `debug` keeps `[DETAIL]` lines.
pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Level directive (e.g., `info`, `debug`).
    pub level: &'a str,
    /// Output format selection for the tracing subscriber.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::Host,
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `[SEVERITY] message` lines understood by NZBGet.
    #[default]
    Host,
    /// Structured JSON objects, for running the hook by hand.
    Json,
}

impl LogFormat {
    /// Stable name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "host" => Ok(Self::Host),
            "json" => Ok(Self::Json),
            _ => Err(TelemetryError::UnknownFormat {
                value: value.to_string(),
            }),
        }
    }
}

/// Configure and install the global tracing subscriber, writing to stdout.
///
/// # Errors
///
/// Returns an error if the level directive is invalid or a global subscriber
/// is already installed.
pub fn init_logging(config: &LoggingConfig) -> TelemetryResult<()> {
    let filter = build_env_filter(config.level)?;
    let installed = match config.format {
        LogFormat::Host => tracing_subscriber::registry()
            .with(filter)
            .with(host_layer(io::stdout))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(io::stdout),
            )
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// fmt layer rendering host log lines into `writer`.
#[must_use]
pub fn host_layer<S, W>(writer: W) -> fmt::Layer<S, DefaultFields, HostFormat, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_ansi(false)
        .event_format(HostFormat)
        .with_writer(writer)
}

/// Self-contained subscriber for scoped use with `tracing::subscriber::with_default`.
///
/// Unlike [`init_logging`], `RUST_LOG` is ignored so the output is deterministic.
///
/// # Errors
///
/// Returns an error if the level directive is invalid.
pub fn host_subscriber<W>(
    level: &str,
    writer: W,
) -> TelemetryResult<impl Subscriber + Send + Sync + use<W>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    Ok(tracing_subscriber::registry()
        .with(parse_filter(level)?)
        .with(host_layer(writer)))
}

fn build_env_filter(level: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| parse_filter(level))
}

fn parse_filter(level: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}
