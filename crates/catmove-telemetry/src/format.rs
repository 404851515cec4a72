//! Event formatter producing NZBGet log lines.
//!
//! # Design
//! - One event, one line: `[<SEVERITY>] <message> <fields>`.
//! - No timestamps or targets; NZBGet stamps lines itself.

use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Severity tag NZBGet understands for a tracing level.
///
/// `DEBUG` maps to `DETAIL`, which NZBGet shows in its detail log; `TRACE`
/// maps to NZBGet's own `DEBUG`, which only debug builds of NZBGet display.
#[must_use]
pub fn host_severity(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DETAIL",
        Level::TRACE => "DEBUG",
    }
}

/// `FormatEvent` implementation rendering host log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFormat;

impl<S, N> FormatEvent<S, N> for HostFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] ", host_severity(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
