//! Command-line entry point.
//!
//! NZBGet runs the binary without arguments; everything it needs arrives
//! through the environment. The `manifest` subcommand exists for packaging.
//! On the hook path the exit code is always one NZBGet understands, so
//! argument and logging problems never surface as clap's own exit codes.

use std::io;

use catmove_config::ProcessEnv;
use catmove_fsops::DirectoryMover;
use catmove_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, TelemetryError, init_logging,
};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::manifest;
use crate::protocol::{self, ExitStatus};

#[derive(Parser)]
#[command(
    name = "catmove",
    version,
    about = "NZBGet post-processing hook that moves completed downloads by category"
)]
struct Cli {
    /// Log output format: `host` lines for NZBGet or `json`. Unknown values
    /// fall back to `host`.
    #[arg(long, global = true, env = "CATMOVE_LOG_FORMAT")]
    log_format: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the NZBGet extension manifest.
    Manifest(ManifestArgs),
}

#[derive(Args)]
struct ManifestArgs {
    /// Pretty-print the JSON document.
    #[arg(long)]
    pretty: bool,
}

/// Parses CLI arguments, runs the requested command, and returns the process
/// exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitStatus::Error.code()
            } else {
                0
            };
        }
    };
    match cli.command {
        Some(Command::Manifest(args)) => print_manifest(&args),
        None => run_hook(cli.log_format.as_deref()),
    }
}

fn run_hook(log_format: Option<&str>) -> i32 {
    let (format, rejected) = select_log_format(log_format);
    let config = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format,
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: logging unavailable: {err}");
    }
    if let Some(err) = rejected {
        warn!("{err}; using {} log format", format.as_str());
    }

    protocol::execute(&ProcessEnv, &DirectoryMover, &mut io::stdout()).code()
}

/// Requested log format, or the host format plus the parse error when the
/// value is not recognised.
fn select_log_format(raw: Option<&str>) -> (LogFormat, Option<TelemetryError>) {
    match raw.map(str::parse::<LogFormat>).transpose() {
        Ok(format) => (format.unwrap_or_default(), None),
        Err(err) => (LogFormat::Host, Some(err)),
    }
}

fn print_manifest(args: &ManifestArgs) -> i32 {
    match manifest::render(args.pretty) {
        Ok(document) => {
            println!("{document}");
            0
        }
        Err(err) => {
            eprintln!("error: failed to render manifest: {err}");
            1
        }
    }
}
