//! Casegen CLI Library
//!
//! Command-line interface for the casegen test-case translator.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    ClassifyArgs, Cli, ColorArg, Commands, ExportArgs, LintArgs, OutputArg, TargetsArgs,
};
pub use config::{load_emit_options, parse_emit_options, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{count_findings, OutputFormat, ProgressReporter};

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over the verbosity flags. Safe to call more than once.
pub fn init_tracing(config: &CliConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init();
}
