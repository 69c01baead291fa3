//! Casegen CLI: export test cases to runnable test artifacts
//!
//! ## Usage
//!
//! ```bash
//! casegen export -i cases.json -p web -f playwright     # One script
//! casegen export -i cases.json -p mobile -f maestro --scaffold
//! casegen targets --platform api                        # List formats
//! casegen classify "Click the \"Save\" button"          # Inspect a step
//! casegen lint login.spec.ts                            # Check a script
//! ```

use casegen_cli::{
    handlers::{execute_classify, execute_export, execute_lint, execute_targets},
    init_tracing, Cli, CliConfig, CliError, CliResult, ColorChoice, Commands, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::LintFailed { errors }) => {
            eprintln!("Error: lint failed with {errors} error(s)");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Export(args) => execute_export(&config, &args),
        Commands::Targets(args) => execute_targets(&args),
        Commands::Classify(args) => execute_classify(&args),
        Commands::Lint(args) => execute_lint(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
