//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Casegen: export platform-agnostic test cases to runnable test artifacts
#[derive(Parser, Debug)]
#[command(name = "casegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate test cases into one target format
    Export(ExportArgs),

    /// List supported (platform, format) targets
    Targets(TargetsArgs),

    /// Show how a step would be classified
    Classify(ClassifyArgs),

    /// Lint a generated script and print its metadata
    Lint(LintArgs),
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Test cases file (JSON array, or an object with `test_cases`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target platform (web, api, mobile, performance, accessibility)
    #[arg(short, long)]
    pub platform: String,

    /// Target format (playwright, postman, k6, maestro, ...)
    #[arg(short, long)]
    pub format: String,

    /// Suite name (defaults to the input's name or file stem)
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Output file or directory (defaults to the generated filename)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a zipped project instead of a single file
    #[arg(long)]
    pub scaffold: bool,

    /// Emission options file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the system under test
    #[arg(long, env = "CASEGEN_BASE_URL")]
    pub base_url: Option<String>,

    /// Print the artifact to stdout instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "scaffold"])]
    pub stdout: bool,
}

/// Arguments for the targets command
#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Only list formats of this platform
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputArg,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Step text, e.g. "Click the \"Save\" button"
    pub text: String,

    /// Explicit selector
    #[arg(long)]
    pub selector: Option<String>,

    /// Explicit input value
    #[arg(long)]
    pub value: Option<String>,
}

/// Arguments for the lint command
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Script to lint
    pub script: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub output: OutputArg,
}

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

impl From<OutputArg> for crate::output::OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => Self::Text,
            OutputArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    mod cli_parsing_tests {
        use super::*;

        #[test]
        fn test_verify_cli() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_export() {
            let cli = Cli::try_parse_from([
                "casegen", "export", "-i", "cases.json", "-p", "web", "-f", "playwright",
                "--suite", "Auth", "--scaffold",
            ])
            .unwrap();
            match cli.command {
                Commands::Export(args) => {
                    assert_eq!(args.input, PathBuf::from("cases.json"));
                    assert_eq!(args.platform, "web");
                    assert_eq!(args.format, "playwright");
                    assert_eq!(args.suite.as_deref(), Some("Auth"));
                    assert!(args.scaffold);
                    assert!(!args.stdout);
                }
                _ => panic!("expected Export command"),
            }
        }

        #[test]
        fn test_stdout_conflicts_with_scaffold() {
            let result = Cli::try_parse_from([
                "casegen", "export", "-i", "c.json", "-p", "web", "-f", "cypress", "--stdout",
                "--scaffold",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_classify() {
            let cli = Cli::try_parse_from(["casegen", "classify", "Wait 2 seconds"]).unwrap();
            match cli.command {
                Commands::Classify(args) => assert_eq!(args.text, "Wait 2 seconds"),
                _ => panic!("expected Classify command"),
            }
        }

        #[test]
        fn test_parse_lint_json() {
            let cli =
                Cli::try_parse_from(["casegen", "lint", "a.spec.ts", "--output", "json"]).unwrap();
            match cli.command {
                Commands::Lint(args) => assert_eq!(args.output, OutputArg::Json),
                _ => panic!("expected Lint command"),
            }
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::try_parse_from(["casegen", "-vv", "--color", "never", "targets"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
        }

        #[test]
        fn test_requires_subcommand() {
            assert!(Cli::try_parse_from(["casegen"]).is_err());
        }
    }
}
