//! CLI configuration

use crate::error::{CliError, CliResult};
use casegen::EmitOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "casegen=info,casegen_cli=info",
            Self::Debug => "casegen=debug,casegen_cli=debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Parse emission options from a config file body.
///
/// `.json` files are read as JSON; anything else as YAML.
pub fn parse_emit_options(body: &str, path: &Path) -> CliResult<EmitOptions> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(body).map_err(|e| e.to_string())
    } else {
        EmitOptions::from_yaml(body).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| CliError::config(format!("{}: {e}", path.display())))
}

/// Load emission options: file (if any), then the base URL override
pub fn load_emit_options(path: Option<&Path>, base_url: Option<&str>) -> CliResult<EmitOptions> {
    let mut options = match path {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
            parse_emit_options(&body, path)?
        }
        None => EmitOptions::default(),
    };
    if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
        options = options.with_base_url(url.trim());
    }
    Ok(options)
}
