//! Result and error types for Casegen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for Casegen operations
pub type CasegenResult<T> = Result<T, CasegenError>;

/// Errors that can occur while translating test cases
#[derive(Debug, Error)]
pub enum CasegenError {
    /// The (platform, format) pair has no registered emitter
    #[error("Unsupported format '{format}' for platform '{platform}'")]
    UnsupportedFormat {
        /// Requested platform
        platform: String,
        /// Requested format
        format: String,
    },

    /// An emitter that needs at least one test case received none
    #[error("No test cases to export for {target}")]
    EmptyInput {
        /// Target the request was made for
        target: String,
    },

    /// A step has neither an action type nor classifiable text.
    ///
    /// Never aborts an emission: emitters render a placeholder and record
    /// the error as a warning finding.
    #[error("Step {step_number} could not be classified: {detail}")]
    MalformedStep {
        /// Step number from the IR
        step_number: u32,
        /// What was wrong with the step
        detail: String,
    },

    /// Scaffolding could not assemble the archive
    #[error("Archive assembly failed: {detail}")]
    ArchiveAssembly {
        /// Error message
        detail: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Zip writer error
    #[cfg(feature = "archive")]
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Machine-readable error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unregistered (platform, format)
    UnsupportedFormat,
    /// Zero test cases where one is required
    EmptyInput,
    /// Unclassifiable step
    MalformedStep,
    /// Duplicate or invalid archive entries
    ArchiveAssembly,
    /// Serialization of an artifact failed
    Serialization,
    /// Writing archive bytes failed
    Io,
}

impl ErrorKind {
    /// Stable identifier used in machine-readable output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "unsupported_format",
            Self::EmptyInput => "empty_input",
            Self::MalformedStep => "malformed_step",
            Self::ArchiveAssembly => "archive_assembly",
            Self::Serialization => "serialization",
            Self::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CasegenError {
    /// Create an unsupported format error
    #[must_use]
    pub fn unsupported(platform: impl Into<String>, format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            platform: platform.into(),
            format: format.into(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(target: impl Into<String>) -> Self {
        Self::EmptyInput {
            target: target.into(),
        }
    }

    /// Create a malformed step error
    #[must_use]
    pub fn malformed_step(step_number: u32, detail: impl Into<String>) -> Self {
        Self::MalformedStep {
            step_number,
            detail: detail.into(),
        }
    }

    /// Create an archive assembly error
    #[must_use]
    pub fn archive(detail: impl Into<String>) -> Self {
        Self::ArchiveAssembly {
            detail: detail.into(),
        }
    }

    /// Machine-readable kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::MalformedStep { .. } => ErrorKind::MalformedStep,
            Self::ArchiveAssembly { .. } => ErrorKind::ArchiveAssembly,
            Self::Json(_) | Self::Yaml(_) => ErrorKind::Serialization,
            #[cfg(feature = "archive")]
            Self::Zip(_) => ErrorKind::Io,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the error aborts the request it occurred in
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedStep { .. })
    }
}
