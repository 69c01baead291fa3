//! Casegen: compile platform-agnostic test cases into runnable test artifacts
//!
//! A test case is an ordered list of natural-language steps with optional
//! selectors, input values and assertions. Casegen classifies each step into a
//! concrete action, resolves a locator for it, and lowers the result into one
//! of eighteen target formats across five platforms: browser E2E scripts, API
//! collections, mobile UI tests, load tests and accessibility scans.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CASEGEN Pipeline                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ TestCase[] │    │ Classifier │    │ Registry   │            │
//! │   │ (IR)       │───►│ + Selector │───►│ (platform, │            │
//! │   │            │    │   Mapper   │    │  format)   │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             ▼                   │
//! │                     ┌────────────┐    ┌────────────┐            │
//! │                     │ Scaffolder │◄───│ Emitter    │            │
//! │                     │ (Archive)  │    │ (artifact) │            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use casegen::prelude::*;
//!
//! let cases = vec![TestCase::new("Login")
//!     .with_step(Step::new(1, "Navigate to /login"))
//!     .with_step(Step::new(2, "Click the \"Sign in\" button"))];
//! let clock = FixedClock::at_ms(1_700_000_000_000);
//! let options = EmitOptions::default();
//! let ctx = EmitContext::new(&cases, "Auth", &clock, &options);
//!
//! let target = EmissionTarget::parse("web", "playwright").unwrap();
//! let artifact = emit(target, &ctx).unwrap();
//! assert!(artifact.content.contains("// Step 1: Navigate to /login"));
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod result;

/// Canonical test-case model
pub mod ir;

/// Injectable time source
pub mod clock;

/// Emission options
pub mod config;

/// String escaping for generated source
pub mod escape;

/// Platforms, formats and emission targets
pub mod target;

/// Emitted artifacts and filename rules
pub mod artifact;

/// Step action classification
#[allow(clippy::missing_panics_doc)]
pub mod classifier;

/// Locator resolution per framework family
pub mod selector;

/// HTTP request inference from steps
#[allow(clippy::missing_panics_doc)]
pub mod http;

/// Emitters for every supported format
#[allow(clippy::format_push_string, clippy::too_many_lines)]
pub mod emit;

/// Static (platform, format) dispatch table
pub mod registry;

/// Project scaffolding and archives
#[allow(clippy::too_many_lines)]
pub mod scaffold;

/// Generated script linter and metadata extractor
#[allow(clippy::missing_panics_doc)]
pub mod lint;

pub use artifact::{case_filename, slugify, EmittedArtifact};
pub use classifier::{classify, InferredAction};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EmitOptions, LoadProfile};
pub use ir::{ActionKind, Assertion, AssertionKind, Priority, Step, TestCase};
pub use lint::{extract_metadata, lint, LintFinding, LintReport, ScriptMetadata, Severity};
pub use registry::{emit, emit_batch, formats_for, resolve_emitter, targets, EmitContext};
pub use result::{CasegenError, CasegenResult, ErrorKind};
pub use scaffold::{scaffold, scaffold_project, Archive, ArchiveEntry, SuiteMeta};
pub use target::{ArtifactKind, EmissionTarget, Format, Platform};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::artifact::*;
    pub use super::classifier::{classify, InferredAction, Origin};
    pub use super::clock::*;
    pub use super::config::*;
    pub use super::http::{collect_requests, infer_request, HttpCall, HttpMethod};
    pub use super::ir::*;
    pub use super::lint::*;
    pub use super::registry::*;
    pub use super::result::*;
    pub use super::scaffold::*;
    pub use super::selector::{resolve, FrameworkFamily, Locator, ResolvedLocator};
    pub use super::target::*;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod pipeline_tests {
        use super::*;

        #[test]
        fn test_every_target_emits_for_one_case() {
            let cases = vec![TestCase::new("Smoke")
                .with_step(Step::new(1, "Navigate to /"))
                .with_step(Step::new(2, "Verify the \"Welcome\" text is visible"))];
            let clock = FixedClock::at_ms(1_700_000_000_000);
            let options = EmitOptions::default();
            let ctx = EmitContext::new(&cases, "Smoke", &clock, &options);
            for target in targets() {
                let artifact = emit(target, &ctx).unwrap();
                assert!(!artifact.is_empty(), "{target} produced nothing");
                assert!(artifact.filename.starts_with("smoke-"));
            }
        }

        #[test]
        fn test_error_kind_is_reexported() {
            let err = resolve_emitter(Platform::Web, Format::Postman).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        }
    }
}
