//! Emitter registry: the fixed table from (platform, format) to emitter.
//!
//! The table is static and read-only, so lookups need no synchronization and
//! independent targets can be emitted in parallel with [`emit_batch`].

use rayon::prelude::*;
use tracing::{debug, info};

use crate::artifact::{artifact_filename, EmittedArtifact};
use crate::clock::Clock;
use crate::config::EmitOptions;
use crate::emit::{a11y, api, har, mobile, perf, web};
use crate::ir::TestCase;
use crate::result::{CasegenError, CasegenResult};
use crate::target::{EmissionTarget, Format, Platform};

/// Everything an emitter reads
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Cases to translate, in input order
    pub test_cases: &'a [TestCase],
    /// Suite name used in titles and filenames
    pub suite_name: &'a str,
    /// Time source
    pub clock: &'a dyn Clock,
    /// Emission options
    pub options: &'a EmitOptions,
}

impl<'a> EmitContext<'a> {
    /// Create a context
    #[must_use]
    pub const fn new(
        test_cases: &'a [TestCase],
        suite_name: &'a str,
        clock: &'a dyn Clock,
        options: &'a EmitOptions,
    ) -> Self {
        Self {
            test_cases,
            suite_name,
            clock,
            options,
        }
    }

    /// Artifact filename for `format`
    #[must_use]
    pub fn filename(&self, format: Format) -> String {
        artifact_filename(self.suite_name, format, self.clock)
    }
}

/// Emitter entry point
pub type EmitterFn = fn(&EmitContext<'_>) -> CasegenResult<EmittedArtifact>;

/// One registered (platform, format) pair
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    /// Platform
    pub platform: Platform,
    /// Format
    pub format: Format,
    /// Emitter
    pub emitter: EmitterFn,
}

impl Registration {
    const fn new(platform: Platform, format: Format, emitter: EmitterFn) -> Self {
        Self {
            platform,
            format,
            emitter,
        }
    }

    /// The pair as a target
    #[must_use]
    pub const fn target(&self) -> EmissionTarget {
        EmissionTarget::new(self.platform, self.format)
    }
}

static REGISTRY: [Registration; 18] = [
    Registration::new(Platform::Web, Format::Playwright, web::emit_playwright),
    Registration::new(Platform::Web, Format::Cypress, web::emit_cypress),
    Registration::new(Platform::Web, Format::Selenium, web::emit_selenium),
    Registration::new(Platform::Api, Format::Postman, api::emit_postman),
    Registration::new(Platform::Api, Format::Insomnia, api::emit_insomnia),
    Registration::new(Platform::Api, Format::OpenApi, api::emit_openapi),
    Registration::new(Platform::Api, Format::Har, har::emit_har),
    Registration::new(Platform::Mobile, Format::Appium, mobile::emit_appium),
    Registration::new(Platform::Mobile, Format::Detox, mobile::emit_detox),
    Registration::new(Platform::Mobile, Format::Espresso, mobile::emit_espresso),
    Registration::new(Platform::Mobile, Format::Maestro, mobile::emit_maestro),
    Registration::new(Platform::Performance, Format::K6, perf::emit_k6),
    Registration::new(Platform::Performance, Format::JMeter, perf::emit_jmeter),
    Registration::new(Platform::Performance, Format::Artillery, perf::emit_artillery),
    Registration::new(Platform::Performance, Format::Locust, perf::emit_locust),
    Registration::new(Platform::Accessibility, Format::Axe, a11y::emit_axe),
    Registration::new(Platform::Accessibility, Format::Pa11y, a11y::emit_pa11y),
    Registration::new(Platform::Accessibility, Format::Lighthouse, a11y::emit_lighthouse),
];

/// All registrations in display order
#[must_use]
pub fn registrations() -> &'static [Registration] {
    &REGISTRY
}

/// All registered targets in display order
#[must_use]
pub fn targets() -> Vec<EmissionTarget> {
    registrations().iter().map(Registration::target).collect()
}

/// Formats registered for one platform
#[must_use]
pub fn formats_for(platform: Platform) -> Vec<Format> {
    registrations()
        .iter()
        .filter(|r| r.platform == platform)
        .map(|r| r.format)
        .collect()
}

/// Look up the emitter of a pair.
///
/// # Errors
///
/// `UnsupportedFormat` when the pair is not registered
pub fn resolve_emitter(platform: Platform, format: Format) -> CasegenResult<EmitterFn> {
    registrations()
        .iter()
        .find(|r| r.platform == platform && r.format == format)
        .map(|r| r.emitter)
        .ok_or_else(|| CasegenError::unsupported(platform.as_str(), format.as_str()))
}

/// Resolve and run one target.
///
/// # Errors
///
/// `UnsupportedFormat` for an unregistered pair, or the emitter's own error
pub fn emit(target: EmissionTarget, ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let emitter = resolve_emitter(target.platform, target.format)?;
    debug!(%target, cases = ctx.test_cases.len(), "dispatching emitter");
    let artifact = emitter(ctx)?;
    info!(
        %target,
        filename = %artifact.filename,
        bytes = artifact.len(),
        findings = artifact.findings.len(),
        "emitted artifact"
    );
    Ok(artifact)
}

/// Run several targets in parallel; results keep the order of `targets`
#[must_use]
pub fn emit_batch(
    targets: &[EmissionTarget],
    ctx: &EmitContext<'_>,
) -> Vec<(EmissionTarget, CasegenResult<EmittedArtifact>)> {
    targets
        .par_iter()
        .map(|&target| (target, emit(target, ctx)))
        .collect()
}
