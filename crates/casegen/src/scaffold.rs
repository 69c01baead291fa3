//! Project scaffolding: wrap emitted artifacts in a runnable project.
//!
//! An [`Archive`] is an ordered list of files under one root directory,
//! `<format>-<slug(suite)>-<id fragment>/`. Paths are unique; adding a path
//! twice is an `ArchiveAssembly` error. Everything is derived from the inputs
//! and the clock, so two scaffolds of the same cases at the same instant are
//! identical, byte for byte once zipped.

use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::artifact::{case_filename, slugify, EmittedArtifact};
use crate::clock::Clock;
use crate::config::EmitOptions;
use crate::emit::mobile::kotlin_package;
use crate::emit::unique_titles;
use crate::lint::LintFinding;
use crate::registry::{emit, EmitContext};
use crate::result::{CasegenError, CasegenResult};
use crate::target::{EmissionTarget, Format};

/// Suite identity used for the archive root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteMeta {
    /// Suite name
    pub name: String,
    /// Stable suite id; its first 8 hex characters become the id fragment
    pub id: Option<String>,
    /// Number of test cases stated in the README (defaults to the artifact count)
    pub case_count: Option<usize>,
}

impl SuiteMeta {
    /// Suite without an id
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            case_count: None,
        }
    }

    /// Set the suite id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the stated case count
    #[must_use]
    pub const fn with_case_count(mut self, count: usize) -> Self {
        self.case_count = Some(count);
        self
    }

    /// First 8 hex characters of the id, or of `sha256(name ‖ clock millis)`
    #[must_use]
    pub fn id_fragment(&self, clock: &dyn Clock) -> String {
        if let Some(id) = &self.id {
            let hex: String = id
                .chars()
                .filter(char::is_ascii_hexdigit)
                .take(8)
                .collect::<String>()
                .to_ascii_lowercase();
            if hex.len() == 8 {
                return hex;
            }
        }
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(clock.now_ms().to_string().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..8].to_string()
    }
}

/// One file of an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path relative to the archive root
    pub path: String,
    /// File contents
    pub content: String,
}

/// Files of a scaffolded project, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    root: String,
    entries: Vec<ArchiveEntry>,
    created_ms: u64,
    findings: Vec<LintFinding>,
}

impl Archive {
    /// Empty archive rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<String>, created_ms: u64) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
            created_ms,
            findings: Vec::new(),
        }
    }

    /// Root directory name
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Number of files
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive has no files
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings collected from the emitters
    #[must_use]
    pub fn findings(&self) -> &[LintFinding] {
        &self.findings
    }

    /// Contents of the file at a root-relative path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.content.as_str())
    }

    /// Path including the root directory
    #[must_use]
    pub fn full_path(&self, entry: &ArchiveEntry) -> String {
        format!("{}/{}", self.root, entry.path)
    }

    /// Add a file.
    ///
    /// # Errors
    ///
    /// `ArchiveAssembly` when the path is empty, absolute, escapes the root,
    /// or is already present
    pub fn add(&mut self, path: impl Into<String>, content: impl Into<String>) -> CasegenResult<()> {
        let path = path.into();
        if path.is_empty() || path.starts_with('/') || path.split('/').any(|seg| seg == "..") {
            return Err(CasegenError::archive(format!("invalid path '{path}'")));
        }
        if self.entries.iter().any(|e| e.path == path) {
            return Err(CasegenError::archive(format!("duplicate path '{path}'")));
        }
        self.entries.push(ArchiveEntry {
            path,
            content: content.into(),
        });
        Ok(())
    }

    /// Write the archive as a zip file into memory.
    ///
    /// Entries keep insertion order and carry the archive's creation time,
    /// so the bytes depend only on the contents and the clock.
    ///
    /// # Errors
    ///
    /// Returns the zip writer error
    #[cfg(feature = "archive")]
    pub fn to_zip(&self) -> CasegenResult<Vec<u8>> {
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;

        let modified = zip_timestamp(self.created_ms);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(modified)
            .unix_permissions(0o644);

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &self.entries {
            writer.start_file(self.full_path(entry), options)?;
            writer.write_all(entry.content.as_bytes())?;
        }
        let cursor = writer.finish()?;
        debug!(root = %self.root, files = self.entries.len(), "zipped archive");
        Ok(cursor.into_inner())
    }
}

#[cfg(feature = "archive")]
fn zip_timestamp(ms: u64) -> zip::DateTime {
    use chrono::{Datelike, TimeZone, Timelike, Utc};

    let Some(dt) = Utc.timestamp_millis_opt(i64::try_from(ms).unwrap_or(0)).single() else {
        return zip::DateTime::default();
    };
    let (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) = (
        u16::try_from(dt.year()),
        u8::try_from(dt.month()),
        u8::try_from(dt.day()),
        u8::try_from(dt.hour()),
        u8::try_from(dt.minute()),
        u8::try_from(dt.second()),
    ) else {
        return zip::DateTime::default();
    };
    // Zip timestamps start in 1980
    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second).unwrap_or_default()
}

/// Root directory name `<format>-<slug(suite)>-<id fragment>`
#[must_use]
pub fn archive_root(format: Format, meta: &SuiteMeta, clock: &dyn Clock) -> String {
    let mut slug = slugify(&meta.name);
    if slug.is_empty() {
        slug = "suite".to_string();
    }
    format!("{}-{slug}-{}", format.as_str(), meta.id_fragment(clock))
}

/// Wrap artifacts in a project for `target`.
///
/// Artifacts land in the format's test directory under their own filenames,
/// next to the manifest, framework config, support files, `.env.example`,
/// `.gitignore`, and a README.
///
/// # Errors
///
/// `ArchiveAssembly` when two files would share a path
pub fn scaffold(
    target: EmissionTarget,
    artifacts: &[EmittedArtifact],
    meta: &SuiteMeta,
    options: &EmitOptions,
    clock: &dyn Clock,
) -> CasegenResult<Archive> {
    let format = target.format;
    let layout = Layout::of(format, options);
    let mut archive = Archive::new(archive_root(format, meta, clock), clock.now_ms());

    for artifact in artifacts {
        archive.add(format!("{}/{}", layout.test_dir, artifact.filename), artifact.content.clone())?;
        archive.findings.extend(artifact.findings.iter().cloned());
    }

    let count = meta.case_count.unwrap_or(artifacts.len());
    let files: Vec<String> = artifacts.iter().map(|a| a.filename.clone()).collect();
    for (path, content) in boilerplate(target, &layout, meta, options, count, &files)? {
        archive.add(path, content)?;
    }

    info!(
        root = %archive.root,
        files = archive.len(),
        cases = count,
        "scaffolded project"
    );
    Ok(archive)
}

/// Emit one artifact per test case (`NNN-slug.ext`) and scaffold them.
///
/// # Errors
///
/// Any emitter error, or `ArchiveAssembly`
pub fn scaffold_project(
    target: EmissionTarget,
    ctx: &EmitContext<'_>,
    meta: &SuiteMeta,
) -> CasegenResult<Archive> {
    let titles = unique_titles(ctx.test_cases);
    let mut artifacts = Vec::with_capacity(ctx.test_cases.len());
    for (i, (case, title)) in ctx.test_cases.iter().zip(&titles).enumerate() {
        let single = EmitContext::new(std::slice::from_ref(case), title, ctx.clock, ctx.options);
        let mut artifact = emit(target, &single)?;
        artifact.filename = case_filename(i + 1, title, target.format);
        artifacts.push(artifact);
    }
    let meta = SuiteMeta {
        case_count: Some(ctx.test_cases.len()),
        ..meta.clone()
    };
    scaffold(target, &artifacts, &meta, ctx.options, ctx.clock)
}

// =============================================================================
// Per-ecosystem layout
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ecosystem {
    Node,
    Python,
    Kotlin,
    Data,
}

#[derive(Debug, Clone)]
struct Layout {
    ecosystem: Ecosystem,
    test_dir: String,
}

impl Layout {
    fn of(format: Format, options: &EmitOptions) -> Self {
        let (ecosystem, dir) = match format {
            Format::Playwright => (Ecosystem::Node, "tests".to_string()),
            Format::Axe => (Ecosystem::Node, "tests/a11y".to_string()),
            Format::Cypress => (Ecosystem::Node, "cypress/e2e".to_string()),
            Format::Appium => (Ecosystem::Node, "test/specs".to_string()),
            Format::Detox => (Ecosystem::Node, "e2e".to_string()),
            Format::Selenium => (Ecosystem::Python, "tests".to_string()),
            Format::Locust => (Ecosystem::Python, "locustfiles".to_string()),
            Format::Espresso => (
                Ecosystem::Kotlin,
                format!(
                    "app/src/androidTest/java/{}",
                    kotlin_package(&options.app_id).replace('.', "/")
                ),
            ),
            Format::Maestro => (Ecosystem::Data, ".maestro".to_string()),
            Format::K6 => (Ecosystem::Data, "scripts".to_string()),
            Format::Postman | Format::Insomnia => (Ecosystem::Data, "collections".to_string()),
            Format::OpenApi => (Ecosystem::Data, "specs".to_string()),
            Format::Har => (Ecosystem::Data, "har".to_string()),
            Format::JMeter => (Ecosystem::Data, "plans".to_string()),
            Format::Artillery => (Ecosystem::Data, "scenarios".to_string()),
            Format::Pa11y => (Ecosystem::Data, "pa11y".to_string()),
            Format::Lighthouse => (Ecosystem::Data, "lighthouse".to_string()),
        };
        Self {
            ecosystem,
            test_dir: dir,
        }
    }
}

fn boilerplate(
    target: EmissionTarget,
    layout: &Layout,
    meta: &SuiteMeta,
    options: &EmitOptions,
    count: usize,
    files: &[String],
) -> CasegenResult<Vec<(String, String)>> {
    let format = target.format;
    let mut slug = slugify(&meta.name);
    if slug.is_empty() {
        slug = "suite".to_string();
    }
    let mut out = Vec::new();

    match layout.ecosystem {
        Ecosystem::Node => out.push(("package.json".to_string(), package_json(format, &slug)?)),
        Ecosystem::Python => out.push(("requirements.txt".to_string(), requirements(format))),
        Ecosystem::Kotlin => {
            out.push(("settings.gradle.kts".to_string(), settings_gradle(&slug)));
            out.push(("app/build.gradle.kts".to_string(), build_gradle(options)));
        }
        Ecosystem::Data => {
            let manifest = json!({
                "name": meta.name,
                "platform": target.platform.as_str(),
                "format": format.as_str(),
                "generator": format!("casegen {}", env!("CARGO_PKG_VERSION")),
                "testCases": count,
                "files": files
                    .iter()
                    .map(|f| format!("{}/{f}", layout.test_dir))
                    .collect::<Vec<_>>(),
            });
            out.push(("casegen.json".to_string(), serde_json::to_string_pretty(&manifest)? + "\n"));
        }
    }

    out.extend(framework_files(format, layout, options));
    out.push((".env.example".to_string(), env_example(format, options)));
    out.push((".gitignore".to_string(), gitignore(layout.ecosystem)));
    out.push(("README.md".to_string(), readme(target, layout, meta, count)));
    Ok(out)
}

fn package_json(format: Format, slug: &str) -> CasegenResult<String> {
    let (deps, test): (&[(&str, &str)], &str) = match format {
        Format::Playwright => (&[("@playwright/test", "^1.48.0")], "playwright test"),
        Format::Axe => (
            &[("@playwright/test", "^1.48.0"), ("@axe-core/playwright", "^4.10.0")],
            "playwright test",
        ),
        Format::Cypress => (&[("cypress", "^13.15.0")], "cypress run"),
        Format::Appium => (
            &[
                ("@wdio/cli", "^9.2.0"),
                ("@wdio/globals", "^9.2.0"),
                ("@wdio/local-runner", "^9.2.0"),
                ("@wdio/mocha-framework", "^9.2.0"),
                ("@wdio/spec-reporter", "^9.2.0"),
                ("appium", "^2.12.0"),
            ],
            "wdio run wdio.conf.js",
        ),
        Format::Detox => (&[("detox", "^20.28.0"), ("jest", "^29.7.0")], "detox test"),
        _ => (&[], "echo \"no test runner\""),
    };
    let dev_dependencies: serde_json::Map<String, serde_json::Value> = deps
        .iter()
        .map(|(name, version)| ((*name).to_string(), json!(version)))
        .collect();
    let pkg = json!({
        "name": slug,
        "version": "1.0.0",
        "private": true,
        "scripts": { "test": test },
        "devDependencies": dev_dependencies,
    });
    Ok(serde_json::to_string_pretty(&pkg)? + "\n")
}

fn requirements(format: Format) -> String {
    match format {
        Format::Locust => "locust>=2.31\n".to_string(),
        _ => "selenium>=4.25\npytest>=8.3\n".to_string(),
    }
}

fn settings_gradle(slug: &str) -> String {
    format!("rootProject.name = \"{slug}\"\ninclude(\":app\")\n")
}

fn build_gradle(options: &EmitOptions) -> String {
    let package = kotlin_package(&options.app_id);
    format!(
        r#"plugins {{
    id("com.android.application")
    id("org.jetbrains.kotlin.android")
}}

android {{
    namespace = "{package}"
    compileSdk = 34

    defaultConfig {{
        applicationId = "{package}"
        minSdk = 24
        testInstrumentationRunner = "androidx.test.runner.AndroidJUnitRunner"
    }}
}}

dependencies {{
    androidTestImplementation("androidx.test.ext:junit:1.2.1")
    androidTestImplementation("androidx.test.espresso:espresso-core:3.6.1")
    androidTestImplementation("androidx.test:runner:1.6.2")
    androidTestImplementation("org.hamcrest:hamcrest:2.2")
}}
"#
    )
}

fn framework_files(format: Format, layout: &Layout, options: &EmitOptions) -> Vec<(String, String)> {
    let base = crate::escape::js(&options.base_url);
    match format {
        Format::Playwright | Format::Axe => {
            let projects: Vec<String> = options
                .browsers
                .iter()
                .map(|b| {
                    format!(
                        "    {{ name: {}, use: {{ browserName: {} }} }},",
                        crate::escape::js(b),
                        crate::escape::js(b)
                    )
                })
                .collect();
            vec![(
                "playwright.config.ts".to_string(),
                format!(
                    "import {{ defineConfig }} from '@playwright/test';\n\n\
                     export default defineConfig({{\n  \
                       testDir: {},\n  \
                       timeout: {},\n  \
                       use: {{\n    baseURL: process.env.BASE_URL ?? {base},\n  }},\n  \
                       projects: [\n{}\n  ],\n\
                     }});\n",
                    crate::escape::js(&format!("./{}", layout.test_dir)),
                    options.timeout_ms,
                    projects.join("\n")
                ),
            )]
        }
        Format::Cypress => vec![
            (
                "cypress.config.js".to_string(),
                format!(
                    "const {{ defineConfig }} = require('cypress');\n\n\
                     module.exports = defineConfig({{\n  \
                       e2e: {{\n    \
                         baseUrl: process.env.BASE_URL ?? {base},\n    \
                         specPattern: 'cypress/e2e/**/*.cy.js',\n    \
                         defaultCommandTimeout: {},\n  \
                       }},\n\
                     }});\n",
                    options.timeout_ms
                ),
            ),
            (
                "cypress/support/e2e.js".to_string(),
                "// Loaded before every spec file.\n".to_string(),
            ),
        ],
        Format::Selenium => vec![(
            "pytest.ini".to_string(),
            format!("[pytest]\ntestpaths = {}\npython_files = *.py\naddopts = -ra --import-mode=importlib\n", layout.test_dir),
        )],
        Format::Appium => vec![(
            "wdio.conf.js".to_string(),
            format!(
                "export const config = {{\n  \
                   runner: 'local',\n  \
                   port: 4723,\n  \
                   specs: ['./{}/**/*.e2e.js'],\n  \
                   capabilities: [{{\n    \
                     platformName: 'Android',\n    \
                     'appium:automationName': 'UiAutomator2',\n    \
                     'appium:appPackage': {},\n  \
                   }}],\n  \
                   framework: 'mocha',\n  \
                   reporters: ['spec'],\n  \
                   mochaOpts: {{ timeout: {} }},\n  \
                   services: ['appium'],\n\
                 }};\n",
                layout.test_dir,
                crate::escape::js(&options.app_id),
                options.timeout_ms
            ),
        )],
        Format::Detox => vec![
            (
                ".detoxrc.js".to_string(),
                "module.exports = {\n  \
                   testRunner: { args: { config: 'e2e/jest.config.js' } },\n  \
                   apps: {\n    \
                     'android.debug': {\n      \
                       type: 'android.apk',\n      \
                       binaryPath: 'android/app/build/outputs/apk/debug/app-debug.apk',\n    \
                     },\n  \
                   },\n  \
                   devices: {\n    \
                     emulator: { type: 'android.emulator', device: { avdName: 'Pixel_7_API_34' } },\n  \
                   },\n  \
                   configurations: {\n    \
                     'android.emu.debug': { device: 'emulator', app: 'android.debug' },\n  \
                   },\n\
                 };\n"
                    .to_string(),
            ),
            (
                "e2e/jest.config.js".to_string(),
                format!(
                    "module.exports = {{\n  \
                       rootDir: '..',\n  \
                       testMatch: ['<rootDir>/e2e/**/*.e2e.js'],\n  \
                       testTimeout: {},\n  \
                       maxWorkers: 1,\n  \
                       globalSetup: 'detox/runners/jest/globalSetup',\n  \
                       globalTeardown: 'detox/runners/jest/globalTeardown',\n  \
                       testEnvironment: 'detox/runners/jest/testEnvironment',\n\
                     }};\n",
                    options.timeout_ms * 4
                ),
            ),
        ],
        Format::Maestro => vec![(
            format!("{}/config.yaml", layout.test_dir),
            "flows:\n  - \"*.yaml\"\n".to_string(),
        )],
        Format::Locust => vec![(
            "locust.conf".to_string(),
            format!(
                "locustfile = {}\nhost = {}\nusers = {}\nspawn-rate = {}\nrun-time = {}s\nheadless = true\n",
                layout.test_dir,
                options.base_url,
                options.load.vus,
                (u64::from(options.load.vus) / options.load.ramp_up_secs.max(1)).max(1),
                options.load.total_secs()
            ),
        )],
        _ => Vec::new(),
    }
}

fn env_example(format: Format, options: &EmitOptions) -> String {
    let mut env = format!("BASE_URL={}\n", options.base_url);
    if matches!(
        format,
        Format::Appium | Format::Detox | Format::Espresso | Format::Maestro
    ) {
        env.push_str(&format!("APP_ID={}\n", options.app_id));
    }
    env
}

fn gitignore(ecosystem: Ecosystem) -> String {
    let specific = match ecosystem {
        Ecosystem::Node => "node_modules/\ntest-results/\nplaywright-report/\n",
        Ecosystem::Python => "__pycache__/\n.pytest_cache/\n.venv/\n",
        Ecosystem::Kotlin => ".gradle/\nbuild/\nlocal.properties\n",
        Ecosystem::Data => "reports/\n",
    };
    format!(".env\n{specific}")
}

fn run_command(format: Format, layout: &Layout) -> String {
    match format {
        Format::Playwright | Format::Axe => "npm install\nnpx playwright install\nnpm test".to_string(),
        Format::Cypress | Format::Appium | Format::Detox => "npm install\nnpm test".to_string(),
        Format::Selenium => "pip install -r requirements.txt\npytest".to_string(),
        Format::Locust => "pip install -r requirements.txt\nlocust --config locust.conf".to_string(),
        Format::Espresso => "./gradlew connectedAndroidTest".to_string(),
        Format::Maestro => format!("maestro test {}", layout.test_dir),
        Format::K6 => format!("k6 run {}/<file>.k6.js", layout.test_dir),
        Format::Postman => format!("newman run {}/<file>.postman_collection.json", layout.test_dir),
        Format::Insomnia => format!("inso run collection {}/<file>.insomnia.json", layout.test_dir),
        Format::OpenApi => format!("npx @redocly/cli lint {}/<file>.openapi.json", layout.test_dir),
        Format::Har => format!("Open {}/<file>.har in a HAR viewer", layout.test_dir),
        Format::JMeter => format!("jmeter -n -t {}/<file>.jmx", layout.test_dir),
        Format::Artillery => format!("artillery run {}/<file>.artillery.yml", layout.test_dir),
        Format::Pa11y => format!("npx pa11y-ci --config {}/<file>.pa11yci.json", layout.test_dir),
        Format::Lighthouse => {
            format!("npx @lhci/cli autorun --config={}/<file>.lighthouserc.json", layout.test_dir)
        }
    }
}

fn readme(target: EmissionTarget, layout: &Layout, meta: &SuiteMeta, count: usize) -> String {
    let noun = if count == 1 { "test case" } else { "test cases" };
    format!(
        "# {}\n\n\
         Generated by casegen {} for `{target}`.\n\n\
         This project contains {count} {noun}. Generated files live in `{}/`.\n\n\
         ## Running\n\n\
         ```sh\n{}\n```\n\n\
         Copy `.env.example` to `.env` and set `BASE_URL` for your environment.\n",
        crate::escape::comment(&meta.name),
        env!("CARGO_PKG_VERSION"),
        layout.test_dir,
        run_command(target.format, layout)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ir::{Step, TestCase};
    use crate::result::ErrorKind;
    use crate::target::Platform;

    fn cases() -> Vec<TestCase> {
        vec![
            TestCase::new("Login works").with_step(Step::new(1, "Navigate to /login")),
            TestCase::new("Logout works").with_step(Step::new(1, "Click the \"Logout\" button")),
            TestCase::new("Login works").with_step(Step::new(1, "Navigate to /again")),
        ]
    }

    fn project(format: Format, platform: Platform) -> Archive {
        let cases = cases();
        let clock = FixedClock::at_ms(1_700_000_000_000);
        let options = EmitOptions::default();
        let ctx = EmitContext::new(&cases, "Auth Suite", &clock, &options);
        scaffold_project(EmissionTarget::new(platform, format), &ctx, &SuiteMeta::new("Auth Suite")).unwrap()
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn test_root_uses_suite_id_fragment() {
            let clock = FixedClock::at_ms(0);
            let meta = SuiteMeta::new("Auth Suite").with_id("9F86D081-884C-7D65");
            assert_eq!(archive_root(Format::Playwright, &meta, &clock), "playwright-auth-suite-9f86d081");
        }

        #[test]
        fn test_root_hashes_name_and_time_without_id() {
            let meta = SuiteMeta::new("Auth Suite");
            let a = archive_root(Format::K6, &meta, &FixedClock::at_ms(1));
            let b = archive_root(Format::K6, &meta, &FixedClock::at_ms(1));
            let c = archive_root(Format::K6, &meta, &FixedClock::at_ms(2));
            assert_eq!(a, b);
            assert_ne!(a, c);
            assert!(a.starts_with("k6-auth-suite-"));
            assert_eq!(a.len(), "k6-auth-suite-".len() + 8);
        }

        #[test]
        fn test_playwright_project_files() {
            let archive = project(Format::Playwright, Platform::Web);
            let paths: Vec<&str> = archive.entries().iter().map(|e| e.path.as_str()).collect();
            assert_eq!(
                paths,
                vec![
                    "tests/001-login-works.spec.ts",
                    "tests/002-logout-works.spec.ts",
                    "tests/003-login-works-2.spec.ts",
                    "package.json",
                    "playwright.config.ts",
                    ".env.example",
                    ".gitignore",
                    "README.md",
                ]
            );
            assert!(archive.get("README.md").unwrap().contains("This project contains 3 test cases."));
            assert!(archive.get("package.json").unwrap().contains("@playwright/test"));
            assert!(archive
                .get("playwright.config.ts")
                .unwrap()
                .contains("{ name: 'chromium', use: { browserName: 'chromium' } },"));
        }

        #[test]
        fn test_python_and_kotlin_manifests() {
            let selenium = project(Format::Selenium, Platform::Web);
            assert!(selenium.get("requirements.txt").unwrap().contains("selenium"));
            assert!(selenium.get("pytest.ini").is_some());

            let espresso = project(Format::Espresso, Platform::Mobile);
            assert!(espresso.get("app/build.gradle.kts").is_some());
            assert!(espresso
                .get("app/src/androidTest/java/com/example/app/001-login-works.kt")
                .is_some());
        }

        #[test]
        fn test_data_manifest() {
            let archive = project(Format::Postman, Platform::Api);
            let manifest: serde_json::Value =
                serde_json::from_str(archive.get("casegen.json").unwrap()).unwrap();
            assert_eq!(manifest["testCases"], 3);
            assert_eq!(manifest["files"][0], "collections/001-login-works.postman_collection.json");
        }
    }

    mod assembly_tests {
        use super::*;

        #[test]
        fn test_duplicate_path_is_error() {
            let mut archive = Archive::new("root", 0);
            archive.add("a.txt", "1").unwrap();
            let err = archive.add("a.txt", "2").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArchiveAssembly);
        }

        #[test]
        fn test_escaping_path_is_error() {
            let mut archive = Archive::new("root", 0);
            assert!(archive.add("../evil", "x").is_err());
            assert!(archive.add("/abs", "x").is_err());
        }

        #[test]
        fn test_same_input_same_archive() {
            assert_eq!(project(Format::K6, Platform::Performance), project(Format::K6, Platform::Performance));
        }

        #[cfg(feature = "archive")]
        #[test]
        fn test_zip_is_byte_identical() {
            let a = project(Format::Cypress, Platform::Web).to_zip().unwrap();
            let b = project(Format::Cypress, Platform::Web).to_zip().unwrap();
            assert_eq!(a, b);
            assert_eq!(&a[..2], b"PK");
        }
    }
}
