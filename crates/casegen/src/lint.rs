//! Script Linter and Metadata Extractor
//!
//! Static checks over generated (or hand-edited) script text. Nothing here
//! parses the target language; the checks are line-oriented pattern scans.
//!
//! ## Checks
//!
//! | Code | Severity | Check |
//! |------|----------|-------|
//! | `DIALECT001` | warning | script dialect not recognized |
//! | `IMPORT001` | error | required import missing |
//! | `WRAP001` | error | no test wrapper (`test(`, `it(`, `def test_`, `@Test`, ...) |
//! | `TODO001` | warning | unresolved placeholder (`__TODO_SELECTOR__` or a `TODO` comment) |
//! | `AWAIT001` | error | async call without `await` on the same statement |
//!
//! Emitters reuse [`LintFinding`] for the warnings they record while
//! generating (`STEP001` unresolved step, `DEFAULT001` default substituted).

#![allow(clippy::unwrap_used)]

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::selector::PLACEHOLDER_MARKER;

/// Lint severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the script will not run as generated
    Error,
    /// Warning - the script runs but needs attention
    Warning,
}

impl Severity {
    /// Get display string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
        }
    }

    /// Get symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Error => "✗",
            Self::Warning => "⚠",
        }
    }
}

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintFinding {
    /// Severity level
    pub severity: Severity,
    /// Finding code (e.g., "AWAIT001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// 1-based line number (if applicable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl LintFinding {
    /// Create an error finding
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Create a warning finding
    #[must_use]
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Set line number
    #[must_use]
    pub const fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Whether this is an error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for LintFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{} {} [{}] line {line}: {}",
                self.severity.symbol(),
                self.severity.as_str(),
                self.code,
                self.message
            ),
            None => write!(
                f,
                "{} {} [{}] {}",
                self.severity.symbol(),
                self.severity.as_str(),
                self.code,
                self.message
            ),
        }
    }
}

/// Script dialect recognized by the linter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptDialect {
    /// axe-core through Playwright
    AxePlaywright,
    /// Playwright Test
    Playwright,
    /// Cypress
    Cypress,
    /// Selenium with pytest
    Selenium,
    /// Appium through WebdriverIO
    WebdriverIo,
    /// Detox
    Detox,
    /// Espresso (Kotlin)
    Espresso,
    /// k6
    K6,
    /// Locust
    Locust,
    /// Not recognized
    Unknown,
}

struct DialectProfile {
    dialect: ScriptDialect,
    marker: Regex,
    imports: &'static [&'static str],
    wrapper: Regex,
    async_calls: Option<Regex>,
}

impl DialectProfile {
    fn new(
        dialect: ScriptDialect,
        marker: &str,
        imports: &'static [&'static str],
        wrapper: &str,
        async_calls: Option<&str>,
    ) -> Self {
        Self {
            dialect,
            marker: Regex::new(marker).unwrap(),
            imports,
            wrapper: Regex::new(wrapper).unwrap(),
            async_calls: async_calls.map(|p| Regex::new(p).unwrap()),
        }
    }
}

const PW_ASYNC: &str = r"\.(goto|click|dblclick|fill|check|uncheck|selectOption|setInputFiles|waitForTimeout|waitForLoadState|hover|press|analyze|toBeVisible|toBeHidden|toHaveText|toContainText|toHaveValue|toHaveTitle|toHaveURL|toBeChecked|toBeEnabled|toBeDisabled|toHaveCount)\(";

// Detection is ordered: axe scripts also import @playwright/test
static PROFILES: Lazy<Vec<DialectProfile>> = Lazy::new(|| {
    vec![
        DialectProfile::new(
            ScriptDialect::AxePlaywright,
            r"@axe-core/playwright",
            &["@playwright/test", "@axe-core/playwright"],
            r"\btest\(",
            Some(PW_ASYNC),
        ),
        DialectProfile::new(
            ScriptDialect::Playwright,
            r"@playwright/test|\bpage\.goto\(",
            &["@playwright/test"],
            r"\btest\(",
            Some(PW_ASYNC),
        ),
        DialectProfile::new(
            ScriptDialect::Detox,
            r#"from\s+'detox'|require\('detox'\)|\belement\(by\."#,
            &["detox"],
            r"\bit\(",
            Some(r"\.(tap|typeText|replaceText|clearText|longPress|launchApp|reloadReactNative|scroll|swipe|toBeVisible|toExist|toHaveText|toHaveValue|withTimeout)\("),
        ),
        DialectProfile::new(
            ScriptDialect::WebdriverIo,
            r"@wdio/globals|\bdriver\.|\$\('~",
            &["@wdio/globals"],
            r"\bit\(",
            Some(r"\.(url|click|setValue|addValue|clearValue|waitForDisplayed|waitForExist|pause|moveTo|selectByVisibleText|keys|toBeDisplayed|toExist|toHaveText|toHaveUrl|toHaveTitle|toHaveValue|toBeSelected)\("),
        ),
        DialectProfile::new(
            ScriptDialect::Cypress,
            r"\bcy\.",
            &[],
            r"\bit\(",
            None,
        ),
        DialectProfile::new(
            ScriptDialect::Selenium,
            r"from\s+selenium|import\s+selenium",
            &["selenium", "pytest"],
            r"(?m)^\s*def\s+test_\w*\(",
            None,
        ),
        DialectProfile::new(
            ScriptDialect::Espresso,
            r"androidx\.test\.espresso",
            &["androidx.test.espresso", "org.junit.Test"],
            r"@Test",
            None,
        ),
        DialectProfile::new(
            ScriptDialect::K6,
            r"from\s+'k6(/http)?'",
            &["k6/http"],
            r"export\s+default\s+function",
            None,
        ),
        DialectProfile::new(
            ScriptDialect::Locust,
            r"from\s+locust\s+import",
            &["locust"],
            r"@task",
            None,
        ),
    ]
});

static TEST_NAME_JS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\b(?:test|it)\(\s*(?:'((?:\\.|[^'\\])*)'|"((?:\\.|[^"\\])*)")"#).unwrap());
static TEST_NAME_PY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*def\s+(test_\w+)\(").unwrap());
static TEST_NAME_KT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@Test\s+fun\s+(`[^`]+`|\w+)\s*\(").unwrap());
static TEST_NAME_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^class\s+(\w+)\((?:Fast)?HttpUser\)").unwrap());
static STEP_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?://|#)\s*Step\s+(\d+):").unwrap());
static TIMEOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:setTimeout|defaultCommandTimeout|waitforTimeout|timeout)\s*(?:\(|:|=)\s*(\d+)")
        .unwrap()
});
static BASE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bbase_?url\b|https?://").unwrap());
static TODO_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?://|#)\s*TODO\b").unwrap());

/// Detect the dialect of a script
#[must_use]
pub fn detect_dialect(script: &str) -> ScriptDialect {
    PROFILES
        .iter()
        .find(|p| p.marker.is_match(script))
        .map_or(ScriptDialect::Unknown, |p| p.dialect)
}

/// Lint a script
#[must_use]
pub fn lint(script: &str) -> Vec<LintFinding> {
    let dialect = detect_dialect(script);
    let Some(profile) = PROFILES.iter().find(|p| p.dialect == dialect) else {
        let mut findings = vec![LintFinding::warning(
            "DIALECT001",
            "unrecognized script dialect; only placeholder checks applied",
        )];
        findings.extend(placeholder_findings(script));
        return findings;
    };

    let mut findings = Vec::new();
    for import in profile.imports {
        if !script.contains(import) {
            findings.push(LintFinding::error(
                "IMPORT001",
                format!("missing import '{import}'"),
            ));
        }
    }
    if !profile.wrapper.is_match(script) {
        findings.push(LintFinding::error("WRAP001", "no test wrapper found"));
    }
    findings.extend(placeholder_findings(script));
    if let Some(async_calls) = &profile.async_calls {
        for (idx, line) in script.lines().enumerate() {
            let code = line.trim_start();
            if is_comment(code) {
                continue;
            }
            if let Some(m) = async_calls.find(code) {
                if !code[..m.start()].contains("await") && !code.starts_with("return ") {
                    findings.push(
                        LintFinding::error(
                            "AWAIT001",
                            format!("async call '{}' without await", m.as_str().trim_end_matches('(')),
                        )
                        .at_line(line_number(idx)),
                    );
                }
            }
        }
    }
    findings.sort_by_key(|f| (f.line.unwrap_or(0), f.severity));
    findings
}

/// Number of lines carrying an unresolved placeholder
#[must_use]
pub fn placeholder_count(script: &str) -> usize {
    script.lines().filter(|l| is_placeholder_line(l)).count()
}

fn placeholder_findings(script: &str) -> impl Iterator<Item = LintFinding> + '_ {
    script
        .lines()
        .enumerate()
        .filter(|(_, l)| is_placeholder_line(l))
        .map(|(idx, l)| {
            LintFinding::warning("TODO001", format!("unresolved placeholder: {}", l.trim()))
                .at_line(line_number(idx))
        })
}

fn is_placeholder_line(line: &str) -> bool {
    line.contains(PLACEHOLDER_MARKER) || TODO_COMMENT.is_match(line)
}

fn is_comment(code: &str) -> bool {
    code.starts_with("//") || code.starts_with('#') || code.starts_with('*') || code.starts_with("/*")
}

fn line_number(idx: usize) -> u32 {
    u32::try_from(idx + 1).unwrap_or(u32::MAX)
}

/// Metadata read from a script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMetadata {
    /// First test name
    pub test_name: Option<String>,
    /// Number of `Step N:` comments
    pub step_count: usize,
    /// Whether a base URL is configured or referenced
    pub has_base_url: bool,
    /// First timeout setting, in the script's own unit
    pub timeout_ms: Option<u64>,
}

/// Extract metadata. Tolerant: anything missing keeps its default.
#[must_use]
pub fn extract_metadata(script: &str) -> ScriptMetadata {
    let test_name = TEST_NAME_JS
        .captures(script)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| unescape_js(m.as_str()))
        .or_else(|| first_capture(&TEST_NAME_PY, script))
        .or_else(|| first_capture(&TEST_NAME_KT, script).map(|n| n.trim_matches('`').to_string()))
        .or_else(|| first_capture(&TEST_NAME_CLASS, script));

    ScriptMetadata {
        test_name,
        step_count: STEP_COMMENT.find_iter(script).count(),
        has_base_url: BASE_URL.is_match(script),
        timeout_ms: first_capture(&TIMEOUT, script).and_then(|t| t.parse().ok()),
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn unescape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lint result and metadata for one script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// Detected dialect
    pub dialect: ScriptDialect,
    /// All findings
    pub findings: Vec<LintFinding>,
    /// Extracted metadata
    pub metadata: ScriptMetadata,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
}

impl LintReport {
    /// Lint a script and collect its metadata
    #[must_use]
    pub fn for_script(script: &str) -> Self {
        let findings = lint(script);
        let errors = findings.iter().filter(|f| f.is_error()).count();
        Self {
            dialect: detect_dialect(script),
            warnings: findings.len() - errors,
            errors,
            findings,
            metadata: extract_metadata(script),
        }
    }

    /// Check if there are any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if the lint passed (no errors)
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYWRIGHT: &str = "import { test, expect } from '@playwright/test';\n\
        \n\
        test('User can log in', async ({ page }) => {\n\
        \x20 test.setTimeout(30000);\n\
        \x20 // Step 1: Navigate to /login\n\
        \x20 await page.goto(BASE_URL + '/login');\n\
        \x20 // Step 2: Click Save\n\
        \x20 page.getByRole('button', { name: 'Save' }).click();\n\
        \x20 // Step 3: Verify page loads correctly\n\
        \x20 // TODO: unresolved step: Verify page loads correctly\n\
        });\n";

    mod finding_tests {
        use super::*;

        #[test]
        fn test_severity_as_str() {
            assert_eq!(Severity::Error.as_str(), "ERROR");
            assert_eq!(Severity::Warning.as_str(), "WARN");
        }

        #[test]
        fn test_finding_builder_and_display() {
            let f = LintFinding::warning("TODO001", "x").at_line(4);
            assert_eq!(f.line, Some(4));
            assert!(!f.is_error());
            assert_eq!(f.to_string(), "⚠ WARN [TODO001] line 4: x");
        }

        #[test]
        fn test_finding_serializes_lowercase_severity() {
            let json = serde_json::to_string(&LintFinding::error("WRAP001", "m")).unwrap_or_default();
            assert!(json.contains("\"severity\":\"error\""));
            assert!(!json.contains("line"));
        }
    }

    mod lint_tests {
        use super::*;

        #[test]
        fn test_detects_dialects() {
            assert_eq!(detect_dialect(PLAYWRIGHT), ScriptDialect::Playwright);
            assert_eq!(
                detect_dialect("import AxeBuilder from '@axe-core/playwright';"),
                ScriptDialect::AxePlaywright
            );
            assert_eq!(detect_dialect("cy.visit('/')"), ScriptDialect::Cypress);
            assert_eq!(
                detect_dialect("from locust import HttpUser, task"),
                ScriptDialect::Locust
            );
            assert_eq!(detect_dialect("hello"), ScriptDialect::Unknown);
        }

        #[test]
        fn test_missing_await_is_flagged_on_its_line() {
            let findings = lint(PLAYWRIGHT);
            let awaits: Vec<_> = findings.iter().filter(|f| f.code == "AWAIT001").collect();
            assert_eq!(awaits.len(), 1);
            assert_eq!(awaits[0].line, Some(8));
        }

        #[test]
        fn test_placeholders_counted() {
            assert_eq!(placeholder_count(PLAYWRIGHT), 1);
            let script = "await page.locator('__TODO_SELECTOR__').click(); // TODO: selector\n";
            assert_eq!(placeholder_count(script), 1);
        }

        #[test]
        fn test_missing_import_and_wrapper() {
            let findings = lint("await page.goto('/');\n");
            let codes: Vec<_> = findings.iter().map(|f| f.code.as_str()).collect();
            assert!(codes.contains(&"IMPORT001"));
            assert!(codes.contains(&"WRAP001"));
        }

        #[test]
        fn test_sync_dialect_has_no_await_check() {
            let script = "describe('s', () => {\n  it('t', () => {\n    cy.get('#a').click();\n  });\n});\n";
            assert!(lint(script).is_empty());
        }

        #[test]
        fn test_unknown_dialect_warns() {
            let findings = lint("just text");
            assert_eq!(findings.len(), 1);
            assert_eq!(findings[0].code, "DIALECT001");
        }
    }

    mod metadata_tests {
        use super::*;

        #[test]
        fn test_extract_playwright_metadata() {
            let meta = extract_metadata(PLAYWRIGHT);
            assert_eq!(meta.test_name.as_deref(), Some("User can log in"));
            assert_eq!(meta.step_count, 3);
            assert!(meta.has_base_url);
            assert_eq!(meta.timeout_ms, Some(30000));
        }

        #[test]
        fn test_extract_python_metadata() {
            let script = "import pytest\n\ndef test_login(driver):\n    # Step 1: open\n    pass\n";
            let meta = extract_metadata(script);
            assert_eq!(meta.test_name.as_deref(), Some("test_login"));
            assert_eq!(meta.step_count, 1);
            assert!(!meta.has_base_url);
        }

        #[test]
        fn test_escaped_test_name() {
            let meta = extract_metadata("test('it\\'s fine', async () => {});");
            assert_eq!(meta.test_name.as_deref(), Some("it's fine"));
        }

        #[test]
        fn test_defaults_on_garbage() {
            assert_eq!(extract_metadata(""), ScriptMetadata::default());
        }
    }

    #[test]
    fn test_report_counts() {
        let report = LintReport::for_script(PLAYWRIGHT);
        assert_eq!(report.errors, 1);
        assert_eq!(report.warnings, 1);
        assert!(!report.passed());
    }
}
