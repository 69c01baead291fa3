//! Accessibility emitters: axe-core (through Playwright), pa11y-ci, Lighthouse CI.

use serde::Serialize;
use tracing::warn;

use crate::artifact::EmittedArtifact;
use crate::config::EmitOptions;
use crate::escape;
use crate::ir::TestCase;
use crate::lint::LintFinding;
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::selector::FrameworkFamily;
use crate::target::Format;

use super::web::PlaywrightDialect;
use super::{case_urls, expected_line, plan_case, precondition_lines, render_steps, require_cases, unique_titles};

/// axe-core rule tags for an accessibility standard
#[must_use]
pub fn wcag_tags(standard: &str) -> Vec<&'static str> {
    match standard.trim().to_ascii_uppercase().replace(['.', ' '], "").as_str() {
        "WCAG2A" => vec!["wcag2a"],
        "WCAG2AAA" => vec!["wcag2a", "wcag2aa", "wcag2aaa"],
        "WCAG21A" => vec!["wcag2a", "wcag21a"],
        "WCAG21AA" => vec!["wcag2a", "wcag2aa", "wcag21a", "wcag21aa"],
        "WCAG22AA" => vec!["wcag2a", "wcag2aa", "wcag21a", "wcag21aa", "wcag22aa"],
        _ => vec!["wcag2a", "wcag2aa"],
    }
}

/// pa11y only knows the WCAG 2.0 levels
fn pa11y_standard(standard: &str) -> &'static str {
    let s = standard.trim().to_ascii_uppercase();
    if s.ends_with("AAA") {
        "WCAG2AAA"
    } else if s.ends_with("AA") {
        "WCAG2AA"
    } else if s.ends_with('A') {
        "WCAG2A"
    } else {
        "WCAG2AA"
    }
}

/// Absolute, de-duplicated URLs visited by the cases. Falls back to the base
/// URL (with a warning) when cases exist but name no URL.
fn audit_urls(cases: &[TestCase], options: &EmitOptions, findings: &mut Vec<LintFinding>) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for url in cases.iter().flat_map(case_urls) {
        let url = options.absolute_url(&url);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    if urls.is_empty() && !cases.is_empty() {
        warn!(base_url = %options.base_url, "no URLs found; auditing the base URL");
        findings.push(LintFinding::warning(
            "DEFAULT001",
            "no URLs found in any test case; auditing the base URL",
        ));
        urls.push(options.base_url.clone());
    }
    urls
}

// =============================================================================
// axe-core
// =============================================================================

/// Playwright spec replaying each case, then running an axe scan
pub fn emit_axe(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Axe)?;
    let mut findings = Vec::new();
    let dialect = PlaywrightDialect;

    let tags: Vec<String> = wcag_tags(&ctx.options.a11y_standard)
        .into_iter()
        .map(escape::js)
        .collect();

    let mut out = String::new();
    out.push_str("import { test, expect } from '@playwright/test';\n");
    out.push_str("import AxeBuilder from '@axe-core/playwright';\n\n");
    out.push_str(&format!(
        "const BASE_URL = process.env.BASE_URL ?? {};\n",
        escape::js(&ctx.options.base_url)
    ));
    out.push_str(&format!("const WCAG_TAGS = [{}];\n\n", tags.join(", ")));
    out.push_str(&format!(
        "test.describe({}, () => {{\n",
        escape::js(&format!("{} accessibility", ctx.suite_name))
    ));

    let titles = unique_titles(ctx.test_cases);
    for (i, (case, title)) in ctx.test_cases.iter().zip(&titles).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let steps = plan_case(case, FrameworkFamily::Playwright, &mut findings);
        out.push_str(&format!("  test({}, async ({{ page }}) => {{\n", escape::js(title)));
        out.push_str(&format!("    test.setTimeout({});\n", ctx.options.timeout_ms));
        out.push_str(&precondition_lines(case, "//", "    "));
        if !steps.iter().any(|s| s.navigates()) {
            findings.push(LintFinding::warning(
                "DEFAULT001",
                format!(
                    "'{}' never navigates; scanning the base URL",
                    escape::comment(title)
                ),
            ));
            out.push_str("    await page.goto(BASE_URL);\n");
        }
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "    "));
        out.push_str("    const results = await new AxeBuilder({ page }).withTags(WCAG_TAGS).analyze();\n");
        out.push_str("    expect(results.violations).toEqual([]);\n");
        out.push_str("  });\n");
    }
    out.push_str("});\n");

    Ok(EmittedArtifact::new(Format::Axe, ctx.filename(Format::Axe), out)
        .with_findings(findings))
}

// =============================================================================
// pa11y-ci
// =============================================================================

#[derive(Debug, Serialize)]
struct Pa11yConfig {
    defaults: Pa11yDefaults,
    urls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Pa11yDefaults {
    standard: &'static str,
    timeout: u64,
    runners: [&'static str; 2],
}

/// pa11y-ci configuration
pub fn emit_pa11y(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let config = Pa11yConfig {
        defaults: Pa11yDefaults {
            standard: pa11y_standard(&ctx.options.a11y_standard),
            timeout: ctx.options.timeout_ms,
            runners: ["axe", "htmlcs"],
        },
        urls: audit_urls(ctx.test_cases, ctx.options, &mut findings),
    };
    let content = serde_json::to_string_pretty(&config)?;
    Ok(EmittedArtifact::new(Format::Pa11y, ctx.filename(Format::Pa11y), content)
        .with_findings(findings))
}

// =============================================================================
// Lighthouse CI
// =============================================================================

#[derive(Debug, Serialize)]
struct LighthouseRc {
    ci: LighthouseCi,
}

#[derive(Debug, Serialize)]
struct LighthouseCi {
    collect: LighthouseCollect,
    assert: LighthouseAssert,
    upload: LighthouseUpload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LighthouseCollect {
    url: Vec<String>,
    number_of_runs: u32,
    settings: LighthouseSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LighthouseSettings {
    only_categories: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct LighthouseAssert {
    assertions: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct LighthouseUpload {
    target: &'static str,
}

/// Lighthouse CI configuration (`lighthouserc.json`) asserting the accessibility score
pub fn emit_lighthouse(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let min_score = ctx.options.a11y_min_score.clamp(0.0, 1.0);
    let mut assertions = serde_json::Map::new();
    assertions.insert(
        "categories:accessibility".to_string(),
        serde_json::json!(["error", { "minScore": min_score }]),
    );
    let rc = LighthouseRc {
        ci: LighthouseCi {
            collect: LighthouseCollect {
                url: audit_urls(ctx.test_cases, ctx.options, &mut findings),
                number_of_runs: 1,
                settings: LighthouseSettings {
                    only_categories: ["accessibility"],
                },
            },
            assert: LighthouseAssert { assertions },
            upload: LighthouseUpload {
                target: "temporary-public-storage",
            },
        },
    };
    let content = serde_json::to_string_pretty(&rc)?;
    Ok(EmittedArtifact::new(Format::Lighthouse, ctx.filename(Format::Lighthouse), content)
        .with_findings(findings))
}
