//! End-to-end scenarios through the public API.
//!
//! Each test drives the registry the way a caller would: build cases,
//! pick a target, emit, and inspect the artifact.

use casegen::prelude::*;
use pretty_assertions::assert_eq;

fn clock() -> FixedClock {
    FixedClock::at_ms(1_700_000_000_000)
}

fn login_case() -> TestCase {
    TestCase::new("User can log in")
        .with_step(Step::new(1, "Navigate to /login"))
        .with_step(
            Step::new(2, "Enter email")
                .with_type(ActionKind::Fill)
                .with_selector("#email")
                .with_input("a@b.com"),
        )
        .with_step(
            Step::new(3, "Submit the form")
                .with_type(ActionKind::Click)
                .with_selector("button[type=submit]")
                .with_assertion(Assertion::new(AssertionKind::Url, "/dashboard")),
        )
}

fn emit_one(platform: Platform, format: Format, cases: &[TestCase]) -> CasegenResult<EmittedArtifact> {
    let clock = clock();
    let options = EmitOptions::default();
    let ctx = EmitContext::new(cases, "Auth", &clock, &options);
    emit(EmissionTarget::new(platform, format), &ctx)
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
}

// ============================================================================
// Scenario A: ordered statements plus a trailing URL assertion
// ============================================================================

#[test]
fn scenario_a_playwright_order() {
    let artifact = emit_one(Platform::Web, Format::Playwright, &[login_case()]).unwrap();
    let c = &artifact.content;
    let goto = position(c, "await page.goto(BASE_URL + '/login');");
    let fill = position(c, "await page.locator('#email').fill('a@b.com');");
    let click = position(c, "await page.locator('button[type=submit]').click();");
    let url = position(c, "expect(page.url()).toContain('/dashboard');");
    assert!(goto < fill && fill < click && click < url);
    assert_eq!(extract_metadata(c).step_count, 3);
}

#[test]
fn scenario_a_cypress_order() {
    let artifact = emit_one(Platform::Web, Format::Cypress, &[login_case()]).unwrap();
    let c = &artifact.content;
    let visit = position(c, "cy.visit('/login');");
    let fill = position(c, "#email");
    let click = position(c, "button[type=submit]");
    let url = position(c, "/dashboard");
    assert!(visit < fill && fill < click && click < url);
}

#[test]
fn scenario_a_script_formats_lint_clean() {
    let scripts = [
        (Platform::Web, Format::Playwright),
        (Platform::Web, Format::Cypress),
        (Platform::Web, Format::Selenium),
        (Platform::Mobile, Format::Appium),
        (Platform::Mobile, Format::Detox),
        (Platform::Mobile, Format::Espresso),
        (Platform::Accessibility, Format::Axe),
    ];
    for (platform, format) in scripts {
        let artifact = emit_one(platform, format, &[login_case()]).unwrap();
        let report = LintReport::for_script(&artifact.content);
        assert_eq!(report.errors, 0, "{format}: {:?}", report.findings);
    }
}

// ============================================================================
// Scenario B: unresolved verification becomes a commented TODO
// ============================================================================

#[test]
fn scenario_b_unresolved_verify() {
    let case = TestCase::new("Smoke").with_step(Step::new(1, "Verify page loads correctly"));
    assert!(classify(&case.steps[0]).is_unresolved());

    let artifact = emit_one(Platform::Web, Format::Playwright, &[case]).unwrap();
    let c = &artifact.content;
    let step = position(c, "// Step 1: Verify page loads correctly");
    let todo = position(c, "// TODO");
    assert!(step < todo);
    assert!(!c.contains("expect(page.url())"));
}

// ============================================================================
// Scenario C: fail-closed dispatch
// ============================================================================

#[test]
fn scenario_c_unregistered_pair() {
    let err = emit_one(Platform::Web, Format::Postman, &[login_case()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(resolve_emitter(Platform::Web, Format::Postman).is_err());
    assert!(EmissionTarget::parse("web", "nonexistent").is_err());
}

// ============================================================================
// Scenario D: accessibility configs fall back to the base URL
// ============================================================================

#[test]
fn scenario_d_pa11y_default_url() {
    let case = TestCase::new("Form").with_step(Step::new(1, "Click the \"Save\" button"));
    let artifact = emit_one(Platform::Accessibility, Format::Pa11y, &[case]).unwrap();
    let config: serde_json::Value = serde_json::from_str(&artifact.content).unwrap();
    assert_eq!(config["urls"], serde_json::json!(["http://localhost:3000"]));
    let defaults: Vec<_> = artifact
        .findings
        .iter()
        .filter(|f| f.code == "DEFAULT001")
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].severity, Severity::Warning);
}

#[test]
fn scenario_d_lighthouse_default_url() {
    let case = TestCase::new("Form").with_step(Step::new(1, "Click the \"Save\" button"));
    let artifact = emit_one(Platform::Accessibility, Format::Lighthouse, &[case]).unwrap();
    let config: serde_json::Value = serde_json::from_str(&artifact.content).unwrap();
    assert_eq!(
        config["ci"]["collect"]["url"],
        serde_json::json!(["http://localhost:3000"])
    );
    assert_eq!(artifact.findings.len(), 1);
}

// ============================================================================
// Empty input
// ============================================================================

#[test]
fn empty_input_scripts_fail_data_formats_succeed() {
    for target in targets() {
        let result = emit_one(target.platform, target.format, &[]);
        match target.format.kind() {
            ArtifactKind::Script => {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::EmptyInput, "{target}");
            }
            ArtifactKind::Data => {
                let artifact = result.unwrap();
                assert!(!artifact.is_empty(), "{target}");
            }
        }
    }
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn quotes_in_titles_reparse_in_json_formats() {
    let title = r#"It's a "quoted" \ title"#;
    let case = TestCase::new(title).with_step(Step::new(1, "GET /api/users"));

    let postman = emit_one(Platform::Api, Format::Postman, &[case.clone()]).unwrap();
    let collection: serde_json::Value = serde_json::from_str(&postman.content).unwrap();
    assert_eq!(collection["item"][0]["name"], title);

    let har = emit_one(Platform::Api, Format::Har, &[case]).unwrap();
    let parsed = casegen::emit::har::Har::from_json(&har.content).unwrap();
    assert_eq!(parsed.log.pages[0].title, title);
}

#[test]
fn quotes_in_titles_reparse_in_yaml_formats() {
    let title = "Say \"hi\": it's #1";
    let cases = [TestCase::new(title).with_step(Step::new(1, "Navigate to /home"))];
    let clock = clock();
    let options = EmitOptions::default();
    let ctx = EmitContext::new(&cases, title, &clock, &options);
    let maestro = emit(EmissionTarget::new(Platform::Mobile, Format::Maestro), &ctx).unwrap();
    let docs: Vec<&str> = maestro.content.splitn(2, "\n---\n").collect();
    let header: serde_yaml_ng::Value = serde_yaml_ng::from_str(docs[0]).unwrap();
    assert_eq!(header["name"].as_str(), Some(title));
    let flow: serde_yaml_ng::Value = serde_yaml_ng::from_str(docs[1]).unwrap();
    assert!(flow.as_sequence().is_some_and(|s| !s.is_empty()));
}

#[test]
fn quotes_in_titles_are_escaped_in_scripts() {
    let title = "Don't break 'out'";
    let case = TestCase::new(title).with_step(Step::new(1, "Navigate to /"));
    let artifact = emit_one(Platform::Web, Format::Playwright, &[case]).unwrap();
    assert!(artifact.content.contains(&casegen::escape::js(title)));
    assert_eq!(
        extract_metadata(&artifact.content).test_name.as_deref(),
        Some(title)
    );
}

// ============================================================================
// Colliding titles
// ============================================================================

fn titled(titles: &[&str]) -> Vec<TestCase> {
    titles
        .iter()
        .map(|t| TestCase::new(*t).with_step(Step::new(1, "Navigate to /login")))
        .collect()
}

fn declarations<'a>(content: &'a str, prefix: &str) -> Vec<&'a str> {
    content
        .lines()
        .map(str::trim_start)
        .filter(|l| l.starts_with(prefix))
        .collect()
}

fn assert_distinct(found: &[&str], expected: usize, content: &str) {
    let unique: std::collections::BTreeSet<_> = found.iter().collect();
    assert_eq!(found.len(), expected, "{content}");
    assert_eq!(unique.len(), expected, "{content}");
}

#[test]
fn colliding_titles_give_distinct_python_functions() {
    let cases = titled(&["Login", "Login", "Login 2"]);

    let selenium = emit_one(Platform::Web, Format::Selenium, &cases).unwrap();
    let defs = declarations(&selenium.content, "def test_");
    assert_distinct(&defs, 3, &selenium.content);

    let locust = emit_one(Platform::Performance, Format::Locust, &cases).unwrap();
    let tasks: Vec<&str> = locust
        .content
        .lines()
        .skip_while(|l| !l.contains("@task"))
        .filter(|l| l.trim_start().starts_with("def "))
        .collect();
    assert_distinct(&tasks, 3, &locust.content);
}

#[test]
fn colliding_titles_give_distinct_kotlin_functions() {
    let cases = titled(&["Login", "Login", "Login 2"]);
    let espresso = emit_one(Platform::Mobile, Format::Espresso, &cases).unwrap();
    let funs = declarations(&espresso.content, "fun ");
    assert_distinct(&funs, 3, &espresso.content);
}

#[test]
fn colliding_titles_give_distinct_js_tests() {
    let cases = titled(&["Login", "Login", "Login (2)"]);
    let scripts = [
        (Platform::Web, Format::Playwright, "test("),
        (Platform::Web, Format::Cypress, "it("),
        (Platform::Mobile, Format::Appium, "it("),
        (Platform::Mobile, Format::Detox, "it("),
    ];
    for (platform, format, prefix) in scripts {
        let artifact = emit_one(platform, format, &cases).unwrap();
        let tests = declarations(&artifact.content, prefix);
        assert_distinct(&tests, 3, &artifact.content);
    }
}

#[test]
fn backslash_suite_name_keeps_python_docstrings_closed() {
    let cases = [login_case()];
    let clock = clock();
    let options = EmitOptions::default();
    let ctx = EmitContext::new(&cases, r"Suite C:\temp\", &clock, &options);

    let selenium = emit(EmissionTarget::new(Platform::Web, Format::Selenium), &ctx).unwrap();
    let first = selenium.content.lines().next().unwrap();
    assert_eq!(first, r#""""Suite C:\\temp\\""""#);

    let locust = emit(EmissionTarget::new(Platform::Performance, Format::Locust), &ctx).unwrap();
    let first = locust.content.lines().next().unwrap();
    assert_eq!(first, r#""""Load test for Suite C:\\temp\\.""""#);
}

// ============================================================================
// Scaffolding
// ============================================================================

#[test]
fn scaffold_project_layout() {
    let cases = vec![login_case(), TestCase::new("Logout").with_step(Step::new(1, "Navigate to /logout"))];
    let clock = clock();
    let options = EmitOptions::default();
    let ctx = EmitContext::new(&cases, "Auth", &clock, &options);
    let meta = SuiteMeta::new("Auth").with_id("deadbeef-0000");
    let archive = scaffold_project(
        EmissionTarget::new(Platform::Web, Format::Playwright),
        &ctx,
        &meta,
    )
    .unwrap();

    assert_eq!(archive.root(), "playwright-auth-deadbeef");
    assert!(archive.get("tests/001-user-can-log-in.spec.ts").is_some());
    assert!(archive.get("tests/002-logout.spec.ts").is_some());
    assert!(archive
        .get("README.md")
        .unwrap()
        .contains("This project contains 2 test cases."));
}
