//! Mobile emitters: Appium (WebdriverIO), Detox, Espresso, Maestro.

use serde_yaml_ng::{Mapping, Value};
use tracing::warn;

use crate::artifact::EmittedArtifact;
use crate::escape::{self, Lang};
use crate::ir::AssertionKind;
use crate::lint::LintFinding;
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::selector::{FrameworkFamily, Locator};
use crate::target::Format;

use super::web::js_url;
use super::{
    display_title, expected_line, plan_case, precondition_lines, render_steps, require_cases,
    unique_idents, unique_titles, Dialect, Op,
};

// =============================================================================
// Appium (WebdriverIO)
// =============================================================================

/// WebdriverIO commands against an Appium session
#[derive(Debug, Clone, Copy, Default)]
pub struct AppiumDialect;

fn wdio_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "return" => "Enter".to_string(),
        "esc" => "Escape".to_string(),
        _ => key.to_string(),
    }
}

impl Dialect for AppiumDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::WebdriverIo
    }

    fn lang(&self) -> Lang {
        Lang::JavaScript
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let el = |l: &Locator| l.render(FrameworkFamily::WebdriverIo);
        let line = match op {
            Op::Navigate(url) => format!("await browser.url({});", js_url(url.as_deref())),
            Op::Click(l) => format!("await {}.click();", el(l)),
            Op::Hover(l) => format!("await {}.moveTo();", el(l)),
            Op::Fill(l, v) if v.is_empty() => format!("await {}.clearValue();", el(l)),
            Op::Fill(l, v) => format!("await {}.setValue({});", el(l), escape::js(v)),
            Op::Check(l) => {
                let e = el(l);
                format!("if (!(await {e}.isSelected())) {{ await {e}.click(); }}")
            }
            Op::Uncheck(l) => {
                let e = el(l);
                format!("if (await {e}.isSelected()) {{ await {e}.click(); }}")
            }
            Op::Select(l, v) => format!("await {}.selectByVisibleText({});", el(l), escape::js(v)),
            Op::Upload(l, v) => format!(
                "await {}.setValue(await browser.uploadFile({}));",
                el(l),
                escape::js(v)
            ),
            Op::Press(key) => format!("await browser.keys([{}]);", escape::js(&wdio_key(key))),
            Op::Wait(ms) => format!("await browser.pause({ms});"),
            Op::Expect(e) => {
                let loc = e.locator.as_ref().map(el);
                let value = e.value.as_deref().map(escape::js);
                match (e.kind, loc, value) {
                    (AssertionKind::Visible, Some(l), _) => {
                        format!("await expect({l}).toBeDisplayed();")
                    }
                    (AssertionKind::Hidden, Some(l), _) => {
                        format!("await expect({l}).not.toBeDisplayed();")
                    }
                    (AssertionKind::Text, Some(l), Some(v)) => {
                        format!("await expect({l}).toHaveText(expect.stringContaining({v}));")
                    }
                    (AssertionKind::Value, Some(l), Some(v)) => {
                        format!("await expect({l}).toHaveValue({v});")
                    }
                    (AssertionKind::Enabled, Some(l), _) => {
                        format!("await expect({l}).toBeEnabled();")
                    }
                    (AssertionKind::Disabled, Some(l), _) => {
                        format!("await expect({l}).toBeDisabled();")
                    }
                    (AssertionKind::Checked, Some(l), _) => {
                        format!("await expect({l}).toBeSelected();")
                    }
                    (AssertionKind::Url, _, Some(v)) => {
                        format!("await expect(browser).toHaveUrl(expect.stringContaining({v}));")
                    }
                    (AssertionKind::Title, _, Some(v)) => {
                        format!("await expect(browser).toHaveTitle({v});")
                    }
                    _ => return None,
                }
            }
            Op::Todo(_) => return None,
        };
        Some(vec![line])
    }
}

/// WebdriverIO spec driving Appium
pub fn emit_appium(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Appium)?;
    let mut findings = Vec::new();
    let dialect = AppiumDialect;

    let mut out = String::new();
    out.push_str("import { browser, $, expect } from '@wdio/globals';\n\n");
    out.push_str(&format!(
        "const BASE_URL = process.env.BASE_URL ?? {};\n\n",
        escape::js(&ctx.options.base_url)
    ));
    out.push_str(&format!("describe({}, () => {{\n", escape::js(ctx.suite_name)));
    let titles = unique_titles(ctx.test_cases);
    for (i, (case, title)) in ctx.test_cases.iter().zip(&titles).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let steps = plan_case(case, FrameworkFamily::WebdriverIo, &mut findings);
        out.push_str(&format!("  it({}, async () => {{\n", escape::js(title)));
        out.push_str(&precondition_lines(case, "//", "    "));
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "    "));
        out.push_str("  });\n");
    }
    out.push_str("});\n");

    Ok(EmittedArtifact::new(Format::Appium, ctx.filename(Format::Appium), out)
        .with_findings(findings))
}

// =============================================================================
// Detox
// =============================================================================

/// Detox gray-box commands
#[derive(Debug, Clone, Copy, Default)]
pub struct DetoxDialect;

impl Dialect for DetoxDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::Detox
    }

    fn lang(&self) -> Lang {
        Lang::JavaScript
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let el = |l: &Locator| l.render(FrameworkFamily::Detox);
        let line = match op {
            Op::Navigate(url) => {
                format!("await device.openURL({{ url: {} }});", js_url(url.as_deref()))
            }
            Op::Click(l) | Op::Check(l) | Op::Uncheck(l) => format!("await {}.tap();", el(l)),
            Op::Fill(l, v) if v.is_empty() => format!("await {}.clearText();", el(l)),
            Op::Fill(l, v) => format!("await {}.typeText({});", el(l), escape::js(v)),
            Op::Select(l, v) => {
                format!("await {}.setColumnToValue(0, {});", el(l), escape::js(v))
            }
            Op::Press(key) if key.eq_ignore_ascii_case("back") => {
                "await device.pressBack();".to_string()
            }
            Op::Wait(ms) => format!("await new Promise((resolve) => setTimeout(resolve, {ms}));"),
            Op::Expect(e) => {
                let loc = e.locator.as_ref().map(el);
                let value = e.value.as_deref().map(escape::js);
                match (e.kind, loc, value) {
                    (AssertionKind::Visible, Some(l), _) => {
                        format!("await expect({l}).toBeVisible();")
                    }
                    (AssertionKind::Hidden, Some(l), _) => {
                        format!("await expect({l}).not.toBeVisible();")
                    }
                    (AssertionKind::Text, Some(l), Some(v)) => {
                        format!("await expect({l}).toHaveText({v});")
                    }
                    (AssertionKind::Value, Some(l), Some(v)) => {
                        format!("await expect({l}).toHaveValue({v});")
                    }
                    (AssertionKind::Checked, Some(l), _) => {
                        format!("await expect({l}).toHaveToggleValue(true);")
                    }
                    _ => return None,
                }
            }
            Op::Hover(_) | Op::Upload(..) | Op::Press(_) | Op::Todo(_) => return None,
        };
        Some(vec![line])
    }
}

/// Detox e2e spec
pub fn emit_detox(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Detox)?;
    let mut findings = Vec::new();
    let dialect = DetoxDialect;

    let mut out = String::new();
    out.push_str("const { device, element, by, expect } = require('detox');\n\n");
    out.push_str(&format!(
        "const BASE_URL = process.env.BASE_URL ?? {};\n\n",
        escape::js(&ctx.options.base_url)
    ));
    out.push_str(&format!("describe({}, () => {{\n", escape::js(ctx.suite_name)));
    out.push_str("  beforeAll(async () => {\n");
    out.push_str("    await device.launchApp({ newInstance: true });\n");
    out.push_str("  });\n\n");
    out.push_str("  beforeEach(async () => {\n");
    out.push_str("    await device.reloadReactNative();\n");
    out.push_str("  });\n");

    let titles = unique_titles(ctx.test_cases);
    for (case, title) in ctx.test_cases.iter().zip(&titles) {
        out.push('\n');
        let steps = plan_case(case, FrameworkFamily::Detox, &mut findings);
        out.push_str(&format!("  it({}, async () => {{\n", escape::js(title)));
        out.push_str(&precondition_lines(case, "//", "    "));
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "    "));
        out.push_str("  });\n");
    }
    out.push_str("});\n");

    Ok(EmittedArtifact::new(Format::Detox, ctx.filename(Format::Detox), out)
        .with_findings(findings))
}

// =============================================================================
// Espresso
// =============================================================================

/// Espresso view interactions in Kotlin
#[derive(Debug, Clone, Copy, Default)]
pub struct EspressoDialect;

fn keycode(key: &str) -> String {
    let name = match key.to_ascii_lowercase().as_str() {
        "return" => "ENTER".to_string(),
        "backspace" | "delete" => "DEL".to_string(),
        "esc" => "ESCAPE".to_string(),
        "arrowup" => "DPAD_UP".to_string(),
        "arrowdown" => "DPAD_DOWN".to_string(),
        "arrowleft" => "DPAD_LEFT".to_string(),
        "arrowright" => "DPAD_RIGHT".to_string(),
        other => other.to_ascii_uppercase(),
    };
    format!("KeyEvent.KEYCODE_{name}")
}

/// Kotlin expression for a navigation target relative to `BASE_URL`
fn kotlin_url(url: Option<&str>) -> String {
    match url {
        None | Some("") => "BASE_URL".to_string(),
        Some(u) if u.contains("://") => escape::kotlin(u),
        Some(u) if u.starts_with('/') => format!("BASE_URL + {}", escape::kotlin(u)),
        Some(u) => format!("BASE_URL + {}", escape::kotlin(&format!("/{u}"))),
    }
}

impl Dialect for EspressoDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::Espresso
    }

    fn lang(&self) -> Lang {
        Lang::Kotlin
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let view = |l: &Locator| l.render(FrameworkFamily::Espresso);
        let lines = match op {
            Op::Navigate(url) => vec![format!("launchDeepLink({})", kotlin_url(url.as_deref()))],
            Op::Click(l) => vec![format!("{}.perform(click())", view(l))],
            Op::Fill(l, v) => vec![format!(
                "{}.perform(replaceText({}), closeSoftKeyboard())",
                view(l),
                escape::kotlin(v)
            )],
            Op::Check(l) => vec![
                format!("{}.perform(click())", view(l)),
                format!("{}.check(matches(isChecked()))", view(l)),
            ],
            Op::Uncheck(l) => vec![
                format!("{}.perform(click())", view(l)),
                format!("{}.check(matches(isNotChecked()))", view(l)),
            ],
            Op::Select(l, v) => vec![
                format!("{}.perform(click())", view(l)),
                format!("onView(withText({})).perform(click())", escape::kotlin(v)),
            ],
            Op::Press(key) => vec![format!("onView(isRoot()).perform(pressKey({}))", keycode(key))],
            Op::Wait(ms) => vec![format!("Thread.sleep({ms}L)")],
            Op::Expect(e) => {
                let loc = e.locator.as_ref().map(view);
                let value = e.value.as_deref().map(escape::kotlin);
                let line = match (e.kind, loc, value) {
                    (AssertionKind::Visible, Some(l), _) => {
                        format!("{l}.check(matches(isDisplayed()))")
                    }
                    (AssertionKind::Hidden, Some(l), _) => {
                        format!("{l}.check(matches(not(isDisplayed())))")
                    }
                    (AssertionKind::Text, Some(l), Some(v)) => {
                        format!("{l}.check(matches(withText(containsString({v}))))")
                    }
                    (AssertionKind::Value, Some(l), Some(v)) => {
                        format!("{l}.check(matches(withText({v})))")
                    }
                    (AssertionKind::Enabled, Some(l), _) => {
                        format!("{l}.check(matches(isEnabled()))")
                    }
                    (AssertionKind::Disabled, Some(l), _) => {
                        format!("{l}.check(matches(not(isEnabled())))")
                    }
                    (AssertionKind::Checked, Some(l), _) => {
                        format!("{l}.check(matches(isChecked()))")
                    }
                    _ => return None,
                };
                vec![line]
            }
            Op::Hover(_) | Op::Upload(..) | Op::Todo(_) => return None,
        };
        Some(lines)
    }
}

const ESPRESSO_IMPORTS: &[&str] = &[
    "android.content.Intent",
    "android.net.Uri",
    "android.view.KeyEvent",
    "androidx.test.espresso.Espresso.onView",
    "androidx.test.espresso.action.ViewActions.click",
    "androidx.test.espresso.action.ViewActions.closeSoftKeyboard",
    "androidx.test.espresso.action.ViewActions.pressKey",
    "androidx.test.espresso.action.ViewActions.replaceText",
    "androidx.test.espresso.assertion.ViewAssertions.matches",
    "androidx.test.espresso.matcher.ViewMatchers.isChecked",
    "androidx.test.espresso.matcher.ViewMatchers.isDisplayed",
    "androidx.test.espresso.matcher.ViewMatchers.isEnabled",
    "androidx.test.espresso.matcher.ViewMatchers.isNotChecked",
    "androidx.test.espresso.matcher.ViewMatchers.isRoot",
    "androidx.test.espresso.matcher.ViewMatchers.withContentDescription",
    "androidx.test.espresso.matcher.ViewMatchers.withResourceName",
    "androidx.test.espresso.matcher.ViewMatchers.withText",
    "androidx.test.ext.junit.runners.AndroidJUnit4",
    "androidx.test.platform.app.InstrumentationRegistry",
    "org.hamcrest.Matchers.containsString",
    "org.hamcrest.Matchers.not",
    "org.junit.Test",
    "org.junit.runner.RunWith",
];

/// Kotlin package name from an app id; invalid segments are dropped
pub(crate) fn kotlin_package(app_id: &str) -> String {
    let segments: Vec<String> = app_id
        .split('.')
        .map(|seg| {
            seg.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|seg| !seg.is_empty())
        .map(|seg| {
            if seg.starts_with(|c: char| c.is_ascii_digit()) {
                format!("_{seg}")
            } else {
                seg
            }
        })
        .collect();
    if segments.is_empty() {
        "com.example.app".to_string()
    } else {
        segments.join(".")
    }
}

/// Espresso instrumentation test class (Kotlin)
pub fn emit_espresso(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Espresso)?;
    let mut findings = Vec::new();
    let dialect = EspressoDialect;

    let mut out = String::new();
    out.push_str(&format!("package {}\n\n", kotlin_package(&ctx.options.app_id)));
    for import in ESPRESSO_IMPORTS {
        out.push_str(&format!("import {import}\n"));
    }
    out.push('\n');
    out.push_str(&format!(
        "private const val BASE_URL = {}\n\n",
        escape::kotlin(&ctx.options.base_url)
    ));
    out.push_str(&format!("// {}\n", escape::comment(ctx.suite_name)));
    out.push_str("@RunWith(AndroidJUnit4::class)\n");
    out.push_str(&format!("class {}Test {{\n\n", escape::pascal_ident(ctx.suite_name)));
    out.push_str("    private fun launchDeepLink(url: String) {\n");
    out.push_str("        val context = InstrumentationRegistry.getInstrumentation().targetContext\n");
    out.push_str("        val intent = Intent(Intent.ACTION_VIEW, Uri.parse(url))\n");
    out.push_str("            .addFlags(Intent.FLAG_ACTIVITY_NEW_TASK)\n");
    out.push_str("        context.startActivity(intent)\n");
    out.push_str("    }\n");

    let names = unique_idents(ctx.test_cases, escape::camel_ident);
    for (case, name) in ctx.test_cases.iter().zip(&names) {
        out.push('\n');
        let steps = plan_case(case, FrameworkFamily::Espresso, &mut findings);
        out.push_str(&format!("    // {}\n", escape::comment(display_title(case))));
        out.push_str("    @Test\n");
        out.push_str(&format!("    fun {name}() {{\n"));
        out.push_str(&precondition_lines(case, "//", "        "));
        render_steps(&dialect, &steps, "        ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "        "));
        out.push_str("    }\n");
    }
    out.push_str("}\n");

    Ok(EmittedArtifact::new(Format::Espresso, ctx.filename(Format::Espresso), out)
        .with_findings(findings))
}

// =============================================================================
// Maestro
// =============================================================================

fn yaml_map<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    let mut map = Mapping::new();
    for (k, v) in pairs {
        map.insert(Value::String(k.to_string()), v);
    }
    Value::Mapping(map)
}

fn command(name: &str, arg: Value) -> Value {
    yaml_map([(name, arg)])
}

fn string(s: impl Into<String>) -> Value {
    Value::String(s.into())
}

/// `tapOn`/`assertVisible` argument: text, or `{ id }` for CSS-style selectors
fn maestro_target(locator: &Locator) -> Value {
    match locator {
        Locator::Css { selector } => {
            yaml_map([("id", string(selector.trim_start_matches('#')))])
        }
        other => string(other.maestro_text()),
    }
}

fn with_flag(locator: &Locator, flag: &str, on: bool) -> Value {
    let mut map = Mapping::new();
    match maestro_target(locator) {
        Value::Mapping(m) => map = m,
        text => {
            map.insert(string("text"), text);
        }
    }
    map.insert(string(flag), Value::Bool(on));
    Value::Mapping(map)
}

fn maestro_key(key: &str) -> Option<&'static str> {
    match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => Some("Enter"),
        "backspace" => Some("Backspace"),
        "back" => Some("Back"),
        "home" => Some("Home"),
        "tab" => Some("Tab"),
        _ => None,
    }
}

/// Maestro commands for one op; `None` when Maestro has no equivalent
fn maestro_commands(op: &Op, base_url: &EmitContext<'_>) -> Option<Vec<Value>> {
    let commands = match op {
        Op::Navigate(url) => {
            let url = base_url.options.absolute_url(url.as_deref().unwrap_or(""));
            vec![command("openLink", string(url))]
        }
        Op::Click(l) | Op::Check(l) | Op::Uncheck(l) => vec![command("tapOn", maestro_target(l))],
        Op::Fill(l, v) if v.is_empty() => vec![
            command("tapOn", maestro_target(l)),
            command("eraseText", Value::Mapping(Mapping::new())),
        ],
        Op::Fill(l, v) => vec![
            command("tapOn", maestro_target(l)),
            command("inputText", string(v.clone())),
        ],
        Op::Select(l, v) => vec![
            command("tapOn", maestro_target(l)),
            command("tapOn", string(v.clone())),
        ],
        Op::Press(key) => vec![command("pressKey", string(maestro_key(key)?))],
        Op::Wait(ms) => vec![command(
            "extendedWaitUntil",
            yaml_map([("timeout", Value::Number((*ms).into()))]),
        )],
        Op::Expect(e) => {
            let loc = e.locator.as_ref();
            let cmd = match (e.kind, loc, e.value.as_deref()) {
                (AssertionKind::Visible, Some(l), _) => command("assertVisible", maestro_target(l)),
                (AssertionKind::Hidden, Some(l), _) => {
                    command("assertNotVisible", maestro_target(l))
                }
                (AssertionKind::Text | AssertionKind::Value, _, Some(v)) => {
                    command("assertVisible", string(v))
                }
                (AssertionKind::Enabled, Some(l), _) => {
                    command("assertVisible", with_flag(l, "enabled", true))
                }
                (AssertionKind::Disabled, Some(l), _) => {
                    command("assertVisible", with_flag(l, "enabled", false))
                }
                (AssertionKind::Checked, Some(l), _) => {
                    command("assertVisible", with_flag(l, "checked", true))
                }
                _ => return None,
            };
            vec![cmd]
        }
        Op::Hover(_) | Op::Upload(..) | Op::Todo(_) => return None,
    };
    Some(commands)
}

/// Maestro flow (YAML). Every case relaunches the app.
pub fn emit_maestro(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let mut out = serde_yaml_ng::to_string(&yaml_map([
        ("appId", string(ctx.options.app_id.clone())),
        ("name", string(ctx.suite_name)),
    ]))?;
    out.push_str("---\n");

    if ctx.test_cases.is_empty() {
        out.push_str("[]\n");
    }

    let titles = unique_titles(ctx.test_cases);
    for (i, (case, title)) in ctx.test_cases.iter().zip(&titles).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# Test case: {}\n", escape::comment(title)));
        out.push_str(&precondition_lines(case, "#", ""));
        out.push_str(&serde_yaml_ng::to_string(&vec![yaml_map([(
            "launchApp",
            yaml_map([("clearState", Value::Bool(true))]),
        )])])?);

        for step in plan_case(case, FrameworkFamily::Maestro, &mut findings) {
            out.push_str(&format!("# Step {}: {}\n", step.number, escape::comment(step.text)));
            for op in &step.ops {
                if let Op::Todo(reason) = op {
                    out.push_str(&format!("# TODO: {}\n", escape::comment(reason)));
                    continue;
                }
                match maestro_commands(op, ctx) {
                    Some(commands) => {
                        if op.has_placeholder() {
                            out.push_str("# TODO: replace selector\n");
                        }
                        out.push_str(&serde_yaml_ng::to_string(&commands)?);
                    }
                    None => {
                        let what = op.describe();
                        warn!(step = step.number, op = %what, "no Maestro equivalent");
                        findings.push(LintFinding::warning(
                            "UNSUPPORTED001",
                            format!("step {}: {what} has no Maestro equivalent", step.number),
                        ));
                        out.push_str(&format!("# TODO: {what} is not supported here\n"));
                    }
                }
            }
        }
        out.push_str(&expected_line(case, "#", ""));
    }

    Ok(EmittedArtifact::new(Format::Maestro, ctx.filename(Format::Maestro), out)
        .with_findings(findings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::EmitOptions;
    use crate::ir::{ActionKind, Assertion, Step, TestCase};
    use crate::lint::{lint, Severity};

    fn checkout_case() -> TestCase {
        TestCase::new("Checkout")
            .with_step(Step::new(1, "Open /cart"))
            .with_step(Step::new(2, "Tap the \"Pay now\" button"))
            .with_step(Step::new(3, "Type \"4242\" into the Card number field"))
            .with_step(Step::new(4, "Wait 2 seconds"))
            .with_step(
                Step::new(5, "Receipt appears")
                    .with_type(ActionKind::Verify)
                    .with_selector("receipt")
                    .with_assertion(Assertion::flag(AssertionKind::Visible)),
            )
    }

    fn emit(f: fn(&EmitContext<'_>) -> CasegenResult<EmittedArtifact>, cases: &[TestCase]) -> EmittedArtifact {
        let clock = FixedClock::at_ms(1_700_000_000_000);
        let options = EmitOptions::default()
            .with_base_url("shop://app")
            .with_app_id("com.Shop.mobile-app");
        let ctx = EmitContext::new(cases, "Mobile checkout", &clock, &options);
        f(&ctx).unwrap()
    }

    fn errors(script: &str) -> Vec<LintFinding> {
        lint(script)
            .into_iter()
            .filter(|f| f.severity == Severity::Error)
            .collect()
    }

    mod appium_tests {
        use super::*;

        #[test]
        fn test_wdio_commands() {
            let artifact = emit(emit_appium, &[checkout_case()]);
            let c = &artifact.content;
            assert!(c.contains("await browser.url(BASE_URL + '/cart');"));
            assert!(c.contains("await $('~Card number').setValue('4242');"));
            assert!(c.contains("await browser.pause(2000);"));
            assert!(c.contains("await expect($('receipt')).toBeDisplayed();"));
            assert!(errors(c).is_empty(), "{:?}", errors(c));
        }
    }

    mod detox_tests {
        use super::*;

        #[test]
        fn test_detox_commands() {
            let artifact = emit(emit_detox, &[checkout_case()]);
            let c = &artifact.content;
            assert!(c.contains("await device.launchApp({ newInstance: true });"));
            assert!(c.contains("await element(by.label('Card number')).typeText('4242');"));
            assert!(c.contains("await expect(element(by.id('receipt'))).toBeVisible();"));
            assert!(errors(c).is_empty(), "{:?}", errors(c));
        }

        #[test]
        fn test_hover_is_unsupported() {
            let case = TestCase::new("H").with_step(
                Step::new(1, "Hover the menu")
                    .with_type(ActionKind::Hover)
                    .with_selector("menu"),
            );
            let artifact = emit(emit_detox, &[case]);
            assert!(artifact.content.contains("// TODO: hover is not supported here"));
            assert!(artifact.findings.iter().any(|f| f.code == "UNSUPPORTED001"));
        }
    }

    mod espresso_tests {
        use super::*;

        #[test]
        fn test_kotlin_class() {
            let artifact = emit(emit_espresso, &[checkout_case()]);
            let c = &artifact.content;
            assert!(c.starts_with("package com.shop.mobileapp\n"));
            assert!(c.contains("class MobileCheckoutTest {"));
            assert!(c.contains("    fun checkout() {"));
            assert!(c.contains("launchDeepLink(BASE_URL + \"/cart\")"));
            assert!(c.contains("Thread.sleep(2000L)"));
            assert!(c.contains("onView(withResourceName(\"receipt\")).check(matches(isDisplayed()))"));
            assert!(errors(c).is_empty(), "{:?}", errors(c));
        }

        #[test]
        fn test_kotlin_package() {
            assert_eq!(kotlin_package("com.example.app"), "com.example.app");
            assert_eq!(kotlin_package("io.1app"), "io._1app");
            assert_eq!(kotlin_package("..."), "com.example.app");
        }
    }

    mod maestro_tests {
        use super::*;

        #[test]
        fn test_flow_parses_as_yaml() {
            let artifact = emit(emit_maestro, &[checkout_case()]);
            let mut docs = artifact.content.split("---\n");
            let header: Value = serde_yaml_ng::from_str(docs.next().unwrap()).unwrap();
            assert_eq!(header["appId"], Value::String("com.Shop.mobile-app".into()));
            let flow: Vec<Value> = serde_yaml_ng::from_str(docs.next().unwrap()).unwrap();
            assert!(flow[0].get("launchApp").is_some());
            assert_eq!(flow[1]["openLink"], Value::String("shop://app/cart".into()));
            assert_eq!(flow[2]["tapOn"], Value::String("Pay now".into()));
            assert_eq!(flow[4]["inputText"], Value::String("4242".into()));
            assert_eq!(flow[5]["extendedWaitUntil"]["timeout"], Value::Number(2000.into()));
            assert_eq!(flow[6]["assertVisible"]["id"], Value::String("receipt".into()));
        }

        #[test]
        fn test_unresolved_step_is_comment() {
            let case = TestCase::new("B").with_step(Step::new(1, "Verify page loads correctly"));
            let artifact = emit(emit_maestro, &[case]);
            assert!(artifact
                .content
                .contains("# TODO: unresolved step: Verify page loads correctly"));
        }

        #[test]
        fn test_empty_input_is_empty_flow() {
            let artifact = emit(emit_maestro, &[]);
            let flow = artifact.content.split("---\n").nth(1).unwrap();
            let parsed: Vec<Value> = serde_yaml_ng::from_str(flow).unwrap();
            assert!(parsed.is_empty());
        }
    }
}
