//! Browser E2E emitters: Playwright, Cypress, Selenium (pytest).

use crate::artifact::EmittedArtifact;
use crate::escape::{self, Lang};
use crate::ir::AssertionKind;
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::selector::{FrameworkFamily, Locator};
use crate::target::Format;

use super::{
    expected_line, plan_case, precondition_lines, render_steps, require_cases, unique_idents,
    unique_titles, Dialect, Expect, Op,
};

/// JS expression for a navigation target relative to `BASE_URL`
pub(crate) fn js_url(url: Option<&str>) -> String {
    match url {
        None | Some("") => "BASE_URL".to_string(),
        Some(u) if u.starts_with("http://") || u.starts_with("https://") => escape::js(u),
        Some(u) if u.starts_with('/') => format!("BASE_URL + {}", escape::js(u)),
        Some(u) => format!("BASE_URL + {}", escape::js(&format!("/{u}"))),
    }
}

fn count_value(expect: &Expect) -> Option<u64> {
    expect.value.as_deref().and_then(|v| v.trim().parse().ok())
}

// =============================================================================
// Playwright
// =============================================================================

/// Playwright Test syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaywrightDialect;

impl PlaywrightDialect {
    fn expect(expect: &Expect) -> Option<String> {
        let loc = expect.locator.as_ref().map(|l| l.render(FrameworkFamily::Playwright));
        let value = expect.value.as_deref().map(escape::js);
        let line = match (expect.kind, loc, value) {
            (AssertionKind::Visible, Some(l), _) => format!("await expect({l}).toBeVisible();"),
            (AssertionKind::Hidden, Some(l), _) => format!("await expect({l}).toBeHidden();"),
            (AssertionKind::Text, Some(l), Some(v)) => {
                format!("await expect({l}).toContainText({v});")
            }
            (AssertionKind::Value, Some(l), Some(v)) => {
                format!("await expect({l}).toHaveValue({v});")
            }
            (AssertionKind::Count, Some(l), _) => {
                format!("await expect({l}).toHaveCount({});", count_value(expect)?)
            }
            (AssertionKind::Enabled, Some(l), _) => format!("await expect({l}).toBeEnabled();"),
            (AssertionKind::Disabled, Some(l), _) => format!("await expect({l}).toBeDisabled();"),
            (AssertionKind::Checked, Some(l), _) => format!("await expect({l}).toBeChecked();"),
            (AssertionKind::Url, _, Some(v)) => format!("expect(page.url()).toContain({v});"),
            (AssertionKind::Title, _, Some(v)) => format!("await expect(page).toHaveTitle({v});"),
            _ => return None,
        };
        Some(line)
    }
}

impl Dialect for PlaywrightDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::Playwright
    }

    fn lang(&self) -> Lang {
        Lang::JavaScript
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let render = |l: &Locator| l.render(FrameworkFamily::Playwright);
        let line = match op {
            Op::Navigate(url) => format!("await page.goto({});", js_url(url.as_deref())),
            Op::Click(l) => format!("await {}.click();", render(l)),
            Op::Hover(l) => format!("await {}.hover();", render(l)),
            Op::Fill(l, v) => format!("await {}.fill({});", render(l), escape::js(v)),
            Op::Check(l) => format!("await {}.check();", render(l)),
            Op::Uncheck(l) => format!("await {}.uncheck();", render(l)),
            Op::Select(l, v) => format!("await {}.selectOption({});", render(l), escape::js(v)),
            Op::Upload(l, v) => format!("await {}.setInputFiles({});", render(l), escape::js(v)),
            Op::Press(key) => format!("await page.keyboard.press({});", escape::js(key)),
            Op::Wait(ms) => format!("await page.waitForTimeout({ms});"),
            Op::Expect(e) => Self::expect(e)?,
            Op::Todo(_) => return None,
        };
        Some(vec![line])
    }
}

/// Playwright Test (TypeScript)
pub fn emit_playwright(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Playwright)?;
    let mut findings = Vec::new();
    let dialect = PlaywrightDialect;

    let mut out = String::new();
    out.push_str("import { test, expect } from '@playwright/test';\n\n");
    out.push_str(&format!(
        "const BASE_URL = process.env.BASE_URL ?? {};\n\n",
        escape::js(&ctx.options.base_url)
    ));
    out.push_str(&format!("test.describe({}, () => {{\n", escape::js(ctx.suite_name)));

    let titles = unique_titles(ctx.test_cases);
    for (i, (case, title)) in ctx.test_cases.iter().zip(&titles).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let steps = plan_case(case, FrameworkFamily::Playwright, &mut findings);
        let tags = case.tags();
        if tags.is_empty() {
            out.push_str(&format!("  test({}, async ({{ page }}) => {{\n", escape::js(title)));
        } else {
            let tag_list: Vec<String> = tags.iter().map(|t| escape::js(&format!("@{t}"))).collect();
            out.push_str(&format!(
                "  test({}, {{ tag: [{}] }}, async ({{ page }}) => {{\n",
                escape::js(title),
                tag_list.join(", ")
            ));
        }
        out.push_str(&format!("    test.setTimeout({});\n", ctx.options.timeout_ms));
        out.push_str(&precondition_lines(case, "//", "    "));
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "    "));
        out.push_str("  });\n");
    }
    out.push_str("});\n");

    Ok(EmittedArtifact::new(Format::Playwright, ctx.filename(Format::Playwright), out)
        .with_findings(findings))
}

// =============================================================================
// Cypress
// =============================================================================

/// Cypress command syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct CypressDialect;

fn cypress_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "return" => "{enter}".to_string(),
        "escape" => "{esc}".to_string(),
        "arrowup" => "{uparrow}".to_string(),
        "arrowdown" => "{downarrow}".to_string(),
        "arrowleft" => "{leftarrow}".to_string(),
        "arrowright" => "{rightarrow}".to_string(),
        "delete" => "{del}".to_string(),
        other => format!("{{{other}}}"),
    }
}

impl Dialect for CypressDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::Cypress
    }

    fn lang(&self) -> Lang {
        Lang::JavaScript
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let render = |l: &Locator| l.render(FrameworkFamily::Cypress);
        let line = match op {
            Op::Navigate(None) => "cy.visit('/');".to_string(),
            Op::Navigate(Some(url)) => format!("cy.visit({});", escape::js(url)),
            Op::Click(l) => format!("{}.click();", render(l)),
            Op::Hover(l) => format!("{}.trigger('mouseover');", render(l)),
            Op::Fill(l, v) if v.is_empty() => format!("{}.clear();", render(l)),
            Op::Fill(l, v) => format!("{}.clear().type({});", render(l), escape::js(v)),
            Op::Check(l) => format!("{}.check();", render(l)),
            Op::Uncheck(l) => format!("{}.uncheck();", render(l)),
            Op::Select(l, v) => format!("{}.select({});", render(l), escape::js(v)),
            Op::Upload(l, v) => format!("{}.selectFile({});", render(l), escape::js(v)),
            Op::Press(key) => format!("cy.focused().type({});", escape::js(&cypress_key(key))),
            Op::Wait(ms) => format!("cy.wait({ms});"),
            Op::Expect(e) => {
                let loc = e.locator.as_ref().map(render);
                let value = e.value.as_deref().map(escape::js);
                match (e.kind, loc, value) {
                    (AssertionKind::Visible, Some(l), _) => format!("{l}.should('be.visible');"),
                    (AssertionKind::Hidden, Some(l), _) => format!("{l}.should('not.be.visible');"),
                    (AssertionKind::Text, Some(l), Some(v)) => format!("{l}.should('contain', {v});"),
                    (AssertionKind::Value, Some(l), Some(v)) => {
                        format!("{l}.should('have.value', {v});")
                    }
                    (AssertionKind::Count, Some(l), _) => {
                        format!("{l}.should('have.length', {});", count_value(e)?)
                    }
                    (AssertionKind::Enabled, Some(l), _) => format!("{l}.should('be.enabled');"),
                    (AssertionKind::Disabled, Some(l), _) => format!("{l}.should('be.disabled');"),
                    (AssertionKind::Checked, Some(l), _) => format!("{l}.should('be.checked');"),
                    (AssertionKind::Url, _, Some(v)) => format!("cy.url().should('include', {v});"),
                    (AssertionKind::Title, _, Some(v)) => format!("cy.title().should('eq', {v});"),
                    _ => return None,
                }
            }
            Op::Todo(_) => return None,
        };
        Some(vec![line])
    }
}

/// Cypress spec (JavaScript)
pub fn emit_cypress(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Cypress)?;
    let mut findings = Vec::new();
    let dialect = CypressDialect;

    let mut out = String::new();
    out.push_str("/// <reference types=\"cypress\" />\n\n");
    out.push_str(&format!("describe({}, () => {{\n", escape::js(ctx.suite_name)));
    out.push_str("  beforeEach(() => {\n");
    out.push_str(&format!(
        "    Cypress.config('defaultCommandTimeout', {});\n",
        ctx.options.timeout_ms
    ));
    out.push_str("  });\n");

    let titles = unique_titles(ctx.test_cases);
    for (case, title) in ctx.test_cases.iter().zip(&titles) {
        out.push('\n');
        let steps = plan_case(case, FrameworkFamily::Cypress, &mut findings);
        out.push_str(&format!("  it({}, () => {{\n", escape::js(title)));
        out.push_str(&precondition_lines(case, "//", "    "));
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "//", "    "));
        out.push_str("  });\n");
    }
    out.push_str("});\n");

    Ok(EmittedArtifact::new(Format::Cypress, ctx.filename(Format::Cypress), out)
        .with_findings(findings))
}

// =============================================================================
// Selenium (pytest)
// =============================================================================

/// Selenium WebDriver calls in pytest functions
#[derive(Debug, Clone, Copy, Default)]
pub struct SeleniumDialect;

fn selenium_key(key: &str) -> String {
    let name = match key.to_ascii_lowercase().as_str() {
        "esc" | "escape" => "ESCAPE".to_string(),
        "arrowup" => "ARROW_UP".to_string(),
        "arrowdown" => "ARROW_DOWN".to_string(),
        "arrowleft" => "ARROW_LEFT".to_string(),
        "arrowright" => "ARROW_RIGHT".to_string(),
        "pageup" => "PAGE_UP".to_string(),
        "pagedown" => "PAGE_DOWN".to_string(),
        other => other.to_ascii_uppercase(),
    };
    format!("Keys.{name}")
}

pub(crate) fn python_seconds(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{}", ms / 1000)
    } else {
        let s = format!("{:.3}", ms as f64 / 1000.0);
        s.trim_end_matches('0').to_string()
    }
}

/// Python expression for a navigation target relative to `BASE_URL`
pub(crate) fn python_url(url: Option<&str>) -> String {
    match url {
        None | Some("") => "BASE_URL".to_string(),
        Some(u) if u.starts_with("http://") || u.starts_with("https://") => escape::python(u),
        Some(u) if u.starts_with('/') => format!("BASE_URL + {}", escape::python(u)),
        Some(u) => format!("BASE_URL + {}", escape::python(&format!("/{u}"))),
    }
}

impl Dialect for SeleniumDialect {
    fn family(&self) -> FrameworkFamily {
        FrameworkFamily::Selenium
    }

    fn lang(&self) -> Lang {
        Lang::Python
    }

    fn op_lines(&self, op: &Op) -> Option<Vec<String>> {
        let by = |l: &Locator| l.render(FrameworkFamily::Selenium);
        let lines = match op {
            Op::Navigate(url) => vec![format!("driver.get({})", python_url(url.as_deref()))],
            Op::Click(l) => vec![format!(
                "wait.until(EC.element_to_be_clickable({})).click()",
                by(l)
            )],
            Op::Hover(l) => vec![format!(
                "ActionChains(driver).move_to_element(driver.find_element(*{})).perform()",
                by(l)
            )],
            Op::Fill(l, v) => vec![
                format!("field = driver.find_element(*{})", by(l)),
                "field.clear()".to_string(),
                format!("field.send_keys({})", escape::python(v)),
            ],
            Op::Check(l) => vec![
                format!("checkbox = driver.find_element(*{})", by(l)),
                "if not checkbox.is_selected():".to_string(),
                "    checkbox.click()".to_string(),
            ],
            Op::Uncheck(l) => vec![
                format!("checkbox = driver.find_element(*{})", by(l)),
                "if checkbox.is_selected():".to_string(),
                "    checkbox.click()".to_string(),
            ],
            Op::Select(l, v) => vec![format!(
                "Select(driver.find_element(*{})).select_by_visible_text({})",
                by(l),
                escape::python(v)
            )],
            Op::Upload(l, v) => vec![format!(
                "driver.find_element(*{}).send_keys(os.path.abspath({}))",
                by(l),
                escape::python(v)
            )],
            Op::Press(key) => vec![format!(
                "ActionChains(driver).send_keys({}).perform()",
                selenium_key(key)
            )],
            Op::Wait(ms) => vec![format!("time.sleep({})", python_seconds(*ms))],
            Op::Expect(e) => {
                let loc = e.locator.as_ref().map(by);
                let value = e.value.as_deref().map(escape::python);
                let line = match (e.kind, loc, value) {
                    (AssertionKind::Visible, Some(l), _) => {
                        format!("assert wait.until(EC.visibility_of_element_located({l}))")
                    }
                    (AssertionKind::Hidden, Some(l), _) => {
                        format!("assert wait.until(EC.invisibility_of_element_located({l}))")
                    }
                    (AssertionKind::Text, Some(l), Some(v)) => {
                        format!("assert {v} in driver.find_element(*{l}).text")
                    }
                    (AssertionKind::Value, Some(l), Some(v)) => {
                        format!("assert driver.find_element(*{l}).get_attribute('value') == {v}")
                    }
                    (AssertionKind::Count, Some(l), _) => {
                        format!("assert len(driver.find_elements(*{l})) == {}", count_value(e)?)
                    }
                    (AssertionKind::Enabled, Some(l), _) => {
                        format!("assert driver.find_element(*{l}).is_enabled()")
                    }
                    (AssertionKind::Disabled, Some(l), _) => {
                        format!("assert not driver.find_element(*{l}).is_enabled()")
                    }
                    (AssertionKind::Checked, Some(l), _) => {
                        format!("assert driver.find_element(*{l}).is_selected()")
                    }
                    (AssertionKind::Url, _, Some(v)) => format!("assert {v} in driver.current_url"),
                    (AssertionKind::Title, _, Some(v)) => format!("assert driver.title == {v}"),
                    _ => return None,
                };
                vec![line]
            }
            Op::Todo(_) => return None,
        };
        Some(lines)
    }
}

/// Selenium WebDriver test module for pytest
pub fn emit_selenium(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Selenium)?;
    let mut findings = Vec::new();
    let dialect = SeleniumDialect;

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", escape::docstring(ctx.suite_name)));
    out.push_str("import os\nimport time\n\n");
    out.push_str("import pytest\n");
    out.push_str("from selenium import webdriver\n");
    out.push_str("from selenium.webdriver.common.action_chains import ActionChains\n");
    out.push_str("from selenium.webdriver.common.by import By\n");
    out.push_str("from selenium.webdriver.common.keys import Keys\n");
    out.push_str("from selenium.webdriver.support import expected_conditions as EC\n");
    out.push_str("from selenium.webdriver.support.ui import Select, WebDriverWait\n\n");
    out.push_str(&format!(
        "BASE_URL = os.environ.get('BASE_URL', {})\n",
        escape::python(&ctx.options.base_url)
    ));
    out.push_str(&format!(
        "TIMEOUT = {}\n\n\n",
        python_seconds(ctx.options.timeout_ms)
    ));
    out.push_str("@pytest.fixture\n");
    out.push_str("def driver():\n");
    out.push_str("    options = webdriver.ChromeOptions()\n");
    out.push_str("    options.add_argument('--headless=new')\n");
    out.push_str("    drv = webdriver.Chrome(options=options)\n");
    out.push_str("    yield drv\n");
    out.push_str("    drv.quit()\n");

    let names = unique_idents(ctx.test_cases, escape::snake_ident);
    let titles = unique_titles(ctx.test_cases);
    for ((case, name), title) in ctx.test_cases.iter().zip(&names).zip(&titles) {
        out.push_str("\n\n");
        let steps = plan_case(case, FrameworkFamily::Selenium, &mut findings);
        for tag in case.tags() {
            out.push_str(&format!("@pytest.mark.{}\n", tag.replace('-', "_")));
        }
        out.push_str(&format!("def test_{name}(driver):\n"));
        out.push_str(&format!("    {}\n", escape::python(title)));
        out.push_str("    wait = WebDriverWait(driver, TIMEOUT)\n");
        out.push_str(&precondition_lines(case, "#", "    "));
        render_steps(&dialect, &steps, "    ", &mut out, &mut findings);
        out.push_str(&expected_line(case, "#", "    "));
    }

    Ok(EmittedArtifact::new(Format::Selenium, ctx.filename(Format::Selenium), out)
        .with_findings(findings))
}
