//! Per-framework emitters.
//!
//! Script emitters share one lowering: every step of a case becomes a
//! [`PlannedStep`] holding framework-neutral [`Op`]s, and a [`Dialect`]
//! renders each op as source lines. Data emitters build their documents from
//! the same IR through serde.
//!
//! ```text
//! Step ──classify──► InferredAction ──resolve──► Locator
//!   └──────────────────── plan_case ────────────► Vec<PlannedStep>
//!                                                    │
//!                         Dialect::op_lines ◄────────┘
//! ```

pub mod a11y;
pub mod api;
pub mod har;
pub mod mobile;
pub mod perf;
pub mod web;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::classifier::{classify, extract_url, InferredAction, DEFAULT_WAIT_MS};
use crate::escape::{self, Lang};
use crate::http::{collect_requests, HttpCall, HttpMethod};
use crate::ir::{ActionKind, AssertionKind, Step, TestCase};
use crate::lint::LintFinding;
use crate::registry::EmitContext;
use crate::result::{CasegenError, CasegenResult};
use crate::selector::{resolve, FrameworkFamily, Locator};
use crate::target::Format;

/// Expectation lowered for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expect {
    /// What to check
    pub kind: AssertionKind,
    /// Element, for element assertions
    pub locator: Option<Locator>,
    /// Expected value
    pub value: Option<String>,
}

/// One framework-neutral operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Open a URL; `None` opens the base URL
    Navigate(Option<String>),
    /// Click
    Click(Locator),
    /// Hover
    Hover(Locator),
    /// Type a value
    Fill(Locator, String),
    /// Check a checkbox
    Check(Locator),
    /// Uncheck a checkbox
    Uncheck(Locator),
    /// Select an option
    Select(Locator, String),
    /// Attach a file
    Upload(Locator, String),
    /// Press a key
    Press(String),
    /// Sleep
    Wait(u64),
    /// Assert
    Expect(Expect),
    /// Unresolved; rendered as a TODO comment
    Todo(String),
}

impl Op {
    /// Element the op acts on
    #[must_use]
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            Self::Click(l)
            | Self::Hover(l)
            | Self::Fill(l, _)
            | Self::Check(l)
            | Self::Uncheck(l)
            | Self::Select(l, _)
            | Self::Upload(l, _) => Some(l),
            Self::Expect(e) => e.locator.as_ref(),
            Self::Navigate(_) | Self::Press(_) | Self::Wait(_) | Self::Todo(_) => None,
        }
    }

    /// Whether the op renders the placeholder selector
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.locator().is_some_and(Locator::is_placeholder)
    }

    /// Short name used in messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Navigate(_) => "navigate".to_string(),
            Self::Click(_) => "click".to_string(),
            Self::Hover(_) => "hover".to_string(),
            Self::Fill(..) => "fill".to_string(),
            Self::Check(_) => "check".to_string(),
            Self::Uncheck(_) => "uncheck".to_string(),
            Self::Select(..) => "select".to_string(),
            Self::Upload(..) => "upload".to_string(),
            Self::Press(_) => "key press".to_string(),
            Self::Wait(_) => "wait".to_string(),
            Self::Expect(e) => format!("'{}' assertion", e.kind.as_str()),
            Self::Todo(_) => "todo".to_string(),
        }
    }
}

/// A step lowered to ops
#[derive(Debug, Clone)]
pub struct PlannedStep<'a> {
    /// Step number
    pub number: u32,
    /// Original action text
    pub text: &'a str,
    /// Ops in execution order
    pub ops: Vec<Op>,
}

impl PlannedStep<'_> {
    /// Whether any op is a navigation
    #[must_use]
    pub fn navigates(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, Op::Navigate(_)))
    }
}

/// Lower every step of a case, in order
pub fn plan_case<'a>(
    case: &'a TestCase,
    family: FrameworkFamily,
    findings: &mut Vec<LintFinding>,
) -> Vec<PlannedStep<'a>> {
    case.ordered_steps()
        .into_iter()
        .map(|step| plan_step(step, family, findings))
        .collect()
}

fn plan_step<'a>(
    step: &'a Step,
    family: FrameworkFamily,
    findings: &mut Vec<LintFinding>,
) -> PlannedStep<'a> {
    let action = classify(step);
    let n = step.step_number;
    let mut ops = Vec::with_capacity(2);
    let find = |findings: &mut Vec<LintFinding>| locate(&action, step, family, findings);

    match action.kind {
        ActionKind::Navigate => {
            let url = action.url().map(str::to_string);
            if url.is_none() {
                findings.push(LintFinding::warning(
                    "DEFAULT001",
                    format!("step {n}: no URL found; navigating to the base URL"),
                ));
            }
            ops.push(Op::Navigate(url));
        }
        ActionKind::Click => ops.push(Op::Click(find(findings))),
        ActionKind::Hover => ops.push(Op::Hover(find(findings))),
        ActionKind::Check => ops.push(Op::Check(find(findings))),
        ActionKind::Uncheck => ops.push(Op::Uncheck(find(findings))),
        ActionKind::Fill => {
            let value = action.value.clone().unwrap_or_else(|| {
                findings.push(LintFinding::warning(
                    "DEFAULT001",
                    format!("step {n}: no input value found; typing an empty string"),
                ));
                String::new()
            });
            ops.push(Op::Fill(find(findings), value));
        }
        ActionKind::Select => match action.value.clone() {
            Some(option) => ops.push(Op::Select(find(findings), option)),
            None => ops.push(unresolved(step, "no option to select", findings)),
        },
        ActionKind::Upload => match action.value.clone() {
            Some(file) => ops.push(Op::Upload(find(findings), file)),
            None => ops.push(unresolved(step, "no file to upload", findings)),
        },
        ActionKind::Press => match action.value.clone() {
            Some(key) => ops.push(Op::Press(key)),
            None => ops.push(unresolved(step, "no key to press", findings)),
        },
        ActionKind::Wait => ops.push(Op::Wait(action.wait_ms.unwrap_or(DEFAULT_WAIT_MS))),
        ActionKind::Verify => match &action.expectation {
            Some(expectation) => {
                let (kind, value) = match (expectation.kind, expectation.target.as_ref()) {
                    // Quoted text with no element: the text itself is the element
                    (AssertionKind::Text, None) => (AssertionKind::Visible, None),
                    (kind, _) => (kind, expectation.value.clone()),
                };
                let locator = kind.needs_target().then(|| find(findings));
                ops.push(Op::Expect(Expect {
                    kind,
                    locator,
                    value,
                }));
            }
            None if step.assertion.is_some() => {}
            None => {
                if let Some(selector) = step.explicit_selector() {
                    ops.push(Op::Expect(Expect {
                        kind: AssertionKind::Visible,
                        locator: Some(Locator::css(selector)),
                        value: None,
                    }));
                } else {
                    ops.push(unresolved(step, "expectation not recognized", findings));
                }
            }
        },
        ActionKind::Unknown => {
            if step.assertion.is_none() || !step.action.trim().is_empty() {
                ops.push(unresolved(step, "action not recognized", findings));
            }
        }
    }

    if let Some(assertion) = &step.assertion {
        let locator = assertion.kind.needs_target().then(|| {
            assertion
                .effective_target(step)
                .map_or_else(|| find(findings), Locator::css)
        });
        let op = Op::Expect(Expect {
            kind: assertion.kind,
            locator,
            value: assertion.value.clone(),
        });
        // Text already implied the same check
        if !ops.contains(&op) {
            ops.push(op);
        }
    }

    debug!(step = n, ops = ops.len(), "planned step");
    PlannedStep {
        number: n,
        text: step.action.as_str(),
        ops,
    }
}

fn locate(
    action: &InferredAction,
    step: &Step,
    family: FrameworkFamily,
    findings: &mut Vec<LintFinding>,
) -> Locator {
    let resolved = resolve(action, step.explicit_selector(), family);
    if resolved.is_placeholder() {
        warn!(step = step.step_number, action = %step.action, "no selector resolved");
        findings.push(LintFinding::warning(
            "SELECTOR001",
            format!(
                "step {}: no selector resolved for '{}'",
                step.step_number,
                escape::comment(&step.action)
            ),
        ));
    }
    resolved.locator
}

fn unresolved(step: &Step, detail: &str, findings: &mut Vec<LintFinding>) -> Op {
    let err = CasegenError::malformed_step(step.step_number, detail);
    warn!(error = %err, "step rendered as placeholder");
    findings.push(LintFinding::warning("STEP001", err.to_string()));
    Op::Todo(format!("unresolved step: {}", step.action))
}

/// Renders ops in one framework's syntax
pub trait Dialect {
    /// Locator family
    fn family(&self) -> FrameworkFamily;

    /// Source language
    fn lang(&self) -> Lang;

    /// Lines for one op; `None` when the framework has no equivalent
    fn op_lines(&self, op: &Op) -> Option<Vec<String>>;
}

/// Write `// Step N:` blocks for planned steps
pub fn render_steps(
    dialect: &dyn Dialect,
    steps: &[PlannedStep<'_>],
    indent: &str,
    out: &mut String,
    findings: &mut Vec<LintFinding>,
) {
    let prefix = dialect.lang().comment_prefix();
    for step in steps {
        let text = escape::comment(step.text);
        if text.is_empty() {
            out.push_str(&format!("{indent}{prefix} Step {}:\n", step.number));
        } else {
            out.push_str(&format!("{indent}{prefix} Step {}: {text}\n", step.number));
        }
        for op in &step.ops {
            render_op(dialect, op, step.number, indent, out, findings);
        }
    }
}

fn render_op(
    dialect: &dyn Dialect,
    op: &Op,
    step_number: u32,
    indent: &str,
    out: &mut String,
    findings: &mut Vec<LintFinding>,
) {
    let prefix = dialect.lang().comment_prefix();
    if let Op::Todo(reason) = op {
        out.push_str(&format!("{indent}{prefix} TODO: {}\n", escape::comment(reason)));
        return;
    }
    match dialect.op_lines(op) {
        Some(lines) => {
            for (i, line) in lines.iter().enumerate() {
                if i == 0 && op.has_placeholder() {
                    out.push_str(&format!("{indent}{line}  {prefix} TODO: replace selector\n"));
                } else {
                    out.push_str(&format!("{indent}{line}\n"));
                }
            }
        }
        None => {
            let what = op.describe();
            findings.push(LintFinding::warning(
                "UNSUPPORTED001",
                format!("step {step_number}: {what} has no {:?} equivalent", dialect.family()),
            ));
            out.push_str(&format!(
                "{indent}{prefix} TODO: {what} is not supported here\n"
            ));
        }
    }
}

/// Comment lines for preconditions
pub fn precondition_lines(case: &TestCase, prefix: &str, indent: &str) -> String {
    let mut out = String::new();
    if !case.preconditions.is_empty() {
        out.push_str(&format!("{indent}{prefix} Preconditions:\n"));
        for p in &case.preconditions {
            out.push_str(&format!("{indent}{prefix} - {}\n", escape::comment(p)));
        }
    }
    out
}

/// Comment line for the expected result
pub fn expected_line(case: &TestCase, prefix: &str, indent: &str) -> String {
    case.expected_result
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(|e| format!("{indent}{prefix} Expected: {}\n", escape::comment(e)))
        .unwrap_or_default()
}

/// Titles made unique within a file (`Login`, `Login (2)`)
#[must_use]
pub fn unique_titles(cases: &[TestCase]) -> Vec<String> {
    dedupe(cases.iter().map(|c| display_title(c).to_string()), |t, n| {
        format!("{t} ({n})")
    })
}

/// Identifiers made unique within a file (`login`, `login_2`)
#[must_use]
pub fn unique_idents(cases: &[TestCase], ident: fn(&str) -> String) -> Vec<String> {
    dedupe(cases.iter().map(|c| ident(display_title(c))), |t, n| {
        format!("{t}_{n}")
    })
}

fn dedupe(items: impl Iterator<Item = String>, suffix: impl Fn(&str, usize) -> String) -> Vec<String> {
    let mut used = HashSet::new();
    items
        .map(|item| {
            let mut name = item.clone();
            let mut n = 1;
            while used.contains(&name) {
                n += 1;
                name = suffix(&item, n);
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

/// Title, or a stand-in for blank titles
#[must_use]
pub fn display_title(case: &TestCase) -> &str {
    let title = case.title.trim();
    if title.is_empty() {
        "Untitled test case"
    } else {
        title
    }
}

/// Fail with `EmptyInput` when there is nothing to render a script from
pub fn require_cases(ctx: &EmitContext<'_>, format: Format) -> CasegenResult<()> {
    if ctx.test_cases.is_empty() {
        return Err(CasegenError::empty_input(format.as_str()));
    }
    Ok(())
}

/// Requests of one case
#[derive(Debug, Clone)]
pub struct CaseRequests<'a> {
    /// The case
    pub case: &'a TestCase,
    /// Title unique within the artifact
    pub title: String,
    /// Inferred calls
    pub calls: Vec<HttpCall>,
}

/// Requests per case. When cases exist but no step yields a request, the
/// first case gets one `GET /` and a warning is recorded.
pub fn requests_or_default<'a>(
    cases: &'a [TestCase],
    findings: &mut Vec<LintFinding>,
) -> Vec<CaseRequests<'a>> {
    let titles = unique_titles(cases);
    let mut grouped: Vec<CaseRequests<'a>> = cases
        .iter()
        .zip(titles)
        .map(|(case, title)| CaseRequests {
            case,
            title,
            calls: collect_requests(case),
        })
        .collect();

    let total: usize = grouped.iter().map(|g| g.calls.len()).sum();
    if total == 0 {
        if let Some(first) = grouped.first_mut() {
            warn!("no HTTP requests inferred; using GET / on the base URL");
            findings.push(LintFinding::warning(
                "DEFAULT001",
                "no HTTP requests inferred from any step; added GET / against the base URL",
            ));
            first.calls.push(HttpCall {
                step_number: first.case.ordered_steps().first().map_or(1, |s| s.step_number),
                method: HttpMethod::Get,
                url: "/".to_string(),
                body: None,
                expected_status: None,
            });
        }
    }
    grouped
}

/// URLs a case visits: navigate targets, then absolute URLs named in the
/// description and preconditions.
#[must_use]
pub fn case_urls(case: &TestCase) -> Vec<String> {
    let mut urls: Vec<String> = case
        .ordered_steps()
        .into_iter()
        .filter_map(|step| {
            let action = classify(step);
            action.url().map(str::to_string)
        })
        .collect();
    for text in std::iter::once(&case.description).chain(case.preconditions.iter()) {
        if let Some(url) = extract_url(text).filter(|u| u.starts_with("http")) {
            urls.push(url);
        }
    }
    urls
}
