//! Action classification for steps without an explicit `action_type`.
//!
//! Classification is a first-match scan over an ordered rule list:
//!
//! ```text
//! navigate < click < fill < check < select < upload < wait < verify
//! ```
//!
//! The order is part of the contract. "Click the link to open settings"
//! matches `navigate` ("open") before `click`, by design of the list, and a
//! change to the list is a behavior change that needs new tests.
//!
//! Each rule carries keyword patterns and optional exclusions. After a rule
//! matches, the group's extractor pulls parameters out of the text. Extraction
//! never guesses: a navigate step whose only token is "the" gets no URL.

// Static regexes are always valid - compile-time constant patterns
#![allow(clippy::unwrap_used, clippy::trivial_regex)]

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ir::{ActionKind, AssertionKind, Step};

/// Default wait when a wait step names no duration
pub const DEFAULT_WAIT_MS: u64 = 1000;

/// Where an inferred action came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "rule")]
pub enum Origin {
    /// `action_type` was set on the step
    Explicit,
    /// A keyword rule matched
    Rule(&'static str),
    /// Nothing matched
    Unmatched,
}

/// Expectation extracted from a verify step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// What to check
    pub kind: AssertionKind,
    /// Element phrase, if the text named one
    pub target: Option<String>,
    /// Expected value
    pub value: Option<String>,
}

/// Structured action inferred from a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredAction {
    /// Action kind
    pub kind: ActionKind,
    /// Element phrase: field name, button label, checkbox name
    pub target: Option<String>,
    /// Typed text, option, file path, key, or URL
    pub value: Option<String>,
    /// Duration for wait actions
    pub wait_ms: Option<u64>,
    /// Expectation for verify actions; `None` means unresolved
    pub expectation: Option<Expectation>,
    /// First quoted literal in the step text
    pub quoted: Option<String>,
    /// Provenance
    pub origin: Origin,
}

impl InferredAction {
    fn bare(kind: ActionKind, origin: Origin) -> Self {
        Self {
            kind,
            target: None,
            value: None,
            wait_ms: None,
            expectation: None,
            quoted: None,
            origin,
        }
    }

    /// URL of a navigate action
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        if self.kind == ActionKind::Navigate {
            self.value.as_deref()
        } else {
            None
        }
    }

    /// Whether the target phrase names a control or field
    #[must_use]
    pub fn names_control(&self) -> bool {
        match self.kind {
            ActionKind::Fill | ActionKind::Select | ActionKind::Upload => self.target.is_some(),
            _ => self
                .target
                .as_deref()
                .is_some_and(|t| control_role(t).is_some()),
        }
    }

    /// Whether the step needs manual follow-up
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        match self.kind {
            ActionKind::Unknown => true,
            ActionKind::Verify => self.expectation.is_none(),
            _ => false,
        }
    }
}

/// One entry of the ordered keyword table
#[derive(Debug)]
pub struct ActionRule {
    /// Group name
    pub group: &'static str,
    /// Kind produced when the rule matches
    pub kind: ActionKind,
    keywords: Regex,
    exclude: Option<Regex>,
}

impl ActionRule {
    fn new(group: &'static str, kind: ActionKind, keywords: &str, exclude: Option<&str>) -> Self {
        Self {
            group,
            kind,
            keywords: Regex::new(keywords).unwrap(),
            exclude: exclude.map(|e| Regex::new(e).unwrap()),
        }
    }

    /// Whether the rule accepts this text
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.is_match(text) && !self.exclude.as_ref().is_some_and(|e| e.is_match(text))
    }
}

static RULES: Lazy<Vec<ActionRule>> = Lazy::new(|| {
    vec![
        ActionRule::new(
            "navigate",
            ActionKind::Navigate,
            r"(?i)\b(navigate|navigates|go\s+to|goes\s+to|goto|visit|visits|open|opens\s+the\s+url|browse\s+to|launch|launches)\b",
            None,
        ),
        ActionRule::new(
            "click",
            ActionKind::Click,
            r"(?i)\b(click|clicks|double[\s-]click|tap|taps|press|presses|hit|submit|submits)\b",
            None,
        ),
        ActionRule::new(
            "fill",
            ActionKind::Fill,
            r"(?i)\b(fill|fills|type|types|enter|enters|input|inputs|write|provide)\b",
            None,
        ),
        ActionRule::new(
            "check",
            ActionKind::Check,
            r"(?i)\b(check|checks|uncheck|unchecks|tick|untick|toggle)\b",
            Some(r"(?i)\bchecks?\s+(that|if|whether|for|the\s+(page|url|title|message|result|response|status))\b"),
        ),
        ActionRule::new(
            "select",
            ActionKind::Select,
            r"(?i)\b(select|selects|choose|chooses|pick|picks)\b",
            None,
        ),
        ActionRule::new(
            "upload",
            ActionKind::Upload,
            r"(?i)\b(upload|uploads|attach|attaches)\b",
            None,
        ),
        ActionRule::new(
            "wait",
            ActionKind::Wait,
            r"(?i)\b(wait|waits|pause|sleep)\b",
            None,
        ),
        ActionRule::new(
            "verify",
            ActionKind::Verify,
            r"(?i)\b(verify|verifies|assert|asserts|ensure|ensures|confirm|confirms|validate|validates|expect|expects|should|check|checks|see|sees|observe|displayed|appears?)\b",
            None,
        ),
    ]
});

/// The ordered rule table
#[must_use]
pub fn rules() -> &'static [ActionRule] {
    &RULES
}

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"|“([^”]+)”|(?:^|[\s(:,=])'([^']+)'"#).unwrap());
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>`]+"#).unwrap());
static NAV_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\b(?:to|url|visit|open)\s+["'“]?([^\s"'”]+)"#).unwrap());
static PATH_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|[\s"'(])(/[\w\-./?=&%#:~+@]*)"#).unwrap());
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(milliseconds?|millis|ms|seconds?|secs?|s|minutes?|mins?)\b")
        .unwrap()
});
static FILL_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:with|as)\s+(?:"([^"]*)"|'([^']*)'|(\S+))"#).unwrap()
});
static FILL_INTO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:in|into|on)\s+(?:the\s+)?(.+)$").unwrap());
static FILL_LEADING_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:fill(?:\s+in|\s+out)?|type|enter|input|write|provide)\s+(?:the\s+|a\s+|an\s+)?(.+?)\s+(?:with|as)\b")
        .unwrap()
});
static FILL_LEADING_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:type|enter|input|write|provide)\s+(\S+)\s+(?:in|into)\b").unwrap()
});
static VERB_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:double[\s-]click|click|clicks|tap|taps|press|presses|hit|submit|submits|check|checks|uncheck|unchecks|tick|untick|toggle|hover)(?:\s+(?:on|over))?\s+(?:the\s+|a\s+|an\s+)?(.+)$")
        .unwrap()
});
static UNCHECK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(uncheck|unchecks|untick)\b").unwrap());
static SELECT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:select|selects|choose|chooses|pick|picks)\s+(?:the\s+)?(?:option\s+)?(.+?)\s+(?:from|in)\s+(?:the\s+)?(.+)$")
        .unwrap()
});
static SELECT_REST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:select|selects|choose|chooses|pick|picks)\s+(?:the\s+)?(?:option\s+)?(.+)$").unwrap()
});
static FILE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\-./\\]+\.[A-Za-z0-9]{2,5})\b").unwrap());
static UPLOAD_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:to|into|in|via|using)\s+(?:the\s+)?(.+)$").unwrap());
static VERIFY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(url|redirected|redirects|redirect|navigated|lands?|landed|route)\b").unwrap()
});
static VERIFY_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(page\s+)?title\b").unwrap());
static VERIFY_VISIBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\w+\s+)?(?:that\s+)?(?:the\s+|a\s+|an\s+)?(.+?)\s+(?:is|are)\s+(?:visible|displayed|shown|present)\b")
        .unwrap()
});
static VERIFY_HIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\w+\s+)?(?:that\s+)?(?:the\s+|a\s+|an\s+)?(.+?)\s+(?:is|are)\s+(?:not\s+(?:visible|displayed|shown|present)|hidden|gone)\b")
        .unwrap()
});

const KEY_NAMES: &[&str] = &[
    "enter", "return", "tab", "escape", "esc", "space", "backspace", "delete", "arrowup",
    "arrowdown", "arrowleft", "arrowright", "home", "end", "pageup", "pagedown",
];

const CONTROL_NOUNS: &[(&str, &str)] = &[
    ("button", "button"),
    ("btn", "button"),
    ("link", "link"),
    ("checkbox", "checkbox"),
    ("check box", "checkbox"),
    ("radio", "radio"),
    ("dropdown", "combobox"),
    ("drop-down", "combobox"),
    ("select box", "combobox"),
    ("combobox", "combobox"),
    ("field", "textbox"),
    ("input", "textbox"),
    ("textbox", "textbox"),
    ("text box", "textbox"),
    ("textarea", "textbox"),
    ("tab", "tab"),
    ("menu item", "menuitem"),
    ("menuitem", "menuitem"),
    ("switch", "switch"),
    ("toggle", "switch"),
];

/// ARIA role of a control phrase such as "Submit button", if it names one
#[must_use]
pub fn control_role(phrase: &str) -> Option<&'static str> {
    let lower = phrase.to_ascii_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    CONTROL_NOUNS.iter().find_map(|(noun, role)| {
        let noun_words: Vec<&str> = noun.split_whitespace().collect();
        words
            .windows(noun_words.len())
            .any(|w| w == noun_words.as_slice())
            .then_some(*role)
    })
}

/// Accessible name of a control phrase: quoted literal, or the phrase minus
/// its control noun ("the Submit button" → "Submit")
#[must_use]
pub fn control_name(phrase: &str) -> String {
    if let Some(q) = first_quoted(phrase) {
        return q;
    }
    let mut words: Vec<&str> = phrase.split_whitespace().collect();
    while let Some(first) = words.first() {
        if matches!(first.to_ascii_lowercase().as_str(), "the" | "a" | "an" | "on") {
            words.remove(0);
        } else {
            break;
        }
    }
    let lower: Vec<String> = words.iter().map(|w| w.to_ascii_lowercase()).collect();
    let kept: Vec<&str> = words
        .iter()
        .zip(lower.iter())
        .filter(|(_, l)| {
            !CONTROL_NOUNS
                .iter()
                .any(|(noun, _)| !noun.contains(' ') && l.as_str() == *noun)
        })
        .map(|(w, _)| *w)
        .collect();
    let name = if kept.is_empty() { words.join(" ") } else { kept.join(" ") };
    trim_phrase(&name)
}

/// Classify a step.
///
/// An explicit `action_type` is returned unchanged. Otherwise the first rule
/// matching the action text decides the kind.
#[must_use]
pub fn classify(step: &Step) -> InferredAction {
    let text = step.action.trim();
    let (kind, origin) = if let Some(explicit) = step.action_type {
        (explicit, Origin::Explicit)
    } else {
        match RULES.iter().find(|r| r.matches(text)) {
            Some(rule) => (rule.kind, Origin::Rule(rule.group)),
            None => (ActionKind::Unknown, Origin::Unmatched),
        }
    };

    let mut action = extract(kind, text, origin);

    if origin == Origin::Explicit {
        if let Some(input) = step.explicit_input() {
            match kind {
                ActionKind::Navigate
                | ActionKind::Fill
                | ActionKind::Select
                | ActionKind::Upload
                | ActionKind::Press => action.value = Some(input.to_string()),
                _ => {}
            }
        }
    }
    if kind == ActionKind::Wait {
        if let Some(ms) = step.wait_time {
            action.wait_ms = Some(ms);
        }
    }

    debug!(
        step = step.step_number,
        kind = %action.kind,
        origin = ?action.origin,
        "classified step"
    );
    action
}

/// Run the extractor of `kind` over `text`
fn extract(kind: ActionKind, text: &str, origin: Origin) -> InferredAction {
    let mut action = InferredAction::bare(kind, origin);
    action.quoted = first_quoted(text);

    match kind {
        ActionKind::Navigate => action.value = extract_url(text),
        ActionKind::Click | ActionKind::Hover => {
            action.target = verb_object(text);
            if origin != Origin::Explicit {
                if let Some(key) = keyboard_key(text, action.target.as_deref()) {
                    action.kind = ActionKind::Press;
                    action.value = Some(key);
                    action.target = None;
                }
            }
        }
        ActionKind::Press => action.value = keyboard_key(text, verb_object(text).as_deref()),
        ActionKind::Fill => {
            action.value = fill_value(text, action.quoted.as_deref());
            action.target = fill_field(text);
        }
        ActionKind::Check | ActionKind::Uncheck => {
            if kind == ActionKind::Check && origin != Origin::Explicit && UNCHECK.is_match(text) {
                action.kind = ActionKind::Uncheck;
            }
            action.target = verb_object(text);
        }
        ActionKind::Select => {
            if let Some(caps) = SELECT_FROM.captures(text) {
                action.value = caps.get(1).map(|m| trim_phrase(m.as_str()));
                action.target = caps.get(2).map(|m| trim_phrase(m.as_str()));
            } else {
                action.value = action.quoted.clone().or_else(|| {
                    SELECT_REST
                        .captures(text)
                        .and_then(|c| c.get(1))
                        .map(|m| trim_phrase(m.as_str()))
                });
            }
        }
        ActionKind::Upload => {
            action.value = action.quoted.clone().or_else(|| {
                FILE_TOKEN
                    .captures(text)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
            });
            action.target = UPLOAD_FIELD
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| trim_phrase(m.as_str()));
        }
        ActionKind::Wait => action.wait_ms = Some(duration_ms(text).unwrap_or(DEFAULT_WAIT_MS)),
        ActionKind::Verify => {
            action.expectation = extract_expectation(text, action.quoted.as_deref());
            action.target = action.expectation.as_ref().and_then(|e| e.target.clone());
        }
        ActionKind::Unknown => {}
    }
    action
}

/// First quoted literal (double, curly, or single quotes at a word boundary)
#[must_use]
pub fn first_quoted(text: &str) -> Option<String> {
    QUOTED.captures(text).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .or_else(|| c.get(3))
            .map(|m| m.as_str().to_string())
    })
}

/// Absolute URL or `to|url <token>` that looks like a URL or path
#[must_use]
pub fn extract_url(text: &str) -> Option<String> {
    if let Some(m) = ABSOLUTE_URL.find(text) {
        return Some(trim_url(m.as_str()));
    }
    if let Some(token) = NAV_TOKEN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_url(m.as_str()))
    {
        if looks_like_location(&token) {
            return Some(token);
        }
    }
    PATH_TOKEN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_url(m.as_str()))
        .filter(|p| p.len() > 1 || p == "/")
}

/// Duration in milliseconds from text such as "3 seconds" or "500ms"
#[must_use]
pub fn duration_ms(text: &str) -> Option<u64> {
    let caps = DURATION.captures(text)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_ascii_lowercase();
    let factor = if unit.starts_with("mi") && !unit.starts_with("mil") {
        60_000.0
    } else if unit.starts_with('m') {
        1.0
    } else {
        1000.0
    };
    Some((amount * factor).round() as u64)
}

fn looks_like_location(token: &str) -> bool {
    token.starts_with('/')
        || token.starts_with("http")
        || token.starts_with("localhost")
        || (token.contains('.') && !token.ends_with('.') && !token.contains('@'))
}

fn trim_url(s: &str) -> String {
    s.trim_end_matches(['.', ',', ';', ')', '!', '?', ':'])
        .to_string()
}

fn trim_phrase(s: &str) -> String {
    let s = s
        .trim()
        .trim_end_matches(['.', ',', ';', '!', '?', ':'])
        .trim();
    let s = s
        .strip_prefix('"')
        .and_then(|x| x.strip_suffix('"'))
        .or_else(|| s.strip_prefix('\'').and_then(|x| x.strip_suffix('\'')))
        .unwrap_or(s);
    s.trim().to_string()
}

fn verb_object(text: &str) -> Option<String> {
    VERB_OBJECT
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_phrase(m.as_str()))
        .filter(|s| !s.is_empty())
}

fn keyboard_key(text: &str, object: Option<&str>) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    if !lower.contains("press") && !lower.contains("hit") {
        return None;
    }
    let object = object?;
    let word = object
        .trim_end_matches(" key")
        .split_whitespace()
        .next()?
        .to_ascii_lowercase();
    KEY_NAMES.contains(&word.as_str()).then(|| {
        let mut chars = word.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect::<String>())
            .unwrap_or_default()
    })
}

fn fill_value(text: &str, quoted: Option<&str>) -> Option<String> {
    if let Some(caps) = FILL_VALUE.captures(text) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            return Some(m.as_str().to_string());
        }
        if let Some(m) = caps.get(3) {
            return Some(trim_url(m.as_str()));
        }
    }
    if let Some(q) = quoted {
        return Some(q.to_string());
    }
    FILL_LEADING_VALUE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn fill_field(text: &str) -> Option<String> {
    let raw = FILL_INTO
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .map(|rest| cut_at_keyword(&rest, &[" with ", " as "]))
        .or_else(|| {
            FILL_LEADING_FIELD
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })?;
    let name = strip_field_noun(&trim_phrase(&raw));
    (!name.is_empty()).then_some(name)
}

fn cut_at_keyword(s: &str, keywords: &[&str]) -> String {
    let lower = s.to_ascii_lowercase();
    let cut = keywords
        .iter()
        .filter_map(|k| lower.find(k))
        .min()
        .unwrap_or(s.len());
    s[..cut].to_string()
}

fn strip_field_noun(s: &str) -> String {
    let mut out = s.to_string();
    for noun in [" text field", " field", " input", " textbox", " text box", " box", " textarea"] {
        if out.to_ascii_lowercase().ends_with(noun) {
            out.truncate(out.len() - noun.len());
            break;
        }
    }
    trim_phrase(&out)
}

fn extract_expectation(text: &str, quoted: Option<&str>) -> Option<Expectation> {
    if VERIFY_URL.is_match(text) {
        if let Some(location) = ABSOLUTE_URL
            .find(text)
            .map(|m| trim_url(m.as_str()))
            .or_else(|| {
                PATH_TOKEN
                    .captures(text)
                    .and_then(|c| c.get(1))
                    .map(|m| trim_url(m.as_str()))
            })
            .or_else(|| quoted.map(str::to_string))
        {
            return Some(Expectation {
                kind: AssertionKind::Url,
                target: None,
                value: Some(location),
            });
        }
    }
    if VERIFY_TITLE.is_match(text) {
        if let Some(q) = quoted {
            return Some(Expectation {
                kind: AssertionKind::Title,
                target: None,
                value: Some(q.to_string()),
            });
        }
    }
    if let Some(caps) = VERIFY_HIDDEN.captures(text) {
        return Some(Expectation {
            kind: AssertionKind::Hidden,
            target: caps.get(1).map(|m| trim_phrase(m.as_str())),
            value: None,
        });
    }
    if let Some(q) = quoted {
        return Some(Expectation {
            kind: AssertionKind::Text,
            target: None,
            value: Some(q.to_string()),
        });
    }
    if let Some(caps) = VERIFY_VISIBLE.captures(text) {
        return Some(Expectation {
            kind: AssertionKind::Visible,
            target: caps.get(1).map(|m| trim_phrase(m.as_str())),
            value: None,
        });
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ir::Step;

    fn infer(text: &str) -> InferredAction {
        classify(&Step::new(1, text))
    }

    mod precedence_tests {
        use super::*;

        #[test]
        fn test_rule_order_is_the_contract() {
            let groups: Vec<_> = rules().iter().map(|r| r.group).collect();
            assert_eq!(
                groups,
                vec!["navigate", "click", "fill", "check", "select", "upload", "wait", "verify"]
            );
        }

        #[test]
        fn test_first_match_not_best_match() {
            // "open" (navigate) precedes "click"
            let a = infer("Click the link to open settings");
            assert_eq!(a.kind, ActionKind::Navigate);
            assert_eq!(a.origin, Origin::Rule("navigate"));
        }

        #[test]
        fn test_explicit_type_wins_over_keywords() {
            let step = Step::new(1, "Click the Save button").with_type(ActionKind::Wait);
            let a = classify(&step);
            assert_eq!(a.kind, ActionKind::Wait);
            assert_eq!(a.origin, Origin::Explicit);
        }

        #[test]
        fn test_explicit_click_is_not_rewritten_to_press() {
            let step = Step::new(1, "Press Enter key").with_type(ActionKind::Click);
            let a = classify(&step);
            assert_eq!(a.kind, ActionKind::Click);
            assert_eq!(a.origin, Origin::Explicit);

            let step = Step::new(1, "Hit Escape").with_type(ActionKind::Hover);
            assert_eq!(classify(&step).kind, ActionKind::Hover);
        }

        #[test]
        fn test_explicit_check_is_not_rewritten_to_uncheck() {
            let step = Step::new(1, "Uncheck the terms box").with_type(ActionKind::Check);
            let a = classify(&step);
            assert_eq!(a.kind, ActionKind::Check);
            assert_eq!(a.origin, Origin::Explicit);
        }

        #[test]
        fn test_check_that_is_verify() {
            let a = infer("Check that the welcome banner is visible");
            assert_eq!(a.kind, ActionKind::Verify);
        }

        #[test]
        fn test_unmatched_is_unknown() {
            let a = infer("Think about life");
            assert_eq!(a.kind, ActionKind::Unknown);
            assert_eq!(a.origin, Origin::Unmatched);
            assert!(a.is_unresolved());
        }

        #[test]
        fn test_empty_text_is_unknown() {
            assert_eq!(infer("   ").kind, ActionKind::Unknown);
        }
    }

    mod navigate_tests {
        use super::*;

        #[test]
        fn test_path_after_to() {
            assert_eq!(infer("Navigate to /login").url(), Some("/login"));
        }

        #[test]
        fn test_absolute_url() {
            assert_eq!(
                infer("Open https://shop.test/cart.").url(),
                Some("https://shop.test/cart")
            );
        }

        #[test]
        fn test_non_location_token_is_dropped() {
            assert_eq!(infer("Navigate to the login page").url(), None);
        }

        #[test]
        fn test_explicit_input_value_is_url() {
            let step = Step::new(1, "Go").with_type(ActionKind::Navigate).with_input("/home");
            assert_eq!(classify(&step).url(), Some("/home"));
        }
    }

    mod fill_tests {
        use super::*;

        #[test]
        fn test_into_field_with_value() {
            let a = infer("Type \"a@b.com\" into the Email field");
            assert_eq!(a.kind, ActionKind::Fill);
            assert_eq!(a.value.as_deref(), Some("a@b.com"));
            assert_eq!(a.target.as_deref(), Some("Email"));
        }

        #[test]
        fn test_field_with_value() {
            let a = infer("Fill the password field with secret123");
            assert_eq!(a.target.as_deref(), Some("password"));
            assert_eq!(a.value.as_deref(), Some("secret123"));
        }

        #[test]
        fn test_in_field_as_value() {
            let a = infer("Enter username in Login input as 'admin'");
            assert_eq!(a.target.as_deref(), Some("Login"));
            assert_eq!(a.value.as_deref(), Some("admin"));
        }
    }

    mod other_group_tests {
        use super::*;

        #[test]
        fn test_click_target() {
            let a = infer("Click the Submit button");
            assert_eq!(a.kind, ActionKind::Click);
            assert_eq!(a.target.as_deref(), Some("Submit button"));
            assert!(a.names_control());
        }

        #[test]
        fn test_press_key() {
            let a = infer("Press Enter");
            assert_eq!(a.kind, ActionKind::Press);
            assert_eq!(a.value.as_deref(), Some("Enter"));
        }

        #[test]
        fn test_uncheck() {
            let a = infer("Uncheck the Remember me checkbox");
            assert_eq!(a.kind, ActionKind::Uncheck);
            assert_eq!(a.target.as_deref(), Some("Remember me checkbox"));
        }

        #[test]
        fn test_select_from() {
            let a = infer("Select \"Canada\" from the Country dropdown");
            assert_eq!(a.kind, ActionKind::Select);
            assert_eq!(a.value.as_deref(), Some("Canada"));
            assert_eq!(a.target.as_deref(), Some("Country dropdown"));
        }

        #[test]
        fn test_fill_keyword_shadows_upload() {
            // "input" belongs to fill, which precedes upload
            assert_eq!(infer("Upload a.png to the avatar input").kind, ActionKind::Fill);
        }

        #[test]
        fn test_upload_file() {
            let a = infer("Upload avatar.png to the Profile picture field");
            assert_eq!(a.kind, ActionKind::Upload);
            assert_eq!(a.value.as_deref(), Some("avatar.png"));
            assert_eq!(a.target.as_deref(), Some("Profile picture field"));
        }

        #[test]
        fn test_wait_normalized_to_ms() {
            assert_eq!(infer("Wait 3 seconds").wait_ms, Some(3000));
            assert_eq!(infer("Wait for 250ms").wait_ms, Some(250));
            assert_eq!(infer("Wait 2 minutes").wait_ms, Some(120_000));
            assert_eq!(infer("Wait for the spinner").wait_ms, Some(DEFAULT_WAIT_MS));
        }

        #[test]
        fn test_wait_time_field_overrides_text() {
            let step = Step::new(1, "Wait 3 seconds").with_wait(750);
            assert_eq!(classify(&step).wait_ms, Some(750));
        }
    }

    mod verify_tests {
        use super::*;

        #[test]
        fn test_unresolved_verify() {
            let a = infer("Verify page loads correctly");
            assert_eq!(a.kind, ActionKind::Verify);
            assert!(a.expectation.is_none());
            assert!(a.is_unresolved());
        }

        #[test]
        fn test_url_expectation() {
            let a = infer("Verify user is redirected to /dashboard");
            let e = a.expectation.unwrap();
            assert_eq!(e.kind, AssertionKind::Url);
            assert_eq!(e.value.as_deref(), Some("/dashboard"));
        }

        #[test]
        fn test_text_expectation() {
            let e = infer("Verify \"Welcome back\" message").expectation.unwrap();
            assert_eq!(e.kind, AssertionKind::Text);
            assert_eq!(e.value.as_deref(), Some("Welcome back"));
        }

        #[test]
        fn test_visible_expectation() {
            let e = infer("Verify the error banner is displayed").expectation.unwrap();
            assert_eq!(e.kind, AssertionKind::Visible);
            assert_eq!(e.target.as_deref(), Some("error banner"));
        }

        #[test]
        fn test_hidden_expectation() {
            let e = infer("Ensure the spinner is not visible").expectation.unwrap();
            assert_eq!(e.kind, AssertionKind::Hidden);
            assert_eq!(e.target.as_deref(), Some("spinner"));
        }
    }

    #[test]
    fn test_control_helpers() {
        assert_eq!(control_role("the Save button"), Some("button"));
        assert_eq!(control_role("Terms check box"), Some("checkbox"));
        assert_eq!(control_role("error banner"), None);
        assert_eq!(control_name("the Save button"), "Save");
        assert_eq!(control_name("the \"Sign in\" link"), "Sign in");
    }

    #[test]
    fn test_apostrophe_is_not_a_quote() {
        assert_eq!(first_quoted("Click the user's avatar"), None);
        assert_eq!(first_quoted("Click 'Save'"), Some("Save".to_string()));
    }
}
