//! Intermediate representation of a platform-agnostic test case.
//!
//! Test cases arrive from the authoring side already validated. Field names
//! are accepted in snake_case and camelCase.

use serde::{Deserialize, Deserializer, Serialize};

/// Explicit action kind of a step.
///
/// Also the output kind of the classifier, which adds [`ActionKind::Unknown`]
/// for text it cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Open a URL or route
    #[serde(alias = "goto", alias = "visit", alias = "open")]
    Navigate,
    /// Click or tap an element
    #[serde(alias = "tap")]
    Click,
    /// Type into a field
    #[serde(alias = "type", alias = "input", alias = "enter")]
    Fill,
    /// Tick a checkbox
    Check,
    /// Untick a checkbox
    Uncheck,
    /// Choose an option of a dropdown
    Select,
    /// Attach a file
    Upload,
    /// Pause for a fixed time
    #[serde(alias = "sleep", alias = "pause")]
    Wait,
    /// Check an expectation
    #[serde(alias = "assert", alias = "expect")]
    Verify,
    /// Move the pointer over an element
    Hover,
    /// Press a keyboard key
    Press,
    /// Could not be classified
    Unknown,
}

impl ActionKind {
    /// Lowercase name used in generated comments and JSON
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Click => "click",
            Self::Fill => "fill",
            Self::Check => "check",
            Self::Uncheck => "uncheck",
            Self::Select => "select",
            Self::Upload => "upload",
            Self::Wait => "wait",
            Self::Verify => "verify",
            Self::Hover => "hover",
            Self::Press => "press",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the action operates on a located element
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(
            self,
            Self::Click
                | Self::Fill
                | Self::Check
                | Self::Uncheck
                | Self::Select
                | Self::Upload
                | Self::Hover
        )
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of expectation an assertion checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertionKind {
    /// Element is visible
    #[serde(alias = "exists", alias = "displayed")]
    Visible,
    /// Element is hidden or absent
    #[serde(alias = "not_visible", alias = "absent")]
    Hidden,
    /// Element contains text
    #[serde(alias = "contains", alias = "contains_text")]
    Text,
    /// Current URL contains value
    Url,
    /// Input has value
    Value,
    /// Page title equals value
    Title,
    /// Number of matching elements
    Count,
    /// Element is enabled
    Enabled,
    /// Element is disabled
    Disabled,
    /// Checkbox is checked
    Checked,
    /// HTTP status code
    #[serde(alias = "status_code", alias = "statusCode")]
    Status,
    /// Anything this version does not know how to render
    #[serde(other)]
    Other,
}

impl AssertionKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Text => "text",
            Self::Url => "url",
            Self::Value => "value",
            Self::Title => "title",
            Self::Count => "count",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
            Self::Status => "status",
            Self::Other => "other",
        }
    }

    /// Whether the assertion is about an element rather than the page
    #[must_use]
    pub const fn needs_target(self) -> bool {
        !matches!(self, Self::Url | Self::Title | Self::Status | Self::Other)
    }
}

/// Expected outcome attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// What to check
    #[serde(rename = "type")]
    pub kind: AssertionKind,
    /// Selector of the element; defaults to the step's selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Expected value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Assertion {
    /// Create an assertion with an expected value
    #[must_use]
    pub fn new(kind: AssertionKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            target: None,
            value: Some(value.into()),
        }
    }

    /// Create an assertion without a value (visible, enabled, ...)
    #[must_use]
    pub const fn flag(kind: AssertionKind) -> Self {
        Self {
            kind,
            target: None,
            value: None,
        }
    }

    /// Set the target selector
    #[must_use]
    pub fn on(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Target selector, falling back to the owning step's selector
    #[must_use]
    pub fn effective_target<'a>(&'a self, step: &'a Step) -> Option<&'a str> {
        let present = |s: &&str| !s.trim().is_empty();
        self.target
            .as_deref()
            .filter(present)
            .or_else(|| step.selector.as_deref().filter(present))
    }
}

/// One ordered step of a test case
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position; the sort key
    #[serde(alias = "stepNumber")]
    pub step_number: u32,
    /// Free-text description of the action
    #[serde(default)]
    pub action: String,
    /// Explicit action kind; bypasses classification
    #[serde(default, alias = "actionType", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionKind>,
    /// Explicit selector, used verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Value to type, option to pick, URL to open, file to upload
    #[serde(default, alias = "inputValue", skip_serializing_if = "Option::is_none")]
    pub input_value: Option<String>,
    /// Wait time in milliseconds
    #[serde(default, alias = "waitTime", skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u64>,
    /// Expectation checked after the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion: Option<Assertion>,
}

impl Step {
    /// Create a step from free text
    #[must_use]
    pub fn new(step_number: u32, action: impl Into<String>) -> Self {
        Self {
            step_number,
            action: action.into(),
            ..Self::default()
        }
    }

    /// Set the explicit action kind
    #[must_use]
    pub const fn with_type(mut self, kind: ActionKind) -> Self {
        self.action_type = Some(kind);
        self
    }

    /// Set the selector
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the input value
    #[must_use]
    pub fn with_input(mut self, value: impl Into<String>) -> Self {
        self.input_value = Some(value.into());
        self
    }

    /// Set the wait time in milliseconds
    #[must_use]
    pub const fn with_wait(mut self, ms: u64) -> Self {
        self.wait_time = Some(ms);
        self
    }

    /// Attach an assertion
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertion = Some(assertion);
        self
    }

    /// Explicit selector if it is non-blank
    #[must_use]
    pub fn explicit_selector(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Input value if it is non-blank
    #[must_use]
    pub fn explicit_input(&self) -> Option<&str> {
        self.input_value.as_deref().filter(|s| !s.is_empty())
    }
}

/// Priority of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl Priority {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// A platform-agnostic test case
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// Identifier assigned by the authoring system
    #[serde(default)]
    pub id: String,
    /// Title
    pub title: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Preconditions, one per entry. A single string is accepted.
    #[serde(default, deserialize_with = "string_or_list")]
    pub preconditions: Vec<String>,
    /// Steps; order is given by `step_number`
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Overall expected result
    #[serde(default, alias = "expectedResult", skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    /// Edge case flag
    #[serde(default, alias = "isEdgeCase")]
    pub is_edge_case: bool,
    /// Negative test flag
    #[serde(default, alias = "isNegative")]
    pub is_negative: bool,
    /// Security test flag
    #[serde(default, alias = "isSecurity")]
    pub is_security: bool,
    /// Boundary test flag
    #[serde(default, alias = "isBoundary")]
    pub is_boundary: bool,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
}

impl TestCase {
    /// Create a test case with a title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a precondition
    #[must_use]
    pub fn with_precondition(mut self, precondition: impl Into<String>) -> Self {
        self.preconditions.push(precondition.into());
        self
    }

    /// Append a step
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Set the expected result
    #[must_use]
    pub fn with_expected_result(mut self, expected: impl Into<String>) -> Self {
        self.expected_result = Some(expected.into());
        self
    }

    /// Steps sorted by `step_number`; equal numbers keep their array order
    #[must_use]
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.step_number);
        steps
    }

    /// Classification tags for generated annotations
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.is_edge_case {
            tags.push("edge-case");
        }
        if self.is_negative {
            tags.push("negative");
        }
        if self.is_security {
            tags.push("security");
        }
        if self.is_boundary {
            tags.push("boundary");
        }
        tags
    }
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Nothing(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) if s.trim().is_empty() => Vec::new(),
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::Nothing(()) => Vec::new(),
    })
}
