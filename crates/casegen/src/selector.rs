//! Locator resolution with an explicit fallback ladder.
//!
//! 1. explicit `selector` on the step, used verbatim
//! 2. semantic matcher (role or label) when the action names a control
//! 3. quoted text, for actions whose quoted literal designates the element
//! 4. placeholder carrying [`PLACEHOLDER_MARKER`]
//!
//! The mapper never invents a CSS selector.

use serde::{Deserialize, Serialize};

use crate::classifier::{control_name, control_role, InferredAction};
use crate::escape;
use crate::ir::ActionKind;

/// Marker rendered in place of a selector that could not be resolved
pub const PLACEHOLDER_MARKER: &str = "__TODO_SELECTOR__";

/// Locator for one element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "by")]
pub enum Locator {
    /// Selector given by the author (CSS on the web, id/testID on mobile)
    Css {
        /// Selector text
        selector: String,
    },
    /// ARIA role plus accessible name
    Role {
        /// Role name
        role: String,
        /// Accessible name
        name: String,
    },
    /// Form label / accessibility label
    Label {
        /// Label text
        label: String,
    },
    /// Visible text
    Text {
        /// Text content
        text: String,
    },
    /// Unresolved
    Placeholder,
}

impl Locator {
    /// Create a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
        }
    }

    /// Create a role locator
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Create a label locator
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label {
            label: label.into(),
        }
    }

    /// Create a text locator
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Whether this is the placeholder
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Render as an element expression of the family's language.
    ///
    /// Selenium renders a `(By.X, value)` tuple; Maestro renders the bare
    /// matcher text.
    #[must_use]
    pub fn render(&self, family: FrameworkFamily) -> String {
        match family {
            FrameworkFamily::Playwright => self.playwright(),
            FrameworkFamily::Cypress => self.cypress(),
            FrameworkFamily::Selenium => self.selenium(),
            FrameworkFamily::WebdriverIo => self.webdriverio(),
            FrameworkFamily::Detox => self.detox(),
            FrameworkFamily::Espresso => self.espresso(),
            FrameworkFamily::Maestro => self.maestro_text().to_string(),
        }
    }

    fn playwright(&self) -> String {
        match self {
            Self::Css { selector } => format!("page.locator({})", escape::js(selector)),
            Self::Role { role, name } => format!(
                "page.getByRole({}, {{ name: {} }})",
                escape::js(role),
                escape::js(name)
            ),
            Self::Label { label } => format!("page.getByLabel({})", escape::js(label)),
            Self::Text { text } => format!("page.getByText({})", escape::js(text)),
            Self::Placeholder => format!("page.locator({})", escape::js(PLACEHOLDER_MARKER)),
        }
    }

    fn cypress(&self) -> String {
        match self {
            Self::Css { selector } => format!("cy.get({})", escape::js(selector)),
            Self::Role { role, name } => {
                let tag = if role == "link" { "a" } else { role.as_str() };
                format!("cy.contains({}, {})", escape::js(tag), escape::js(name))
            }
            Self::Label { label } => format!(
                "cy.get({})",
                escape::js(&format!("[aria-label=\"{}\"]", escape::css_attr(label)))
            ),
            Self::Text { text } => format!("cy.contains({})", escape::js(text)),
            Self::Placeholder => format!("cy.get({})", escape::js(PLACEHOLDER_MARKER)),
        }
    }

    fn selenium(&self) -> String {
        let (by, value) = match self {
            Self::Css { selector } => ("CSS_SELECTOR", selector.clone()),
            Self::Role { role, name } if role == "link" => ("LINK_TEXT", name.clone()),
            Self::Role { role, name } => (
                "XPATH",
                format!("//{role}[normalize-space()={}]", escape::xpath(name)),
            ),
            Self::Label { label } => {
                let lit = escape::xpath(label);
                (
                    "XPATH",
                    format!("//*[@aria-label={lit} or @id=//label[normalize-space()={lit}]/@for]"),
                )
            }
            Self::Text { text } => (
                "XPATH",
                format!("//*[contains(normalize-space(), {})]", escape::xpath(text)),
            ),
            Self::Placeholder => ("CSS_SELECTOR", PLACEHOLDER_MARKER.to_string()),
        };
        format!("(By.{by}, {})", escape::python(&value))
    }

    fn webdriverio(&self) -> String {
        let query = match self {
            Self::Css { selector } => selector.clone(),
            Self::Role { name, .. } | Self::Label { label: name } => format!("~{name}"),
            Self::Text { text } => {
                let lit = escape::xpath(text);
                format!("//*[@text={lit} or @label={lit}]")
            }
            Self::Placeholder => PLACEHOLDER_MARKER.to_string(),
        };
        format!("$({})", escape::js(&query))
    }

    fn detox(&self) -> String {
        match self {
            Self::Css { selector } => format!("element(by.id({}))", escape::js(selector)),
            Self::Role { name, .. } | Self::Label { label: name } => {
                format!("element(by.label({}))", escape::js(name))
            }
            Self::Text { text } => format!("element(by.text({}))", escape::js(text)),
            Self::Placeholder => format!("element(by.id({}))", escape::js(PLACEHOLDER_MARKER)),
        }
    }

    fn espresso(&self) -> String {
        match self {
            Self::Css { selector } => {
                format!("onView(withResourceName({}))", escape::kotlin(selector))
            }
            Self::Role { name, .. } | Self::Label { label: name } => {
                format!("onView(withContentDescription({}))", escape::kotlin(name))
            }
            Self::Text { text } => format!("onView(withText({}))", escape::kotlin(text)),
            Self::Placeholder => format!(
                "onView(withResourceName({}))",
                escape::kotlin(PLACEHOLDER_MARKER)
            ),
        }
    }

    /// Matcher text for flow formats that match by visible text or id
    #[must_use]
    pub fn maestro_text(&self) -> &str {
        match self {
            Self::Css { selector } => selector,
            Self::Role { name, .. } => name,
            Self::Label { label } => label,
            Self::Text { text } => text,
            Self::Placeholder => PLACEHOLDER_MARKER,
        }
    }
}

/// Family of automation frameworks sharing a locator vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkFamily {
    /// Playwright (web and axe)
    Playwright,
    /// Cypress
    Cypress,
    /// Selenium WebDriver
    Selenium,
    /// WebdriverIO driving Appium
    WebdriverIo,
    /// Detox
    Detox,
    /// Espresso
    Espresso,
    /// Maestro
    Maestro,
}

impl FrameworkFamily {
    /// Whether the family can match this ARIA role natively.
    ///
    /// Families without role support fall back to label matching.
    #[must_use]
    pub fn supports_role(self, role: &str) -> bool {
        match self {
            Self::Playwright => true,
            Self::Cypress | Self::Selenium => matches!(role, "button" | "link"),
            Self::WebdriverIo | Self::Detox | Self::Espresso | Self::Maestro => false,
        }
    }
}

/// Which rung of the ladder produced a locator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rung {
    /// Explicit selector
    Explicit,
    /// Role or label
    Semantic,
    /// Quoted text
    Text,
    /// Nothing resolved
    Placeholder,
}

/// Locator plus the rung that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocator {
    /// Locator
    pub locator: Locator,
    /// Ladder rung
    pub rung: Rung,
}

impl ResolvedLocator {
    fn new(locator: Locator, rung: Rung) -> Self {
        Self { locator, rung }
    }

    /// Whether resolution fell through to the placeholder
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.rung, Rung::Placeholder)
    }

    /// Render for a family
    #[must_use]
    pub fn render(&self, family: FrameworkFamily) -> String {
        self.locator.render(family)
    }
}

/// Resolve the element an action operates on
#[must_use]
pub fn resolve(
    action: &InferredAction,
    explicit_selector: Option<&str>,
    family: FrameworkFamily,
) -> ResolvedLocator {
    if let Some(selector) = explicit_selector.filter(|s| !s.trim().is_empty()) {
        return ResolvedLocator::new(Locator::css(selector), Rung::Explicit);
    }

    if action.names_control() {
        if let Some(target) = action.target.as_deref() {
            let name = control_name(target);
            let field_action = matches!(
                action.kind,
                ActionKind::Fill | ActionKind::Select | ActionKind::Upload
            );
            let locator = match control_role(target) {
                Some(role) if !field_action && family.supports_role(role) => {
                    Locator::role(role, name)
                }
                _ => Locator::label(name),
            };
            return ResolvedLocator::new(locator, Rung::Semantic);
        }
    }

    let quoted_designates_element = matches!(
        action.kind,
        ActionKind::Click
            | ActionKind::Hover
            | ActionKind::Check
            | ActionKind::Uncheck
            | ActionKind::Verify
    );
    if quoted_designates_element {
        if let Some(text) = action.quoted.as_deref() {
            return ResolvedLocator::new(Locator::text(text), Rung::Text);
        }
    }

    ResolvedLocator::new(Locator::Placeholder, Rung::Placeholder)
}
