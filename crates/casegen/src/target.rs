//! Emission targets: the closed `Platform` × `Format` enumeration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Automation ecosystem family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Browser end-to-end runners
    Web,
    /// API testing tools
    Api,
    /// Mobile driver frameworks
    Mobile,
    /// Load-testing tools
    Performance,
    /// Accessibility scanners
    Accessibility,
}

impl Platform {
    /// All platforms in display order
    pub const ALL: [Self; 5] = [
        Self::Web,
        Self::Api,
        Self::Mobile,
        Self::Performance,
        Self::Accessibility,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Api => "api",
            Self::Mobile => "mobile",
            Self::Performance => "performance",
            Self::Accessibility => "accessibility",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" | "e2e" | "browser" => Ok(Self::Web),
            "api" | "rest" => Ok(Self::Api),
            "mobile" => Ok(Self::Mobile),
            "performance" | "perf" | "load" => Ok(Self::Performance),
            "accessibility" | "a11y" => Ok(Self::Accessibility),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Whether an emitter produces program text or a data/config document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Source code for a test runner
    Script,
    /// JSON / YAML / XML document
    Data,
}

/// Output format of one emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Playwright Test (TypeScript)
    Playwright,
    /// Cypress (JavaScript)
    Cypress,
    /// Selenium WebDriver with pytest
    Selenium,
    /// Postman collection v2.1
    Postman,
    /// Insomnia export v4
    Insomnia,
    /// OpenAPI 3.0 document
    OpenApi,
    /// HTTP Archive 1.2
    Har,
    /// Appium through WebdriverIO
    Appium,
    /// Detox (React Native)
    Detox,
    /// Espresso (Kotlin)
    Espresso,
    /// Maestro flow
    Maestro,
    /// Grafana k6 script
    K6,
    /// Apache JMeter test plan
    JMeter,
    /// Artillery config
    Artillery,
    /// Locust file
    Locust,
    /// axe-core through Playwright
    Axe,
    /// pa11y-ci config
    Pa11y,
    /// Lighthouse CI config
    Lighthouse,
}

impl Format {
    /// All formats in registry order
    pub const ALL: [Self; 18] = [
        Self::Playwright,
        Self::Cypress,
        Self::Selenium,
        Self::Postman,
        Self::Insomnia,
        Self::OpenApi,
        Self::Har,
        Self::Appium,
        Self::Detox,
        Self::Espresso,
        Self::Maestro,
        Self::K6,
        Self::JMeter,
        Self::Artillery,
        Self::Locust,
        Self::Axe,
        Self::Pa11y,
        Self::Lighthouse,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playwright => "playwright",
            Self::Cypress => "cypress",
            Self::Selenium => "selenium",
            Self::Postman => "postman",
            Self::Insomnia => "insomnia",
            Self::OpenApi => "openapi",
            Self::Har => "har",
            Self::Appium => "appium",
            Self::Detox => "detox",
            Self::Espresso => "espresso",
            Self::Maestro => "maestro",
            Self::K6 => "k6",
            Self::JMeter => "jmeter",
            Self::Artillery => "artillery",
            Self::Locust => "locust",
            Self::Axe => "axe",
            Self::Pa11y => "pa11y",
            Self::Lighthouse => "lighthouse",
        }
    }

    /// File extension including the leading dot (or `_` for Locust)
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Playwright => ".spec.ts",
            Self::Cypress => ".cy.js",
            Self::Selenium => ".py",
            Self::Postman => ".postman_collection.json",
            Self::Insomnia => ".insomnia.json",
            Self::OpenApi => ".openapi.json",
            Self::Har => ".har",
            Self::Appium | Self::Detox => ".e2e.js",
            Self::Espresso => ".kt",
            Self::Maestro => ".yaml",
            Self::K6 => ".k6.js",
            Self::JMeter => ".jmx",
            Self::Artillery => ".artillery.yml",
            Self::Locust => "_locustfile.py",
            Self::Axe => ".a11y.spec.ts",
            Self::Pa11y => ".pa11yci.json",
            Self::Lighthouse => ".lighthouserc.json",
        }
    }

    /// Fixed MIME type of the artifact
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Playwright | Self::Axe => "application/typescript",
            Self::Cypress | Self::Appium | Self::Detox | Self::K6 => "application/javascript",
            Self::Selenium | Self::Locust => "text/x-python",
            Self::Postman
            | Self::Insomnia
            | Self::OpenApi
            | Self::Har
            | Self::Pa11y
            | Self::Lighthouse => "application/json",
            Self::Espresso => "text/x-kotlin",
            Self::Maestro | Self::Artillery => "application/yaml",
            Self::JMeter => "application/xml",
        }
    }

    /// Script or data artifact
    #[must_use]
    pub const fn kind(self) -> ArtifactKind {
        match self {
            Self::Playwright
            | Self::Cypress
            | Self::Selenium
            | Self::Appium
            | Self::Detox
            | Self::Espresso
            | Self::K6
            | Self::Locust
            | Self::Axe => ArtifactKind::Script,
            Self::Postman
            | Self::Insomnia
            | Self::OpenApi
            | Self::Har
            | Self::Maestro
            | Self::JMeter
            | Self::Artillery
            | Self::Pa11y
            | Self::Lighthouse => ArtifactKind::Data,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "swagger" | "open-api" => "openapi",
            "pa11y-ci" => "pa11y",
            "axe-core" => "axe",
            "lhci" => "lighthouse",
            "webdriverio" | "wdio" => "appium",
            "selenium-python" | "pytest" => "selenium",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == alias)
            .ok_or_else(|| format!("unknown format '{wanted}'"))
    }
}

/// One requested (platform, format) pair.
///
/// Parsing only checks that both names exist; whether the pair is
/// registered is decided by [`crate::registry::resolve_emitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmissionTarget {
    /// Platform
    pub platform: Platform,
    /// Format
    pub format: Format,
}

impl EmissionTarget {
    /// Create a target
    #[must_use]
    pub const fn new(platform: Platform, format: Format) -> Self {
        Self { platform, format }
    }

    /// Parse platform and format names
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` when either name is unknown
    pub fn parse(platform: &str, format: &str) -> crate::CasegenResult<Self> {
        let p = Platform::from_str(platform)
            .map_err(|_| crate::CasegenError::unsupported(platform, format))?;
        let f = Format::from_str(format)
            .map_err(|_| crate::CasegenError::unsupported(platform, format))?;
        Ok(Self::new(p, f))
    }
}

impl std::fmt::Display for EmissionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.platform, self.format)
    }
}
