//! HTTP request inference for API and performance emitters.

#![allow(clippy::unwrap_used)]

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classifier::classify;
use crate::ir::{ActionKind, AssertionKind, Step, TestCase};

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
}

impl HttpMethod {
    /// Uppercase method name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether requests of this method carry a body
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP call inferred from a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCall {
    /// Step the call came from
    pub step_number: u32,
    /// Method
    pub method: HttpMethod,
    /// Path (`/api/users`) or absolute URL, as written
    pub url: String,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Expected response status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<u16>,
}

impl HttpCall {
    /// Display name, `METHOD /path`
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.method, self.path())
    }

    /// Path portion of the URL (query included)
    #[must_use]
    pub fn path(&self) -> &str {
        path_of(&self.url)
    }

    /// Whether the body parses as JSON
    #[must_use]
    pub fn has_json_body(&self) -> bool {
        self.body
            .as_deref()
            .is_some_and(|b| serde_json::from_str::<serde_json::Value>(b).is_ok())
    }
}

/// Path of a URL; relative input is returned as is
#[must_use]
pub fn path_of(url: &str) -> &str {
    let Some(rest) = url.split_once("://").map(|(_, rest)| rest) else {
        return url;
    };
    match rest.find('/') {
        Some(idx) => &rest[idx..],
        None => "/",
    }
}

static METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)\b").unwrap());
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>`]+"#).unwrap());
static PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|[\s"'(])(/[\w\-./?=&%#:~+@]*)"#).unwrap());
static JSON_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(\{.*\}|\[.*\])").unwrap());
static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bstatus(?:\s+code)?\s*(?:of|is|=|:|should\s+be|equals?)?\s*(\d{3})\b").unwrap()
});
static RETURNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:returns?|responds?\s+with|expects?|expected)\s+(?:an?\s+)?(?:http\s+)?(\d{3})\b")
        .unwrap()
});

/// Infer the HTTP call a step describes.
///
/// A method keyword plus a path or URL is a call; so is a navigate step with
/// a URL (GET), and a bare path with an expected status (GET).
#[must_use]
pub fn infer_request(step: &Step) -> Option<HttpCall> {
    let action = classify(step);
    let text = step.action.as_str();

    let url = ABSOLUTE_URL
        .find(text)
        .map(|m| trim(m.as_str()))
        .or_else(|| {
            PATH.captures(text)
                .and_then(|c| c.get(1))
                .map(|m| trim(m.as_str()))
                .filter(|p| p.len() > 1 || p == "/")
        })
        .or_else(|| {
            step.explicit_selector()
                .filter(|s| s.starts_with('/') || s.starts_with("http"))
                .map(str::to_string)
        })
        .or_else(|| action.url().map(str::to_string))?;

    let expected_status = expected_status(step, text);
    let method = match METHOD
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| HttpMethod::parse(m.as_str()))
    {
        Some(method) => method,
        None if action.kind == ActionKind::Navigate || expected_status.is_some() => HttpMethod::Get,
        None => return None,
    };

    let body = if method.has_body() {
        step.explicit_input()
            .map(str::to_string)
            .or_else(|| JSON_BODY.find(text).map(|m| m.as_str().to_string()))
    } else {
        None
    };

    Some(HttpCall {
        step_number: step.step_number,
        method,
        url,
        body,
        expected_status,
    })
}

/// Calls of every step of a case, in step order
#[must_use]
pub fn collect_requests(case: &TestCase) -> Vec<HttpCall> {
    case.ordered_steps()
        .into_iter()
        .filter_map(infer_request)
        .collect()
}

fn expected_status(step: &Step, text: &str) -> Option<u16> {
    if let Some(assertion) = &step.assertion {
        if assertion.kind == AssertionKind::Status {
            if let Some(code) = assertion.value.as_deref().and_then(|v| v.trim().parse().ok()) {
                return Some(code);
            }
        }
    }
    STATUS
        .captures(text)
        .or_else(|| RETURNS.captures(text))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn trim(s: &str) -> String {
    s.trim_end_matches(['.', ',', ';', ')', '!', '?', ':'])
        .to_string()
}
