//! HAR 1.2 emitter.
//!
//! Each inferred request becomes an entry whose response carries the expected
//! status (0 when the case names none). Each test case is a page, so entries
//! can be grouped back by case in HAR viewers.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::artifact::EmittedArtifact;
use crate::http::HttpCall;
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::target::Format;

use super::requests_or_default;

// =============================================================================
// HAR 1.2 Format Structures
// =============================================================================

/// HAR file root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Har {
    /// Log container
    pub log: HarLog,
}

impl Har {
    /// Empty archive created by this crate
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: HarLog {
                version: "1.2".to_string(),
                creator: HarCreator {
                    name: "casegen".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                pages: Vec::new(),
                entries: Vec::new(),
                comment: None,
            },
        }
    }

    /// Parse from JSON
    ///
    /// # Errors
    ///
    /// Returns the JSON error for malformed input
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of entries
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.log.entries.len()
    }
}

impl Default for Har {
    fn default() -> Self {
        Self::new()
    }
}

/// HAR log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarLog {
    /// Always "1.2"
    pub version: String,
    /// Creator application
    pub creator: HarCreator,
    /// One page per test case
    #[serde(default)]
    pub pages: Vec<HarPage>,
    /// Requests
    pub entries: Vec<HarEntry>,
    /// Optional comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Creator application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarCreator {
    /// Name
    pub name: String,
    /// Version
    pub version: String,
}

/// Page (one per test case)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPage {
    /// ISO 8601 start time
    pub started_date_time: String,
    /// Page id referenced by entries
    pub id: String,
    /// Test case title
    pub title: String,
    /// Page timings (unknown)
    pub page_timings: HarPageTimings,
}

/// Page timings; -1 means not available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPageTimings {
    /// Content loaded
    pub on_content_load: i64,
    /// Page loaded
    pub on_load: i64,
}

/// One request/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarEntry {
    /// Page this entry belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pageref: Option<String>,
    /// ISO 8601 start time
    pub started_date_time: String,
    /// Total time in milliseconds
    pub time: f64,
    /// Request
    pub request: HarRequest,
    /// Response
    pub response: HarResponse,
    /// Cache info
    pub cache: HarCache,
    /// Timings
    pub timings: HarTimings,
    /// Originating step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    /// Method
    pub method: String,
    /// Absolute URL
    pub url: String,
    /// HTTP version
    pub http_version: String,
    /// Cookies
    pub cookies: Vec<HarNameValue>,
    /// Headers
    pub headers: Vec<HarNameValue>,
    /// Query parameters
    pub query_string: Vec<HarNameValue>,
    /// Body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<HarPostData>,
    /// Header size (-1 = unknown)
    pub headers_size: i64,
    /// Body size (-1 = unknown)
    pub body_size: i64,
}

/// HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarResponse {
    /// Expected status, 0 when unknown
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// HTTP version
    pub http_version: String,
    /// Cookies
    pub cookies: Vec<HarNameValue>,
    /// Headers
    pub headers: Vec<HarNameValue>,
    /// Body
    pub content: HarContent,
    /// Redirect target
    #[serde(rename = "redirectURL")]
    pub redirect_url: String,
    /// Header size (-1 = unknown)
    pub headers_size: i64,
    /// Body size (-1 = unknown)
    pub body_size: i64,
}

/// Header, cookie, or query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarNameValue {
    /// Name
    pub name: String,
    /// Value
    pub value: String,
}

impl HarNameValue {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPostData {
    /// MIME type
    pub mime_type: String,
    /// Body text
    pub text: String,
}

/// Response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarContent {
    /// Size in bytes
    pub size: i64,
    /// MIME type
    pub mime_type: String,
}

/// Cache info (not recorded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarCache {}

/// Request timings in milliseconds; -1 means not applicable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarTimings {
    /// Queue time
    pub blocked: i64,
    /// DNS lookup
    pub dns: i64,
    /// TCP connect
    pub connect: i64,
    /// Send
    pub send: i64,
    /// Wait for first byte
    pub wait: i64,
    /// Receive
    pub receive: i64,
    /// TLS handshake
    pub ssl: i64,
}

impl Default for HarTimings {
    fn default() -> Self {
        Self {
            blocked: -1,
            dns: -1,
            connect: -1,
            send: 0,
            wait: 0,
            receive: 0,
            ssl: -1,
        }
    }
}

/// Reason phrase for common codes
fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

fn query_string(url: &str) -> Vec<HarNameValue> {
    url.split_once('?')
        .map(|(_, q)| q.split('#').next().unwrap_or(""))
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            HarNameValue::new(name, value)
        })
        .collect()
}

fn entry(call: &HttpCall, url: String, started: String, pageref: String) -> HarEntry {
    let post_data = call.body.as_ref().map(|text| HarPostData {
        mime_type: if call.has_json_body() {
            "application/json".to_string()
        } else {
            "text/plain".to_string()
        },
        text: text.clone(),
    });
    let headers = post_data
        .as_ref()
        .map(|p| vec![HarNameValue::new("Content-Type", p.mime_type.clone())])
        .unwrap_or_default();
    let body_size = post_data.as_ref().map_or(0, |p| p.text.len() as i64);
    let status = call.expected_status.unwrap_or(0);

    HarEntry {
        pageref: Some(pageref),
        started_date_time: started,
        time: 0.0,
        request: HarRequest {
            method: call.method.as_str().to_string(),
            query_string: query_string(&url),
            url,
            http_version: "HTTP/1.1".to_string(),
            cookies: Vec::new(),
            headers,
            post_data,
            headers_size: -1,
            body_size,
        },
        response: HarResponse {
            status,
            status_text: status_text(status).to_string(),
            http_version: "HTTP/1.1".to_string(),
            cookies: Vec::new(),
            headers: Vec::new(),
            content: HarContent {
                size: 0,
                mime_type: String::new(),
            },
            redirect_url: String::new(),
            headers_size: -1,
            body_size: -1,
        },
        cache: HarCache::default(),
        timings: HarTimings::default(),
        comment: Some(format!("step {}", call.step_number)),
    }
}

/// HAR 1.2 archive of the inferred requests
pub fn emit_har(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let start = ctx.clock.now();
    let stamp = |offset_ms: i64| {
        (start + Duration::milliseconds(offset_ms))
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    };

    let mut har = Har::new();
    har.log.comment = Some(ctx.suite_name.to_string());
    let mut offset = 0_i64;
    for (i, group) in grouped.iter().enumerate() {
        let page_id = format!("page_{}", i + 1);
        har.log.pages.push(HarPage {
            started_date_time: stamp(offset),
            id: page_id.clone(),
            title: group.title.clone(),
            page_timings: HarPageTimings {
                on_content_load: -1,
                on_load: -1,
            },
        });
        for call in &group.calls {
            let url = ctx.options.absolute_url(&call.url);
            har.log
                .entries
                .push(entry(call, url, stamp(offset), page_id.clone()));
            offset += 1;
        }
    }

    let content = serde_json::to_string_pretty(&har)?;
    Ok(EmittedArtifact::new(Format::Har, ctx.filename(Format::Har), content)
        .with_findings(findings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::EmitOptions;
    use crate::ir::{Step, TestCase};

    fn emit(cases: &[TestCase]) -> (EmittedArtifact, Har) {
        let clock = FixedClock::at_ms(1_700_000_000_000);
        let options = EmitOptions::default().with_base_url("https://shop.test");
        let ctx = EmitContext::new(cases, "Shop", &clock, &options);
        let artifact = emit_har(&ctx).unwrap();
        let har = Har::from_json(&artifact.content).unwrap();
        (artifact, har)
    }

    #[test]
    fn test_entries_resolve_against_base_url() {
        let case = TestCase::new("Search")
            .with_step(Step::new(1, "GET /search?q=shoes&page=2 returns 200"))
            .with_step(Step::new(2, "POST /cart with {\"sku\":\"A1\"}"));
        let (_, har) = emit(&[case]);
        assert_eq!(har.log.version, "1.2");
        assert_eq!(har.entry_count(), 2);

        let first = &har.log.entries[0];
        assert_eq!(first.request.url, "https://shop.test/search?q=shoes&page=2");
        assert_eq!(first.request.query_string.len(), 2);
        assert_eq!(first.request.query_string[0], HarNameValue::new("q", "shoes"));
        assert_eq!(first.response.status, 200);
        assert_eq!(first.response.status_text, "OK");
        assert_eq!(first.started_date_time, "2023-11-14T22:13:20.000Z");

        let second = &har.log.entries[1];
        assert_eq!(second.request.method, "POST");
        assert_eq!(second.response.status, 0);
        let post = second.request.post_data.as_ref().unwrap();
        assert_eq!(post.mime_type, "application/json");
        assert_eq!(second.started_date_time, "2023-11-14T22:13:20.001Z");
    }

    #[test]
    fn test_pages_per_case() {
        let cases = vec![
            TestCase::new("A").with_step(Step::new(1, "GET /a")),
            TestCase::new("B").with_step(Step::new(1, "GET /b")),
        ];
        let (_, har) = emit(&cases);
        assert_eq!(har.log.pages.len(), 2);
        assert_eq!(har.log.entries[1].pageref.as_deref(), Some("page_2"));
    }

    #[test]
    fn test_empty_input_is_valid_archive() {
        let (artifact, har) = emit(&[]);
        assert_eq!(har.entry_count(), 0);
        assert!(artifact.findings.is_empty());
    }

    #[test]
    fn test_timings_default() {
        let t = HarTimings::default();
        assert_eq!(t.blocked, -1);
        assert_eq!(t.send, 0);
    }
}
