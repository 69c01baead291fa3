//! API tool emitters: Postman v2.1, Insomnia v4, OpenAPI 3.0.3.
//!
//! All three are data documents built from [`HttpCall`]s with serde. Relative
//! paths are expressed against a base-URL variable so the collections can be
//! pointed at another environment without editing every request.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::artifact::EmittedArtifact;
use crate::escape;
use crate::http::{path_of, HttpCall};
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::target::Format;

use super::requests_or_default;

/// Deterministic id for an element of a generated collection
pub(crate) fn stable_id(suite: &str, key: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("casegen:{suite}:{key}").as_bytes())
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn with_slash(url: &str) -> String {
    if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{url}")
    }
}

fn status_description(call: &HttpCall) -> Option<String> {
    call.expected_status.map(|s| format!("Expects status {s}"))
}

// =============================================================================
// Postman
// =============================================================================

const POSTMAN_SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

#[derive(Debug, Serialize)]
struct PostmanCollection {
    info: PostmanInfo,
    item: Vec<PostmanFolder>,
    variable: Vec<PostmanVariable>,
}

#[derive(Debug, Serialize)]
struct PostmanInfo {
    #[serde(rename = "_postman_id")]
    postman_id: String,
    name: String,
    schema: &'static str,
}

#[derive(Debug, Serialize)]
struct PostmanFolder {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    item: Vec<PostmanItem>,
}

#[derive(Debug, Serialize)]
struct PostmanItem {
    name: String,
    request: PostmanRequest,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    event: Vec<PostmanEvent>,
}

#[derive(Debug, Serialize)]
struct PostmanRequest {
    method: &'static str,
    header: Vec<PostmanHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<PostmanBody>,
    url: PostmanUrl,
}

#[derive(Debug, Serialize)]
struct PostmanHeader {
    key: &'static str,
    value: &'static str,
}

#[derive(Debug, Serialize)]
struct PostmanBody {
    mode: &'static str,
    raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Value>,
}

#[derive(Debug, Serialize)]
struct PostmanUrl {
    raw: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    host: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    path: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    query: Vec<PostmanQuery>,
}

#[derive(Debug, Serialize)]
struct PostmanQuery {
    key: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct PostmanEvent {
    listen: &'static str,
    script: PostmanScript,
}

#[derive(Debug, Serialize)]
struct PostmanScript {
    #[serde(rename = "type")]
    kind: &'static str,
    exec: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PostmanVariable {
    key: &'static str,
    value: String,
}

impl PostmanUrl {
    fn from_call(url: &str) -> Self {
        if is_absolute(url) {
            return Self {
                raw: url.to_string(),
                host: Vec::new(),
                path: Vec::new(),
                query: Vec::new(),
            };
        }
        let relative = with_slash(url);
        let (path, query) = relative.split_once('?').unwrap_or((&relative, ""));
        Self {
            raw: format!("{{{{baseUrl}}}}{relative}"),
            host: vec!["{{baseUrl}}".to_string()],
            path: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: query
                .split('&')
                .filter(|q| !q.is_empty())
                .map(|q| {
                    let (key, value) = q.split_once('=').unwrap_or((q, ""));
                    PostmanQuery {
                        key: key.to_string(),
                        value: value.to_string(),
                    }
                })
                .collect(),
        }
    }
}

impl PostmanItem {
    fn from_call(call: &HttpCall) -> Self {
        let body = call.body.as_ref().map(|raw| PostmanBody {
            mode: "raw",
            raw: raw.clone(),
            options: call
                .has_json_body()
                .then(|| json!({ "raw": { "language": "json" } })),
        });
        let header = if call.has_json_body() {
            vec![PostmanHeader {
                key: "Content-Type",
                value: "application/json",
            }]
        } else {
            Vec::new()
        };
        let event = call
            .expected_status
            .map(|status| PostmanEvent {
                listen: "test",
                script: PostmanScript {
                    kind: "text/javascript",
                    exec: vec![
                        format!(
                            "pm.test({}, function () {{",
                            escape::js(&format!("Status is {status}"))
                        ),
                        format!("    pm.response.to.have.status({status});"),
                        "});".to_string(),
                    ],
                },
            })
            .into_iter()
            .collect();
        Self {
            name: call.name(),
            request: PostmanRequest {
                method: call.method.as_str(),
                header,
                body,
                url: PostmanUrl::from_call(&call.url),
            },
            event,
        }
    }
}

/// Postman Collection v2.1: one folder per case, one item per request
pub fn emit_postman(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);

    let collection = PostmanCollection {
        info: PostmanInfo {
            postman_id: stable_id(ctx.suite_name, "postman").to_string(),
            name: ctx.suite_name.to_string(),
            schema: POSTMAN_SCHEMA,
        },
        item: grouped
            .iter()
            .map(|g| PostmanFolder {
                name: g.title.clone(),
                description: Some(g.case.description.trim())
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
                item: g.calls.iter().map(PostmanItem::from_call).collect(),
            })
            .collect(),
        variable: vec![PostmanVariable {
            key: "baseUrl",
            value: ctx.options.base_url.clone(),
        }],
    };

    let content = serde_json::to_string_pretty(&collection)?;
    Ok(EmittedArtifact::new(Format::Postman, ctx.filename(Format::Postman), content)
        .with_findings(findings))
}

// =============================================================================
// Insomnia
// =============================================================================

#[derive(Debug, Serialize)]
struct InsomniaExport {
    #[serde(rename = "_type")]
    kind: &'static str,
    #[serde(rename = "__export_format")]
    export_format: u8,
    #[serde(rename = "__export_date")]
    export_date: String,
    #[serde(rename = "__export_source")]
    export_source: &'static str,
    resources: Vec<InsomniaResource>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "_type", rename_all = "snake_case")]
enum InsomniaResource {
    Workspace {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "parentId")]
        parent_id: Option<String>,
        name: String,
        scope: &'static str,
    },
    Environment {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "parentId")]
        parent_id: String,
        name: &'static str,
        data: Value,
    },
    RequestGroup {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "parentId")]
        parent_id: String,
        name: String,
        description: String,
    },
    Request {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "parentId")]
        parent_id: String,
        name: String,
        method: &'static str,
        url: String,
        body: Value,
        headers: Vec<Value>,
        description: String,
    },
}

/// Insomnia v4 export: workspace, base environment, one group per case
pub fn emit_insomnia(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let suite = ctx.suite_name;
    let id = |prefix: &str, key: &str| format!("{prefix}_{}", stable_id(suite, key).simple());

    let workspace_id = id("wrk", "workspace");
    let mut resources = vec![
        InsomniaResource::Workspace {
            id: workspace_id.clone(),
            parent_id: None,
            name: suite.to_string(),
            scope: "collection",
        },
        InsomniaResource::Environment {
            id: id("env", "environment"),
            parent_id: workspace_id.clone(),
            name: "Base Environment",
            data: json!({ "base_url": ctx.options.base_url }),
        },
    ];

    for (ci, group) in grouped.iter().enumerate() {
        let folder_id = id("fld", &format!("case/{ci}"));
        resources.push(InsomniaResource::RequestGroup {
            id: folder_id.clone(),
            parent_id: workspace_id.clone(),
            name: group.title.clone(),
            description: group.case.description.clone(),
        });
        for (ri, call) in group.calls.iter().enumerate() {
            let url = if is_absolute(&call.url) {
                call.url.clone()
            } else {
                format!("{{{{ _.base_url }}}}{}", with_slash(&call.url))
            };
            let (body, headers) = match &call.body {
                Some(text) if call.has_json_body() => (
                    json!({ "mimeType": "application/json", "text": text }),
                    vec![json!({ "name": "Content-Type", "value": "application/json" })],
                ),
                Some(text) => (json!({ "mimeType": "text/plain", "text": text }), Vec::new()),
                None => (json!({}), Vec::new()),
            };
            resources.push(InsomniaResource::Request {
                id: id("req", &format!("case/{ci}/request/{ri}")),
                parent_id: folder_id.clone(),
                name: call.name(),
                method: call.method.as_str(),
                url,
                body,
                headers,
                description: status_description(call).unwrap_or_default(),
            });
        }
    }

    let export = InsomniaExport {
        kind: "export",
        export_format: 4,
        export_date: ctx.clock.iso8601(),
        export_source: "casegen",
        resources,
    };
    let content = serde_json::to_string_pretty(&export)?;
    Ok(EmittedArtifact::new(Format::Insomnia, ctx.filename(Format::Insomnia), content)
        .with_findings(findings))
}

// =============================================================================
// OpenAPI
// =============================================================================

/// Path with the query string removed; `:id` segments become `{id}`
fn openapi_path(url: &str) -> String {
    let path = path_of(url);
    let path = path.split(['?', '#']).next().unwrap_or("/");
    let path = with_slash(path);
    path.split('/')
        .map(|seg| match seg.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => seg.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn path_parameters(path: &str) -> Vec<Value> {
    path.split('/')
        .filter_map(|seg| seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            })
        })
        .collect()
}

fn operation(call: &HttpCall, tag: &str, operation_id: String) -> Value {
    let mut op = Map::new();
    op.insert("summary".into(), Value::String(call.name()));
    op.insert("operationId".into(), Value::String(operation_id));
    op.insert("tags".into(), json!([tag]));

    let params = path_parameters(&openapi_path(&call.url));
    if !params.is_empty() {
        op.insert("parameters".into(), Value::Array(params));
    }

    if let Some(body) = &call.body {
        let content = match serde_json::from_str::<Value>(body) {
            Ok(example) => json!({ "application/json": { "example": example } }),
            Err(_) => json!({ "text/plain": { "example": body } }),
        };
        op.insert("requestBody".into(), json!({ "content": content }));
    }

    let mut responses = Map::new();
    match call.expected_status {
        Some(status) => responses.insert(
            status.to_string(),
            json!({ "description": format!("Expected status {status}") }),
        ),
        None => responses.insert("default".into(), json!({ "description": "Response" })),
    };
    op.insert("responses".into(), Value::Object(responses));
    Value::Object(op)
}

/// OpenAPI 3.0.3 document; the first definition of a method and path wins
pub fn emit_openapi(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);

    let mut paths = Map::new();
    let mut operation_ids = HashSet::new();
    for group in &grouped {
        for call in &group.calls {
            let path = openapi_path(&call.url);
            let method = call.method.as_str().to_ascii_lowercase();
            let entry = paths
                .entry(path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            let Value::Object(item) = entry else {
                continue;
            };
            if item.contains_key(&method) {
                continue;
            }
            let base = escape::camel_ident(&format!("{method} {path}"));
            let mut operation_id = base.clone();
            let mut n = 2;
            while !operation_ids.insert(operation_id.clone()) {
                operation_id = format!("{base}{n}");
                n += 1;
            }
            item.insert(method, operation(call, &group.title, operation_id));
        }
    }

    let doc = json!({
        "openapi": "3.0.3",
        "info": {
            "title": ctx.suite_name,
            "version": "1.0.0",
            "description": format!("Generated from {} test case(s)", ctx.test_cases.len()),
        },
        "servers": [{ "url": ctx.options.base_url }],
        "paths": Value::Object(paths),
    });
    let content = serde_json::to_string_pretty(&doc)?;
    Ok(EmittedArtifact::new(Format::OpenApi, ctx.filename(Format::OpenApi), content)
        .with_findings(findings))
}
