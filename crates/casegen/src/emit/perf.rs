//! Load-testing emitters: k6, JMeter, Artillery, Locust.
//!
//! Requests come from [`requests_or_default`]; the load profile comes from
//! [`crate::config::LoadProfile`].

use std::fmt::Write as _;

use serde::Serialize;
use serde_yaml_ng::{Mapping, Value};

use crate::artifact::EmittedArtifact;
use crate::escape;
use crate::http::{HttpCall, HttpMethod};
use crate::registry::EmitContext;
use crate::result::CasegenResult;
use crate::target::Format;

use super::web::{js_url, python_seconds};
use super::{require_cases, requests_or_default, unique_idents, CaseRequests};

/// Step comments and the calls each step produced, in step order
fn steps_with_calls<'a>(group: &'a CaseRequests<'_>) -> Vec<(u32, String, Vec<&'a HttpCall>)> {
    let mut steps: Vec<(u32, String, Vec<&HttpCall>)> = group
        .case
        .ordered_steps()
        .into_iter()
        .map(|s| {
            let calls = group
                .calls
                .iter()
                .filter(|c| c.step_number == s.step_number)
                .collect();
            (s.step_number, escape::comment(&s.action), calls)
        })
        .collect();
    // A default request on a case without steps still needs a home
    if steps.is_empty() && !group.calls.is_empty() {
        steps.push((1, String::new(), group.calls.iter().collect()));
    }
    steps
}

// =============================================================================
// k6
// =============================================================================

fn k6_function(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "get",
        HttpMethod::Post => "post",
        HttpMethod::Put => "put",
        HttpMethod::Delete => "del",
        HttpMethod::Patch => "patch",
        HttpMethod::Head => "head",
        HttpMethod::Options => "options",
    }
}

fn k6_request(call: &HttpCall, var: &str) -> Vec<String> {
    let url = js_url(Some(call.url.as_str()));
    let func = k6_function(call.method);
    let params = call
        .has_json_body()
        .then_some("{ headers: { 'Content-Type': 'application/json' } }");
    let args = match (call.method, call.body.as_deref(), params) {
        (HttpMethod::Get | HttpMethod::Head, _, _) => url,
        (_, Some(body), Some(params)) => format!("{url}, {}, {params}", escape::js(body)),
        (_, Some(body), None) => format!("{url}, {}", escape::js(body)),
        (_, None, _) => format!("{url}, null"),
    };
    let mut lines = vec![format!("const {var} = http.{func}({args});")];
    let check = match call.expected_status {
        Some(status) => format!(
            "{}: (r) => r.status === {status}",
            escape::js(&format!("{} status is {status}", call.name()))
        ),
        None => format!(
            "{}: (r) => r.status < 400",
            escape::js(&format!("{} succeeded", call.name()))
        ),
    };
    lines.push(format!("check({var}, {{ {check} }});"));
    lines
}

/// k6 script: one group per case, ramp-up and steady stages
pub fn emit_k6(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::K6)?;
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let load = &ctx.options.load;

    let mut out = String::new();
    out.push_str("import http from 'k6/http';\n");
    out.push_str("import { check, group, sleep } from 'k6';\n\n");
    let _ = writeln!(
        out,
        "const BASE_URL = __ENV.BASE_URL || {};\n",
        escape::js(&ctx.options.base_url)
    );
    out.push_str("export const options = {\n");
    out.push_str("  stages: [\n");
    if load.ramp_up_secs > 0 {
        let _ = writeln!(
            out,
            "    {{ duration: '{}s', target: {} }},",
            load.ramp_up_secs, load.vus
        );
    }
    let _ = writeln!(
        out,
        "    {{ duration: '{}s', target: {} }},",
        load.duration_secs, load.vus
    );
    out.push_str("  ],\n");
    out.push_str("  thresholds: {\n");
    out.push_str("    http_req_failed: ['rate<0.01'],\n");
    let _ = writeln!(out, "    http_req_duration: ['p(95)<{}'],", load.p95_ms);
    out.push_str("  },\n");
    out.push_str("};\n\n");
    let _ = writeln!(out, "// {}", escape::comment(ctx.suite_name));
    out.push_str("export default function () {\n");

    for (gi, group) in grouped.iter().enumerate() {
        if gi > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "  group({}, () => {{", escape::js(&group.title));
        let mut n = 0;
        for (number, text, calls) in steps_with_calls(group) {
            let _ = writeln!(out, "    // Step {number}: {text}");
            for call in calls {
                n += 1;
                for line in k6_request(call, &format!("res{n}")) {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
        let _ = writeln!(out, "    sleep({});", python_seconds(load.think_time_ms));
        out.push_str("  });\n");
    }
    out.push_str("}\n");

    Ok(EmittedArtifact::new(Format::K6, ctx.filename(Format::K6), out).with_findings(findings))
}

// =============================================================================
// JMeter
// =============================================================================

fn jmeter_sampler(out: &mut String, call: &HttpCall, think_ms: u64, indent: &str) {
    let path = if call.url.starts_with("http://") || call.url.starts_with("https://") {
        call.url.clone()
    } else if call.url.starts_with('/') {
        format!("${{BASE_URL}}{}", call.url)
    } else {
        format!("${{BASE_URL}}/{}", call.url)
    };
    let _ = writeln!(
        out,
        r#"{indent}<HTTPSamplerProxy guiclass="HttpTestSampleGui" testclass="HTTPSamplerProxy" testname="{}">"#,
        escape::xml(&call.name())
    );
    let _ = writeln!(
        out,
        r#"{indent}  <stringProp name="HTTPSampler.path">{}</stringProp>"#,
        escape::xml(&path)
    );
    let _ = writeln!(
        out,
        r#"{indent}  <stringProp name="HTTPSampler.method">{}</stringProp>"#,
        call.method
    );
    let _ = writeln!(
        out,
        r#"{indent}  <boolProp name="HTTPSampler.follow_redirects">true</boolProp>"#
    );
    if let Some(body) = &call.body {
        let _ = writeln!(out, r#"{indent}  <boolProp name="HTTPSampler.postBodyRaw">true</boolProp>"#);
        let _ = writeln!(
            out,
            r#"{indent}  <elementProp name="HTTPsampler.Arguments" elementType="Arguments">"#
        );
        let _ = writeln!(out, r#"{indent}    <collectionProp name="Arguments.arguments">"#);
        let _ = writeln!(out, r#"{indent}      <elementProp name="" elementType="HTTPArgument">"#);
        let _ = writeln!(
            out,
            r#"{indent}        <boolProp name="HTTPArgument.always_encode">false</boolProp>"#
        );
        let _ = writeln!(
            out,
            r#"{indent}        <stringProp name="Argument.value">{}</stringProp>"#,
            escape::xml(body)
        );
        let _ = writeln!(out, r#"{indent}        <stringProp name="Argument.metadata">=</stringProp>"#);
        let _ = writeln!(out, "{indent}      </elementProp>");
        let _ = writeln!(out, "{indent}    </collectionProp>");
        let _ = writeln!(out, "{indent}  </elementProp>");
    }
    let _ = writeln!(out, "{indent}</HTTPSamplerProxy>");
    let _ = writeln!(out, "{indent}<hashTree>");

    if call.has_json_body() {
        let _ = writeln!(
            out,
            r#"{indent}  <HeaderManager guiclass="HeaderPanel" testclass="HeaderManager" testname="JSON headers">"#
        );
        let _ = writeln!(out, r#"{indent}    <collectionProp name="HeaderManager.headers">"#);
        let _ = writeln!(out, r#"{indent}      <elementProp name="" elementType="Header">"#);
        let _ = writeln!(out, r#"{indent}        <stringProp name="Header.name">Content-Type</stringProp>"#);
        let _ = writeln!(
            out,
            r#"{indent}        <stringProp name="Header.value">application/json</stringProp>"#
        );
        let _ = writeln!(out, "{indent}      </elementProp>");
        let _ = writeln!(out, "{indent}    </collectionProp>");
        let _ = writeln!(out, "{indent}  </HeaderManager>");
        let _ = writeln!(out, "{indent}  <hashTree/>");
    }
    if let Some(status) = call.expected_status {
        let _ = writeln!(
            out,
            r#"{indent}  <ResponseAssertion guiclass="AssertionGui" testclass="ResponseAssertion" testname="Status {status}">"#
        );
        let _ = writeln!(out, r#"{indent}    <collectionProp name="Asserion.test_strings">"#);
        let _ = writeln!(out, r#"{indent}      <stringProp name="{status}">{status}</stringProp>"#);
        let _ = writeln!(out, "{indent}    </collectionProp>");
        let _ = writeln!(
            out,
            r#"{indent}    <stringProp name="Assertion.test_field">Assertion.response_code</stringProp>"#
        );
        let _ = writeln!(out, r#"{indent}    <intProp name="Assertion.test_type">8</intProp>"#);
        let _ = writeln!(out, "{indent}  </ResponseAssertion>");
        let _ = writeln!(out, "{indent}  <hashTree/>");
    }
    let _ = writeln!(
        out,
        r#"{indent}  <ConstantTimer guiclass="ConstantTimerGui" testclass="ConstantTimer" testname="Think time">"#
    );
    let _ = writeln!(
        out,
        r#"{indent}    <stringProp name="ConstantTimer.delay">{think_ms}</stringProp>"#
    );
    let _ = writeln!(out, "{indent}  </ConstantTimer>");
    let _ = writeln!(out, "{indent}  <hashTree/>");
    let _ = writeln!(out, "{indent}</hashTree>");
}

/// JMeter test plan (`.jmx`): one transaction controller per case
pub fn emit_jmeter(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let load = &ctx.options.load;

    let mut out = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(r#"<jmeterTestPlan version="1.2" properties="5.0" jmeter="5.6.3">"#);
    out.push('\n');
    out.push_str("  <hashTree>\n");
    let _ = writeln!(
        out,
        r#"    <TestPlan guiclass="TestPlanGui" testclass="TestPlan" testname="{}">"#,
        escape::xml(ctx.suite_name)
    );
    out.push_str(
        r#"      <elementProp name="TestPlan.user_defined_variables" elementType="Arguments" guiclass="ArgumentsPanel" testclass="Arguments">"#,
    );
    out.push('\n');
    out.push_str("        <collectionProp name=\"Arguments.arguments\">\n");
    out.push_str("          <elementProp name=\"BASE_URL\" elementType=\"Argument\">\n");
    out.push_str("            <stringProp name=\"Argument.name\">BASE_URL</stringProp>\n");
    let _ = writeln!(
        out,
        r#"            <stringProp name="Argument.value">${{__P(BASE_URL,{})}}</stringProp>"#,
        escape::xml(&ctx.options.base_url)
    );
    out.push_str("          </elementProp>\n");
    out.push_str("        </collectionProp>\n");
    out.push_str("      </elementProp>\n");
    out.push_str("    </TestPlan>\n");
    out.push_str("    <hashTree>\n");
    out.push_str(
        r#"      <ThreadGroup guiclass="ThreadGroupGui" testclass="ThreadGroup" testname="Virtual users">"#,
    );
    out.push('\n');
    let _ = writeln!(
        out,
        r#"        <intProp name="ThreadGroup.num_threads">{}</intProp>"#,
        load.vus
    );
    let _ = writeln!(
        out,
        r#"        <intProp name="ThreadGroup.ramp_time">{}</intProp>"#,
        load.ramp_up_secs
    );
    out.push_str("        <boolProp name=\"ThreadGroup.scheduler\">true</boolProp>\n");
    let _ = writeln!(
        out,
        r#"        <stringProp name="ThreadGroup.duration">{}</stringProp>"#,
        load.total_secs()
    );
    out.push_str(
        r#"        <elementProp name="ThreadGroup.main_controller" elementType="LoopController" guiclass="LoopControlPanel" testclass="LoopController">"#,
    );
    out.push('\n');
    out.push_str("          <intProp name=\"LoopController.loops\">-1</intProp>\n");
    out.push_str("          <boolProp name=\"LoopController.continue_forever\">false</boolProp>\n");
    out.push_str("        </elementProp>\n");
    out.push_str("      </ThreadGroup>\n");
    out.push_str("      <hashTree>\n");

    for group in &grouped {
        let _ = writeln!(
            out,
            r#"        <TransactionController guiclass="TransactionControllerGui" testclass="TransactionController" testname="{}">"#,
            escape::xml(&group.title)
        );
        out.push_str("          <boolProp name=\"TransactionController.includeTimers\">false</boolProp>\n");
        out.push_str("        </TransactionController>\n");
        out.push_str("        <hashTree>\n");
        for call in &group.calls {
            jmeter_sampler(&mut out, call, load.think_time_ms, "          ");
        }
        out.push_str("        </hashTree>\n");
    }

    out.push_str("      </hashTree>\n");
    out.push_str("    </hashTree>\n");
    out.push_str("  </hashTree>\n");
    out.push_str("</jmeterTestPlan>\n");

    Ok(EmittedArtifact::new(Format::JMeter, ctx.filename(Format::JMeter), out)
        .with_findings(findings))
}

// =============================================================================
// Artillery
// =============================================================================

#[derive(Debug, Serialize)]
struct ArtilleryScript {
    config: ArtilleryConfig,
    scenarios: Vec<ArtilleryScenario>,
}

#[derive(Debug, Serialize)]
struct ArtilleryConfig {
    target: String,
    phases: Vec<ArtilleryPhase>,
    plugins: Mapping,
    ensure: Mapping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtilleryPhase {
    duration: u64,
    arrival_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    ramp_to: Option<u32>,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct ArtilleryScenario {
    name: String,
    flow: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct ArtilleryRequest {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    json: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    expect: Vec<Mapping>,
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Mapping::new();
    map.insert(Value::String(key.to_string()), value);
    Value::Mapping(map)
}

/// Artillery script (YAML): ramp and sustained phases, one scenario per case
pub fn emit_artillery(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let load = &ctx.options.load;

    let mut phases = Vec::new();
    if load.ramp_up_secs > 0 {
        phases.push(ArtilleryPhase {
            duration: load.ramp_up_secs,
            arrival_rate: 1,
            ramp_to: Some(load.arrival_rate()),
            name: "Ramp up",
        });
    }
    phases.push(ArtilleryPhase {
        duration: load.duration_secs,
        arrival_rate: load.arrival_rate(),
        ramp_to: None,
        name: "Sustained load",
    });

    let think = serde_yaml_ng::to_value(load.think_secs())?;
    let mut scenarios = Vec::with_capacity(grouped.len());
    for group in &grouped {
        let mut flow = Vec::new();
        for call in &group.calls {
            let json = call
                .body
                .as_deref()
                .and_then(|b| serde_json::from_str::<serde_json::Value>(b).ok());
            let request = ArtilleryRequest {
                url: call.url.clone(),
                body: if json.is_none() { call.body.clone() } else { None },
                json,
                expect: call
                    .expected_status
                    .map(|s| {
                        let mut m = Mapping::new();
                        m.insert(Value::String("statusCode".into()), Value::Number(s.into()));
                        m
                    })
                    .into_iter()
                    .collect(),
            };
            let method = call.method.as_str().to_ascii_lowercase();
            flow.push(single(&method, serde_yaml_ng::to_value(&request)?));
            flow.push(single("think", think.clone()));
        }
        scenarios.push(ArtilleryScenario {
            name: group.title.clone(),
            flow,
        });
    }

    let mut plugins = Mapping::new();
    plugins.insert(Value::String("expect".into()), Value::Mapping(Mapping::new()));
    let mut ensure = Mapping::new();
    ensure.insert(Value::String("p95".into()), Value::Number(load.p95_ms.into()));
    ensure.insert(Value::String("maxErrorRate".into()), Value::Number(1.into()));

    let script = ArtilleryScript {
        config: ArtilleryConfig {
            target: ctx.options.base_url.clone(),
            phases,
            plugins,
            ensure,
        },
        scenarios,
    };
    let content = serde_yaml_ng::to_string(&script)?;
    Ok(EmittedArtifact::new(Format::Artillery, ctx.filename(Format::Artillery), content)
        .with_findings(findings))
}

// =============================================================================
// Locust
// =============================================================================

fn locust_call(call: &HttpCall) -> Vec<String> {
    let method = call.method.as_str().to_ascii_lowercase();
    let url = if call.url.starts_with("http://") || call.url.starts_with("https://") {
        call.url.clone()
    } else if call.url.starts_with('/') {
        call.url.clone()
    } else {
        format!("/{}", call.url)
    };
    let mut args = vec![
        escape::python(&url),
        format!("name={}", escape::python(&call.name())),
    ];
    if let Some(body) = &call.body {
        args.push(format!("data={}", escape::python(body)));
        if call.has_json_body() {
            args.push("headers={'Content-Type': 'application/json'}".to_string());
        }
    }
    match call.expected_status {
        Some(status) => {
            args.push("catch_response=True".to_string());
            vec![
                format!("with self.client.{method}({}) as response:", args.join(", ")),
                format!("    if response.status_code != {status}:"),
                format!(
                    "        response.failure(f'expected {status}, got {{response.status_code}}')"
                ),
                "    else:".to_string(),
                "        response.success()".to_string(),
            ]
        }
        None => vec![format!("self.client.{method}({})", args.join(", "))],
    }
}

/// Locust locustfile: one `@task` per case
pub fn emit_locust(ctx: &EmitContext<'_>) -> CasegenResult<EmittedArtifact> {
    require_cases(ctx, Format::Locust)?;
    let mut findings = Vec::new();
    let grouped = requests_or_default(ctx.test_cases, &mut findings);
    let load = &ctx.options.load;

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", escape::docstring(&format!("Load test for {}.", ctx.suite_name)));
    out.push_str("import os\n\n");
    out.push_str("from locust import HttpUser, constant, task\n\n\n");
    let _ = writeln!(out, "class {}User(HttpUser):", escape::pascal_ident(ctx.suite_name));
    let _ = writeln!(
        out,
        "    host = os.environ.get('BASE_URL', {})",
        escape::python(&ctx.options.base_url)
    );
    let _ = writeln!(out, "    wait_time = constant({})", python_seconds(load.think_time_ms));

    let names = unique_idents(ctx.test_cases, escape::snake_ident);
    for (group, name) in grouped.iter().zip(&names) {
        out.push('\n');
        out.push_str("    @task\n");
        let _ = writeln!(out, "    def {name}(self):");
        let _ = writeln!(out, "        {}", escape::python(&group.title));
        for (number, text, calls) in steps_with_calls(group) {
            let _ = writeln!(out, "        # Step {number}: {text}");
            for call in calls {
                for line in locust_call(call) {
                    let _ = writeln!(out, "        {line}");
                }
            }
        }
    }

    Ok(EmittedArtifact::new(Format::Locust, ctx.filename(Format::Locust), out)
        .with_findings(findings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{EmitOptions, LoadProfile};
    use crate::ir::{Step, TestCase};
    use crate::lint::{lint, Severity};

    fn api_case() -> TestCase {
        TestCase::new("Browse catalog")
            .with_step(Step::new(1, "GET /products returns 200"))
            .with_step(Step::new(2, "Look at the first product"))
            .with_step(Step::new(3, "POST /cart with {\"sku\":\"A1\"} and expect status 201"))
    }

    fn emit(f: fn(&EmitContext<'_>) -> CasegenResult<EmittedArtifact>, cases: &[TestCase]) -> EmittedArtifact {
        let clock = FixedClock::at_ms(1_700_000_000_000);
        let options = EmitOptions::default().with_load(LoadProfile {
            vus: 25,
            duration_secs: 60,
            ramp_up_secs: 15,
            think_time_ms: 500,
            p95_ms: 800,
        });
        let ctx = EmitContext::new(cases, "Catalog", &clock, &options);
        f(&ctx).unwrap()
    }

    fn no_errors(script: &str) -> bool {
        lint(script).iter().all(|f| f.severity != Severity::Error)
    }

    mod k6_tests {
        use super::*;

        #[test]
        fn test_script_shape() {
            let artifact = emit(emit_k6, &[api_case()]);
            let c = &artifact.content;
            assert!(c.contains("{ duration: '15s', target: 25 },"));
            assert!(c.contains("{ duration: '60s', target: 25 },"));
            assert!(c.contains("http_req_duration: ['p(95)<800'],"));
            assert!(c.contains("group('Browse catalog', () => {"));
            assert!(c.contains("const res1 = http.get(BASE_URL + '/products');"));
            assert!(c.contains("r.status === 200"));
            assert!(c.contains("// Step 2: Look at the first product"));
            assert!(c.contains(
                "const res2 = http.post(BASE_URL + '/cart', '{\"sku\":\"A1\"}', { headers: { 'Content-Type': 'application/json' } });"
            ));
            assert!(c.contains("sleep(0.5);"));
            assert!(no_errors(c));
        }
    }

    mod jmeter_tests {
        use super::*;

        #[test]
        fn test_plan_shape() {
            let artifact = emit(emit_jmeter, &[api_case()]);
            let c = &artifact.content;
            assert!(c.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
            assert!(c.contains("<intProp name=\"ThreadGroup.num_threads\">25</intProp>"));
            assert!(c.contains("<stringProp name=\"ThreadGroup.duration\">75</stringProp>"));
            assert!(c.contains("<stringProp name=\"HTTPSampler.path\">${BASE_URL}/products</stringProp>"));
            assert!(c.contains("&quot;sku&quot;"));
            assert!(c.contains("<stringProp name=\"201\">201</stringProp>"));
            assert_eq!(c.matches("<hashTree>").count(), c.matches("</hashTree>").count());
        }

        #[test]
        fn test_titles_are_escaped() {
            let case = TestCase::new("<script> & co").with_step(Step::new(1, "GET /x"));
            let artifact = emit(emit_jmeter, &[case]);
            assert!(artifact.content.contains("testname=\"&lt;script&gt; &amp; co\""));
        }
    }

    mod artillery_tests {
        use super::*;

        #[test]
        fn test_script_parses() {
            let artifact = emit(emit_artillery, &[api_case()]);
            let doc: Value = serde_yaml_ng::from_str(&artifact.content).unwrap();
            let phases = doc["config"]["phases"].as_sequence().unwrap();
            assert_eq!(phases.len(), 2);
            assert_eq!(phases[0]["rampTo"], Value::Number(25.into()));
            assert_eq!(phases[1]["arrivalRate"], Value::Number(25.into()));
            let flow = doc["scenarios"][0]["flow"].as_sequence().unwrap();
            assert_eq!(flow[0]["get"]["url"], Value::String("/products".into()));
            assert_eq!(flow[0]["get"]["expect"][0]["statusCode"], Value::Number(200.into()));
            assert_eq!(flow[2]["post"]["json"]["sku"], Value::String("A1".into()));
            assert!(flow[1].get("think").is_some());
        }

        #[test]
        fn test_empty_input_is_valid() {
            let artifact = emit(emit_artillery, &[]);
            let doc: Value = serde_yaml_ng::from_str(&artifact.content).unwrap();
            assert!(doc["scenarios"].as_sequence().unwrap().is_empty());
            assert!(artifact.findings.is_empty());
        }
    }

    mod locust_tests {
        use super::*;

        #[test]
        fn test_locustfile() {
            let artifact = emit(emit_locust, &[api_case()]);
            let c = &artifact.content;
            assert!(c.contains("class CatalogUser(HttpUser):"));
            assert!(c.contains("    wait_time = constant(0.5)"));
            assert!(c.contains("    def browse_catalog(self):"));
            assert!(c.contains(
                "        with self.client.get('/products', name='GET /products', catch_response=True) as response:"
            ));
            assert!(c.contains("            if response.status_code != 200:"));
            assert!(no_errors(c));
        }

        #[test]
        fn test_default_request_when_none_inferred() {
            let case = TestCase::new("Idle").with_step(Step::new(1, "Look around"));
            let artifact = emit(emit_locust, &[case]);
            assert!(artifact.content.contains("self.client.get('/', name='GET /')"));
            assert_eq!(artifact.findings[0].code, "DEFAULT001");
        }
    }
}
