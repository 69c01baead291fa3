//! Export command handler

use crate::config::{load_emit_options, CliConfig};
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::ExportArgs;
use casegen::{
    emit, scaffold_project, Clock, EmissionTarget, EmitContext, EmitOptions, SuiteMeta,
    SystemClock, TestCase,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Test cases read from an input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFile {
    /// Suite name, if the file carries one
    pub name: Option<String>,
    /// Suite id, if the file carries one
    pub id: Option<String>,
    /// Cases in file order
    pub test_cases: Vec<TestCase>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaseInput {
    List(Vec<TestCase>),
    Suite(SuiteInput),
}

#[derive(Deserialize)]
struct SuiteInput {
    #[serde(default, alias = "suite_name", alias = "suiteName")]
    name: Option<String>,
    #[serde(default, alias = "suite_id", alias = "suiteId")]
    id: Option<String>,
    #[serde(alias = "testCases")]
    test_cases: Vec<TestCase>,
}

/// Parse test cases: a bare list, or a suite object with `test_cases`.
/// `.yaml`/`.yml` files are read as YAML, everything else as JSON.
pub fn parse_cases(body: &str, path: &Path) -> CliResult<CaseFile> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let input: CaseInput = if is_yaml {
        serde_yaml_ng::from_str(body).map_err(|e| CliError::input(path.display().to_string(), e.to_string()))?
    } else {
        serde_json::from_str(body).map_err(|e| CliError::input(path.display().to_string(), e.to_string()))?
    };
    Ok(match input {
        CaseInput::List(test_cases) => CaseFile {
            name: None,
            id: None,
            test_cases,
        },
        CaseInput::Suite(suite) => CaseFile {
            name: suite.name.filter(|n| !n.trim().is_empty()),
            id: suite.id,
            test_cases: suite.test_cases,
        },
    })
}

/// Suite name: flag, then the file's own name, then the file stem
#[must_use]
pub fn suite_name(flag: Option<&str>, file: &CaseFile, input: &Path) -> String {
    flag.map(str::to_string)
        .or_else(|| file.name.clone())
        .or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "suite".to_string())
}

/// Where to write: an explicit file, a file inside an explicit directory,
/// or the default name in the working directory
#[must_use]
pub fn output_path(output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_name),
    }
}

/// Execute the export command
pub fn execute_export(config: &CliConfig, args: &ExportArgs) -> CliResult<()> {
    let clock = SystemClock;
    let options = load_emit_options(args.config.as_deref(), args.base_url.as_deref())?;
    let mut reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    export_with(&mut reporter, args, &options, &clock)
}

/// Export with an explicit clock and options
pub fn export_with(
    reporter: &mut ProgressReporter,
    args: &ExportArgs,
    options: &EmitOptions,
    clock: &dyn Clock,
) -> CliResult<()> {
    let target = EmissionTarget::parse(&args.platform, &args.format)?;
    let body = std::fs::read_to_string(&args.input)
        .map_err(|e| CliError::input(args.input.display().to_string(), e.to_string()))?;
    let file = parse_cases(&body, &args.input)?;
    let suite = suite_name(args.suite.as_deref(), &file, &args.input);
    debug!(%target, cases = file.test_cases.len(), suite = %suite, "loaded test cases");

    let ctx = EmitContext::new(&file.test_cases, &suite, clock, options);

    if args.scaffold {
        let mut meta = SuiteMeta::new(suite.as_str());
        if let Some(id) = &file.id {
            meta = meta.with_id(id.as_str());
        }
        reporter.start_spinner(&format!("Scaffolding {target} project"));
        let built = scaffold_project(target, &ctx, &meta).and_then(|archive| {
            let bytes = archive.to_zip()?;
            Ok((archive, bytes))
        });
        reporter.finish();
        let (archive, bytes) = built?;

        let path = output_path(args.output.as_deref(), &format!("{}.zip", archive.root()));
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), files = archive.len(), "wrote archive");
        reporter.findings(archive.findings());
        reporter.success(&format!(
            "Wrote {} files for {} test case(s) to {}",
            archive.len(),
            file.test_cases.len(),
            path.display()
        ));
        return Ok(());
    }

    let artifact = emit(target, &ctx)?;
    if args.stdout {
        print!("{}", artifact.content);
        reporter.findings(&artifact.findings);
        return Ok(());
    }

    let path = output_path(args.output.as_deref(), &artifact.filename);
    std::fs::write(&path, &artifact.content)?;
    info!(path = %path.display(), bytes = artifact.len(), "wrote artifact");
    reporter.findings(&artifact.findings);
    reporter.success(&format!(
        "Wrote {} ({}) to {}",
        artifact.filename,
        artifact.mime_type,
        path.display()
    ));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use casegen::FixedClock;
    use tempfile::TempDir;

    const CASES: &str = r#"[
        {
            "title": "User can log in",
            "steps": [
                { "step_number": 1, "action": "Navigate to /login" },
                { "step_number": 2, "action": "Click the \"Sign in\" button" }
            ]
        }
    ]"#;

    fn args(dir: &TempDir, format: &str, platform: &str) -> ExportArgs {
        let input = dir.path().join("auth.json");
        std::fs::write(&input, CASES).unwrap();
        ExportArgs {
            input,
            platform: platform.to_string(),
            format: format.to_string(),
            suite: None,
            output: Some(dir.path().to_path_buf()),
            scaffold: false,
            config: None,
            base_url: None,
            stdout: false,
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_bare_list() {
            let file = parse_cases(CASES, Path::new("cases.json")).unwrap();
            assert_eq!(file.test_cases.len(), 1);
            assert!(file.name.is_none());
        }

        #[test]
        fn test_suite_object() {
            let body = r#"{"suiteName": "Checkout", "id": "abc12345", "testCases": [{"title": "Pay"}]}"#;
            let file = parse_cases(body, Path::new("cases.json")).unwrap();
            assert_eq!(file.name.as_deref(), Some("Checkout"));
            assert_eq!(file.id.as_deref(), Some("abc12345"));
            assert_eq!(file.test_cases[0].title, "Pay");
        }

        #[test]
        fn test_yaml_input() {
            let body = "name: Smoke\ntest_cases:\n  - title: Home\n    steps:\n      - step_number: 1\n        action: Navigate to /\n";
            let file = parse_cases(body, Path::new("cases.yaml")).unwrap();
            assert_eq!(file.name.as_deref(), Some("Smoke"));
            assert_eq!(file.test_cases[0].steps.len(), 1);
        }

        #[test]
        fn test_malformed_input() {
            let err = parse_cases("{\"nope\": 1}", Path::new("bad.json")).unwrap_err();
            assert!(matches!(err, CliError::Input { .. }));
        }

        #[test]
        fn test_suite_name_precedence() {
            let file = CaseFile {
                name: Some("From file".to_string()),
                ..CaseFile::default()
            };
            let input = Path::new("dir/cases.json");
            assert_eq!(suite_name(Some("Flag"), &file, input), "Flag");
            assert_eq!(suite_name(None, &file, input), "From file");
            assert_eq!(suite_name(None, &CaseFile::default(), input), "cases");
        }
    }

    mod export_tests {
        use super::*;

        #[test]
        fn test_writes_artifact_into_directory() {
            let dir = TempDir::new().unwrap();
            let args = args(&dir, "playwright", "web");
            let mut reporter = ProgressReporter::new(false, true);
            let clock = FixedClock::at_ms(1_700_000_000_000);
            export_with(&mut reporter, &args, &EmitOptions::default(), &clock).unwrap();

            let written = dir.path().join("auth-playwright-20231114.spec.ts");
            let content = std::fs::read_to_string(written).unwrap();
            assert!(content.contains("// Step 1: Navigate to /login"));
        }

        #[test]
        fn test_writes_scaffold_zip() {
            let dir = TempDir::new().unwrap();
            let mut args = args(&dir, "k6", "performance");
            args.scaffold = true;
            let mut reporter = ProgressReporter::new(false, true);
            let clock = FixedClock::at_ms(1_700_000_000_000);
            export_with(&mut reporter, &args, &EmitOptions::default(), &clock).unwrap();

            let zips: Vec<_> = std::fs::read_dir(dir.path())
                .unwrap()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|x| x == "zip"))
                .collect();
            assert_eq!(zips.len(), 1);
            let name = zips[0].file_name().to_string_lossy().to_string();
            assert!(name.starts_with("k6-auth-"), "{name}");
        }

        #[test]
        fn test_unsupported_pair() {
            let dir = TempDir::new().unwrap();
            let args = args(&dir, "postman", "web");
            let mut reporter = ProgressReporter::new(false, true);
            let clock = FixedClock::at_ms(0);
            let err = export_with(&mut reporter, &args, &EmitOptions::default(), &clock).unwrap_err();
            assert_eq!(err.casegen_kind(), Some(casegen::ErrorKind::UnsupportedFormat));
        }

        #[test]
        fn test_output_path() {
            assert_eq!(output_path(None, "a.ts"), PathBuf::from("a.ts"));
            assert_eq!(
                output_path(Some(Path::new("/nonexistent/out.ts")), "a.ts"),
                PathBuf::from("/nonexistent/out.ts")
            );
        }
    }
}
