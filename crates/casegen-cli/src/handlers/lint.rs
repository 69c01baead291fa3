//! Lint command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, ProgressReporter};
use crate::LintArgs;
use casegen::LintReport;

/// Render a report as text
#[must_use]
pub fn render_lint_report(name: &str, report: &LintReport) -> String {
    let meta = &report.metadata;
    let mut out = format!("{name}\n");
    out.push_str(&format!("  dialect:      {:?}\n", report.dialect));
    out.push_str(&format!(
        "  test name:    {}\n",
        meta.test_name.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("  steps:        {}\n", meta.step_count));
    out.push_str(&format!("  base url:     {}\n", if meta.has_base_url { "yes" } else { "no" }));
    out.push_str(&format!(
        "  timeout:      {}\n",
        meta.timeout_ms.map_or_else(|| "-".to_string(), |t| t.to_string())
    ));
    out.push_str(&format!(
        "  findings:     {} error(s), {} warning(s)\n",
        report.errors, report.warnings
    ));
    out
}

/// Execute the lint command; errors in the script fail the command
pub fn execute_lint(config: &CliConfig, args: &LintArgs) -> CliResult<()> {
    let script = std::fs::read_to_string(&args.script)?;
    let report = LintReport::for_script(&script);

    match OutputFormat::from(args.output) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print!("{}", render_lint_report(&args.script.display().to_string(), &report));
            let reporter =
                ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
            for finding in &report.findings {
                reporter.finding(finding);
            }
        }
    }

    if report.has_errors() {
        return Err(CliError::LintFailed {
            errors: report.errors,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_unknown_script() {
        let report = LintReport::for_script("console.log('hi');\n");
        let text = render_lint_report("x.js", &report);
        assert!(text.starts_with("x.js\n"));
        assert!(text.contains("dialect:      Unknown"));
        assert!(text.contains("test name:    -"));
    }

    #[test]
    fn test_render_counts() {
        let report = LintReport::for_script(
            "import { test } from '@playwright/test';\n\ntest('a', async ({ page }) => {\n  // Step 1: Go\n  await page.goto(BASE_URL);\n});\n",
        );
        let text = render_lint_report("a.spec.ts", &report);
        assert!(text.contains("steps:        1"));
        assert!(text.contains("0 error(s)"));
    }
}
