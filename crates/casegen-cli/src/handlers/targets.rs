//! Targets command handler

use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::TargetsArgs;
use casegen::{formats_for, targets, CasegenError, EmissionTarget, Platform};
use serde::Serialize;
use std::str::FromStr;

/// One row of the target table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
    /// Platform name
    pub platform: &'static str,
    /// Format name
    pub format: &'static str,
    /// File extension
    pub extension: &'static str,
    /// MIME type
    pub mime_type: &'static str,
}

impl From<EmissionTarget> for TargetRow {
    fn from(target: EmissionTarget) -> Self {
        Self {
            platform: target.platform.as_str(),
            format: target.format.as_str(),
            extension: target.format.extension(),
            mime_type: target.format.mime_type(),
        }
    }
}

/// Registered targets, optionally for one platform
pub fn target_rows(platform: Option<&str>) -> CliResult<Vec<TargetRow>> {
    let Some(name) = platform else {
        return Ok(targets().into_iter().map(TargetRow::from).collect());
    };
    let platform =
        Platform::from_str(name).map_err(|_| CasegenError::unsupported(name, "*"))?;
    Ok(formats_for(platform)
        .into_iter()
        .map(|format| TargetRow::from(EmissionTarget::new(platform, format)))
        .collect())
}

/// Render rows as an aligned text table
#[must_use]
pub fn render_targets(rows: &[TargetRow]) -> String {
    let mut out = format!("{:<15} {:<12} {:<26} {}\n", "PLATFORM", "FORMAT", "EXTENSION", "MIME TYPE");
    for row in rows {
        out.push_str(&format!(
            "{:<15} {:<12} {:<26} {}\n",
            row.platform, row.format, row.extension, row.mime_type
        ));
    }
    out
}

/// Execute the targets command
pub fn execute_targets(args: &TargetsArgs) -> CliResult<()> {
    let rows = target_rows(args.platform.as_deref())?;
    match OutputFormat::from(args.output) {
        OutputFormat::Text => print!("{}", render_targets(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rows() {
        let rows = target_rows(None).unwrap();
        assert_eq!(rows.len(), 18);
    }

    #[test]
    fn test_platform_filter() {
        let rows = target_rows(Some("api")).unwrap();
        let formats: Vec<_> = rows.iter().map(|r| r.format).collect();
        assert!(formats.contains(&"postman"));
        assert!(rows.iter().all(|r| r.platform == "api"));
    }

    #[test]
    fn test_unknown_platform() {
        assert!(target_rows(Some("desktop")).is_err());
    }

    #[test]
    fn test_render_has_header_and_rows() {
        let rows = target_rows(Some("web")).unwrap();
        let text = render_targets(&rows);
        assert!(text.starts_with("PLATFORM"));
        assert!(text.contains("playwright"));
        assert_eq!(text.lines().count(), rows.len() + 1);
    }
}
