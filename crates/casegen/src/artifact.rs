//! Emitted artifacts and filename conventions.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::lint::LintFinding;
use crate::target::Format;

/// Upper bound on generated filename length, extension included
pub const MAX_FILENAME_LEN: usize = 120;

/// One output file produced by an emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedArtifact {
    /// File contents
    pub content: String,
    /// Sanitized filename
    pub filename: String,
    /// Fixed MIME type of the format
    pub mime_type: String,
    /// Warnings recorded while emitting (defaults substituted, placeholders)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<LintFinding>,
}

impl EmittedArtifact {
    /// Create an artifact for a format
    #[must_use]
    pub fn new(format: Format, filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
            mime_type: format.mime_type().to_string(),
            findings: Vec::new(),
        }
    }

    /// Attach findings
    #[must_use]
    pub fn with_findings(mut self, findings: Vec<LintFinding>) -> Self {
        self.findings = findings;
        self
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the content is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Lowercase slug: whitespace and punctuation become `-`, runs collapse.
#[must_use]
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut last_dash = true;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if c == '_' {
            slug.push('_');
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Restrict a filename to `[a-z0-9._-]` and [`MAX_FILENAME_LEN`]
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '-']).to_string();
    if cleaned.len() <= MAX_FILENAME_LEN {
        return cleaned;
    }
    match cleaned.find('.') {
        Some(dot) if cleaned.len() - dot < MAX_FILENAME_LEN => {
            let ext = &cleaned[dot..];
            let stem_len = MAX_FILENAME_LEN - ext.len();
            format!("{}{ext}", cleaned[..stem_len].trim_end_matches('-'))
        }
        _ => cleaned[..MAX_FILENAME_LEN].to_string(),
    }
}

/// `<slug(suite)>-<format>-<YYYYMMDD><ext>`
#[must_use]
pub fn artifact_filename(suite_name: &str, format: Format, clock: &dyn Clock) -> String {
    let mut slug = slugify(suite_name);
    if slug.is_empty() {
        slug = "suite".to_string();
    }
    sanitize_filename(&format!(
        "{slug}-{}-{}{}",
        format.as_str(),
        clock.date_fragment(),
        format.extension()
    ))
}

/// `<NNN>-<slug(title)><ext>` for one test case inside a scaffolded project
#[must_use]
pub fn case_filename(index: usize, title: &str, format: Format) -> String {
    let mut slug = slugify(title);
    if slug.is_empty() {
        slug = "test-case".to_string();
    }
    sanitize_filename(&format!("{:03}-{slug}{}", index, format.extension()))
}
