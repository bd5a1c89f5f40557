use std::collections::BTreeMap;
use std::path::Path;

use crate::api::models::CrashReportDetail;
use crate::error::{Error, Result};

const REVIEW_TEMPLATE: &str = include_str!("../templates/review.md");
const CRASH_TEMPLATE: &str = include_str!("../templates/crash.md");

/// Values substituted into a prompt template, keyed by placeholder name
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    values: BTreeMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Replace every `{{ name }}` in `template` with its value from `context`.
///
/// Values are inserted verbatim and never rescanned, so placeholder-like
/// text inside a diff or crash payload is left alone. An unclosed `{{`, an
/// empty or malformed name, or a name without a value is an error.
pub fn render(template: &str, context: &PromptContext) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let end = after_open.find("}}").ok_or_else(|| {
            let offset = template.len() - rest.len() + start;
            Error::Template(format!("unclosed placeholder at byte {}", offset))
        })?;

        let name = after_open[..end].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::Template(format!(
                "invalid placeholder '{{{{{}}}}}'",
                &after_open[..end]
            )));
        }

        let value = context
            .get(name)
            .ok_or_else(|| Error::Template(format!("no value for placeholder '{}'", name)))?;
        rendered.push_str(value);

        rest = &after_open[end + 2..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}

/// Prompt for reviewing `diff` (already combined stats + full diff)
pub fn review_prompt(branch: &str, target: &str, diff: &str, review_file: &Path) -> Result<String> {
    let context = PromptContext::new()
        .with("branch", branch)
        .with("target", target)
        .with("diff", diff)
        .with("review_file", review_file.display().to_string());
    render(REVIEW_TEMPLATE, &context)
}

/// Prompt for analysing one crash occurrence
pub fn crash_prompt(detail: &CrashReportDetail, analysis_file: &Path) -> Result<String> {
    let crash_json = serde_json::to_string_pretty(detail)
        .map_err(|e| Error::Template(format!("failed to serialize crash detail: {}", e)))?;
    let context = PromptContext::new()
        .with("error_message", detail.error.message.as_str())
        .with("crash_details", crash_json)
        .with("analysis_file", analysis_file.display().to_string());
    render(CRASH_TEMPLATE, &context)
}
