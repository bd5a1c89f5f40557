use std::io::{BufRead, Write};

use crate::api::models::{Application, ErrorGroup};
use crate::constants::MAX_MESSAGE_WIDTH;
use crate::error::{Error, Result};

const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
///
/// Counts and cuts on `char` boundaries, never inside a multi-byte sequence.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }

    let mut shortened: String = text.chars().take(max - ELLIPSIS.len()).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Print `heading` and a 1-indexed list, then read one choice from `input`.
///
/// Returns the zero-based index. Non-numeric input and numbers outside
/// `[1, len]` fail immediately; there is no re-prompt.
pub fn select_index<R: BufRead, W: Write>(
    heading: &str,
    lines: &[String],
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    writeln!(output, "{}", heading)?;
    for (i, line) in lines.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, line)?;
    }
    write!(output, "\n{}: ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    parse_choice(answer.trim(), lines.len())
}

fn parse_choice(answer: &str, len: usize) -> Result<usize> {
    let choice: usize = answer
        .parse()
        .map_err(|_| Error::Selection(format!("'{}' is not a number", answer)))?;

    if choice < 1 || choice > len {
        return Err(Error::Selection(format!(
            "selection out of range: {} (expected 1-{})",
            choice, len
        )));
    }

    Ok(choice - 1)
}

/// Prompt for a Raygun project
pub fn choose_application<R: BufRead, W: Write>(
    applications: &[Application],
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let lines: Vec<String> = applications.iter().map(|a| a.name.clone()).collect();
    select_index(
        "Available Raygun projects:",
        &lines,
        "Select project number",
        input,
        output,
    )
}

/// Prompt for an error group, showing occurrence counts and truncated messages
pub fn choose_error_group<R: BufRead, W: Write>(
    groups: &[ErrorGroup],
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let lines: Vec<String> = groups
        .iter()
        .map(|g| {
            format!(
                "[{} occurrences] {}",
                g.count,
                truncate(&g.message, MAX_MESSAGE_WIDTH)
            )
        })
        .collect();
    select_index(
        "\nActive error groups:",
        &lines,
        "Select error group number",
        input,
        output,
    )
}
