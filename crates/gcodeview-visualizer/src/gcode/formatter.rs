//! Whitespace and case normalisation for G-Code text

use super::parser::split_comment;

/// Normalise a program line by line
///
/// Code words are uppercased and joined by single spaces, trailing comments
/// are re-attached verbatim, and the line count never changes.
pub fn format_gcode(text: &str) -> String {
    text.split('\n')
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return trimmed.to_string();
    }

    let (code, comment) = split_comment(trimmed);
    let code = code
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ");

    match comment {
        Some(comment) if !code.is_empty() => format!("{} {}", code, comment),
        Some(comment) => comment.to_string(),
        None => code,
    }
}
