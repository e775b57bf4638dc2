//! Turns the user-submitted text block into the desired comment lines.
//!
//! Every line that leaves this module carries a `YYYY-MM-DD HH:MM` prefix:
//! lines that already have one pass through untouched, the rest get one
//! synthesized from the timestamp the caller read at the start of the
//! reconciliation call.

use chrono::NaiveDateTime;

pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Separator between the timestamp prefix and the comment body.
pub const SEPARATOR: &str = " — ";

/// Marks a comment as edited after creation; everything from this substring
/// to the end of the line is stripped when comparing base texts.
pub const EDIT_MARKER: &str = "(editado em";

/// Positional check for a `YYYY-MM-DD HH:MM` prefix: more than 16 chars,
/// with `-`, `-`, `:` at positions 4, 7 and 13. No calendar validation.
pub fn is_stamped(line: &str) -> bool {
    let head: Vec<char> = line.chars().take(17).collect();
    head.len() == 17 && head[4] == '-' && head[7] == '-' && head[13] == ':'
}

/// A comment's text with any trailing edit marker removed. This is the key
/// used to decide whether two differing lines are the same comment edited.
pub fn base_text(text: &str) -> &str {
    match text.find(EDIT_MARKER) {
        Some(idx) => text[..idx].trim(),
        None => text,
    }
}

/// Splits the raw block into trimmed non-empty lines, each with a timestamp
/// prefix. Line order is preserved and duplicates are kept.
pub fn normalize_block(raw: &str, now: NaiveDateTime) -> Vec<String> {
    let stamp = now.format(STAMP_FORMAT).to_string();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if is_stamped(line) {
                line.to_string()
            } else {
                format!("{stamp}{SEPARATOR}{line}")
            }
        })
        .collect()
}
