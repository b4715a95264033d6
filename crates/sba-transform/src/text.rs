//! Free-text cleaning: whitespace, length bounds, ZIP codes.

use std::sync::LazyLock;

use regex::Regex;
use sba_model::{CleanFlag, Cleaned, CleanedValue};

/// CRM activity-feed prefixes such as `[User]:`.
static SPEAKER_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\w+\]:").expect("Invalid speaker tag regex"));

static ZIP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{5})(?:-?(\d{4}))?$").expect("Invalid ZIP regex"));

/// Collapses runs of spaces, drops blank lines and CRM speaker tags.
pub fn clean_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| {
            let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
            SPEAKER_TAG_REGEX.replace_all(&collapsed, "").trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Byte offset of the last word boundary at or before `max_chars`.
fn word_boundary_cut(text: &str, max_chars: usize) -> usize {
    let hard = byte_offset(text, max_chars);
    if text[hard..].starts_with(char::is_whitespace) {
        return hard;
    }
    match text[..hard].rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => pos,
        _ => hard,
    }
}

fn truncated(text: &str, cut: usize, original_chars: usize) -> Cleaned {
    let kept = text[..cut].trim_end();
    Cleaned::flagged(
        CleanedValue::text(kept),
        CleanFlag::Truncated {
            from: original_chars,
            to: kept.chars().count(),
        },
    )
}

/// Bounds text to `max_len` characters, cutting at a word boundary.
///
/// The result is always a prefix of the trimmed input. A hard cut happens
/// only when the first `max_len` characters contain no whitespace.
pub fn truncate_text(raw: &str, max_len: usize) -> Cleaned {
    let text = raw.trim();
    let total = text.chars().count();
    if total <= max_len {
        return Cleaned::text(text);
    }
    truncated(text, word_boundary_cut(text, max_len), total)
}

/// Cleans counselor notes and bounds them, preferring a sentence boundary.
pub fn clean_notes(raw: &str, max_len: usize) -> Cleaned {
    let text = clean_whitespace(raw);
    let total = text.chars().count();
    if total <= max_len {
        return Cleaned::text(text);
    }
    let hard = byte_offset(&text, max_len);
    let sentence_end = text[..hard]
        .rfind(|c: char| matches!(c, '.' | '!' | '?' | '\n'))
        .filter(|pos| *pos > 0);
    let cut = match sentence_end {
        Some(pos) => pos + 1,
        None => word_boundary_cut(&text, max_len),
    };
    truncated(&text, cut, total)
}

/// First letter of a middle name.
pub fn initial(raw: &str) -> Cleaned {
    match raw.trim().chars().find(|c| c.is_alphabetic()) {
        Some(c) => Cleaned::text(c.to_uppercase().to_string()),
        None => Cleaned::absent(),
    }
}

/// Five-digit ZIP code from `12345` or `12345-6789`.
pub fn zip5(raw: &str) -> Cleaned {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cleaned::absent();
    }
    match ZIP_REGEX.captures(trimmed) {
        Some(captures) => Cleaned::text(&captures[1]),
        None => Cleaned::flagged(
            CleanedValue::Absent,
            CleanFlag::Malformed {
                raw: trimmed.to_string(),
                reason: "expected a 5-digit ZIP code".to_string(),
            },
        ),
    }
}

/// ZIP+4 extension from `12345-6789`; absent when the cell has none.
pub fn zip4(raw: &str) -> Cleaned {
    ZIP_REGEX
        .captures(raw.trim())
        .and_then(|captures| captures.get(2))
        .map_or_else(Cleaned::absent, |plus4| Cleaned::text(plus4.as_str()))
}
