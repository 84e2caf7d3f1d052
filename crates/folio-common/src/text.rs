//! Whitespace classes.
//!
//! Two notions of "space" are in play and mixing them up breaks round-trips:
//! ASCII whitespace is what HTML collapses, while Unicode whitespace
//! (including U+00A0 NO-BREAK SPACE) is what decides whether a block is blank.

/// [§ 4.6 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
#[must_use]
pub const fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// True when `text` has nothing a reader would see.
///
/// `&nbsp;`-only paragraphs count as blank: word processors use them to
/// encode empty lines.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Collapse every run of ASCII whitespace into one space and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if is_ascii_whitespace(c) {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Normalize preformatted text line by line.
///
/// Each line has its ASCII whitespace collapsed and trimmed; line breaks
/// survive, leading and trailing blank lines do not.
#[must_use]
pub fn normalize_lines(text: &str) -> String {
    let lines: Vec<String> = text.split('\n').map(collapse_whitespace).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
