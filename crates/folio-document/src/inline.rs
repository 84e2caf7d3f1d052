//! Inline content.
//!
//! A block's text is an ordered list of [`Span`]s, each carrying its own set
//! of [`Marks`]. Formatting is structural: a literal `**` typed by an author
//! is just two asterisks, never bold.
//!
//! Hard line breaks (`<br>`) are `'\n'` characters inside a span. Any other
//! ASCII whitespace is layout and collapses to a single space when the run is
//! normalized.

use folio_common::text::{is_ascii_whitespace, is_blank};
use serde::{Deserialize, Serialize};

/// Formatting applied to a [`Span`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Marks {
    /// `<strong>` / `<b>`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// `<em>` / `<i>`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    /// `<code>` and its typewriter relatives
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub code: bool,
    /// Target of the innermost enclosing `<a href>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Marks {
    /// No formatting.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            bold: false,
            italic: false,
            code: false,
            link: None,
        }
    }

    /// These marks with bold added.
    #[must_use]
    pub fn with_bold(&self) -> Self {
        Self {
            bold: true,
            ..self.clone()
        }
    }

    /// These marks with italic added.
    #[must_use]
    pub fn with_italic(&self) -> Self {
        Self {
            italic: true,
            ..self.clone()
        }
    }

    /// These marks with code added.
    #[must_use]
    pub fn with_code(&self) -> Self {
        Self {
            code: true,
            ..self.clone()
        }
    }

    /// These marks linking to `href`. An inner link replaces an outer one.
    #[must_use]
    pub fn with_link(&self, href: &str) -> Self {
        Self {
            link: Some(href.to_string()),
            ..self.clone()
        }
    }

    /// True when no formatting is applied.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.code && self.link.is_none()
    }
}

/// A piece of text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// The characters; `'\n'` is a hard line break.
    pub text: String,
    /// Formatting for every character of `text`.
    #[serde(default, skip_serializing_if = "Marks::is_plain")]
    pub marks: Marks,
}

impl Span {
    /// A span of unformatted text.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            marks: Marks::plain(),
        }
    }

    /// A span of `text` with `marks`.
    #[must_use]
    pub fn new(text: &str, marks: Marks) -> Self {
        Self {
            text: text.to_string(),
            marks,
        }
    }
}

/// The inline content of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineRun {
    /// Spans in reading order.
    pub spans: Vec<Span>,
}

impl InlineRun {
    /// An empty run.
    #[must_use]
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// A normalized run holding one unformatted span.
    #[must_use]
    pub fn plain(text: &str) -> Self {
        let mut run = Self::new();
        run.push_str(text, &Marks::plain());
        run.normalize();
        run
    }

    /// Append `text` with `marks`, extending the last span when the marks match.
    pub fn push_str(&mut self, text: &str, marks: &Marks) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.marks == *marks => last.text.push_str(text),
            _ => self.spans.push(Span::new(text, marks.clone())),
        }
    }

    /// Append one character with `marks`.
    pub fn push_char(&mut self, c: char, marks: &Marks) {
        match self.spans.last_mut() {
            Some(last) if last.marks == *marks => last.text.push(c),
            _ => self.spans.push(Span::new(&c.to_string(), marks.clone())),
        }
    }

    /// Append a hard line break unless the run is empty or already ends with one.
    pub fn push_soft_break(&mut self) {
        let ends_open = self
            .spans
            .last()
            .and_then(|span| span.text.chars().last())
            .is_some_and(|c| c != '\n');
        if ends_open {
            self.push_char('\n', &Marks::plain());
        }
    }

    /// True if the run holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    /// True if a reader would see nothing: only whitespace and line breaks.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|span| is_blank(&span.text))
    }

    /// The run's characters without formatting.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Bring the run into canonical form.
    ///
    /// - runs of ASCII whitespace become one space, carrying the marks of
    ///   the first whitespace character
    /// - spaces next to a hard break are removed
    /// - leading and trailing spaces and breaks are removed
    /// - empty spans disappear and neighbours with equal marks merge
    ///
    /// Normalizing twice gives the same run as normalizing once.
    pub fn normalize(&mut self) {
        let mut out = Self::new();
        let mut pending_space: Option<Marks> = None;
        let mut line_start = true;
        for span in &self.spans {
            for c in span.text.chars() {
                if c == '\n' {
                    pending_space = None;
                    if !out.is_empty() {
                        out.push_char('\n', &span.marks);
                    }
                    line_start = true;
                } else if is_ascii_whitespace(c) {
                    if !line_start && pending_space.is_none() {
                        pending_space = Some(span.marks.clone());
                    }
                } else {
                    if let Some(marks) = pending_space.take() {
                        out.push_char(' ', &marks);
                    }
                    out.push_char(c, &span.marks);
                    line_start = false;
                }
            }
        }
        out.trim_trailing_breaks();
        *self = out;
    }

    fn trim_trailing_breaks(&mut self) {
        while let Some(last) = self.spans.last_mut() {
            let trimmed_len = last.text.trim_end_matches('\n').len();
            last.text.truncate(trimmed_len);
            if last.text.is_empty() {
                let _ = self.spans.pop();
            } else {
                break;
            }
        }
    }

    /// Remove one leading list marker typed as text.
    ///
    /// Unordered lists strip a `•`, ordered lists strip `N.`; either must be
    /// followed by whitespace or the end of the run. Returns true if a marker
    /// was removed. The run is normalized afterwards.
    pub fn strip_list_marker(&mut self, ordered: bool) -> bool {
        let single_span = self.spans.len() == 1;
        let Some(first) = self.spans.first_mut() else {
            return false;
        };
        let text = first.text.as_str();
        let marker_len = if ordered {
            let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits > 0 && text[digits..].starts_with('.') {
                digits + 1
            } else {
                0
            }
        } else if text.starts_with('\u{2022}') {
            '\u{2022}'.len_utf8()
        } else {
            0
        };
        if marker_len == 0 {
            return false;
        }
        let rest = &text[marker_len..];
        let boundary = (rest.is_empty() && single_span) || rest.starts_with(is_ascii_whitespace);
        if !boundary {
            return false;
        }
        first.text.replace_range(..marker_len, "");
        self.normalize();
        true
    }

    /// Encode the run with the legacy text markers.
    ///
    /// `**bold**`, `*italic*`, `***both***`, `` `code` `` and
    /// `[text](href)`, nested in that order from the outside in: link,
    /// emphasis, code. Marker characters in the text are escaped with a
    /// backslash, and each line of a span is wrapped on its own, so
    /// [`InlineRun::from_markers`] reads back exactly what was written.
    /// A link whose href holds whitespace cannot be written and is kept as
    /// its text.
    #[must_use]
    pub fn to_markers(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            for (i, line) in span.text.split('\n').enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                if !line.is_empty() {
                    write_marked(&mut out, line, &span.marks);
                }
            }
        }
        out
    }

    /// Decode text written with the legacy markers.
    ///
    /// Unmatched markers stay literal, as does any character after a
    /// backslash. The result is normalized.
    #[must_use]
    pub fn from_markers(text: &str) -> Self {
        let mut run = Self::new();
        run.push_markers(text, &Marks::plain());
        run.normalize();
        run
    }

    /// Decode `text` with the legacy markers on top of `marks` and append it.
    pub fn push_markers(&mut self, text: &str, marks: &Marks) {
        let mut plain = String::new();
        let mut i = 0;
        while i < text.len() {
            let rest = &text[i..];
            let mut chars = rest.chars();
            let Some(c) = chars.next() else {
                break;
            };
            if c == '\\'
                && let Some(escaped) = chars.next()
            {
                plain.push(escaped);
                i += 1 + escaped.len_utf8();
            } else if let Some(found) = match_marker(rest, marks) {
                self.push_str(&plain, marks);
                plain.clear();
                if found.nested {
                    self.push_markers(found.inner, &found.marks);
                } else {
                    self.push_str(&unescape(found.inner), &found.marks);
                }
                i += found.consumed;
            } else {
                plain.push(c);
                i += c.len_utf8();
            }
        }
        self.push_str(&plain, marks);
    }
}

/// Characters that open or close a marker.
const MARKER_CHARS: &[char] = &['\\', '*', '`', '[', ']'];

/// Append one line of a span with its markers.
fn write_marked(out: &mut String, text: &str, marks: &Marks) {
    let link = marks
        .link
        .as_deref()
        .filter(|href| !href.is_empty() && !href.contains(char::is_whitespace));
    let emphasis = match (marks.bold, marks.italic) {
        (true, true) => "***",
        (true, false) => "**",
        (false, true) => "*",
        (false, false) => "",
    };
    if link.is_some() {
        out.push('[');
    }
    out.push_str(emphasis);
    if marks.code {
        out.push('`');
    }
    for c in text.chars() {
        if MARKER_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    if marks.code {
        out.push('`');
    }
    out.push_str(emphasis);
    if let Some(href) = link {
        out.push_str("](");
        for c in href.chars() {
            if matches!(c, '\\' | ')') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push(')');
    }
}

/// Byte offset of the first `pattern` in `text` not preceded by a backslash
/// escape.
fn find_unescaped(text: &str, pattern: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let _ = chars.next();
        } else if text[i..].starts_with(pattern) {
            return Some(i);
        }
    }
    None
}

/// Drop backslash escapes. A trailing lone backslash stays.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(escaped) = chars.next()
        {
            out.push(escaped);
        } else {
            out.push(c);
        }
    }
    out
}

/// One marker construct found at the start of some text.
struct MarkerMatch<'t> {
    /// Bytes of source text covered, markers included.
    consumed: usize,
    inner: &'t str,
    marks: Marks,
    /// Whether `inner` may hold further markers.
    nested: bool,
}

/// An emphasis or code marker, longest first.
const DELIMITERS: &[&str] = &["***", "**", "`", "*"];

/// Try to read one marker construct at the start of `rest`.
fn match_marker<'t>(rest: &'t str, marks: &Marks) -> Option<MarkerMatch<'t>> {
    if let Some(&delimiter) = DELIMITERS.iter().find(|d| rest.starts_with(**d)) {
        let body = &rest[delimiter.len()..];
        let end = find_unescaped(body, delimiter).filter(|&end| end > 0)?;
        let marks = match delimiter {
            "***" => marks.with_bold().with_italic(),
            "**" => marks.with_bold(),
            "`" => marks.with_code(),
            _ => marks.with_italic(),
        };
        return Some(MarkerMatch {
            consumed: end + 2 * delimiter.len(),
            inner: &body[..end],
            marks,
            nested: delimiter != "`",
        });
    }
    let body = rest.strip_prefix('[')?;
    let label_end = find_unescaped(body, "](").filter(|&end| end > 0)?;
    let after = &body[label_end + 2..];
    let href_end = find_unescaped(after, ")").filter(|&end| end > 0)?;
    let href = unescape(&after[..href_end]);
    if href.is_empty() || href.contains(char::is_whitespace) {
        return None;
    }
    Some(MarkerMatch {
        consumed: 1 + label_end + 2 + href_end + 1,
        inner: &body[..label_end],
        marks: marks.with_link(&href),
        nested: true,
    })
}

impl From<&str> for InlineRun {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl FromIterator<Span> for InlineRun {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        Self {
            spans: iter.into_iter().collect(),
        }
    }
}
