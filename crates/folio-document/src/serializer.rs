//! Document tree to HTML.
//!
//! Blocks are written in document order with no merging and no reordering.
//! The output always reads back to a document that serializes to the same
//! string, so one load/save cycle reaches a fixed point.
//!
//! | block      | `Textual` (default)                         | `Semantic`                        |
//! |------------|---------------------------------------------|-----------------------------------|
//! | paragraph  | `<p>…</p>`                                  | same                              |
//! | heading    | `<p>…</p>`, or `<hN>` with `Preserve`       | same                              |
//! | list       | `<ul><p>• …</p></ul>`, `<ol><p>1. …</p></ol>` | `<ul><li>…</li></ul>`           |
//! | quote      | `<p>&gt; …</p>`                             | `<blockquote>…</blockquote>`      |
//! | code       | ``<p>`…`</p>``                              | `<pre><code>…</code></pre>`       |
//! | image      | `<img>`, inside `<a target="_blank" rel="noopener noreferrer">` when linked | same |
//! | link       | paragraph holding one link span             | same                              |
//! | empty      | `<p></p>`                                   | same                              |

use core::fmt::Write as _;

use crate::block::{Block, HeadingLevel, ImageBlock};
use crate::document::Document;
use crate::inline::{InlineRun, Marks, Span};
use crate::options::{BlockOutput, HeadingOutput, InlineOutput, SerializeOptions};

/// Serialize a document with the given options.
#[must_use]
pub fn serialize_with(document: &Document, options: &SerializeOptions) -> String {
    serialize_blocks(document.blocks(), options)
}

/// Serialize a sequence of blocks with the given options.
#[must_use]
pub fn serialize_blocks(blocks: &[Block], options: &SerializeOptions) -> String {
    let mut writer = HtmlWriter {
        out: String::new(),
        options: *options,
    };
    for block in blocks {
        writer.block(block);
    }
    writer.out
}

struct HtmlWriter {
    out: String,
    options: SerializeOptions,
}

impl HtmlWriter {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { inline } => self.paragraph("", inline),
            Block::Heading { level, inline } => self.heading(*level, inline),
            Block::List { ordered, items } => self.list(*ordered, items),
            Block::Quote { inline } => match self.options.blocks {
                BlockOutput::Textual => self.paragraph("> ", inline),
                BlockOutput::Semantic => {
                    self.out.push_str("<blockquote>");
                    self.inline(inline);
                    self.out.push_str("</blockquote>");
                }
            },
            Block::CodeSpan { text } => match (self.options.blocks, self.options.inline) {
                (BlockOutput::Textual, InlineOutput::Html) => {
                    self.out.push_str("<p>`");
                    self.text(text);
                    self.out.push_str("`</p>");
                }
                (BlockOutput::Textual, InlineOutput::Markers) => {
                    let code = Span::new(text, Marks::plain().with_code());
                    self.paragraph("", &InlineRun { spans: vec![code] });
                }
                (BlockOutput::Semantic, _) => {
                    self.out.push_str("<pre><code>");
                    escape_text_into(&mut self.out, text);
                    self.out.push_str("</code></pre>");
                }
            },
            Block::Image(image) => self.image(image),
            Block::Link { href, text } => {
                let mut span = Span::plain(text);
                span.marks.link = Some(href.clone());
                self.paragraph("", &InlineRun { spans: vec![span] });
            }
            Block::Empty => self.out.push_str("<p></p>"),
        }
    }

    fn paragraph(&mut self, prefix: &str, inline: &InlineRun) {
        self.out.push_str("<p>");
        escape_text_into(&mut self.out, prefix);
        self.inline(inline);
        self.out.push_str("</p>");
    }

    fn heading(&mut self, level: HeadingLevel, inline: &InlineRun) {
        match self.options.headings {
            HeadingOutput::Collapse => self.paragraph("", inline),
            HeadingOutput::Preserve => {
                let _ = write!(self.out, "<{level}>");
                self.inline(inline);
                let _ = write!(self.out, "</{level}>");
            }
        }
    }

    fn list(&mut self, ordered: bool, items: &[InlineRun]) {
        let tag = if ordered { "ol" } else { "ul" };
        let _ = write!(self.out, "<{tag}>");
        for (index, item) in items.iter().enumerate() {
            match self.options.blocks {
                BlockOutput::Textual if ordered => {
                    self.paragraph(&format!("{}. ", index + 1), item);
                }
                BlockOutput::Textual => self.paragraph("\u{2022} ", item),
                BlockOutput::Semantic => {
                    self.out.push_str("<li>");
                    self.inline(item);
                    self.out.push_str("</li>");
                }
            }
        }
        let _ = write!(self.out, "</{tag}>");
    }

    fn image(&mut self, image: &ImageBlock) {
        if let Some(href) = &image.link_href {
            self.out.push_str("<a href=\"");
            escape_attr_into(&mut self.out, href);
            self.out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        }
        self.out.push_str("<img src=\"");
        escape_attr_into(&mut self.out, &image.src);
        self.out.push_str("\" alt=\"");
        escape_attr_into(&mut self.out, &image.alt);
        self.out.push('"');
        for (name, value) in [("width", &image.width), ("height", &image.height)] {
            if let Some(value) = value {
                let _ = write!(self.out, " {name}=\"");
                escape_attr_into(&mut self.out, value);
                self.out.push('"');
            }
        }
        self.out.push('>');
        if image.link_href.is_some() {
            self.out.push_str("</a>");
        }
    }

    fn inline(&mut self, inline: &InlineRun) {
        match self.options.inline {
            InlineOutput::Html => {
                for span in &inline.spans {
                    self.span(span);
                }
            }
            InlineOutput::Markers => self.text(&inline.to_markers()),
        }
    }

    /// One span as nested elements: link outside, then bold, italic, code.
    fn span(&mut self, span: &Span) {
        let marks = &span.marks;
        if let Some(href) = &marks.link {
            self.out.push_str("<a href=\"");
            escape_attr_into(&mut self.out, href);
            self.out.push_str("\">");
        }
        if marks.bold {
            self.out.push_str("<strong>");
        }
        if marks.italic {
            self.out.push_str("<em>");
        }
        if marks.code {
            self.out.push_str("<code>");
        }
        self.text(&span.text);
        if marks.code {
            self.out.push_str("</code>");
        }
        if marks.italic {
            self.out.push_str("</em>");
        }
        if marks.bold {
            self.out.push_str("</strong>");
        }
        if marks.link.is_some() {
            self.out.push_str("</a>");
        }
    }

    /// Escaped text with hard breaks as `<br>`.
    fn text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.out.push_str("<br>");
            }
            escape_text_into(&mut self.out, line);
        }
    }
}

fn escape_text_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape `text` for use as HTML character data.
///
/// ```
/// assert_eq!(folio_document::escape_text("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_text_into(&mut out, text);
    out
}
