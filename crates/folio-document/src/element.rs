//! The closed set of elements the document parser distinguishes.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::block::HeadingLevel;

/// Every tag name the parse rules treat specially.
///
/// Parsing a tag name never fails: anything unknown is [`ElementKind::Other`]
/// and is walked through transparently.
///
/// ```
/// use folio_document::ElementKind;
///
/// assert_eq!(ElementKind::from_tag("B"), ElementKind::Strong);
/// assert_eq!(ElementKind::from_tag("section"), ElementKind::Container);
/// assert_eq!(ElementKind::from_tag("marquee"), ElementKind::Other);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ElementKind {
    /// `<p>`
    P,
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
    /// `<ul>`
    Ul,
    /// `<ol>`
    Ol,
    /// `<li>`
    Li,
    /// `<blockquote>`
    Blockquote,
    /// `<pre>`
    Pre,
    /// `<code>` and the other monospace phrase elements.
    #[strum(to_string = "code", serialize = "kbd", serialize = "samp", serialize = "tt")]
    Code,
    /// `<img>`
    Img,
    /// `<a>`
    A,
    /// `<br>`
    Br,
    /// `<hr>`
    Hr,
    /// `<strong>` or `<b>`
    #[strum(to_string = "strong", serialize = "b")]
    Strong,
    /// `<em>` or `<i>`
    #[strum(to_string = "em", serialize = "i")]
    Em,
    /// Sectioning and grouping elements that only hold other content.
    #[strum(
        to_string = "div",
        serialize = "section",
        serialize = "article",
        serialize = "main",
        serialize = "header",
        serialize = "footer",
        serialize = "aside",
        serialize = "nav",
        serialize = "figure",
        serialize = "figcaption",
        serialize = "center",
        serialize = "address",
        serialize = "dl",
        serialize = "dt",
        serialize = "dd",
        serialize = "table",
        serialize = "caption",
        serialize = "thead",
        serialize = "tbody",
        serialize = "tfoot",
        serialize = "tr",
        serialize = "td",
        serialize = "th",
        serialize = "form",
        serialize = "fieldset",
        serialize = "details",
        serialize = "summary"
    )]
    Container,
    /// Elements whose content is never shown as document text.
    #[strum(
        to_string = "script",
        serialize = "head",
        serialize = "title",
        serialize = "style",
        serialize = "template",
        serialize = "noscript",
        serialize = "iframe",
        serialize = "object",
        serialize = "svg",
        serialize = "meta",
        serialize = "link"
    )]
    Stripped,
    /// Any other element: transparent.
    Other,
}

impl ElementKind {
    /// Classify a tag name.
    #[must_use]
    pub fn from_tag(tag_name: &str) -> Self {
        Self::from_str(tag_name).unwrap_or(Self::Other)
    }

    /// The heading level for `h1`..`h6`.
    #[must_use]
    pub const fn heading_level(self) -> Option<HeadingLevel> {
        let level = match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
            _ => return None,
        };
        HeadingLevel::new(level)
    }

    /// Elements that start a new line of content.
    ///
    /// A container holding one of these is walked child by child instead of
    /// being read as one paragraph.
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            Self::P
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Ul
                | Self::Ol
                | Self::Li
                | Self::Blockquote
                | Self::Pre
                | Self::Hr
                | Self::Container
        )
    }
}
