//! Block nodes: the root-level units of a document.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::TreeError;
use crate::inline::InlineRun;

/// A heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// The level, or `None` outside `1..=6`.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if matches!(level, 1..=6) {
            Some(Self(level))
        } else {
            None
        }
    }

    /// The numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = TreeError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(TreeError::InvalidHeadingLevel(level))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// An image, optionally wrapped in a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageBlock {
    /// Image source URL.
    pub src: String,
    /// Alternative text; empty when the source had none.
    #[serde(default)]
    pub alt: String,
    /// The `width` attribute as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// The `height` attribute as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Target of the link wrapping the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_href: Option<String>,
}

impl ImageBlock {
    /// An unlinked image with no alternative text.
    #[must_use]
    pub fn new(src: &str) -> Self {
        Self {
            src: src.to_string(),
            ..Self::default()
        }
    }
}

/// One root-level node of a document.
///
/// Position in the document is the only address a block has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A line of prose.
    Paragraph {
        /// The paragraph's text.
        inline: InlineRun,
    },
    /// A heading. The level survives parsing; whether it survives
    /// serialization is a [`crate::HeadingOutput`] choice.
    Heading {
        /// `1..=6`
        level: HeadingLevel,
        /// The heading's text.
        inline: InlineRun,
    },
    /// A bulleted or numbered list of single-line items.
    List {
        /// `<ol>` rather than `<ul>`.
        ordered: bool,
        /// One run per item. Items never hold nested blocks.
        items: Vec<InlineRun>,
    },
    /// A quotation.
    Quote {
        /// The quoted text.
        inline: InlineRun,
    },
    /// Preformatted or code text, kept verbatim apart from line trimming.
    CodeSpan {
        /// Lines separated by `'\n'`.
        text: String,
    },
    /// An image.
    Image(ImageBlock),
    /// A link standing on its own line.
    Link {
        /// Link target.
        href: String,
        /// Visible text; the href itself when the source had none.
        text: String,
    },
    /// A structurally empty source element, kept for vertical spacing.
    Empty,
}

/// The variant of a [`Block`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    /// [`Block::Paragraph`]
    Paragraph,
    /// [`Block::Heading`]
    Heading,
    /// [`Block::List`]
    List,
    /// [`Block::Quote`]
    Quote,
    /// [`Block::CodeSpan`]
    CodeSpan,
    /// [`Block::Image`]
    Image,
    /// [`Block::Link`]
    Link,
    /// [`Block::Empty`]
    Empty,
}

impl Block {
    /// A paragraph of unformatted text.
    #[must_use]
    pub fn paragraph(text: &str) -> Self {
        Self::Paragraph {
            inline: InlineRun::plain(text),
        }
    }

    /// A heading of unformatted text, or `None` for a level outside `1..=6`.
    #[must_use]
    pub fn heading(level: u8, text: &str) -> Option<Self> {
        Some(Self::Heading {
            level: HeadingLevel::new(level)?,
            inline: InlineRun::plain(text),
        })
    }

    /// A list of unformatted items.
    #[must_use]
    pub fn list(ordered: bool, items: &[&str]) -> Self {
        Self::List {
            ordered,
            items: items.iter().map(|item| InlineRun::plain(item)).collect(),
        }
    }

    /// Which variant this is.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Paragraph { .. } => BlockKind::Paragraph,
            Self::Heading { .. } => BlockKind::Heading,
            Self::List { .. } => BlockKind::List,
            Self::Quote { .. } => BlockKind::Quote,
            Self::CodeSpan { .. } => BlockKind::CodeSpan,
            Self::Image(_) => BlockKind::Image,
            Self::Link { .. } => BlockKind::Link,
            Self::Empty => BlockKind::Empty,
        }
    }

    /// The block's inline run, for the variants that have one.
    #[must_use]
    pub const fn inline(&self) -> Option<&InlineRun> {
        match self {
            Self::Paragraph { inline } | Self::Heading { inline, .. } | Self::Quote { inline } => {
                Some(inline)
            }
            _ => None,
        }
    }

    /// The text a reader sees, without formatting. List items are joined
    /// with newlines; images contribute their alternative text.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Paragraph { inline } | Self::Heading { inline, .. } | Self::Quote { inline } => {
                inline.plain_text()
            }
            Self::List { items, .. } => items
                .iter()
                .map(InlineRun::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::CodeSpan { text } | Self::Link { text, .. } => text.clone(),
            Self::Image(image) => image.alt.clone(),
            Self::Empty => String::new(),
        }
    }
}
