//! Structured documents for a rich-text editor, read from and written to HTML.
//!
//! # Overview
//!
//! Stored or pasted HTML is parsed into a [`Document`]: an ordered list of
//! [`Block`]s (paragraphs, headings, lists, quotes, code, images, links and
//! empty spacers). The host editor edits the blocks, and the serializer turns
//! them back into HTML for storage and display.
//!
//! Parsing and serializing are pure, synchronous and total. Malformed input
//! degrades to a lower-fidelity document; it never fails.
//!
//! ```
//! use folio_document::{Block, parse, serialize};
//!
//! let doc = parse("<h2>Pool Hours</h2><p>9am to 6pm</p>");
//! assert_eq!(doc.len(), 2);
//! assert!(matches!(doc[0], Block::Heading { .. }));
//! assert_eq!(serialize(&doc), "<p>Pool Hours</p><p>9am to 6pm</p>");
//! ```
//!
//! # Crates
//!
//! - `folio-html` tokenizes and builds the HTML into a DOM tree
//! - `folio-dom` holds that tree
//! - this crate maps the tree onto blocks and back
//!
//! Degradations (skipped images, depth limits, fallbacks) are reported
//! through the `log` facade under the `folio::` targets.

/// Block nodes.
pub mod block;
/// The document tree and its builder sink.
pub mod document;
/// Element classification.
pub mod element;
/// Errors for fallible edges.
pub mod error;
/// Inline spans and marks.
pub mod inline;
/// Parse and serialize options.
pub mod options;
mod parser;
mod serializer;
/// Editing sessions.
pub mod session;

pub use folio_dom as dom;
pub use folio_html as html;

pub use block::{Block, BlockKind, HeadingLevel, ImageBlock};
pub use document::{BlockSink, Document};
pub use element::ElementKind;
pub use error::{ConfigError, TreeError};
pub use inline::{InlineRun, Marks, Span};
pub use options::{
    BlockOutput, DEFAULT_MAX_DEPTH, EditorConfig, HeadingOutput, InlineOutput, ParseOptions,
    SerializeOptions,
};
pub use parser::{LOG_TARGET, parse_into};
pub use serializer::{escape_text, serialize_blocks, serialize_with};
pub use session::Session;

/// Parse `html` with default options.
#[must_use]
pub fn parse(html: &str) -> Document {
    parse_with(html, &ParseOptions::default())
}

/// Parse `html` with `options`.
#[must_use]
pub fn parse_with(html: &str, options: &ParseOptions) -> Document {
    let mut document = Document::new();
    let _ = parse_into(html, options, &mut document);
    document
}

/// Serialize `document` with default options.
#[must_use]
pub fn serialize(document: &Document) -> String {
    serialize_with(document, &SerializeOptions::default())
}
